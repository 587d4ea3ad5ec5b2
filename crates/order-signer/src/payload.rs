use {
    alloy::primitives::Address,
    model::{
        order::OrderData,
        signature::{EcdsaSignature, SigningScheme},
    },
    serde::Serialize,
    serde_with::{DisplayFromStr, serde_as},
};

/// A signed order in the shape the order book API accepts for order creation.
///
/// Only ever serialized. Flattened fields can't be deserialized from JSON
/// numbers that keep their literal text.
#[serde_as]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedOrderPayload {
    #[serde(flatten)]
    pub order: OrderData,
    pub signing_scheme: SigningScheme,
    pub signature: EcdsaSignature,
    /// Checksummed owner address.
    #[serde_as(as = "DisplayFromStr")]
    pub from: Address,
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        alloy::primitives::{B256, U256, address},
        serde_json::json,
    };

    #[test]
    fn serialization() {
        let payload = SignedOrderPayload {
            order: OrderData {
                sell_amount: U256::from(1000),
                valid_to: 123,
                ..Default::default()
            },
            signing_scheme: SigningScheme::Eip712,
            signature: EcdsaSignature {
                r: B256::repeat_byte(1),
                s: B256::repeat_byte(2),
                v: 27,
            },
            from: address!("70997970C51812dc3A010C7d01b50e0d17dc79C8"),
        };
        let value = json!(payload);

        assert_eq!(value["sellAmount"], json!("1000"));
        assert_eq!(value["buyAmount"], json!("0"));
        assert_eq!(value["validTo"], json!(123));
        assert_eq!(value["receiver"], json!(null));
        assert_eq!(value["kind"], json!("sell"));
        assert_eq!(value["signingScheme"], json!("eip712"));
        assert_eq!(value["signature"].as_str().unwrap().len(), 132);
        assert_eq!(
            value["from"],
            json!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8")
        );
        assert_eq!(
            serde_json::from_value::<EcdsaSignature>(value["signature"].clone()).unwrap(),
            payload.signature
        );
        assert_eq!(
            serde_json::from_value::<OrderData>(value).unwrap(),
            payload.order
        );
    }
}

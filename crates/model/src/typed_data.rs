//! The EIP-712 typed data document an order gets signed as.
//!
//! The type schema is a constant table that mirrors `GPv2Order.Data` of the
//! settlement contract. Field order and declared types are part of the hash,
//! so the table must never be derived from whatever fields an input happens to
//! carry.

use {
    crate::{DomainSeparator, order::OrderData, signature::hashed_eip712_message},
    alloy::primitives::Address,
    serde::Serialize,
    std::collections::BTreeMap,
};

/// Name of the settlement contract's EIP-712 domain.
pub const DOMAIN_NAME: &str = "Gnosis Protocol";
/// Version of the settlement contract's EIP-712 domain.
pub const DOMAIN_VERSION: &str = "v2";

pub const DOMAIN_TYPE: &str = "EIP712Domain";
pub const ORDER_TYPE: &str = "Order";

/// A single member of an EIP-712 struct type.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct TypedField {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub ty: &'static str,
}

const fn field(name: &'static str, ty: &'static str) -> TypedField {
    TypedField { name, ty }
}

pub const DOMAIN_FIELDS: &[TypedField] = &[
    field("name", "string"),
    field("version", "string"),
    field("chainId", "uint256"),
    field("verifyingContract", "address"),
];

// See
// <https://github.com/cowprotocol/contracts/blob/v1.1.2/src/contracts/libraries/GPv2Order.sol#L11>
pub const ORDER_FIELDS: &[TypedField] = &[
    field("sellToken", "address"),
    field("buyToken", "address"),
    field("receiver", "address"),
    field("sellAmount", "uint256"),
    field("buyAmount", "uint256"),
    field("validTo", "uint32"),
    field("appData", "bytes32"),
    field("feeAmount", "uint256"),
    field("kind", "string"),
    field("partiallyFillable", "bool"),
    field("sellTokenBalance", "string"),
    field("buyTokenBalance", "string"),
];

/// Returns `encodeType` of a struct without references to other structs, e.g.
/// `EIP712Domain(string name,string version,uint256 chainId,address
/// verifyingContract)`.
///
/// https://eips.ethereum.org/EIPS/eip-712#definition-of-encodetype
pub fn encode_type(name: &str, fields: &[TypedField]) -> String {
    let members = fields
        .iter()
        .map(|field| format!("{} {}", field.ty, field.name))
        .collect::<Vec<_>>();
    format!("{name}({})", members.join(","))
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub name: &'static str,
    pub version: &'static str,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl Domain {
    pub fn new(chain_id: u64, verifying_contract: Address) -> Self {
        Self {
            name: DOMAIN_NAME,
            version: DOMAIN_VERSION,
            chain_id,
            verifying_contract,
        }
    }

    pub fn separator(&self) -> DomainSeparator {
        DomainSeparator::new(self.chain_id, self.verifying_contract)
    }
}

/// An order as EIP-712 typed data, serializing to the JSON shape accepted by
/// `eth_signTypedData_v4`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedDataDocument {
    pub domain: Domain,
    pub types: BTreeMap<&'static str, &'static [TypedField]>,
    pub primary_type: &'static str,
    pub message: OrderData,
}

impl TypedDataDocument {
    pub fn new(chain_id: u64, verifying_contract: Address, order: OrderData) -> Self {
        Self {
            domain: Domain::new(chain_id, verifying_contract),
            types: BTreeMap::from([(DOMAIN_TYPE, DOMAIN_FIELDS), (ORDER_TYPE, ORDER_FIELDS)]),
            primary_type: ORDER_TYPE,
            // Typed data has no notion of optional members, the contract reads
            // the zero address as "pay the owner".
            message: OrderData {
                receiver: Some(order.receiver.unwrap_or_default()),
                ..order
            },
        }
    }

    pub fn domain_separator(&self) -> DomainSeparator {
        self.domain.separator()
    }

    pub fn struct_hash(&self) -> [u8; 32] {
        self.message.hash_struct()
    }

    /// The digest that gets signed.
    pub fn signing_hash(&self) -> [u8; 32] {
        hashed_eip712_message(&self.domain_separator(), &self.struct_hash())
    }
}

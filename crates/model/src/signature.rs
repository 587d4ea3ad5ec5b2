use {
    crate::DomainSeparator,
    alloy::{
        primitives::{Address, B256, keccak256},
        signers::{SignerSync, local::PrivateKeySigner},
    },
    anyhow::{Context as _, Result},
    serde::{Deserialize, Serialize, de},
    std::fmt,
};

/// The ECDSA based schemes an order can be signed with off-chain.
#[derive(Eq, PartialEq, Clone, Copy, Debug, Default, Deserialize, Serialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SigningScheme {
    /// The order struct is signed according to EIP-712.
    ///
    /// https://eips.ethereum.org/EIPS/eip-712
    #[default]
    Eip712,
    /// The order hash is signed according to EIP-191's personal_sign signature
    /// format.
    ///
    /// https://eips.ethereum.org/EIPS/eip-191
    EthSign,
}

/// Returns the EIP-712 digest of a struct hash for the given domain:
/// `keccak256("\x19\x01" ‖ domainSeparator ‖ hashStruct(message))`.
pub fn hashed_eip712_message(
    domain_separator: &DomainSeparator,
    struct_hash: &[u8; 32],
) -> [u8; 32] {
    let mut message = [0u8; 66];
    message[0..2].copy_from_slice(&[0x19, 0x01]);
    message[2..34].copy_from_slice(&domain_separator.0);
    message[34..66].copy_from_slice(struct_hash);
    keccak256(message).0
}

fn hashed_ethsign_message(domain_separator: &DomainSeparator, struct_hash: &[u8; 32]) -> [u8; 32] {
    let mut message = [0u8; 60];
    message[..28].copy_from_slice(b"\x19Ethereum Signed Message:\n32");
    message[28..].copy_from_slice(&hashed_eip712_message(domain_separator, struct_hash));
    keccak256(message).0
}

/// Returns the message used for signing and recovery for the specified
/// struct hash.
///
/// The signing message depends on the signature scheme that was used.
pub fn hashed_signing_message(
    signing_scheme: SigningScheme,
    domain_separator: &DomainSeparator,
    struct_hash: &[u8; 32],
) -> [u8; 32] {
    match signing_scheme {
        SigningScheme::Eip712 => hashed_eip712_message(domain_separator, struct_hash),
        SigningScheme::EthSign => hashed_ethsign_message(domain_separator, struct_hash),
    }
}

#[derive(Eq, PartialEq, Clone, Copy, Debug, Default, Hash)]
pub struct EcdsaSignature {
    pub r: B256,
    pub s: B256,
    pub v: u8,
}

impl EcdsaSignature {
    /// r + s + v
    pub fn to_bytes(self) -> [u8; 65] {
        let mut bytes = [0u8; 65];
        bytes[..32].copy_from_slice(self.r.as_slice());
        bytes[32..64].copy_from_slice(self.s.as_slice());
        bytes[64] = self.v;
        bytes
    }

    pub fn from_bytes(bytes: &[u8; 65]) -> Self {
        EcdsaSignature {
            r: B256::from_slice(&bytes[..32]),
            s: B256::from_slice(&bytes[32..64]),
            v: bytes[64],
        }
    }

    pub fn recover(
        &self,
        signing_scheme: SigningScheme,
        domain_separator: &DomainSeparator,
        struct_hash: &[u8; 32],
    ) -> Result<Address> {
        let message = hashed_signing_message(signing_scheme, domain_separator, struct_hash);
        let signature = alloy::primitives::Signature::from_raw(&self.to_bytes())
            .context("unexpectedly invalid signature")?;
        Ok(signature.recover_address_from_prehash(&B256::from(message))?)
    }

    pub fn sign(
        signing_scheme: SigningScheme,
        domain_separator: &DomainSeparator,
        struct_hash: &[u8; 32],
        key: &PrivateKeySigner,
    ) -> Result<Self> {
        let message = hashed_signing_message(signing_scheme, domain_separator, struct_hash);
        let signature = key
            .sign_hash_sync(&B256::from(message))
            .context("failed to sign message")?;
        // `as_bytes` encodes the recovery id as 27 or 28 which is what the
        // settlement contract expects.
        Ok(Self::from_bytes(&signature.as_bytes()))
    }
}

impl Serialize for EcdsaSignature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&const_hex::encode_prefixed(self.to_bytes()))
    }
}

impl<'de> Deserialize<'de> for EcdsaSignature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct Visitor {}
        impl de::Visitor<'_> for Visitor {
            type Value = EcdsaSignature;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(
                    formatter,
                    "the 65 ecdsa signature bytes as a hex encoded string, ordered as r, s, v, \
                     where v is either 27 or 28"
                )
            }

            fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                let s = s.strip_prefix("0x").ok_or_else(|| {
                    de::Error::custom(format!(
                        "{s:?} can't be decoded as hex ecdsa signature because it does not start \
                         with '0x'"
                    ))
                })?;
                let mut bytes = [0u8; 65];
                const_hex::decode_to_slice(s, &mut bytes).map_err(|err| {
                    de::Error::custom(format!(
                        "failed to decode {s:?} as hex ecdsa signature: {err}"
                    ))
                })?;
                Ok(EcdsaSignature::from_bytes(&bytes))
            }
        }

        deserializer.deserialize_str(Visitor {})
    }
}

#[cfg(test)]
mod tests {
    use {super::*, alloy::primitives::b256, serde_json::json};

    // Private key of the second default anvil account.
    const KEY: B256 = b256!("59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d");

    #[test]
    fn sign_and_recover_round_trip() {
        let key = PrivateKeySigner::from_bytes(&KEY).unwrap();
        let domain = DomainSeparator([7; 32]);
        let struct_hash = [42; 32];

        for scheme in [SigningScheme::Eip712, SigningScheme::EthSign] {
            let signature = EcdsaSignature::sign(scheme, &domain, &struct_hash, &key).unwrap();
            assert!(signature.v == 27 || signature.v == 28);
            assert_eq!(
                signature.recover(scheme, &domain, &struct_hash).unwrap(),
                key.address()
            );
            assert_ne!(
                signature
                    .recover(scheme, &DomainSeparator([8; 32]), &struct_hash)
                    .unwrap(),
                key.address()
            );
        }
    }

    #[test]
    fn signing_is_deterministic() {
        let key = PrivateKeySigner::from_bytes(&KEY).unwrap();
        let domain = DomainSeparator::default();
        let sign = || EcdsaSignature::sign(SigningScheme::Eip712, &domain, &[1; 32], &key).unwrap();
        assert_eq!(sign(), sign());
    }

    #[test]
    fn schemes_produce_different_messages() {
        let domain = DomainSeparator([1; 32]);
        assert_ne!(
            hashed_signing_message(SigningScheme::Eip712, &domain, &[2; 32]),
            hashed_signing_message(SigningScheme::EthSign, &domain, &[2; 32]),
        );
    }

    #[test]
    fn serialize_and_back() {
        let signature = EcdsaSignature {
            r: B256::repeat_byte(1),
            s: B256::repeat_byte(2),
            v: 28,
        };
        let value = json!(signature);
        assert_eq!(
            value,
            json!(
                "0x\
                 0101010101010101010101010101010101010101010101010101010101010101\
                 0202020202020202020202020202020202020202020202020202020202020202\
                 1c"
            )
        );
        assert_eq!(
            serde_json::from_value::<EcdsaSignature>(value).unwrap(),
            signature
        );
        assert_eq!(json!(SigningScheme::Eip712), json!("eip712"));
        assert_eq!(json!(SigningScheme::EthSign), json!("ethsign"));
    }

    #[test]
    fn deserialization_errors() {
        for value in [json!("0x0102"), json!(1234), json!("01".repeat(65))] {
            assert!(serde_json::from_value::<EcdsaSignature>(value).is_err());
        }
    }
}

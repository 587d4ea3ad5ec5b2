use {
    alloy::{
        primitives::{Address, B256},
        signers::local::PrivateKeySigner,
    },
    anyhow::Result,
    model::{
        signature::{EcdsaSignature, SigningScheme},
        typed_data::TypedDataDocument,
    },
    std::fmt::{self, Debug, Formatter},
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("private key is not valid hex: {0}")]
    Hex(#[from] const_hex::FromHexError),
    #[error("private key must be 32 bytes but is {0} bytes")]
    Length(usize),
    #[error("private key is not a valid secp256k1 secret")]
    Scalar,
}

/// Owner account signing orders with a local private key.
pub struct Signer(PrivateKeySigner);

impl Signer {
    /// Parses a hex encoded 32 byte private key, with or without `0x` prefix.
    pub fn from_hex(key: &str) -> Result<Self, KeyError> {
        let key = key.trim();
        let bytes = const_hex::decode(key.strip_prefix("0x").unwrap_or(key))?;
        let bytes = <[u8; 32]>::try_from(bytes.as_slice())
            .map_err(|_| KeyError::Length(bytes.len()))?;
        PrivateKeySigner::from_bytes(&B256::from(bytes))
            .map(Self)
            .map_err(|_| KeyError::Scalar)
    }

    pub fn address(&self) -> Address {
        self.0.address()
    }

    /// Signs the typed data document with the given scheme.
    pub fn sign(
        &self,
        signing_scheme: SigningScheme,
        document: &TypedDataDocument,
    ) -> Result<EcdsaSignature> {
        EcdsaSignature::sign(
            signing_scheme,
            &document.domain_separator(),
            &document.struct_hash(),
            &self.0,
        )
    }
}

impl Debug for Signer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Signer").field(&self.address()).finish()
    }
}

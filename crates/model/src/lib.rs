//! Contains models that are shared between the order signer and the
//! interaction builder.

pub mod app_id;
pub mod interaction;
pub mod order;
pub mod signature;
pub mod typed_data;
pub mod u256_decimal;

use {
    alloy::{
        primitives::{Address, B256, U256, keccak256},
        sol_types::SolValue,
    },
    std::{fmt, sync::LazyLock},
};

#[derive(Copy, Clone, Default, Eq, Hash, PartialEq)]
pub struct DomainSeparator(pub [u8; 32]);

impl fmt::Debug for DomainSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&const_hex::encode(self.0))
    }
}

impl DomainSeparator {
    pub fn new(chain_id: u64, contract_address: Address) -> Self {
        /// The EIP-712 domain name used for computing the domain separator.
        static DOMAIN_NAME: LazyLock<B256> =
            LazyLock::new(|| keccak256(typed_data::DOMAIN_NAME));

        /// The EIP-712 domain version used for computing the domain separator.
        static DOMAIN_VERSION: LazyLock<B256> =
            LazyLock::new(|| keccak256(typed_data::DOMAIN_VERSION));

        /// The EIP-712 domain type used computing the domain separator.
        static DOMAIN_TYPE_HASH: LazyLock<B256> = LazyLock::new(|| {
            keccak256(typed_data::encode_type(
                typed_data::DOMAIN_TYPE,
                typed_data::DOMAIN_FIELDS,
            ))
        });

        let encoded = (
            *DOMAIN_TYPE_HASH,
            *DOMAIN_NAME,
            *DOMAIN_VERSION,
            U256::from(chain_id),
            contract_address,
        )
            .abi_encode();

        Self(keccak256(encoded).0)
    }
}

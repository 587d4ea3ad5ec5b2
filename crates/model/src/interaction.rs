use {
    crate::u256_decimal::DecimalU256,
    alloy::primitives::{Address, Bytes, U256},
    serde::{Deserialize, Serialize},
    serde_with::serde_as,
};

/// A single call the settlement contract (or its trampoline) executes.
#[serde_as]
#[derive(Eq, PartialEq, Clone, Debug, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionData {
    pub target: Address,
    pub call_data: Bytes,
    #[serde_as(as = "DecimalU256")]
    pub value: U256,
}

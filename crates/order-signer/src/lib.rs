pub mod arguments;
pub mod params;
pub mod payload;
pub mod signer;

use {
    crate::{
        params::{RawOrder, ValidationError},
        payload::SignedOrderPayload,
        signer::{KeyError, Signer},
    },
    alloy::primitives::{Address, address},
    model::{signature::SigningScheme, typed_data::TypedDataDocument},
    serde_json::Value,
    thiserror::Error,
};

/// Chain id of a local development node.
pub const DEFAULT_CHAIN_ID: u64 = 31337;
/// Settlement contract address of a local development deployment.
pub const DEFAULT_SETTLEMENT: Address = address!("610178dA211FEF7D417bC0e6FeD39F05609AD788");

/// Domain and scheme an order is signed for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    pub chain_id: u64,
    pub settlement: Address,
    pub signing_scheme: SigningScheme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID,
            settlement: DEFAULT_SETTLEMENT,
            signing_scheme: SigningScheme::Eip712,
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("order is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Key(#[from] KeyError),
    #[error(transparent)]
    Signing(#[from] anyhow::Error),
}

/// Parses the JSON order and signs it. See [`sign_order`].
pub fn sign_order_json(
    private_key: &str,
    order: &str,
    defaults: &Config,
) -> Result<SignedOrderPayload, Error> {
    let raw = match serde_json::from_str(order)? {
        Value::Object(raw) => raw,
        other => {
            return Err(ValidationError::new(
                "order",
                format!("expected a JSON object but got {other}"),
            )
            .into());
        }
    };
    sign_order(private_key, raw, defaults)
}

/// Normalizes the raw order, builds its typed data document and signs it.
///
/// `chainId` and `settlement` in the raw order take precedence over the
/// defaults.
pub fn sign_order(
    private_key: &str,
    raw: RawOrder,
    defaults: &Config,
) -> Result<SignedOrderPayload, Error> {
    let (raw, config) = params::split_config(raw, defaults)?;
    let order = params::normalize(raw)?;
    let signer = Signer::from_hex(private_key)?;

    let document = TypedDataDocument::new(config.chain_id, config.settlement, order);
    let signature = signer.sign(config.signing_scheme, &document)?;
    let owner = signer.address();
    tracing::info!(
        uid = %order.uid(&document.domain_separator(), &owner),
        %owner,
        chain_id = config.chain_id,
        "signed order"
    );

    Ok(SignedOrderPayload {
        order,
        signing_scheme: config.signing_scheme,
        signature,
        from: owner,
    })
}

pub fn run(args: &arguments::Arguments) -> Result<String, Error> {
    let config = Config {
        chain_id: args.chain_id,
        settlement: args.settlement,
        signing_scheme: args.signing_scheme,
    };
    let payload = sign_order_json(&args.private_key, &args.order, &config)?;
    Ok(serde_json::to_string_pretty(&payload)?)
}

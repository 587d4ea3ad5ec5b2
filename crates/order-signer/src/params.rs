//! Normalization of loosely typed order parameters.
//!
//! Orders reach the signer as JSON objects written by hand or by scripts, so
//! amounts show up as numbers or strings, booleans as `"yes"`, and missing
//! values as `null` or the literal string `"null"`. Everything is coerced into
//! an [`OrderData`] here, before any hashing happens.

use {
    crate::Config,
    alloy::primitives::{Address, U256},
    model::{
        app_id::AppId,
        order::{BuyTokenDestination, OrderData, OrderKind, SellTokenSource},
        typed_data::ORDER_FIELDS,
    },
    serde_json::{Map, Value},
    std::str::FromStr,
    thiserror::Error,
};

/// Order parameters as they were provided by the caller.
pub type RawOrder = Map<String, Value>;

pub const SELL_TOKEN: &str = "sellToken";
pub const BUY_TOKEN: &str = "buyToken";
pub const RECEIVER: &str = "receiver";
pub const SELL_AMOUNT: &str = "sellAmount";
pub const BUY_AMOUNT: &str = "buyAmount";
pub const VALID_TO: &str = "validTo";
pub const APP_DATA: &str = "appData";
pub const FEE_AMOUNT: &str = "feeAmount";
pub const KIND: &str = "kind";
pub const PARTIALLY_FILLABLE: &str = "partiallyFillable";
pub const SELL_TOKEN_BALANCE: &str = "sellTokenBalance";
pub const BUY_TOKEN_BALANCE: &str = "buyTokenBalance";
pub const CHAIN_ID: &str = "chainId";
pub const SETTLEMENT: &str = "settlement";

/// Fields without which no order can be signed.
pub const REQUIRED: [&str; 3] = [SELL_AMOUNT, BUY_AMOUNT, VALID_TO];

#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("invalid order field {field:?}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }

    fn missing(field: &'static str) -> Self {
        Self::new(field, "missing")
    }
}

/// Order parameters after coercion but before the required fields and the
/// remaining typed fields have been checked.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalizedFields {
    pub sell_amount: Option<U256>,
    pub buy_amount: Option<U256>,
    pub valid_to: Option<u32>,
    pub fee_amount: U256,
    pub partially_fillable: bool,
    /// Every other non-null field, passed through unchanged.
    pub other: Map<String, Value>,
}

/// Normalizes raw order parameters into an order.
pub fn normalize(raw: RawOrder) -> Result<OrderData, ValidationError> {
    normalize_fields(raw)?.into_order()
}

/// Coerces numeric and boolean fields and drops null values.
///
/// Required numeric fields that are present but not numeric are rejected here.
/// Missing required fields are only rejected by
/// [`NormalizedFields::into_order`].
pub fn normalize_fields(raw: RawOrder) -> Result<NormalizedFields, ValidationError> {
    let mut fields = NormalizedFields::default();
    for (name, value) in raw {
        if is_null(&value) {
            continue;
        }
        match name.as_str() {
            SELL_AMOUNT => fields.sell_amount = Some(required_integer(SELL_AMOUNT, &value)?),
            BUY_AMOUNT => fields.buy_amount = Some(required_integer(BUY_AMOUNT, &value)?),
            VALID_TO => {
                let valid_to = required_integer(VALID_TO, &value)?;
                fields.valid_to = Some(u32::try_from(valid_to).map_err(|_| {
                    ValidationError::new(VALID_TO, format!("{valid_to} does not fit into 32 bits"))
                })?);
            }
            FEE_AMOUNT => fields.fee_amount = optional_integer(FEE_AMOUNT, &value),
            PARTIALLY_FILLABLE => fields.partially_fillable = parse_bool(&value),
            _ => {
                fields.other.insert(name, value);
            }
        }
    }
    Ok(fields)
}

impl NormalizedFields {
    /// Checks that the required fields are set and decodes the pass-through
    /// fields into their typed representation.
    pub fn into_order(self) -> Result<OrderData, ValidationError> {
        let sell_amount = self
            .sell_amount
            .ok_or_else(|| ValidationError::missing(SELL_AMOUNT))?;
        let buy_amount = self
            .buy_amount
            .ok_or_else(|| ValidationError::missing(BUY_AMOUNT))?;
        let valid_to = self
            .valid_to
            .ok_or_else(|| ValidationError::missing(VALID_TO))?;

        for name in self.other.keys() {
            if !ORDER_FIELDS.iter().any(|field| field.name == name) {
                tracing::debug!(field = %name, "ignoring unknown order field");
            }
        }

        Ok(OrderData {
            sell_token: parse_field(&self.other, SELL_TOKEN)?
                .ok_or_else(|| ValidationError::missing(SELL_TOKEN))?,
            buy_token: parse_field(&self.other, BUY_TOKEN)?
                .ok_or_else(|| ValidationError::missing(BUY_TOKEN))?,
            receiver: parse_field::<Address>(&self.other, RECEIVER)?,
            sell_amount,
            buy_amount,
            valid_to,
            app_data: parse_field::<AppId>(&self.other, APP_DATA)?.unwrap_or_default(),
            fee_amount: self.fee_amount,
            kind: parse_field::<OrderKind>(&self.other, KIND)?
                .ok_or_else(|| ValidationError::missing(KIND))?,
            partially_fillable: self.partially_fillable,
            sell_token_balance: parse_field::<SellTokenSource>(&self.other, SELL_TOKEN_BALANCE)?
                .unwrap_or_default(),
            buy_token_balance: parse_field::<BuyTokenDestination>(
                &self.other,
                BUY_TOKEN_BALANCE,
            )?
            .unwrap_or_default(),
        })
    }
}

/// Removes `chainId` and `settlement` from the raw order and returns them as
/// signing configuration, falling back to `defaults`.
pub fn split_config(
    mut raw: RawOrder,
    defaults: &Config,
) -> Result<(RawOrder, Config), ValidationError> {
    let chain_id = match raw.remove(CHAIN_ID).filter(|value| !is_null(value)) {
        None => defaults.chain_id,
        Some(value) => match parse_integer(&value).and_then(|id| u64::try_from(id).ok()) {
            Some(chain_id) => chain_id,
            None => {
                tracing::warn!(%value, "chain id is not a 64 bit integer, using 0");
                0
            }
        },
    };

    let mut settlement_only = RawOrder::new();
    if let Some(settlement) = raw.remove(SETTLEMENT) {
        settlement_only.insert(SETTLEMENT.to_owned(), settlement);
    }
    let settlement =
        parse_field::<Address>(&settlement_only, SETTLEMENT)?.unwrap_or(defaults.settlement);

    let config = Config {
        chain_id,
        settlement,
        signing_scheme: defaults.signing_scheme,
    };
    Ok((raw, config))
}

/// Absent values, JSON `null` and the string `"null"` are all treated as "no
/// value".
fn is_null(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s == "null",
        _ => false,
    }
}

/// Parses a non-negative integer from a JSON number, a decimal string or a
/// `0x` prefixed hex string.
///
/// JSON numbers keep their literal text, so integers above `u64::MAX` parse
/// exactly while fractions, exponents and negative numbers are rejected.
pub fn parse_integer(value: &Value) -> Option<U256> {
    match value {
        Value::Number(number) => U256::from_str_radix(&number.to_string(), 10).ok(),
        Value::String(s) => {
            let s = s.trim();
            match s.strip_prefix("0x") {
                Some("") => None,
                Some(hex) => U256::from_str_radix(hex, 16).ok(),
                None if s.is_empty() => None,
                None => U256::from_str_radix(s, 10).ok(),
            }
        }
        _ => None,
    }
}

fn required_integer(field: &'static str, value: &Value) -> Result<U256, ValidationError> {
    parse_integer(value).ok_or_else(|| {
        ValidationError::new(field, format!("{value} is not a non-negative integer"))
    })
}

fn optional_integer(field: &'static str, value: &Value) -> U256 {
    parse_integer(value).unwrap_or_else(|| {
        tracing::warn!(field, %value, "not a non-negative integer, using 0");
        U256::ZERO
    })
}

/// `true`, `"true"`, `"1"` and `"yes"` (in any case) are true, everything else
/// is false.
pub fn parse_bool(value: &Value) -> bool {
    let text = match value {
        Value::Bool(value) => return *value,
        Value::String(s) => s.trim().to_ascii_lowercase(),
        Value::Number(number) => number.to_string(),
        _ => return false,
    };
    matches!(text.as_str(), "true" | "1" | "yes")
}

fn parse_field<T>(
    fields: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<T>, ValidationError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(value) = fields.get(field).filter(|value| !is_null(value)) else {
        return Ok(None);
    };
    let Value::String(text) = value else {
        return Err(ValidationError::new(
            field,
            format!("expected a string but got {value}"),
        ));
    };
    text.trim()
        .parse()
        .map(Some)
        .map_err(|err| ValidationError::new(field, format!("{text:?} is invalid: {err}")))
}

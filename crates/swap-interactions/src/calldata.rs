//! Scraping of the router's quote report.
//!
//! The router prints a human readable report. The parts we need look like
//!
//! ```text
//! Calldata: 0x5ae401dc…
//!           Value: 0
//! ```
//!
//! where the call data is followed by a fixed trailer of 11 characters (line
//! break and indentation of the next line) before the `Value: ` marker.

use {
    alloy::primitives::{Bytes, U256},
    thiserror::Error,
};

pub const CALLDATA_MARKER: &str = "Calldata: ";
pub const VALUE_MARKER: &str = "Value: ";
/// Characters the router prints between the call data and the value marker.
pub const TRAILER_LEN: usize = 11;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ParseError {
    #[error("router output contains no {0:?} marker")]
    MissingMarker(&'static str),
    #[error("call data segment {0:?} is shorter than the expected trailer")]
    Truncated(String),
    #[error("call data {0:?} is not 0x prefixed hex")]
    InvalidCallData(String),
    #[error("value {0:?} is not a decimal amount")]
    InvalidValue(String),
}

/// Returns the hex call data the router reported.
///
/// Missing markers are an error rather than empty call data, an empty swap
/// interaction would silently do nothing.
pub fn extract_call_data(text: &str) -> Result<&str, ParseError> {
    let (_, rest) = text
        .split_once(CALLDATA_MARKER)
        .ok_or(ParseError::MissingMarker(CALLDATA_MARKER))?;
    let (segment, _) = rest
        .split_once(VALUE_MARKER)
        .ok_or(ParseError::MissingMarker(VALUE_MARKER))?;
    let end = segment
        .char_indices()
        .rev()
        .nth(TRAILER_LEN - 1)
        .map(|(index, _)| index)
        .ok_or_else(|| ParseError::Truncated(segment.to_owned()))?;
    Ok(&segment[..end])
}

/// Returns the amount of native token the router wants sent along with the
/// swap, read from the line starting after the first `Value: ` marker.
pub fn extract_value(text: &str) -> Result<U256, ParseError> {
    let (_, rest) = text
        .split_once(VALUE_MARKER)
        .ok_or(ParseError::MissingMarker(VALUE_MARKER))?;
    let line = rest.lines().next().unwrap_or_default().trim();
    match line {
        "" => Err(ParseError::InvalidValue(line.to_owned())),
        _ => U256::from_str_radix(line, 10).map_err(|_| ParseError::InvalidValue(line.to_owned())),
    }
}

/// Decodes extracted call data into bytes.
pub fn decode_call_data(call_data: &str) -> Result<Bytes, ParseError> {
    call_data
        .strip_prefix("0x")
        .and_then(|hex| const_hex::decode(hex).ok())
        .map(Bytes::from)
        .ok_or_else(|| ParseError::InvalidCallData(call_data.to_owned()))
}

/// The swap the router quoted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RouterQuote {
    pub call_data: Bytes,
    pub value: U256,
}

impl RouterQuote {
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let call_data = decode_call_data(extract_call_data(text)?)?;
        // The value belonging to the call data is the first one after it.
        let (_, after_call_data) = text
            .split_once(CALLDATA_MARKER)
            .ok_or(ParseError::MissingMarker(CALLDATA_MARKER))?;
        let value = extract_value(after_call_data)?;
        Ok(Self { call_data, value })
    }
}

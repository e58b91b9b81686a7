//! Payload codec for the rollup wire convention
//!
//! Request and response payloads travel as `0x`-prefixed hex strings.
//! Handlers work with plain UTF-8 text.

use thiserror::Error;

const HEX_PREFIX: &str = "0x";

#[derive(Debug, Error)]
pub enum DecodingError {
    #[error("payload is missing the 0x prefix: {0:?}")]
    MissingPrefix(String),

    #[error("payload is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("payload bytes are not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Decode a `0x`-prefixed hex payload into text
pub fn decode(payload: &str) -> Result<String, DecodingError> {
    let digits = payload
        .strip_prefix(HEX_PREFIX)
        .ok_or_else(|| DecodingError::MissingPrefix(payload.to_string()))?;

    let bytes = hex::decode(digits)?;
    Ok(String::from_utf8(bytes)?)
}

/// Encode text as a lowercase `0x`-prefixed hex payload
pub fn encode(text: &str) -> String {
    format!("{}{}", HEX_PREFIX, hex::encode(text.as_bytes()))
}

//! Typed codec for Ethereum JSON-RPC values.
//!
//! Every primitive here round-trips through a `0x`-prefixed hex JSON string:
//!
//! - [`Quantity`]: arbitrary precision unsigned integer, no leading zeros, `0` is `0x0`
//! - [`BlockRef`]: `earliest` / `latest` / `pending` or a concrete block number
//! - [`FixedBytes`]: fixed-length byte arrays ([`Address`] is 20 bytes, [`Hash`] is 32)
//! - [`Bytes`]: variable-length byte arrays, empty encodes as `0x`
//! - [`RawJson`]: opaque passthrough for shapes the engine never interprets
//!
//! Composite records ([`Block`], [`Transaction`], [`Log`], [`TransactionReceipt`]) are built
//! from those primitives and mirror the field names of the external protocol.
//!
//! The dispatcher and resolvers only see [`WireKind`] (what to decode a raw backend answer
//! into) and [`WireValue`] (the closed set of decoded shapes).

mod block_ref;
mod hex_bytes;
mod quantity;
mod records;
mod value;

pub use block_ref::BlockRef;
pub use hex_bytes::{Address, Bloom, Bytes, FixedBytes, Hash, Nonce};
pub use quantity::Quantity;
pub use records::{
    Block, BlockTransactions, ExtraFields, Log, RawJson, Transaction, TransactionReceipt,
};
pub use value::{WireKind, WireValue};

use thiserror::Error;

/// Errors raised while decoding or encoding wire values.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("hex string without 0x prefix: {0:?}")]
    MissingPrefix(String),

    #[error("invalid hex string: {0:?}")]
    InvalidHex(String),

    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("hex number with leading zero digits: {0:?}")]
    LeadingZero(String),

    #[error("unexpected json type: expected {expected}, found {found}")]
    UnexpectedType { expected: &'static str, found: &'static str },

    #[error("unsupported block tag: {0}")]
    UnsupportedTag(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Strips the `0x` (or `0X`) prefix from a hex string.
pub(crate) fn strip_hex_prefix(input: &str) -> Result<&str, WireError> {
    input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .ok_or_else(|| WireError::MissingPrefix(input.to_string()))
}

/// Short JSON type name used in [`WireError::UnexpectedType`].
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Borrows the string inside a JSON value or reports the actual type.
pub(crate) fn expect_str<'a>(
    value: &'a serde_json::Value,
    expected: &'static str,
) -> Result<&'a str, WireError> {
    value.as_str().ok_or(WireError::UnexpectedType { expected, found: json_type_name(value) })
}

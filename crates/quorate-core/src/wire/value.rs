use serde::Serialize;
use serde_json::Value;

use super::{
    expect_str, json_type_name, Address, Block, BlockRef, Bytes, Hash, Quantity, RawJson,
    Transaction, TransactionReceipt, WireError,
};
use crate::equality::StructuralEq;

/// Shape a raw backend answer (or request argument) is decoded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireKind {
    Bool,
    Quantity,
    BlockRef,
    Address,
    Hash,
    /// Storage slot index: up to 32 bytes of hex, leading zeros allowed, forwarded as a
    /// zero-padded 32-byte word.
    StorageSlot,
    Bytes,
    Raw,
    Block,
    Transaction,
    Receipt,
}

impl WireKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Quantity => "quantity",
            Self::BlockRef => "block reference",
            Self::Address => "address",
            Self::Hash => "hash",
            Self::StorageSlot => "storage slot",
            Self::Bytes => "bytes",
            Self::Raw => "json",
            Self::Block => "block",
            Self::Transaction => "transaction",
            Self::Receipt => "receipt",
        }
    }

    /// Decodes a JSON value into the shape named by this kind.
    ///
    /// `null` decodes to [`WireValue::Null`] for every kind: nodes answer `null` for
    /// unknown blocks, transactions and receipts.
    ///
    /// # Errors
    ///
    /// Returns a [`WireError`] when the value has the wrong JSON type or violates the hex
    /// contract of the target kind.
    pub fn decode(self, value: Value) -> Result<WireValue, WireError> {
        if value.is_null() {
            return Ok(WireValue::Null);
        }
        let decoded = match self {
            Self::Bool => WireValue::Bool(value.as_bool().ok_or(WireError::UnexpectedType {
                expected: "bool",
                found: json_type_name(&value),
            })?),
            Self::Quantity => {
                WireValue::Quantity(Quantity::parse_hex(expect_str(&value, "quantity")?)?)
            }
            Self::BlockRef => {
                WireValue::BlockRef(BlockRef::parse(expect_str(&value, "block reference")?)?)
            }
            Self::Address => {
                WireValue::Address(Address::parse_hex(expect_str(&value, "address")?)?)
            }
            Self::Hash => WireValue::Hash(Hash::parse_hex(expect_str(&value, "hash")?)?),
            Self::StorageSlot => {
                WireValue::Hash(Hash::parse_padded_hex(expect_str(&value, "storage slot")?)?)
            }
            Self::Bytes => WireValue::Bytes(Bytes::parse_hex(expect_str(&value, "bytes")?)?),
            Self::Raw => WireValue::Raw(RawJson(value)),
            Self::Block => WireValue::Block(Box::new(serde_json::from_value(value)?)),
            Self::Transaction => {
                WireValue::Transaction(Box::new(serde_json::from_value(value)?))
            }
            Self::Receipt => WireValue::Receipt(Box::new(serde_json::from_value(value)?)),
        };
        Ok(decoded)
    }
}

/// A decoded wire value. Closed over the shapes the proxy understands.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum WireValue {
    Null,
    Bool(bool),
    Quantity(Quantity),
    BlockRef(BlockRef),
    Address(Address),
    Hash(Hash),
    Bytes(Bytes),
    Raw(RawJson),
    Block(Box<Block>),
    Transaction(Box<Transaction>),
    Receipt(Box<TransactionReceipt>),
}

impl WireValue {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_quantity(&self) -> Option<&Quantity> {
        match self {
            Self::Quantity(q) => Some(q),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_block_ref(&self) -> Option<&BlockRef> {
        match self {
            Self::BlockRef(b) => Some(b),
            _ => None,
        }
    }

    /// Encodes the value back into its JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<Value, WireError> {
        Ok(serde_json::to_value(self)?)
    }
}

impl From<Quantity> for WireValue {
    fn from(value: Quantity) -> Self {
        Self::Quantity(value)
    }
}

impl From<BlockRef> for WireValue {
    fn from(value: BlockRef) -> Self {
        Self::BlockRef(value)
    }
}

impl StructuralEq for WireValue {
    fn structural_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a.structural_eq(b),
            (Self::Quantity(a), Self::Quantity(b)) => a.structural_eq(b),
            (Self::BlockRef(a), Self::BlockRef(b)) => a.structural_eq(b),
            (Self::Address(a), Self::Address(b)) => a.structural_eq(b),
            (Self::Hash(a), Self::Hash(b)) => a.structural_eq(b),
            (Self::Bytes(a), Self::Bytes(b)) => a.structural_eq(b),
            (Self::Raw(a), Self::Raw(b)) => a.structural_eq(b),
            (Self::Block(a), Self::Block(b)) => a.structural_eq(b),
            (Self::Transaction(a), Self::Transaction(b)) => a.structural_eq(b),
            (Self::Receipt(a), Self::Receipt(b)) => a.structural_eq(b),
            _ => false,
        }
    }
}

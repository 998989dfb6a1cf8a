//! Composite records returned by block, transaction and receipt queries.
//!
//! Fields that the protocol always emits but may set to `null` (`to`, `blockHash` of a
//! pending transaction, `number` of a pending block) are plain `Option`s and encode as
//! `null`. Fields that only exist for some transaction types or forks are skipped when
//! absent. Fields this crate does not model are kept in `other`: they take part in
//! equality and are emitted again on encode, so two nodes that differ only there still
//! disagree.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Address, Bloom, Bytes, Hash, Nonce, Quantity};
use crate::equality::{impl_structural_eq, StructuralEq};

/// Opaque JSON passed through unmodified in both directions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawJson(pub serde_json::Value);

impl StructuralEq for RawJson {
    fn structural_eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

/// Fields outside the modelled set, keyed by their wire name.
pub type ExtraFields = BTreeMap<String, RawJson>;

impl From<serde_json::Value> for RawJson {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub number: Option<Quantity>,
    pub hash: Option<Hash>,
    pub parent_hash: Hash,
    pub nonce: Option<Nonce>,
    pub sha3_uncles: Hash,
    pub logs_bloom: Option<Bloom>,
    pub transactions_root: Hash,
    pub state_root: Hash,
    pub receipts_root: Hash,
    pub miner: Address,
    pub difficulty: Quantity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_difficulty: Option<Quantity>,
    pub extra_data: Bytes,
    pub size: Quantity,
    pub gas_limit: Quantity,
    pub gas_used: Quantity,
    pub timestamp: Quantity,
    pub transactions: BlockTransactions,
    #[serde(default)]
    pub uncles: Vec<Hash>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mix_hash: Option<Hash>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_fee_per_gas: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withdrawals_root: Option<Hash>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withdrawals: Option<RawJson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blob_gas_used: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excess_blob_gas: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_beacon_block_root: Option<Hash>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requests_hash: Option<Hash>,
    #[serde(flatten)]
    pub other: ExtraFields,
}

impl_structural_eq!(Block {
    number,
    hash,
    parent_hash,
    nonce,
    sha3_uncles,
    logs_bloom,
    transactions_root,
    state_root,
    receipts_root,
    miner,
    difficulty,
    total_difficulty,
    extra_data,
    size,
    gas_limit,
    gas_used,
    timestamp,
    transactions,
    uncles,
    mix_hash,
    base_fee_per_gas,
    withdrawals_root,
    withdrawals,
    blob_gas_used,
    excess_blob_gas,
    parent_beacon_block_root,
    requests_hash,
    other,
});

/// Transaction list of a block: hashes only, or full objects when `fullTransactions` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockTransactions {
    Hashes(Vec<Hash>),
    Full(Vec<Transaction>),
}

impl Default for BlockTransactions {
    fn default() -> Self {
        Self::Hashes(Vec::new())
    }
}

impl BlockTransactions {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Hashes(h) => h.len(),
            Self::Full(t) => t.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StructuralEq for BlockTransactions {
    fn structural_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Hashes(a), Self::Hashes(b)) => a.structural_eq(b),
            (Self::Full(a), Self::Full(b)) => a.structural_eq(b),
            // an empty list decodes the same way regardless of the flag
            _ => self.is_empty() && other.is_empty(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub hash: Hash,
    pub nonce: Quantity,
    pub block_hash: Option<Hash>,
    pub block_number: Option<Quantity>,
    pub transaction_index: Option<Quantity>,
    pub from: Address,
    pub to: Option<Address>,
    pub value: Quantity,
    pub gas: Quantity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fee_per_gas: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_priority_fee_per_gas: Option<Quantity>,
    pub input: Bytes,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_list: Option<RawJson>,
    pub v: Quantity,
    pub r: Quantity,
    pub s: Quantity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_parity: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fee_per_blob_gas: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blob_versioned_hashes: Option<Vec<Hash>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_list: Option<RawJson>,
    #[serde(flatten)]
    pub other: ExtraFields,
}

impl_structural_eq!(Transaction {
    hash,
    nonce,
    block_hash,
    block_number,
    transaction_index,
    from,
    to,
    value,
    gas,
    gas_price,
    max_fee_per_gas,
    max_priority_fee_per_gas,
    input,
    transaction_type,
    chain_id,
    access_list,
    v,
    r,
    s,
    y_parity,
    max_fee_per_blob_gas,
    blob_versioned_hashes,
    authorization_list,
    other,
});

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    pub address: Address,
    pub topics: Vec<Hash>,
    pub data: Bytes,
    pub block_number: Option<Quantity>,
    pub block_hash: Option<Hash>,
    pub transaction_hash: Option<Hash>,
    pub transaction_index: Option<Quantity>,
    pub log_index: Option<Quantity>,
    #[serde(default)]
    pub removed: bool,
    #[serde(flatten)]
    pub other: ExtraFields,
}

impl_structural_eq!(Log {
    address,
    topics,
    data,
    block_number,
    block_hash,
    transaction_hash,
    transaction_index,
    log_index,
    removed,
    other,
});

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: Hash,
    pub transaction_index: Quantity,
    pub block_hash: Hash,
    pub block_number: Quantity,
    pub from: Address,
    pub to: Option<Address>,
    pub cumulative_gas_used: Quantity,
    pub gas_used: Quantity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_gas_price: Option<Quantity>,
    pub contract_address: Option<Address>,
    pub logs: Vec<Log>,
    pub logs_bloom: Bloom,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<Quantity>,
    /// Pre-Byzantium receipts carry a state root instead of a status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<Hash>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blob_gas_used: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blob_gas_price: Option<Quantity>,
    #[serde(flatten)]
    pub other: ExtraFields,
}

impl_structural_eq!(TransactionReceipt {
    transaction_hash,
    transaction_index,
    block_hash,
    block_number,
    from,
    to,
    cumulative_gas_used,
    gas_used,
    effective_gas_price,
    contract_address,
    logs,
    logs_bloom,
    transaction_type,
    root,
    status,
    blob_gas_used,
    blob_gas_price,
    other,
});

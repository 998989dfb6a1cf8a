//! Static method policy table.
//!
//! Every supported method maps to its positional argument kinds, the wire kind of its
//! result, the resolver that reconciles backend answers, and its quorum rule.

use ahash::AHashMap;
use std::sync::LazyLock;

pub use crate::consensus::Resolver;
use crate::wire::WireKind;

/// Kind of a positional request argument.
pub type ArgKind = WireKind;

/// Minimum number of matching answers required from `backend_count` backends.
///
/// All backends while there are at most two, otherwise all but one.
#[must_use]
pub fn min_req(backend_count: usize) -> usize {
    if backend_count <= 2 {
        backend_count
    } else {
        backend_count - 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quorum {
    /// [`min_req`] of the configured backend count.
    Majority,
    /// A single answer is enough.
    One,
}

impl Quorum {
    #[must_use]
    pub fn min_req(self, backend_count: usize) -> usize {
        match self {
            Self::Majority => min_req(backend_count),
            Self::One => 1,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MethodPolicy {
    pub method: &'static str,
    pub args: &'static [ArgKind],
    /// Leading arguments that must be present; the rest may be omitted.
    pub required: usize,
    pub result: WireKind,
    pub resolver: Resolver,
    pub quorum: Quorum,
}

impl MethodPolicy {
    const fn new(
        method: &'static str,
        args: &'static [ArgKind],
        result: WireKind,
        resolver: Resolver,
    ) -> Self {
        Self { method, args, required: args.len(), result, resolver, quorum: Quorum::Majority }
    }

    const fn optional_from(mut self, required: usize) -> Self {
        self.required = required;
        self
    }

    const fn quorum(mut self, quorum: Quorum) -> Self {
        self.quorum = quorum;
        self
    }
}

pub const BLOCK_NUMBER: MethodPolicy =
    MethodPolicy::new("eth_blockNumber", &[], WireKind::Quantity, Resolver::MedianWithOffset);

pub static POLICIES: &[MethodPolicy] = &[
    BLOCK_NUMBER,
    MethodPolicy::new(
        "eth_getBlockByHash",
        &[WireKind::Hash, WireKind::Bool],
        WireKind::Block,
        Resolver::MostCommon,
    ),
    MethodPolicy::new(
        "eth_getBlockByNumber",
        &[WireKind::BlockRef, WireKind::Bool],
        WireKind::Block,
        Resolver::MostCommon,
    ),
    MethodPolicy::new(
        "eth_getTransactionByHash",
        &[WireKind::Hash],
        WireKind::Transaction,
        Resolver::MostCommon,
    ),
    MethodPolicy::new(
        "eth_getTransactionCount",
        &[WireKind::Address, WireKind::BlockRef],
        WireKind::Quantity,
        Resolver::MostCommon,
    ),
    MethodPolicy::new(
        "eth_getTransactionReceipt",
        &[WireKind::Hash],
        WireKind::Receipt,
        Resolver::MostCommon,
    ),
    MethodPolicy::new(
        "eth_sendRawTransaction",
        &[WireKind::Bytes],
        WireKind::Hash,
        Resolver::MostCommon,
    )
    .quorum(Quorum::One),
    MethodPolicy::new(
        "eth_getBalance",
        &[WireKind::Address, WireKind::BlockRef],
        WireKind::Quantity,
        Resolver::MostCommon,
    ),
    MethodPolicy::new(
        "eth_getCode",
        &[WireKind::Address, WireKind::BlockRef],
        WireKind::Bytes,
        Resolver::MostCommon,
    ),
    MethodPolicy::new(
        "eth_getStorageAt",
        &[WireKind::Address, WireKind::StorageSlot, WireKind::BlockRef],
        WireKind::Hash,
        Resolver::MostCommon,
    ),
    MethodPolicy::new(
        "eth_call",
        &[WireKind::Raw, WireKind::BlockRef],
        WireKind::Bytes,
        Resolver::MostCommon,
    )
    .optional_from(1),
    MethodPolicy::new("eth_gasPrice", &[], WireKind::Quantity, Resolver::Median),
    MethodPolicy::new(
        "eth_estimateGas",
        &[WireKind::Raw, WireKind::BlockRef],
        WireKind::Quantity,
        Resolver::Median,
    )
    .optional_from(1),
    MethodPolicy::new("eth_maxPriorityFeePerGas", &[], WireKind::Quantity, Resolver::Median),
    MethodPolicy::new("eth_chainId", &[], WireKind::Quantity, Resolver::MostCommon),
    MethodPolicy::new("net_version", &[], WireKind::Raw, Resolver::MostCommon),
];

static BY_METHOD: LazyLock<AHashMap<&'static str, &'static MethodPolicy>> =
    LazyLock::new(|| POLICIES.iter().map(|p| (p.method, p)).collect());

/// Looks up the policy of a method. `None` means the method is not supported.
#[must_use]
pub fn policy_for(method: &str) -> Option<&'static MethodPolicy> {
    BY_METHOD.get(method).copied()
}

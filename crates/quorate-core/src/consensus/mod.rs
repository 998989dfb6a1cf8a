//! Consensus resolvers.
//!
//! Each resolver reduces a [`ResponseSet`] and a quorum size to one canonical value or a
//! descriptive failure. Resolvers are pure: no I/O, no shared state, and the result does
//! not depend on the order in which backends answered.

pub mod median;
pub mod quorum;
pub mod types;

pub use median::{median, median_with_offset};
pub use quorum::most_common;
pub use types::{BackendResponse, ConsensusError, ResponseSet};

use crate::wire::WireValue;

/// Strategy used to reconcile backend answers for a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolver {
    MostCommon,
    Median,
    /// Median shifted by the configured blocks-behind tolerance, applied as a negative offset.
    MedianWithOffset,
}

impl Resolver {
    /// Runs the resolver. `offset` is only read by [`Resolver::MedianWithOffset`].
    ///
    /// # Errors
    ///
    /// Propagates the [`ConsensusError`] of the selected resolver.
    pub fn resolve(
        self,
        responses: &ResponseSet,
        min_req: usize,
        offset: i64,
    ) -> Result<WireValue, ConsensusError> {
        match self {
            Self::MostCommon => most_common(responses, min_req),
            Self::Median => median(responses, min_req),
            Self::MedianWithOffset => median_with_offset(responses, min_req, offset),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MostCommon => "most_common",
            Self::Median => "median",
            Self::MedianWithOffset => "median_with_offset",
        }
    }
}

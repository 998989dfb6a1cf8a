//! Most-common resolver.
//!
//! Values are bucketed with the structural equality engine (linear scan, no hashing, so
//! wire types never need a canonical byte form). Distinct backend error messages form
//! their own buckets and are ranked alongside the value buckets:
//!
//! - one top bucket holding a value wins if its count reaches `min_req`
//! - one top bucket holding an error returns that error
//! - a tie between value buckets only is [`ConsensusError::DifferentResponses`]
//! - anything else is [`ConsensusError::NotEnoughOccurrences`]
//!
//! Quorum failures carry every distinct backend error message along.

use tracing::debug;

use super::types::{ConsensusError, ResponseSet};
use crate::{equality::equal, wire::WireValue};

/// Groups successful values into "same answer" buckets with their counts.
#[must_use]
pub fn group_values(responses: &ResponseSet) -> Vec<(&WireValue, usize)> {
    let mut groups: Vec<(&WireValue, usize)> = Vec::new();
    for value in responses.values() {
        match groups.iter_mut().find(|(existing, _)| equal(Some(*existing), Some(value))) {
            Some((_, count)) => *count += 1,
            None => groups.push((value, 1)),
        }
    }
    groups
}

/// Returns the answer shared by the largest number of backends.
///
/// # Errors
///
/// Returns a [`ConsensusError`] when no single value reaches `min_req`, when the top
/// values tie, or when a backend error outranks every value.
pub fn most_common(responses: &ResponseSet, min_req: usize) -> Result<WireValue, ConsensusError> {
    let value_groups = group_values(responses);
    let error_groups = responses.error_groups();

    let top =
        value_groups.iter().map(|(_, c)| *c).chain(error_groups.iter().map(|(_, c)| *c)).max();
    let Some(top) = top else {
        return Err(ConsensusError::NotEnoughResponses);
    };

    let top_values: Vec<&(&WireValue, usize)> =
        value_groups.iter().filter(|(_, c)| *c == top).collect();
    let top_errors: Vec<&(String, usize)> =
        error_groups.iter().filter(|(_, c)| *c == top).collect();

    debug!(
        value_groups = value_groups.len(),
        error_groups = error_groups.len(),
        top_count = top,
        min_req,
        "most common grouping"
    );

    let failure = match (top_values.as_slice(), top_errors.as_slice()) {
        ([(value, count)], []) if *count >= min_req => return Ok((*value).clone()),
        ([_], []) => ConsensusError::NotEnoughOccurrences,
        ([], [(message, _)]) => return Err(ConsensusError::Backend(message.clone())),
        (_, []) => ConsensusError::DifferentResponses,
        _ => ConsensusError::NotEnoughOccurrences,
    };

    Err(failure.with_backend_errors(responses.distinct_error_messages()))
}

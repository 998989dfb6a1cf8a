//! Numeric resolvers over [`Quantity`] answers.

use num_bigint::BigUint;

use super::types::{ConsensusError, ResponseSet};
use crate::wire::{Quantity, WireValue};

/// Quantity answers sorted ascending, or a failure when fewer than `min_req` exist.
fn sorted_quantities(
    responses: &ResponseSet,
    min_req: usize,
) -> Result<Vec<&BigUint>, ConsensusError> {
    let mut values: Vec<&BigUint> =
        responses.values().filter_map(WireValue::as_quantity).map(Quantity::as_biguint).collect();

    if values.len() < min_req.max(1) {
        let errors = responses.distinct_error_messages();
        return Err(ConsensusError::NotEnoughResponses.with_backend_errors(errors));
    }

    values.sort_unstable();
    Ok(values)
}

/// Middle value, or the truncated mean of the two middle values for an even count.
fn middle(sorted: &[&BigUint]) -> BigUint {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid].clone()
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2u32
    }
}

/// Median of the quantity answers. Non-quantity answers and errors do not vote.
///
/// # Errors
///
/// Returns [`ConsensusError::NotEnoughResponses`] (joined with backend errors) when fewer
/// than `min_req` quantities were returned.
pub fn median(responses: &ResponseSet, min_req: usize) -> Result<WireValue, ConsensusError> {
    let sorted = sorted_quantities(responses, min_req)?;
    Ok(WireValue::Quantity(Quantity::from(middle(&sorted))))
}

/// Closest actual answer on one side of `median + offset`.
///
/// A negative offset picks the smallest answer at or above `median - |offset|`, accepting
/// backends lagging by up to `|offset|`. A positive offset picks the largest answer at or
/// below `median + offset`. Zero behaves like a negative offset: the smallest answer at or
/// above the median.
///
/// # Errors
///
/// Same as [`median`].
pub fn median_with_offset(
    responses: &ResponseSet,
    min_req: usize,
    offset: i64,
) -> Result<WireValue, ConsensusError> {
    let sorted = sorted_quantities(responses, min_req)?;
    let median = middle(&sorted);
    let delta = BigUint::from(offset.unsigned_abs());

    let chosen = if offset <= 0 {
        let bound = if median > delta { &median - &delta } else { BigUint::default() };
        sorted.iter().find(|v| ***v >= bound)
    } else {
        let bound = &median + &delta;
        sorted.iter().rev().find(|v| ***v <= bound)
    };

    // the median always lies between the smallest and largest answer, so a candidate exists
    let chosen = chosen.map_or(median, |v| (*v).clone());
    Ok(WireValue::Quantity(Quantity::from(chosen)))
}

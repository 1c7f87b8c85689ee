//! Outcome predicates — strict fixed-point percentage comparisons.
//!
//! Comparisons cross-multiply instead of dividing: `amount / total > pct`
//! is evaluated as `amount * PCT_BASE > total * pct`, so there is no
//! integer-division rounding at the boundary. Products stay within `u128`
//! for any total weight below 2^128 / 10^18 (about 3.4 * 10^20 raw units);
//! beyond that the checked multiplication fails the predicate rather than
//! wrapping.

use agora_types::{Pct, PCT_BASE};

/// Strictly-greater comparison of `amount / total` against `required`.
pub fn exceeds(amount: u128, total: u128, required: Pct) -> bool {
    let lhs = amount.checked_mul(PCT_BASE);
    let rhs = total.checked_mul(required.raw() as u128);
    match (lhs, rhs) {
        (Some(l), Some(r)) => l > r,
        _ => false,
    }
}

/// Whether the cast weight clears the participation (quorum) requirement
/// against the total eligible weight.
pub fn participation_passes(
    yea: u128,
    nay: u128,
    abstain: u128,
    voting_power: u128,
    required: Pct,
) -> bool {
    let cast = yea.saturating_add(nay).saturating_add(abstain);
    exceeds(cast, voting_power, required)
}

/// Whether `yea` clears the support requirement against `denominator` —
/// the total eligible weight for absolute support, or the cast weight for
/// relative support.
pub fn support_passes(yea: u128, denominator: u128, required: Pct) -> bool {
    exceeds(yea, denominator, required)
}

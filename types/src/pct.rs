//! Fixed-point percentages.
//!
//! Percentages use a base of 10^18: [`PCT_BASE`] is 100%, 10^16 is 1%.
//! Requirement thresholds must be strictly below 100% — a threshold the
//! tally could never strictly exceed would be unsatisfiable.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 100% in fixed-point representation.
pub const PCT_BASE: u128 = 1_000_000_000_000_000_000;

/// One whole percent in fixed-point representation.
const PCT_ONE: u64 = 10_000_000_000_000_000;

/// A fixed-point percentage (10^18 = 100%).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pct(u64);

impl Pct {
    pub const ZERO: Self = Self(0);

    /// 100%.
    pub const ONE_HUNDRED: Self = Self(PCT_BASE as u64);

    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Build from whole percent: `Pct::percent(50)` is 50%.
    pub fn percent(whole: u64) -> Self {
        Self(whole.saturating_mul(PCT_ONE))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    /// Whether this is usable as a requirement threshold (strictly below 100%).
    pub fn is_valid_threshold(&self) -> bool {
        (self.0 as u128) < PCT_BASE
    }
}

impl fmt::Display for Pct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / PCT_ONE;
        let frac = (self.0 % PCT_ONE) / (PCT_ONE / 100);
        write!(f, "{whole}.{frac:02}%")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_scales_to_base() {
        assert_eq!(Pct::percent(100).raw() as u128, PCT_BASE);
        assert_eq!(Pct::percent(1).raw(), PCT_ONE);
        assert_eq!(Pct::percent(50).raw(), 50 * PCT_ONE);
    }

    #[test]
    fn threshold_validity_is_strict() {
        assert!(Pct::percent(99).is_valid_threshold());
        assert!(Pct::new(Pct::ONE_HUNDRED.raw() - 1).is_valid_threshold());
        assert!(!Pct::ONE_HUNDRED.is_valid_threshold());
        assert!(!Pct::new(u64::MAX).is_valid_threshold());
    }

    #[test]
    fn display_shows_two_decimals() {
        assert_eq!(Pct::percent(50).to_string(), "50.00%");
        assert_eq!(Pct::new(Pct::percent(60).raw() - 1).to_string(), "59.99%");
        assert_eq!(Pct::ZERO.to_string(), "0.00%");
    }
}

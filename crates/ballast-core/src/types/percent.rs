//! Percentage ranges and display rounding.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Number of decimal places shown for percentages.
pub const DISPLAY_DP: u32 = 2;

/// Where a value sits relative to a [`PctRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangePosition {
    /// Strictly below the low bound.
    Below,
    /// Inside the closed interval.
    Within,
    /// Strictly above the high bound.
    Above,
}

/// A closed `[low, high]` percentage band on the 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PctRange {
    /// Lower bound (inclusive).
    pub low: Decimal,
    /// Upper bound (inclusive).
    pub high: Decimal,
}

impl PctRange {
    /// Creates a new range. Ordering of the bounds is checked by config validation.
    #[must_use]
    pub fn new(low: Decimal, high: Decimal) -> Self {
        Self { low, high }
    }

    /// Classifies a value against the band.
    #[must_use]
    pub fn locate(&self, value: Decimal) -> RangePosition {
        if value < self.low {
            RangePosition::Below
        } else if value > self.high {
            RangePosition::Above
        } else {
            RangePosition::Within
        }
    }

    /// Returns true if `low <= value <= high`.
    #[must_use]
    pub fn contains(&self, value: Decimal) -> bool {
        self.locate(value) == RangePosition::Within
    }

    /// Midpoint of the band.
    #[must_use]
    pub fn midpoint(&self) -> Decimal {
        (self.low + self.high) / dec!(2)
    }

    /// Returns true if the bounds are ordered and inside 0-100.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.low <= self.high && is_valid_pct(self.low) && is_valid_pct(self.high)
    }
}

impl std::fmt::Display for PctRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.2}–{:.2}%",
            round_pct(self.low),
            round_pct(self.high)
        )
    }
}

/// Returns true if the value is a percentage on the 0-100 scale.
#[must_use]
pub fn is_valid_pct(value: Decimal) -> bool {
    value >= Decimal::ZERO && value <= Decimal::ONE_HUNDRED
}

/// Rounds a percentage for display (half away from zero).
#[must_use]
pub fn round_pct(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DISPLAY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats a percentage as `"42.00%"`.
#[must_use]
pub fn format_pct(value: Decimal) -> String {
    format!("{:.2}%", round_pct(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_inclusive_bounds() {
        let range = PctRange::new(dec!(40), dec!(45));
        assert_eq!(range.locate(dec!(40)), RangePosition::Within);
        assert_eq!(range.locate(dec!(45)), RangePosition::Within);
        assert_eq!(range.locate(dec!(39.999)), RangePosition::Below);
        assert_eq!(range.locate(dec!(45.001)), RangePosition::Above);
        assert!(range.contains(dec!(42)));
    }

    #[test]
    fn test_well_formed() {
        assert!(PctRange::new(dec!(0), dec!(100)).is_well_formed());
        assert!(PctRange::new(dec!(5), dec!(5)).is_well_formed());
        assert!(!PctRange::new(dec!(10), dec!(7)).is_well_formed());
        assert!(!PctRange::new(dec!(-1), dec!(7)).is_well_formed());
        assert!(!PctRange::new(dec!(90), dec!(101)).is_well_formed());
    }

    #[test]
    fn test_midpoint() {
        assert_eq!(PctRange::new(dec!(55), dec!(65)).midpoint(), dec!(60));
    }

    #[test]
    fn test_format_pct() {
        assert_eq!(format_pct(dec!(42)), "42.00%");
        assert_eq!(format_pct(dec!(11.505)), "11.51%");
        assert_eq!(format_pct(dec!(33.333333)), "33.33%");
        assert_eq!(PctRange::new(dec!(7), dec!(10)).to_string(), "7.00–10.00%");
    }
}

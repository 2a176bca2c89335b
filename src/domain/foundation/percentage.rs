//! Whole-number percentage rate.
//!
//! Campaign bonus rates and discount limit rates are configured as integer
//! percentages and divided by 100 only inside money calculations. Rates above
//! 100 are legal: a 150% bonus pays one and a half times the sale back.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A non-negative whole percentage.
///
/// Stored as `u16`; the upper bound only guards the storage column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Percentage(u16);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0);

    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Creates a Percentage for a named field, rejecting negative values.
    pub fn try_new(field: &str, value: i64) -> Result<Self, ValidationError> {
        u16::try_from(value)
            .map(Self)
            .map_err(|_| ValidationError::out_of_range(field, 0, i64::from(u16::MAX), value))
    }

    /// Returns the whole percentage value.
    pub fn value(&self) -> u16 {
        self.0
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<i64> for Percentage {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::try_new("percentage", value)
    }
}

impl From<Percentage> for i64 {
    fn from(p: Percentage) -> Self {
        i64::from(p.0)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_zero_and_rates_above_hundred() {
        assert_eq!(Percentage::try_new("bonus_rate", 0).unwrap(), Percentage::ZERO);
        assert_eq!(Percentage::try_new("bonus_rate", 20).unwrap().value(), 20);
        assert_eq!(Percentage::try_new("bonus_rate", 150).unwrap().value(), 150);
        assert_eq!(Percentage::try_new("discount_limit_rate", 200).unwrap().value(), 200);
    }

    #[test]
    fn rejects_negative_rate_with_field_name() {
        let err = Percentage::try_new("discount_limit_rate", -1).unwrap_err();
        assert_eq!(
            err,
            ValidationError::out_of_range("discount_limit_rate", 0, 65_535, -1)
        );
    }

    #[test]
    fn rejects_rate_beyond_storage() {
        assert!(Percentage::try_new("bonus_rate", 65_535).is_ok());
        assert!(Percentage::try_new("bonus_rate", 65_536).is_err());
    }

    #[test]
    fn displays_with_percent_sign() {
        assert_eq!(Percentage::new(30).to_string(), "30%");
    }

    #[test]
    fn json_round_trip_is_validated() {
        let pct: Percentage = serde_json::from_str("150").unwrap();
        assert_eq!(pct.value(), 150);
        assert_eq!(serde_json::to_string(&pct).unwrap(), "150");
        assert!(serde_json::from_str::<Percentage>("-5").is_err());
    }
}

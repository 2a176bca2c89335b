//! Money value object.
//!
//! Amounts are stored as non-negative integer cents. The store currency is a
//! display concern of store settings; the engine never converts between
//! currencies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Percentage, ValidationError};

const CENTS_PER_UNIT: i64 = 100;

/// A non-negative amount of money in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Money(i64);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from cents, rejecting negative values.
    pub fn from_cents(cents: i64) -> Result<Self, ValidationError> {
        if cents < 0 {
            return Err(ValidationError::out_of_range("amount", 0, i64::MAX, cents));
        }
        Ok(Self(cents))
    }

    /// Creates an amount from whole currency units.
    pub fn from_units(units: u32) -> Self {
        Self(i64::from(units) * CENTS_PER_UNIT)
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> i64 {
        self.0
    }

    /// Whole units, rounding fractional cents down.
    pub fn whole_units(&self) -> i64 {
        self.0 / CENTS_PER_UNIT
    }

    /// `ceil(self * rate / 100)` expressed in whole currency units.
    ///
    /// The result never has a fractional part and is never below the exact
    /// percentage of `self`.
    pub fn percent_ceil_whole(&self, rate: Percentage) -> Money {
        let raw = i128::from(self.0) * i128::from(rate.value());
        let divisor = 100 * i128::from(CENTS_PER_UNIT);
        let units = (raw + divisor - 1) / divisor;
        Money(i64::try_from(units * i128::from(CENTS_PER_UNIT)).unwrap_or(i64::MAX))
    }

    /// Subtracts `other`, returning `None` if the result would be negative.
    pub fn checked_sub(&self, other: Money) -> Option<Money> {
        let diff = self.0.checked_sub(other.0)?;
        if diff < 0 {
            return None;
        }
        Some(Money(diff))
    }

    /// Adds two amounts, saturating at the maximum representable value.
    pub fn saturating_add(&self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<i64> for Money {
    type Error = ValidationError;

    fn try_from(cents: i64) -> Result<Self, Self::Error> {
        Self::from_cents(cents)
    }
}

impl From<Money> for i64 {
    fn from(m: Money) -> Self {
        m.0
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc.saturating_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / CENTS_PER_UNIT, self.0 % CENTS_PER_UNIT)
    }
}

/// Parses decimal amounts such as `"1000"`, `"1000.5"` or `"1000.50"`.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::invalid_format("amount", reason);
        let s = s.trim();
        let (units, fraction) = match s.split_once('.') {
            Some((u, f)) => (u, f),
            None => (s, ""),
        };
        if units.is_empty() || !units.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("expected a non-negative decimal number"));
        }
        if fraction.len() > 2 || !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("at most two decimal places are allowed"));
        }
        let units: i64 = units.parse().map_err(|_| invalid("amount is too large"))?;
        let cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid("bad fraction"))? * 10,
            _ => fraction.parse().map_err(|_| invalid("bad fraction"))?,
        };
        units
            .checked_mul(CENTS_PER_UNIT)
            .and_then(|c| c.checked_add(cents))
            .map(Money)
            .ok_or_else(|| invalid("amount is too large"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pct(v: i64) -> Percentage {
        Percentage::try_new("rate", v).unwrap()
    }

    #[test]
    fn rejects_negative_cents() {
        assert!(Money::from_cents(-1).is_err());
        assert_eq!(Money::from_cents(0).unwrap(), Money::ZERO);
    }

    #[test]
    fn percent_of_exact_value_stays_exact() {
        assert_eq!(Money::from_units(1000).percent_ceil_whole(pct(20)), Money::from_units(200));
        assert_eq!(Money::from_units(500).percent_ceil_whole(pct(30)), Money::from_units(150));
    }

    #[test]
    fn percent_rounds_up_to_next_whole_unit() {
        // 1165.60 * 20% = 233.12 -> 234
        let amount: Money = "1165.60".parse().unwrap();
        assert_eq!(amount.percent_ceil_whole(pct(20)), Money::from_units(234));

        // 0.01 * 1% still yields one unit
        assert_eq!(Money::from_cents(1).unwrap().percent_ceil_whole(pct(1)), Money::from_units(1));
    }

    #[test]
    fn percent_of_zero_is_zero() {
        assert_eq!(Money::ZERO.percent_ceil_whole(pct(100)), Money::ZERO);
        assert_eq!(Money::from_units(10).percent_ceil_whole(Percentage::ZERO), Money::ZERO);
    }

    #[test]
    fn checked_sub_refuses_negative_result() {
        let a = Money::from_units(5);
        let b = Money::from_units(7);
        assert_eq!(b.checked_sub(a), Some(Money::from_units(2)));
        assert_eq!(a.checked_sub(b), None);
    }

    #[test]
    fn parses_decimal_strings() {
        assert_eq!("1000".parse::<Money>().unwrap().cents(), 100_000);
        assert_eq!("10.5".parse::<Money>().unwrap().cents(), 1_050);
        assert_eq!("10.05".parse::<Money>().unwrap().cents(), 1_005);
        assert!("-3".parse::<Money>().is_err());
        assert!("1.234".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
    }

    #[test]
    fn displays_two_decimals() {
        assert_eq!(Money::from_cents(35_005).unwrap().to_string(), "350.05");
        assert_eq!(Money::from_units(7).to_string(), "7.00");
    }

    #[test]
    fn whole_units_floor() {
        assert_eq!(Money::from_cents(19_999).unwrap().whole_units(), 199);
    }

    #[test]
    fn sums_amounts() {
        let total: Money = vec![Money::from_units(1), Money::from_units(2)].into_iter().sum();
        assert_eq!(total, Money::from_units(3));
    }
}

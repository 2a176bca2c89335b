//! Customer cellphone number value object.
//!
//! Numbers are stored normalized: digits only, country code, area code and
//! local number concatenated (e.g. `5511999999999`). Customers are looked up
//! by this normalized form.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

const MIN_DIGITS: usize = 8;
const MAX_DIGITS: usize = 15;

/// A normalized, digits-only international cellphone number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cellphone(String);

impl Cellphone {
    /// Normalizes raw input by dropping every non-digit character.
    ///
    /// Accepts `"+55 (11) 99999-9999"` as well as `"5511999999999"`.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return Err(ValidationError::empty_field("cellphone"));
        }
        if !(MIN_DIGITS..=MAX_DIGITS).contains(&digits.len()) {
            return Err(ValidationError::out_of_range(
                "cellphone",
                MIN_DIGITS as i64,
                MAX_DIGITS as i64,
                digits.len() as i64,
            ));
        }
        Ok(Self(digits))
    }

    /// Builds a number from its three parts as typed at the point of sale.
    pub fn from_parts(
        country_code: &str,
        long_distance_code: &str,
        number: &str,
    ) -> Result<Self, ValidationError> {
        Self::parse(&format!("{}{}{}", country_code, long_distance_code, number))
    }

    /// Normalized digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Recipient address for the SMS transport (`+` followed by the digits).
    pub fn recipient(&self) -> String {
        format!("+{}", self.0)
    }
}

impl TryFrom<String> for Cellphone {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Cellphone> for String {
    fn from(c: Cellphone) -> Self {
        c.0
    }
}

impl fmt::Display for Cellphone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

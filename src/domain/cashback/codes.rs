//! Human-facing codes: coupon identifiers and phone verification codes.
//!
//! Both are drawn uniformly from the 16 hexadecimal digit characters using
//! the operating system's CSPRNG. Coupon codes are not checked for
//! uniqueness; at 16^6 combinations per store collisions are accepted.

use rand::rngs::OsRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Alphabet shared by every generated code.
pub const CODE_ALPHABET: &[u8; 16] = b"0123456789ABCDEF";

/// Length of a coupon code.
pub const COUPON_CODE_LEN: usize = 6;

/// Length of a phone verification code.
pub const VERIFICATION_CODE_LEN: usize = 4;

fn random_code(len: usize) -> String {
    let mut rng = OsRng;
    (0..len)
        .map(|_| char::from(CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())]))
        .collect()
}

fn validate_code(field: &str, value: &str, len: usize) -> Result<(), ValidationError> {
    if value.len() != len || !value.bytes().all(|b| CODE_ALPHABET.contains(&b)) {
        return Err(ValidationError::invalid_format(
            field,
            format!("expected {} characters from 0-9A-F", len),
        ));
    }
    Ok(())
}

/// Six-character coupon code shown to customers and sellers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CouponCode(String);

impl CouponCode {
    /// Generates a fresh random code.
    pub fn generate() -> Self {
        Self(random_code(COUPON_CODE_LEN))
    }

    /// Parses a stored or typed code, normalizing to uppercase.
    pub fn try_new(value: &str) -> Result<Self, ValidationError> {
        let value = value.trim().to_ascii_uppercase();
        validate_code("coupon_code", &value, COUPON_CODE_LEN)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CouponCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(&value)
    }
}

impl From<CouponCode> for String {
    fn from(c: CouponCode) -> Self {
        c.0
    }
}

impl fmt::Display for CouponCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Four-character one-time code read back by a new customer at the counter.
///
/// Never persisted: the caller sends it and compares it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationCode(String);

impl VerificationCode {
    /// Generates a fresh random code.
    pub fn generate() -> Self {
        Self(random_code(VERIFICATION_CODE_LEN))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against what the customer typed.
    pub fn matches(&self, typed: &str) -> bool {
        self.0.eq_ignore_ascii_case(typed.trim())
    }
}

impl fmt::Display for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generates a new coupon code.
pub fn new_coupon_code() -> CouponCode {
    CouponCode::generate()
}

/// Generates a new phone verification code.
pub fn new_verification_code() -> VerificationCode {
    VerificationCode::generate()
}

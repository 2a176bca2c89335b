//! Per-store settings.
//!
//! Each store has at most one settings record. It supplies the currency and
//! title used in outbound messages and the defaults that pre-fill new
//! campaigns. A store without settings is a normal state: callers fall back
//! to [`StoreSettings::defaults_for`].

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ensure_max_chars, Percentage, StoreId, ValidationError};

use super::campaign::{validate_coupon_lifetime, validate_url};

/// Maximum store title length; the title is embedded in every SMS.
pub const STORE_TITLE_MAX_CHARS: usize = 25;

/// Maximum currency symbol length.
pub const CURRENCY_MAX_CHARS: usize = 3;

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    pub store_id: StoreId,
    pub title: String,
    pub currency: String,
    /// Default country code for the new-sale form.
    pub country_code: String,
    /// Default area code for the new-sale form.
    pub long_distance_code: String,
    /// Default campaign URL.
    pub url: Option<String>,
    pub bonus_rate: Percentage,
    pub discount_limit_rate: Percentage,
    /// Default coupon lifetime in days.
    pub coupon_lifetime: u16,
}

/// Editable settings fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettingsInput {
    pub title: String,
    pub currency: String,
    pub country_code: String,
    pub long_distance_code: String,
    pub url: Option<String>,
    pub bonus_rate: i64,
    pub discount_limit_rate: i64,
    pub coupon_lifetime: i64,
}

impl StoreSettings {
    /// Settings given to a newly registered store.
    pub fn defaults_for(store_id: StoreId) -> Self {
        Self {
            store_id,
            title: String::new(),
            currency: "R$".to_string(),
            country_code: "55".to_string(),
            long_distance_code: "11".to_string(),
            url: None,
            bonus_rate: Percentage::new(20),
            discount_limit_rate: Percentage::new(30),
            coupon_lifetime: 45,
        }
    }

    /// Validates `input` and builds settings for `store_id`.
    pub fn from_input(store_id: StoreId, input: StoreSettingsInput) -> Result<Self, ValidationError> {
        let title = input.title.trim().to_string();
        ensure_max_chars("title", &title, STORE_TITLE_MAX_CHARS)?;

        let currency = input.currency.trim().to_string();
        if currency.is_empty() {
            return Err(ValidationError::empty_field("currency"));
        }
        ensure_max_chars("currency", &currency, CURRENCY_MAX_CHARS)?;

        let country_code = validate_dial_code("country_code", &input.country_code)?;
        let long_distance_code = validate_dial_code("long_distance_code", &input.long_distance_code)?;
        let url = validate_url(input.url)?;

        Ok(Self {
            store_id,
            title,
            currency,
            country_code,
            long_distance_code,
            url,
            bonus_rate: Percentage::try_new("bonus_rate", input.bonus_rate)?,
            discount_limit_rate: Percentage::try_new("discount_limit_rate", input.discount_limit_rate)?,
            coupon_lifetime: validate_coupon_lifetime(input.coupon_lifetime)?,
        })
    }

    /// Current values as an editable form.
    pub fn to_input(&self) -> StoreSettingsInput {
        StoreSettingsInput {
            title: self.title.clone(),
            currency: self.currency.clone(),
            country_code: self.country_code.clone(),
            long_distance_code: self.long_distance_code.clone(),
            url: self.url.clone(),
            bonus_rate: i64::from(self.bonus_rate.value()),
            discount_limit_rate: i64::from(self.discount_limit_rate.value()),
            coupon_lifetime: i64::from(self.coupon_lifetime),
        }
    }
}

fn validate_dial_code(field: &str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    if value.len() > 3 || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::invalid_format(field, "expected 1 to 3 digits"));
    }
    Ok(value.to_string())
}

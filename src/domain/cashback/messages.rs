//! Outbound SMS bodies.
//!
//! A single SMS carries 140 characters. The variable part of an activation
//! message (currency, amount, store title, date, rate, url) takes up to 61
//! characters, so every template keeps its static text within 79.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{ensure_max_chars, ValidationError};

use super::activation::ActivationStage;
use super::codes::VerificationCode;
use super::coupon::Coupon;
use super::settings::StoreSettings;

pub const SMS_MAX_CHARS: usize = 140;

/// Text of a single SMS, at most [`SMS_MAX_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SmsBody(String);

impl SmsBody {
    pub fn new(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::empty_field("sms_body"));
        }
        ensure_max_chars("sms_body", &text, SMS_MAX_CHARS)?;
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl TryFrom<String> for SmsBody {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SmsBody> for String {
    fn from(body: SmsBody) -> Self {
        body.0
    }
}

impl fmt::Display for SmsBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message asking a new customer to read a code back to the seller.
pub fn verification_message(code: &VerificationCode) -> Result<SmsBody, ValidationError> {
    SmsBody::new(format!("Tell the seller this code: {}", code))
}

/// Message sent for an activation stage of `coupon`.
///
/// `campaign_url` is the url of the coupon's campaign, appended when set.
pub fn activation_message(
    stage: ActivationStage,
    coupon: &Coupon,
    settings: &StoreSettings,
    campaign_url: Option<&str>,
) -> Result<SmsBody, ValidationError> {
    let value = format!("{}{}", settings.currency, coupon.discount_value.whole_units());
    let title = &settings.title;
    let expires = coupon.expiration_date.format("%d.%m");
    let terms = format!(
        "Max discount {}%, not cumulative.",
        coupon.discount_limit_rate.value()
    );

    let text = match stage {
        ActivationStage::FirstActivation => format!(
            "You received {} cashback at {}. Valid until {}. {}",
            value, title, expires, terms
        ),
        ActivationStage::Reminder => format!(
            "You still have {} cashback at {}. Valid until {}. {}",
            value, title, expires, terms
        ),
        ActivationStage::SecondReminder => format!(
            "Don't lose your {} cashback at {}! Valid until {}. {}",
            value, title, expires, terms
        ),
        ActivationStage::FinalWarning => format!(
            "3 days left! Your {} cashback at {} expires {}. {}",
            value, title, expires, terms
        ),
    };

    match campaign_url.filter(|u| !u.is_empty()) {
        Some(url) => SmsBody::new(format!("{} {}", text, url)),
        None => SmsBody::new(text),
    }
}

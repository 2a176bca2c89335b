//! Cashback-specific error types.
//!
//! # Caller mapping
//!
//! | Error | Meaning for the caller |
//! |-------|------------------------|
//! | NotFound | record missing or owned by another store |
//! | Validation | rejected write, show field error |
//! | VerificationRequired | new customer must confirm the phone first |
//! | Conflict | coupon already redeemed, sale already has a coupon |
//! | Delivery | SMS transport failed |
//! | Infrastructure | storage failure |

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors returned by cashback application handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CashbackError {
    /// Record not found, or not visible to the requesting store.
    NotFound { entity: &'static str, id: String },

    ValidationFailed { field: String, message: String },

    /// Phone number is unknown and was not verified.
    VerificationRequired(String),

    Conflict(String),

    /// Message transport failed.
    Delivery(String),

    Infrastructure(String),
}

impl CashbackError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        CashbackError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CashbackError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn verification_required(cellphone: impl Into<String>) -> Self {
        CashbackError::VerificationRequired(cellphone.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        CashbackError::Conflict(message.into())
    }

    pub fn delivery(message: impl Into<String>) -> Self {
        CashbackError::Delivery(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CashbackError::NotFound { entity, .. } => match *entity {
                "customer" => ErrorCode::CustomerNotFound,
                "sale" => ErrorCode::SaleNotFound,
                "campaign" => ErrorCode::CampaignNotFound,
                "coupon" => ErrorCode::CouponNotFound,
                "settings" => ErrorCode::SettingsNotFound,
                _ => ErrorCode::InternalError,
            },
            CashbackError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            CashbackError::VerificationRequired(_) => ErrorCode::VerificationRequired,
            CashbackError::Conflict(_) => ErrorCode::Conflict,
            CashbackError::Delivery(_) => ErrorCode::DeliveryFailed,
            CashbackError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            CashbackError::NotFound { entity, id } => format!("{} not found: {}", entity, id),
            CashbackError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            CashbackError::VerificationRequired(cellphone) => {
                format!("Cellphone {} must be verified before the first sale", cellphone)
            }
            CashbackError::Conflict(msg) => format!("Conflict: {}", msg),
            CashbackError::Delivery(msg) => format!("Message delivery failed: {}", msg),
            CashbackError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Returns true if this error should trigger a retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CashbackError::Infrastructure(_) | CashbackError::Delivery(_)
        )
    }
}

impl std::fmt::Display for CashbackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CashbackError {}

impl From<ValidationError> for CashbackError {
    fn from(err: ValidationError) -> Self {
        CashbackError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for CashbackError {
    fn from(err: DomainError) -> Self {
        let id = err.details.get("id").cloned().unwrap_or_default();
        match err.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => CashbackError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::CustomerNotFound => CashbackError::not_found("customer", id),
            ErrorCode::SaleNotFound => CashbackError::not_found("sale", id),
            ErrorCode::CampaignNotFound => CashbackError::not_found("campaign", id),
            ErrorCode::CouponNotFound => CashbackError::not_found("coupon", id),
            ErrorCode::SettingsNotFound => CashbackError::not_found("settings", id),
            ErrorCode::VerificationRequired => CashbackError::VerificationRequired(err.message),
            ErrorCode::CouponNotRedeemable | ErrorCode::Conflict => {
                CashbackError::Conflict(err.message)
            }
            ErrorCode::DeliveryFailed => CashbackError::Delivery(err.message),
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                CashbackError::Infrastructure(err.to_string())
            }
        }
    }
}

impl From<CashbackError> for DomainError {
    fn from(err: CashbackError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

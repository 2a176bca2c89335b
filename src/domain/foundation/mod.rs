//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types that form the
//! vocabulary of the cashback domain.

mod cellphone;
mod errors;
mod ids;
mod money;
mod percentage;
mod timestamp;

pub use cellphone::Cellphone;
pub use errors::{ensure_max_chars, DomainError, ErrorCode, ValidationError};
pub use ids::{CampaignId, CouponId, CustomerId, SaleId, StoreId};
pub use money::Money;
pub use percentage::Percentage;
pub use timestamp::Timestamp;

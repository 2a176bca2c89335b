//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `cashback` - Campaigns, sales, coupons and the coupon lifecycle

pub mod cashback;
pub mod foundation;

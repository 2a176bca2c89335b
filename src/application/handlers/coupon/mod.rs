//! Coupon handlers.
//!
//! ## Scheduled commands
//! - Expiration sweep
//! - Activation cycle
//!
//! ## Queries
//! - Get / list coupons

mod expire_coupons;
mod get_coupon;
mod report;
mod run_activation_cycle;

// Scheduled commands
pub use expire_coupons::{ExpireCouponsCommand, ExpireCouponsHandler};
pub use report::{LifecycleFailure, LifecycleRunReport};
pub use run_activation_cycle::{ActivationCycleHandler, RunActivationCycleCommand};

// Queries
pub use get_coupon::{GetCouponHandler, GetCouponQuery, ListCouponsHandler, ListCouponsQuery};

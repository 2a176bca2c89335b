//! Sale handlers.
//!
//! ## Commands
//! - Sending a verification code to a new customer
//! - Registering a sale, with optional redemption
//! - Evaluating a sale for coupon issuance
//!
//! ## Queries
//! - Redeemable coupons at the counter
//! - Get / list sales

mod evaluate_sale;
mod get_sale;
mod list_redeemable_coupons;
mod register_sale;
mod request_verification;

// Commands
pub use evaluate_sale::{EvaluateSaleCommand, EvaluateSaleHandler, EvaluateSaleResult};
pub use register_sale::{RegisterSaleCommand, RegisterSaleHandler, RegisterSaleResult};
pub use request_verification::{
    RequestVerificationCommand, RequestVerificationHandler, RequestVerificationResult,
};

// Queries
pub use get_sale::{GetSaleHandler, GetSaleQuery, ListSalesHandler, ListSalesQuery};
pub use list_redeemable_coupons::{
    ListRedeemableCouponsHandler, ListRedeemableCouponsQuery, ListRedeemableCouponsResult,
    RedeemableCoupon,
};

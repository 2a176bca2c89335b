//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.
//!
//! - `sale` - Verification, sale registration, issuance
//! - `campaign` - Campaign management and summaries
//! - `store` - Store settings and summary
//! - `coupon` - Lifecycle runs and coupon queries

pub mod campaign;
pub mod coupon;
pub mod sale;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use campaign::*;
pub use coupon::*;
pub use sale::*;
pub use store::*;

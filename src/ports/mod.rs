//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `CustomerRepository` - Customers by store and cellphone
//! - `SaleRepository` - Sales, with transactional redemption and issuance
//! - `CampaignRepository` - Campaigns
//! - `CouponRepository` - Coupon reads and lifecycle flags
//! - `StoreSettingsRepository` - One settings record per store
//!
//! ## Messaging Ports
//!
//! - `SmsSender` - Outbound SMS transport

mod campaign_repository;
mod coupon_repository;
mod customer_repository;
mod sale_repository;
mod sms_sender;
mod store_settings_repository;

pub use campaign_repository::CampaignRepository;
pub use coupon_repository::{ActivationCandidate, CouponRepository};
pub use customer_repository::CustomerRepository;
pub use sale_repository::SaleRepository;
pub use sms_sender::{DeliveryId, SmsSender};
pub use store_settings_repository::StoreSettingsRepository;

//! Store handlers.
//!
//! ## Commands
//! - Provisioning default settings for a new store
//! - Updating settings
//!
//! ## Queries
//! - Get settings
//! - Store summary

mod get_store_settings;
mod provision_store_settings;
mod store_summary;
mod update_store_settings;

// Commands
pub use provision_store_settings::{ProvisionStoreSettingsCommand, ProvisionStoreSettingsHandler};
pub use update_store_settings::{UpdateStoreSettingsCommand, UpdateStoreSettingsHandler};

// Queries
pub use get_store_settings::{GetStoreSettingsHandler, GetStoreSettingsQuery};
pub use store_summary::{GetStoreSummaryHandler, GetStoreSummaryQuery};

//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresCustomerRepository` - Customers, unique per store and cellphone
//! - `PostgresSaleRepository` - Sales with transactional redemption and issuance
//! - `PostgresCampaignRepository` - Campaigns
//! - `PostgresCouponRepository` - Coupon reads and lifecycle flags
//! - `PostgresStoreSettingsRepository` - Store settings
//!
//! The integrity rules of the data model are enforced by the schema in
//! `migrations/` as CHECK, UNIQUE and FOREIGN KEY constraints.

mod campaign_repository;
mod coupon_repository;
mod customer_repository;
mod sale_repository;
mod store_settings_repository;

pub use campaign_repository::PostgresCampaignRepository;
pub use coupon_repository::PostgresCouponRepository;
pub use customer_repository::PostgresCustomerRepository;
pub use sale_repository::PostgresSaleRepository;
pub use store_settings_repository::PostgresStoreSettingsRepository;

use std::fmt::Display;

use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Applies pending schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

fn database_error(action: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", action, e))
}

/// A stored value that no longer satisfies its domain rules.
fn corrupt_row(field: &str, e: impl Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Invalid stored value for {}: {}", field, e),
    )
}

fn violates(e: &sqlx::Error, constraint: &str) -> bool {
    match e {
        sqlx::Error::Database(db_err) => db_err.constraint() == Some(constraint),
        _ => false,
    }
}

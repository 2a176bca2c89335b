//! Store settings repository port.
//!
//! At most one record per store. A missing record is a normal state.

use crate::domain::cashback::StoreSettings;
use crate::domain::foundation::{DomainError, StoreId};
use async_trait::async_trait;

#[async_trait]
pub trait StoreSettingsRepository: Send + Sync {
    /// Settings of a store, `None` if not provisioned yet.
    async fn find(&self, store_id: &StoreId) -> Result<Option<StoreSettings>, DomainError>;

    /// Insert settings for a store.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the store already has settings
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, settings: &StoreSettings) -> Result<(), DomainError>;

    /// Replace the settings of a store.
    ///
    /// # Errors
    ///
    /// - `SettingsNotFound` if the store has no settings
    /// - `DatabaseError` on persistence failure
    async fn update(&self, settings: &StoreSettings) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_settings_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn StoreSettingsRepository) {}
    }
}

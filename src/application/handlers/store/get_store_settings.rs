//! GetStoreSettingsHandler - Query handler for store settings.

use std::sync::Arc;

use crate::domain::cashback::{CashbackError, StoreSettings};
use crate::domain::foundation::StoreId;
use crate::ports::StoreSettingsRepository;

#[derive(Debug, Clone)]
pub struct GetStoreSettingsQuery {
    pub store_id: StoreId,
}

pub struct GetStoreSettingsHandler {
    settings: Arc<dyn StoreSettingsRepository>,
}

impl GetStoreSettingsHandler {
    pub fn new(settings: Arc<dyn StoreSettingsRepository>) -> Self {
        Self { settings }
    }

    /// `None` for a store that was never provisioned.
    pub async fn handle(
        &self,
        query: GetStoreSettingsQuery,
    ) -> Result<Option<StoreSettings>, CashbackError> {
        Ok(self.settings.find(&query.store_id).await?)
    }
}

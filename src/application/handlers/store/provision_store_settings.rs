//! ProvisionStoreSettingsHandler - Gives a new store its default settings.

use std::sync::Arc;

use tracing::info;

use crate::domain::cashback::{CashbackError, StoreSettings};
use crate::domain::foundation::{ErrorCode, StoreId};
use crate::ports::StoreSettingsRepository;

#[derive(Debug, Clone)]
pub struct ProvisionStoreSettingsCommand {
    pub store_id: StoreId,
    /// Store display name, used in outbound messages.
    pub title: String,
}

pub struct ProvisionStoreSettingsHandler {
    settings: Arc<dyn StoreSettingsRepository>,
}

impl ProvisionStoreSettingsHandler {
    pub fn new(settings: Arc<dyn StoreSettingsRepository>) -> Self {
        Self { settings }
    }

    /// Idempotent: existing settings are returned unchanged.
    pub async fn handle(
        &self,
        cmd: ProvisionStoreSettingsCommand,
    ) -> Result<StoreSettings, CashbackError> {
        if let Some(existing) = self.settings.find(&cmd.store_id).await? {
            return Ok(existing);
        }

        let mut input = StoreSettings::defaults_for(cmd.store_id).to_input();
        input.title = cmd.title;
        let settings = StoreSettings::from_input(cmd.store_id, input)?;

        match self.settings.insert(&settings).await {
            Ok(()) => {
                info!(store_id = %cmd.store_id, "Store settings provisioned");
                Ok(settings)
            }
            Err(e) if e.code == ErrorCode::Conflict => self
                .settings
                .find(&cmd.store_id)
                .await?
                .ok_or_else(|| CashbackError::conflict(e.message)),
            Err(e) => Err(e.into()),
        }
    }
}

//! UpdateStoreSettingsHandler - Command handler for the settings form.

use std::sync::Arc;

use tracing::info;

use crate::domain::cashback::{CashbackError, StoreSettings, StoreSettingsInput};
use crate::domain::foundation::StoreId;
use crate::ports::StoreSettingsRepository;

#[derive(Debug, Clone)]
pub struct UpdateStoreSettingsCommand {
    pub store_id: StoreId,
    pub input: StoreSettingsInput,
}

pub struct UpdateStoreSettingsHandler {
    settings: Arc<dyn StoreSettingsRepository>,
}

impl UpdateStoreSettingsHandler {
    pub fn new(settings: Arc<dyn StoreSettingsRepository>) -> Self {
        Self { settings }
    }

    /// # Errors
    ///
    /// - `ValidationFailed` for an invalid field; nothing is written
    /// - `NotFound` if the store has no settings yet
    pub async fn handle(
        &self,
        cmd: UpdateStoreSettingsCommand,
    ) -> Result<StoreSettings, CashbackError> {
        let settings = StoreSettings::from_input(cmd.store_id, cmd.input)?;
        self.settings.update(&settings).await?;

        info!(store_id = %cmd.store_id, "Store settings updated");
        Ok(settings)
    }
}

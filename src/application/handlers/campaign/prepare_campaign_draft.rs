//! PrepareCampaignDraftHandler - Pre-fills the new-campaign form.

use std::sync::Arc;

use crate::domain::cashback::{CampaignDraft, CashbackError, StoreSettings};
use crate::domain::foundation::StoreId;
use crate::ports::StoreSettingsRepository;

#[derive(Debug, Clone)]
pub struct PrepareCampaignDraftQuery {
    pub store_id: StoreId,
}

pub struct PrepareCampaignDraftHandler {
    settings: Arc<dyn StoreSettingsRepository>,
}

impl PrepareCampaignDraftHandler {
    pub fn new(settings: Arc<dyn StoreSettingsRepository>) -> Self {
        Self { settings }
    }

    /// Draft filled from the store's settings, or from the provisioning
    /// defaults if the store has none.
    pub async fn handle(
        &self,
        query: PrepareCampaignDraftQuery,
    ) -> Result<CampaignDraft, CashbackError> {
        let settings = self
            .settings
            .find(&query.store_id)
            .await?
            .unwrap_or_else(|| StoreSettings::defaults_for(query.store_id));
        Ok(CampaignDraft::prefilled(&settings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{pct, Fixture};
    use crate::domain::foundation::Money;

    #[tokio::test]
    async fn uses_store_settings() {
        let fx = Fixture::new();
        let mut settings = StoreSettings::defaults_for(fx.store_id);
        settings.bonus_rate = pct(10);
        settings.coupon_lifetime = 60;
        settings.url = Some("https://a.io".to_string());
        StoreSettingsRepository::insert(fx.store.as_ref(), &settings)
            .await
            .unwrap();

        let draft = PrepareCampaignDraftHandler::new(fx.store.clone())
            .handle(PrepareCampaignDraftQuery {
                store_id: fx.store_id,
            })
            .await
            .unwrap();

        assert_eq!(draft.bonus_rate, 10);
        assert_eq!(draft.coupon_lifetime, 60);
        assert_eq!(draft.url.as_deref(), Some("https://a.io"));
        assert_eq!(draft.min_sale_value, Money::ZERO);
        assert_eq!(draft.max_sale_value, Money::from_units(100_000));
    }

    #[tokio::test]
    async fn falls_back_to_defaults() {
        let fx = Fixture::new();

        let draft = PrepareCampaignDraftHandler::new(fx.store.clone())
            .handle(PrepareCampaignDraftQuery {
                store_id: fx.store_id,
            })
            .await
            .unwrap();

        assert_eq!(draft.bonus_rate, 20);
        assert_eq!(draft.discount_limit_rate, 30);
        assert_eq!(draft.coupon_lifetime, 45);
    }
}

//! CreateCampaignHandler - Command handler for new campaigns.

use std::sync::Arc;

use tracing::info;

use crate::domain::cashback::{Campaign, CampaignDraft, CashbackError};
use crate::domain::foundation::{StoreId, Timestamp};
use crate::ports::CampaignRepository;

#[derive(Debug, Clone)]
pub struct CreateCampaignCommand {
    pub store_id: StoreId,
    pub draft: CampaignDraft,
}

pub struct CreateCampaignHandler {
    campaigns: Arc<dyn CampaignRepository>,
}

impl CreateCampaignHandler {
    pub fn new(campaigns: Arc<dyn CampaignRepository>) -> Self {
        Self { campaigns }
    }

    pub async fn handle(&self, cmd: CreateCampaignCommand) -> Result<Campaign, CashbackError> {
        let campaign = Campaign::create(cmd.store_id, cmd.draft, Timestamp::now())?;
        self.campaigns.save(&campaign).await?;

        info!(
            store_id = %campaign.store_id,
            campaign_id = %campaign.id,
            bonus_rate = campaign.bonus_rate.value(),
            is_active = campaign.is_active,
            "Campaign created"
        );
        Ok(campaign)
    }
}

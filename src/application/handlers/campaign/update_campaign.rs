//! UpdateCampaignHandler - Revises a campaign's terms.
//!
//! Coupons already issued keep the terms they were issued with.

use std::sync::Arc;

use tracing::info;

use crate::domain::cashback::{Campaign, CampaignDraft, CashbackError};
use crate::domain::foundation::{CampaignId, StoreId};
use crate::ports::CampaignRepository;

#[derive(Debug, Clone)]
pub struct UpdateCampaignCommand {
    pub store_id: StoreId,
    pub campaign_id: CampaignId,
    pub draft: CampaignDraft,
}

pub struct UpdateCampaignHandler {
    campaigns: Arc<dyn CampaignRepository>,
}

impl UpdateCampaignHandler {
    pub fn new(campaigns: Arc<dyn CampaignRepository>) -> Self {
        Self { campaigns }
    }

    pub async fn handle(&self, cmd: UpdateCampaignCommand) -> Result<Campaign, CashbackError> {
        let mut campaign = self
            .campaigns
            .find_by_id(&cmd.campaign_id)
            .await?
            .filter(|c| c.store_id == cmd.store_id)
            .ok_or_else(|| CashbackError::not_found("campaign", cmd.campaign_id))?;

        campaign.revise(cmd.draft)?;
        self.campaigns.update(&campaign).await?;

        info!(
            store_id = %campaign.store_id,
            campaign_id = %campaign.id,
            is_active = campaign.is_active,
            "Campaign updated"
        );
        Ok(campaign)
    }
}

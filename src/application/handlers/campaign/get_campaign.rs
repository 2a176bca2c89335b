//! Campaign queries.

use std::sync::Arc;

use crate::domain::cashback::{Campaign, CashbackError};
use crate::domain::foundation::{CampaignId, StoreId};
use crate::ports::CampaignRepository;

#[derive(Debug, Clone)]
pub struct GetCampaignQuery {
    pub store_id: StoreId,
    pub campaign_id: CampaignId,
}

pub struct GetCampaignHandler {
    campaigns: Arc<dyn CampaignRepository>,
}

impl GetCampaignHandler {
    pub fn new(campaigns: Arc<dyn CampaignRepository>) -> Self {
        Self { campaigns }
    }

    pub async fn handle(&self, query: GetCampaignQuery) -> Result<Campaign, CashbackError> {
        self.campaigns
            .find_by_id(&query.campaign_id)
            .await?
            .filter(|c| c.store_id == query.store_id)
            .ok_or_else(|| CashbackError::not_found("campaign", query.campaign_id))
    }
}

#[derive(Debug, Clone)]
pub struct ListCampaignsQuery {
    pub store_id: StoreId,
    pub active_only: bool,
}

pub struct ListCampaignsHandler {
    campaigns: Arc<dyn CampaignRepository>,
}

impl ListCampaignsHandler {
    pub fn new(campaigns: Arc<dyn CampaignRepository>) -> Self {
        Self { campaigns }
    }

    pub async fn handle(&self, query: ListCampaignsQuery) -> Result<Vec<Campaign>, CashbackError> {
        let campaigns = if query.active_only {
            self.campaigns.list_active(&query.store_id).await?
        } else {
            self.campaigns.list_by_store(&query.store_id).await?
        };
        Ok(campaigns)
    }
}

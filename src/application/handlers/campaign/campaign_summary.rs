//! GetCampaignSummaryHandler - Performance of one campaign.

use std::sync::Arc;

use crate::domain::cashback::{CashbackError, CashbackSummary};
use crate::domain::foundation::{CampaignId, StoreId};
use crate::ports::{CampaignRepository, CouponRepository, SaleRepository};

#[derive(Debug, Clone)]
pub struct GetCampaignSummaryQuery {
    pub store_id: StoreId,
    pub campaign_id: CampaignId,
}

pub struct GetCampaignSummaryHandler {
    campaigns: Arc<dyn CampaignRepository>,
    coupons: Arc<dyn CouponRepository>,
    sales: Arc<dyn SaleRepository>,
}

impl GetCampaignSummaryHandler {
    pub fn new(
        campaigns: Arc<dyn CampaignRepository>,
        coupons: Arc<dyn CouponRepository>,
        sales: Arc<dyn SaleRepository>,
    ) -> Self {
        Self {
            campaigns,
            coupons,
            sales,
        }
    }

    /// Cumulative sales count only sales that redeemed a coupon of this
    /// campaign.
    pub async fn handle(
        &self,
        query: GetCampaignSummaryQuery,
    ) -> Result<CashbackSummary, CashbackError> {
        let campaign = self
            .campaigns
            .find_by_id(&query.campaign_id)
            .await?
            .filter(|c| c.store_id == query.store_id)
            .ok_or_else(|| CashbackError::not_found("campaign", query.campaign_id))?;

        let coupons = self.coupons.list_by_campaign(&campaign.id).await?;
        let sales = self.sales.list_by_store(&query.store_id).await?;
        Ok(CashbackSummary::compute(&coupons, &sales))
    }
}

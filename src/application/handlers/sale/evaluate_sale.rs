//! EvaluateSaleHandler - Runs coupon issuance for a recorded sale.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::cashback::{
    evaluate_sale_for_coupon, new_coupon_code, CashbackError, Coupon, Sale,
};
use crate::domain::foundation::{SaleId, StoreId, Timestamp};
use crate::ports::{CampaignRepository, SaleRepository};

/// Command to evaluate a sale for coupon issuance.
#[derive(Debug, Clone)]
pub struct EvaluateSaleCommand {
    pub store_id: StoreId,
    pub sale_id: SaleId,
}

/// Result of evaluating a sale.
#[derive(Debug, Clone)]
pub struct EvaluateSaleResult {
    pub sale: Sale,
    pub issued_coupon: Option<Coupon>,
}

/// Handler for coupon issuance.
///
/// Campaigns are read fresh on every call. The sale flag and the coupon are
/// stored in one transaction.
pub struct EvaluateSaleHandler {
    sales: Arc<dyn SaleRepository>,
    campaigns: Arc<dyn CampaignRepository>,
}

impl EvaluateSaleHandler {
    pub fn new(sales: Arc<dyn SaleRepository>, campaigns: Arc<dyn CampaignRepository>) -> Self {
        Self { sales, campaigns }
    }

    pub async fn handle(
        &self,
        cmd: EvaluateSaleCommand,
    ) -> Result<EvaluateSaleResult, CashbackError> {
        // 1. Load the sale, hiding other stores' records
        let mut sale = self
            .sales
            .find_by_id(&cmd.sale_id)
            .await?
            .filter(|s| s.is_owned_by(&cmd.store_id))
            .ok_or_else(|| CashbackError::not_found("sale", cmd.sale_id))?;

        if sale.is_evaluated {
            return Err(CashbackError::conflict(format!(
                "sale {} was already evaluated",
                sale.id
            )));
        }

        // 2. Match against the store's active campaigns
        let campaigns = self.campaigns.list_active(&cmd.store_id).await?;
        let issued_coupon =
            evaluate_sale_for_coupon(&mut sale, &campaigns, new_coupon_code(), Timestamp::now());

        // 3. Persist flag and coupon together
        self.sales
            .complete_evaluation(&sale, issued_coupon.as_ref())
            .await?;

        match &issued_coupon {
            Some(coupon) => info!(
                sale_id = %sale.id,
                coupon_id = %coupon.id,
                campaign_id = %coupon.campaign_id,
                discount_value = %coupon.discount_value,
                "Coupon issued"
            ),
            None => debug!(sale_id = %sale.id, "No campaign matched sale"),
        }

        Ok(EvaluateSaleResult {
            sale,
            issued_coupon,
        })
    }
}

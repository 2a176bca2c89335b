//! GetStoreSummaryHandler - Cashback figures for a whole store.

use std::sync::Arc;

use crate::domain::cashback::{CashbackError, CashbackSummary};
use crate::domain::foundation::StoreId;
use crate::ports::{CouponRepository, SaleRepository};

#[derive(Debug, Clone)]
pub struct GetStoreSummaryQuery {
    pub store_id: StoreId,
}

pub struct GetStoreSummaryHandler {
    coupons: Arc<dyn CouponRepository>,
    sales: Arc<dyn SaleRepository>,
}

impl GetStoreSummaryHandler {
    pub fn new(coupons: Arc<dyn CouponRepository>, sales: Arc<dyn SaleRepository>) -> Self {
        Self { coupons, sales }
    }

    pub async fn handle(
        &self,
        query: GetStoreSummaryQuery,
    ) -> Result<CashbackSummary, CashbackError> {
        let coupons = self.coupons.list_by_store(&query.store_id).await?;
        let sales = self.sales.list_by_store(&query.store_id).await?;
        Ok(CashbackSummary::compute(&coupons, &sales))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{draft, Fixture, PHONE};
    use crate::domain::foundation::{Money, Timestamp};

    #[tokio::test]
    async fn empty_store_has_no_conversion_rate() {
        let fx = Fixture::new();
        let summary = GetStoreSummaryHandler::new(fx.store.clone(), fx.store.clone())
            .handle(GetStoreSummaryQuery {
                store_id: fx.store_id,
            })
            .await
            .unwrap();
        assert_eq!(summary.conversion_rate, None);
        assert_eq!(summary.cumulative_sales, Money::ZERO);
    }

    #[tokio::test]
    async fn counts_valid_and_expired_coupons() {
        let fx = Fixture::new();
        let campaign = fx.campaign(draft(20, 30, 45)).await;
        let customer = fx.customer(PHONE).await;
        let issued = Timestamp::now().minus_days(50);

        let mut valid = fx.coupon(&customer, &campaign, 100, issued).await;
        valid.is_valid = true;
        fx.store.seed_coupon(valid).await;
        let mut expired = fx.coupon(&customer, &campaign, 100, issued).await;
        expired.is_valid = true;
        expired.is_expired = true;
        fx.store.seed_coupon(expired).await;
        fx.coupon(&customer, &campaign, 100, issued).await;

        let summary = GetStoreSummaryHandler::new(fx.store.clone(), fx.store.clone())
            .handle(GetStoreSummaryQuery {
                store_id: fx.store_id,
            })
            .await
            .unwrap();

        assert_eq!(summary.issued_coupons, 2);
        assert_eq!(summary.expired_coupons, 1);
        assert_eq!(summary.redeemed_coupons, 0);
        assert_eq!(summary.conversion_rate, Some(0.0));
    }
}

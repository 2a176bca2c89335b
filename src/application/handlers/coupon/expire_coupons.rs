//! ExpireCouponsHandler - Daily expiration sweep.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::domain::cashback::CashbackError;
use crate::ports::CouponRepository;

use super::report::LifecycleRunReport;

/// Command to retire coupons past their expiration date.
#[derive(Debug, Clone, Copy)]
pub struct ExpireCouponsCommand {
    /// UTC calendar day of the run.
    pub today: NaiveDate,
}

pub struct ExpireCouponsHandler {
    coupons: Arc<dyn CouponRepository>,
}

impl ExpireCouponsHandler {
    pub fn new(coupons: Arc<dyn CouponRepository>) -> Self {
        Self { coupons }
    }

    /// Marks every valid, unredeemed coupon with `expiration_date < today`
    /// as expired. Running it again on the same day changes nothing.
    ///
    /// Fails only if the candidates cannot be read; per-coupon write errors
    /// are reported.
    pub async fn handle(
        &self,
        cmd: ExpireCouponsCommand,
    ) -> Result<LifecycleRunReport, CashbackError> {
        let candidates = self.coupons.list_expiration_candidates().await?;
        let mut report = LifecycleRunReport {
            examined: candidates.len(),
            ..Default::default()
        };

        for mut coupon in candidates {
            if !coupon.expire_if_due(cmd.today) {
                continue;
            }
            match self.coupons.update_lifecycle(&coupon).await {
                Ok(()) => report.changed += 1,
                Err(e) => {
                    warn!(coupon_id = %coupon.id, error = %e, "Failed to expire coupon");
                    report.fail(coupon.id, None, e);
                }
            }
        }

        info!(
            today = %cmd.today,
            examined = report.examined,
            expired = report.changed,
            failures = report.failures.len(),
            "Expiration sweep finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{draft, Fixture, PHONE};
    use crate::domain::cashback::{Coupon, Customer};
    use crate::domain::foundation::{
        CampaignId, CouponId, CustomerId, DomainError, ErrorCode, StoreId, Timestamp,
    };
    use crate::ports::ActivationCandidate;
    use async_trait::async_trait;
    use chrono::Duration;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    /// Serves fixed candidates and refuses every write.
    struct ReadOnlyCoupons {
        candidates: Vec<Coupon>,
    }

    #[async_trait]
    impl CouponRepository for ReadOnlyCoupons {
        async fn find_by_id(&self, _id: &CouponId) -> Result<Option<Coupon>, DomainError> {
            Ok(None)
        }

        async fn list_by_store(&self, _store_id: &StoreId) -> Result<Vec<Coupon>, DomainError> {
            Ok(vec![])
        }

        async fn list_by_customer(
            &self,
            _store_id: &StoreId,
            _customer_id: &CustomerId,
        ) -> Result<Vec<Coupon>, DomainError> {
            Ok(vec![])
        }

        async fn list_by_campaign(
            &self,
            _campaign_id: &CampaignId,
        ) -> Result<Vec<Coupon>, DomainError> {
            Ok(vec![])
        }

        async fn list_redeemable(
            &self,
            _store_id: &StoreId,
            _customer_id: &CustomerId,
        ) -> Result<Vec<Coupon>, DomainError> {
            Ok(vec![])
        }

        async fn list_expiration_candidates(&self) -> Result<Vec<Coupon>, DomainError> {
            Ok(self.candidates.clone())
        }

        async fn list_activation_candidates(
            &self,
        ) -> Result<Vec<ActivationCandidate>, DomainError> {
            Ok(vec![])
        }

        async fn update_lifecycle(&self, _coupon: &Coupon) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::DatabaseError, "Simulated write failure"))
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════════

    async fn valid_coupon(
        fx: &Fixture,
        customer: &Customer,
        lifetime: i64,
        issued_days_ago: i64,
    ) -> Coupon {
        let campaign = fx.campaign(draft(20, 30, lifetime)).await;
        let mut coupon = fx
            .coupon(customer, &campaign, 100, Timestamp::now().minus_days(issued_days_ago))
            .await;
        coupon.is_valid = true;
        fx.store.seed_coupon(coupon.clone()).await;
        coupon
    }

    async fn stored(fx: &Fixture, id: &CouponId) -> Coupon {
        CouponRepository::find_by_id(fx.store.as_ref(), id)
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn expires_only_past_due_coupons_once() {
        let fx = Fixture::new();
        let customer = fx.customer(PHONE).await;
        let due = valid_coupon(&fx, &customer, 10, 11).await;
        let last_day = valid_coupon(&fx, &customer, 10, 10).await;
        let handler = ExpireCouponsHandler::new(fx.store.clone());
        let today = Timestamp::now().date();

        let first = handler.handle(ExpireCouponsCommand { today }).await.unwrap();
        assert_eq!(first.examined, 2);
        assert_eq!(first.changed, 1);
        assert!(first.is_clean());
        assert!(stored(&fx, &due.id).await.is_expired);
        assert!(!stored(&fx, &last_day.id).await.is_expired);

        let second = handler.handle(ExpireCouponsCommand { today }).await.unwrap();
        assert_eq!(second.examined, 1);
        assert_eq!(second.changed, 0);
    }

    #[tokio::test]
    async fn pending_coupons_are_not_expired() {
        let fx = Fixture::new();
        let customer = fx.customer(PHONE).await;
        let campaign = fx.campaign(draft(20, 30, 10)).await;
        let pending = fx
            .coupon(&customer, &campaign, 100, Timestamp::now().minus_days(30))
            .await;

        let report = ExpireCouponsHandler::new(fx.store.clone())
            .handle(ExpireCouponsCommand {
                today: Timestamp::now().date(),
            })
            .await
            .unwrap();

        assert_eq!(report.examined, 0);
        assert!(!stored(&fx, &pending.id).await.is_expired);
    }

    #[tokio::test]
    async fn write_failures_are_reported_not_raised() {
        let fx = Fixture::new();
        let customer = fx.customer(PHONE).await;
        let a = valid_coupon(&fx, &customer, 10, 20).await;
        let b = valid_coupon(&fx, &customer, 10, 20).await;
        let handler = ExpireCouponsHandler::new(Arc::new(ReadOnlyCoupons {
            candidates: vec![a, b],
        }));

        let report = handler
            .handle(ExpireCouponsCommand {
                today: Timestamp::now().date() + Duration::days(1),
            })
            .await
            .unwrap();

        assert_eq!(report.changed, 0);
        assert_eq!(report.failures.len(), 2);
        assert!(report.failures.iter().all(|f| f.stage.is_none()));
    }
}

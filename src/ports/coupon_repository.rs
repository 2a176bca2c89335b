//! Coupon repository port.
//!
//! Coupons are created by `SaleRepository::complete_evaluation` and redeemed
//! by `SaleRepository::insert`. This port reads them and persists the flags
//! owned by the lifecycle scheduler.

use crate::domain::cashback::Coupon;
use crate::domain::foundation::{
    CampaignId, Cellphone, CouponId, CustomerId, DomainError, StoreId,
};
use async_trait::async_trait;

/// A coupon in the activation cycle, joined with what its messages need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationCandidate {
    pub coupon: Coupon,
    pub cellphone: Cellphone,
    /// Current lifetime of the coupon's campaign.
    pub campaign_lifetime: u16,
    pub campaign_url: Option<String>,
}

#[async_trait]
pub trait CouponRepository: Send + Sync {
    /// Find a coupon by ID.
    async fn find_by_id(&self, id: &CouponId) -> Result<Option<Coupon>, DomainError>;

    /// All coupons of a store, newest first.
    async fn list_by_store(&self, store_id: &StoreId) -> Result<Vec<Coupon>, DomainError>;

    /// Coupons of one customer at a store, newest first.
    async fn list_by_customer(
        &self,
        store_id: &StoreId,
        customer_id: &CustomerId,
    ) -> Result<Vec<Coupon>, DomainError>;

    /// Coupons issued under a campaign.
    async fn list_by_campaign(&self, campaign_id: &CampaignId) -> Result<Vec<Coupon>, DomainError>;

    /// Valid, unredeemed, unexpired coupons of a customer, highest
    /// `discount_value` first, then oldest `date_added`.
    async fn list_redeemable(
        &self,
        store_id: &StoreId,
        customer_id: &CustomerId,
    ) -> Result<Vec<Coupon>, DomainError>;

    /// Every valid, unredeemed, unexpired coupon across all stores.
    async fn list_expiration_candidates(&self) -> Result<Vec<Coupon>, DomainError>;

    /// Every unredeemed, unexpired coupon that has not completed the
    /// activation cycle, across all stores.
    async fn list_activation_candidates(&self) -> Result<Vec<ActivationCandidate>, DomainError>;

    /// Persist the lifecycle flags and `last_notified_on`.
    ///
    /// # Errors
    ///
    /// - `CouponNotFound` if the coupon doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update_lifecycle(&self, coupon: &Coupon) -> Result<(), DomainError>;
}

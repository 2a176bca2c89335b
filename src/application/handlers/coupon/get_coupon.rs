//! Coupon queries.

use std::sync::Arc;

use crate::domain::cashback::{CashbackError, Coupon};
use crate::domain::foundation::{CouponId, CustomerId, StoreId};
use crate::ports::CouponRepository;

#[derive(Debug, Clone)]
pub struct GetCouponQuery {
    pub store_id: StoreId,
    pub coupon_id: CouponId,
}

pub struct GetCouponHandler {
    coupons: Arc<dyn CouponRepository>,
}

impl GetCouponHandler {
    pub fn new(coupons: Arc<dyn CouponRepository>) -> Self {
        Self { coupons }
    }

    pub async fn handle(&self, query: GetCouponQuery) -> Result<Coupon, CashbackError> {
        self.coupons
            .find_by_id(&query.coupon_id)
            .await?
            .filter(|c| c.is_owned_by(&query.store_id))
            .ok_or_else(|| CashbackError::not_found("coupon", query.coupon_id))
    }
}

#[derive(Debug, Clone)]
pub struct ListCouponsQuery {
    pub store_id: StoreId,
    /// Restrict to one customer.
    pub customer_id: Option<CustomerId>,
}

pub struct ListCouponsHandler {
    coupons: Arc<dyn CouponRepository>,
}

impl ListCouponsHandler {
    pub fn new(coupons: Arc<dyn CouponRepository>) -> Self {
        Self { coupons }
    }

    /// Newest first.
    pub async fn handle(&self, query: ListCouponsQuery) -> Result<Vec<Coupon>, CashbackError> {
        let coupons = match query.customer_id {
            Some(customer_id) => {
                self.coupons
                    .list_by_customer(&query.store_id, &customer_id)
                    .await?
            }
            None => self.coupons.list_by_store(&query.store_id).await?,
        };
        Ok(coupons)
    }
}

//! ListRedeemableCouponsHandler - Coupons a customer can use on a sale.

use std::sync::Arc;

use crate::domain::cashback::{apply_redemption, CashbackError, Coupon, Customer, Redemption};
use crate::domain::foundation::{Cellphone, Money, StoreId};
use crate::ports::{CouponRepository, CustomerRepository};

/// Query for the coupons offered at the counter.
#[derive(Debug, Clone)]
pub struct ListRedeemableCouponsQuery {
    pub store_id: StoreId,
    pub cellphone: String,
    /// Sale amount the previews are computed for.
    pub initial_value: Money,
}

/// A redeemable coupon with the discount it would give on this sale.
#[derive(Debug, Clone, PartialEq)]
pub struct RedeemableCoupon {
    pub coupon: Coupon,
    pub preview: Redemption,
}

/// Result of listing redeemable coupons.
///
/// `customer` is `None` for a number the store has never seen; such a
/// customer has no coupons and must be verified before the sale.
#[derive(Debug, Clone)]
pub struct ListRedeemableCouponsResult {
    pub customer: Option<Customer>,
    /// Highest discount value first.
    pub coupons: Vec<RedeemableCoupon>,
}

pub struct ListRedeemableCouponsHandler {
    customers: Arc<dyn CustomerRepository>,
    coupons: Arc<dyn CouponRepository>,
}

impl ListRedeemableCouponsHandler {
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        coupons: Arc<dyn CouponRepository>,
    ) -> Self {
        Self { customers, coupons }
    }

    pub async fn handle(
        &self,
        query: ListRedeemableCouponsQuery,
    ) -> Result<ListRedeemableCouponsResult, CashbackError> {
        let cellphone = Cellphone::parse(&query.cellphone)?;

        let Some(customer) = self
            .customers
            .find_by_cellphone(&query.store_id, &cellphone)
            .await?
        else {
            return Ok(ListRedeemableCouponsResult {
                customer: None,
                coupons: Vec::new(),
            });
        };

        let coupons = self
            .coupons
            .list_redeemable(&query.store_id, &customer.id)
            .await?
            .into_iter()
            .map(|coupon| RedeemableCoupon {
                preview: apply_redemption(query.initial_value, Some(&coupon)),
                coupon,
            })
            .collect();

        Ok(ListRedeemableCouponsResult {
            customer: Some(customer),
            coupons,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{draft, Fixture, PHONE};
    use crate::domain::foundation::Timestamp;

    fn handler(fx: &Fixture) -> ListRedeemableCouponsHandler {
        ListRedeemableCouponsHandler::new(fx.store.clone(), fx.store.clone())
    }

    #[tokio::test]
    async fn unknown_customer_has_no_coupons() {
        let fx = Fixture::new();

        let result = handler(&fx)
            .handle(ListRedeemableCouponsQuery {
                store_id: fx.store_id,
                cellphone: PHONE.to_string(),
                initial_value: Money::from_units(500),
            })
            .await
            .unwrap();

        assert!(result.customer.is_none());
        assert!(result.coupons.is_empty());
    }

    #[tokio::test]
    async fn lists_valid_coupons_by_value_with_previews() {
        let fx = Fixture::new();
        let campaign = fx.campaign(draft(20, 30, 45)).await;
        let customer = fx.customer(PHONE).await;
        let issued = Timestamp::now().minus_days(5);

        let mut small = fx.coupon(&customer, &campaign, 50, issued).await;
        small.is_valid = true;
        fx.store.seed_coupon(small).await;
        let mut large = fx.coupon(&customer, &campaign, 200, issued).await;
        large.is_valid = true;
        fx.store.seed_coupon(large).await;
        // not yet activated
        fx.coupon(&customer, &campaign, 300, issued).await;

        let result = handler(&fx)
            .handle(ListRedeemableCouponsQuery {
                store_id: fx.store_id,
                cellphone: PHONE.to_string(),
                initial_value: Money::from_units(500),
            })
            .await
            .unwrap();

        let values: Vec<_> = result
            .coupons
            .iter()
            .map(|c| c.coupon.discount_value)
            .collect();
        assert_eq!(values, vec![Money::from_units(200), Money::from_units(50)]);
        assert_eq!(result.coupons[0].preview.effective_discount, Money::from_units(150));
        assert_eq!(result.coupons[0].preview.final_value, Money::from_units(350));
        assert_eq!(result.coupons[1].preview.effective_discount, Money::from_units(50));
    }
}

//! Store and campaign performance figures.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::{CouponId, Money};

use super::coupon::Coupon;
use super::sale::Sale;

/// Cashback performance over a set of coupons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashbackSummary {
    /// Sum of final values of sales that redeemed one of the coupons.
    pub cumulative_sales: Money,
    /// Sum of face values of redeemed coupons.
    pub cumulative_discounts: Money,
    pub redeemed_coupons: u64,
    /// Coupons that reached validity.
    pub issued_coupons: u64,
    pub expired_coupons: u64,
    /// `redeemed / issued`; `None` while nothing was issued.
    pub conversion_rate: Option<f64>,
}

impl CashbackSummary {
    /// Summarizes `coupons`, counting `sales` that redeemed any of them.
    pub fn compute(coupons: &[Coupon], sales: &[Sale]) -> Self {
        let ids: HashSet<CouponId> = coupons.iter().map(|c| c.id).collect();

        let cumulative_sales = sales
            .iter()
            .filter(|s| s.redeemed_coupon.is_some_and(|id| ids.contains(&id)))
            .map(|s| s.final_value)
            .sum();
        let cumulative_discounts = coupons
            .iter()
            .filter(|c| c.is_redeemed)
            .map(|c| c.discount_value)
            .sum();

        let count = |pred: fn(&Coupon) -> bool| coupons.iter().filter(|c| pred(c)).count() as u64;
        let redeemed_coupons = count(|c| c.is_redeemed);
        let issued_coupons = count(|c| c.is_valid);
        let expired_coupons = count(|c| c.is_expired);

        let conversion_rate = if issued_coupons == 0 {
            None
        } else {
            Some(redeemed_coupons as f64 / issued_coupons as f64)
        };

        Self {
            cumulative_sales,
            cumulative_discounts,
            redeemed_coupons,
            issued_coupons,
            expired_coupons,
            conversion_rate,
        }
    }
}

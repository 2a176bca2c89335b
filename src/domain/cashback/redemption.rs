//! Applying a coupon to a new sale.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Money;

use super::coupon::Coupon;
use super::monetary::effective_discount;

/// Amounts of a sale after an optional coupon is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redemption {
    pub effective_discount: Money,
    pub final_value: Money,
}

/// Computes the discount and final value of a sale of `initial_value`.
///
/// The discount never exceeds `initial_value`, so the final value is never
/// negative even for a coupon whose limit rate is 100% or more.
pub fn apply_redemption(initial_value: Money, coupon: Option<&Coupon>) -> Redemption {
    let discount = match coupon {
        Some(coupon) => effective_discount(
            initial_value,
            coupon.discount_value,
            coupon.discount_limit_rate,
        )
        .min(initial_value),
        None => Money::ZERO,
    };
    Redemption {
        effective_discount: discount,
        final_value: initial_value.checked_sub(discount).unwrap_or(Money::ZERO),
    }
}

//! Monetary rules for coupon value and redemption discount.
//!
//! Both rules round **up** to a whole currency unit, so the customer never
//! receives less than the configured rate promises.

use crate::domain::foundation::{Money, Percentage};

/// Face value of a coupon issued for a sale: `ceil(final_value * bonus_rate / 100)`.
pub fn coupon_face_value(sale_final_value: Money, bonus_rate: Percentage) -> Money {
    sale_final_value.percent_ceil_whole(bonus_rate)
}

/// Discount actually granted when a coupon is redeemed on a sale.
///
/// The cap is `ceil(initial_value * discount_limit_rate / 100)`; the result
/// is the smaller of the cap and the coupon face value.
pub fn effective_discount(
    sale_initial_value: Money,
    coupon_face_value: Money,
    discount_limit_rate: Percentage,
) -> Money {
    let cap = sale_initial_value.percent_ceil_whole(discount_limit_rate);
    coupon_face_value.min(cap)
}

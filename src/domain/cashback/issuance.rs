//! Coupon issuance for a newly recorded sale.

use crate::domain::foundation::Timestamp;

use super::campaign::Campaign;
use super::codes::CouponCode;
use super::coupon::Coupon;
use super::matcher::select_campaign;
use super::sale::Sale;

/// Evaluates `sale` against the store's campaigns.
///
/// Marks the sale evaluated whether or not a coupon is issued. Does not
/// look at `is_evaluated` first: callers run it once per sale and persist the
/// sale flag and the coupon in one transaction.
pub fn evaluate_sale_for_coupon(
    sale: &mut Sale,
    campaigns: &[Campaign],
    code: CouponCode,
    now: Timestamp,
) -> Option<Coupon> {
    let coupon = select_campaign(campaigns, sale.final_value)
        .map(|campaign| Coupon::issue(sale, campaign, code, now));
    sale.mark_evaluated();
    coupon
}

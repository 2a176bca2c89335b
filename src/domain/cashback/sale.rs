//! Sale entity.
//!
//! A sale is the trigger for coupon issuance and the place where a previously
//! issued coupon is redeemed. Its amounts always satisfy
//! `final_value == initial_value - effective_discount`.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ensure_max_chars, CouponId, CustomerId, Money, SaleId, StoreId, Timestamp, ValidationError,
};

use super::coupon::Coupon;
use super::redemption::{apply_redemption, Redemption};

/// How far back a sale may be dated relative to the day it is registered.
pub const SALE_DATE_MAX_DAYS_BEFORE: i64 = 15;

/// How far ahead a sale may be dated relative to the day it is registered.
pub const SALE_DATE_MAX_DAYS_AFTER: i64 = 1;

/// Maximum length of the point-of-sale receipt identifier.
pub const SALE_IDENTIFIER_MAX_CHARS: usize = 12;

/// A recorded purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    pub store_id: StoreId,
    pub customer_id: CustomerId,
    pub initial_value: Money,
    pub effective_discount: Money,
    pub final_value: Money,
    pub redeemed_coupon: Option<CouponId>,
    /// Receipt number from the store's point of sale, if any.
    pub identifier: Option<String>,
    pub is_evaluated: bool,
    /// Transaction date as declared by the seller.
    pub date: NaiveDate,
    pub date_added: Timestamp,
}

/// Sale fields typed by the seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleDraft {
    pub initial_value: Money,
    pub identifier: Option<String>,
    pub date: NaiveDate,
}

impl Sale {
    /// Records a sale, applying `coupon` when one was chosen.
    ///
    /// The coupon itself is not modified here; the caller flips it to
    /// redeemed in the same transaction that stores the sale.
    pub fn record(
        store_id: StoreId,
        customer_id: CustomerId,
        draft: SaleDraft,
        coupon: Option<&Coupon>,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        validate_sale_date(draft.date, now.date())?;
        let identifier = validate_identifier(draft.identifier)?;
        let Redemption {
            effective_discount,
            final_value,
        } = apply_redemption(draft.initial_value, coupon);

        Ok(Self {
            id: SaleId::new(),
            store_id,
            customer_id,
            initial_value: draft.initial_value,
            effective_discount,
            final_value,
            redeemed_coupon: coupon.map(|c| c.id),
            identifier,
            is_evaluated: false,
            date: draft.date,
            date_added: now,
        })
    }

    /// Marks the sale as evaluated for coupon issuance. Never reverts.
    pub fn mark_evaluated(&mut self) {
        self.is_evaluated = true;
    }

    /// True if `final_value == initial_value - effective_discount`.
    pub fn is_conciliated(&self) -> bool {
        self.initial_value.checked_sub(self.effective_discount) == Some(self.final_value)
    }

    pub fn is_owned_by(&self, store_id: &StoreId) -> bool {
        &self.store_id == store_id
    }
}

/// Checks `date` lies in `[registered - 15 days, registered + 1 day]`.
pub fn validate_sale_date(date: NaiveDate, registered: NaiveDate) -> Result<(), ValidationError> {
    let offset = (date - registered).num_days();
    if !(-SALE_DATE_MAX_DAYS_BEFORE..=SALE_DATE_MAX_DAYS_AFTER).contains(&offset) {
        let earliest = registered - Duration::days(SALE_DATE_MAX_DAYS_BEFORE);
        let latest = registered + Duration::days(SALE_DATE_MAX_DAYS_AFTER);
        return Err(ValidationError::invalid_format(
            "date",
            format!("sale date must be between {} and {}", earliest, latest),
        ));
    }
    Ok(())
}

fn validate_identifier(identifier: Option<String>) -> Result<Option<String>, ValidationError> {
    let Some(identifier) = identifier
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
    else {
        return Ok(None);
    };
    ensure_max_chars("identifier", &identifier, SALE_IDENTIFIER_MAX_CHARS)?;
    Ok(Some(identifier))
}

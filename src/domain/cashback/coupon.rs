//! Coupon entity and its derived status.
//!
//! A coupon is issued from exactly one sale under one campaign. Its face value,
//! discount limit rate and expiration date are fixed at issuance. Four flags
//! track its lifecycle; each is written by exactly one component:
//!
//! | Flag | Written by |
//! |------|------------|
//! | `is_valid` | activation cycle, first stage |
//! | `is_activated` | activation cycle, final stage |
//! | `is_expired` | expiration sweep |
//! | `is_redeemed` | redemption flow |

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{
    CampaignId, CouponId, CustomerId, DomainError, ErrorCode, Money, Percentage, SaleId, StoreId,
    Timestamp,
};

use super::activation::ActivationStage;
use super::campaign::Campaign;
use super::codes::CouponCode;
use super::monetary::coupon_face_value;
use super::sale::Sale;

/// Display status, derived from the flags in the order
/// redeemed > expired > valid > invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouponStatus {
    Redeemed,
    Expired,
    Valid,
    Invalid,
}

impl CouponStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CouponStatus::Redeemed => "redeemed",
            CouponStatus::Expired => "expired",
            CouponStatus::Valid => "valid",
            CouponStatus::Invalid => "invalid",
        }
    }
}

impl fmt::Display for CouponStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single-use discount instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    pub id: CouponId,
    pub store_id: StoreId,
    pub sale_id: SaleId,
    pub campaign_id: CampaignId,
    pub customer_id: CustomerId,
    pub code: CouponCode,
    /// Face value, computed once at issuance.
    pub discount_value: Money,
    /// Copied from the campaign at issuance.
    pub discount_limit_rate: Percentage,
    pub expiration_date: NaiveDate,
    pub is_valid: bool,
    pub is_activated: bool,
    pub is_expired: bool,
    pub is_redeemed: bool,
    /// Day the last activation stage fired.
    pub last_notified_on: Option<NaiveDate>,
    pub date_added: Timestamp,
}

impl Coupon {
    /// Issues a coupon for `sale` under `campaign`.
    ///
    /// Expires `coupon_lifetime` days after the day the sale was registered.
    pub fn issue(sale: &Sale, campaign: &Campaign, code: CouponCode, now: Timestamp) -> Self {
        Self {
            id: CouponId::new(),
            store_id: sale.store_id,
            sale_id: sale.id,
            campaign_id: campaign.id,
            customer_id: sale.customer_id,
            code,
            discount_value: coupon_face_value(sale.final_value, campaign.bonus_rate),
            discount_limit_rate: campaign.discount_limit_rate,
            expiration_date: sale.date_added.date()
                + Duration::days(i64::from(campaign.coupon_lifetime)),
            is_valid: false,
            is_activated: false,
            is_expired: false,
            is_redeemed: false,
            last_notified_on: None,
            date_added: now,
        }
    }

    pub fn status(&self) -> CouponStatus {
        if self.is_redeemed {
            CouponStatus::Redeemed
        } else if self.is_expired {
            CouponStatus::Expired
        } else if self.is_valid {
            CouponStatus::Valid
        } else {
            CouponStatus::Invalid
        }
    }

    /// True if the coupon may be applied to a new sale.
    pub fn is_redeemable(&self) -> bool {
        self.is_valid && !self.is_redeemed && !self.is_expired
    }

    /// Flips the coupon to redeemed.
    ///
    /// # Errors
    ///
    /// Returns `CouponNotRedeemable` if the coupon is not valid, already
    /// redeemed or expired.
    pub fn redeem(&mut self) -> Result<(), DomainError> {
        if !self.is_redeemable() {
            return Err(DomainError::new(
                ErrorCode::CouponNotRedeemable,
                format!("Coupon {} is {}", self.code, self.status()),
            )
            .with_detail("coupon_id", self.id.to_string()));
        }
        self.is_redeemed = true;
        Ok(())
    }

    /// Day the activation stages are counted from.
    pub fn trigger_date(&self) -> NaiveDate {
        self.date_added.date()
    }

    /// True if the coupon is still in the activation cycle.
    pub fn is_activation_candidate(&self) -> bool {
        !self.is_redeemed && !self.is_expired && !self.is_activated
    }

    /// True if the expiration sweep must retire the coupon on `today`.
    pub fn is_expiration_due(&self, today: NaiveDate) -> bool {
        self.is_valid && !self.is_redeemed && !self.is_expired && self.expiration_date < today
    }

    /// Marks the coupon expired if due. Returns whether anything changed.
    pub fn expire_if_due(&mut self, today: NaiveDate) -> bool {
        if !self.is_expiration_due(today) {
            return false;
        }
        self.is_expired = true;
        true
    }

    /// True if a stage already fired on `today`.
    pub fn was_notified_on(&self, today: NaiveDate) -> bool {
        self.last_notified_on == Some(today)
    }

    /// Applies the flag change that goes with an activation stage fired on
    /// `today`.
    pub fn apply_stage(&mut self, stage: ActivationStage, today: NaiveDate) {
        self.last_notified_on = Some(today);
        match stage {
            ActivationStage::FirstActivation => self.is_valid = true,
            ActivationStage::Reminder | ActivationStage::SecondReminder => {}
            ActivationStage::FinalWarning => self.is_activated = true,
        }
    }

    pub fn is_owned_by(&self, store_id: &StoreId) -> bool {
        &self.store_id == store_id
    }
}

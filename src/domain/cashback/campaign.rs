//! Campaign entity.
//!
//! A campaign defines which sales earn a coupon (final value within
//! `[min_sale_value, max_sale_value]`) and the terms of that coupon (bonus
//! rate, discount limit, lifetime). A store may run several active campaigns
//! at once; see [`super::matcher`] for how one is chosen.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ensure_max_chars, CampaignId, Money, Percentage, StoreId, Timestamp, ValidationError,
};

use super::settings::StoreSettings;

/// Shortest coupon lifetime a campaign may grant.
pub const MIN_COUPON_LIFETIME_DAYS: u16 = 5;

pub const CAMPAIGN_TITLE_MAX_CHARS: usize = 60;

/// The URL is appended to every activation SMS, so it must stay short.
pub const URL_MAX_CHARS: usize = 20;

/// Upper bound pre-filled into new campaigns so that every sale matches.
pub const DEFAULT_MAX_SALE_UNITS: u32 = 100_000;

/// An incentive campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: CampaignId,
    pub store_id: StoreId,
    pub title: String,
    pub min_sale_value: Money,
    pub max_sale_value: Money,
    pub url: Option<String>,
    pub bonus_rate: Percentage,
    pub discount_limit_rate: Percentage,
    /// Coupon lifetime in days.
    pub coupon_lifetime: u16,
    pub is_active: bool,
    pub date_added: Timestamp,
}

/// Unvalidated campaign fields as submitted by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignDraft {
    pub title: String,
    pub min_sale_value: Money,
    pub max_sale_value: Money,
    pub url: Option<String>,
    pub bonus_rate: i64,
    pub discount_limit_rate: i64,
    pub coupon_lifetime: i64,
    pub is_active: bool,
}

impl CampaignDraft {
    /// A draft pre-filled from the store's default settings.
    pub fn prefilled(settings: &StoreSettings) -> Self {
        Self {
            title: String::new(),
            min_sale_value: Money::ZERO,
            max_sale_value: Money::from_units(DEFAULT_MAX_SALE_UNITS),
            url: settings.url.clone(),
            bonus_rate: i64::from(settings.bonus_rate.value()),
            discount_limit_rate: i64::from(settings.discount_limit_rate.value()),
            coupon_lifetime: i64::from(settings.coupon_lifetime),
            is_active: true,
        }
    }
}

/// Validated campaign terms.
struct CampaignTerms {
    title: String,
    min_sale_value: Money,
    max_sale_value: Money,
    url: Option<String>,
    bonus_rate: Percentage,
    discount_limit_rate: Percentage,
    coupon_lifetime: u16,
}

impl CampaignTerms {
    fn validate(draft: CampaignDraft) -> Result<Self, ValidationError> {
        let title = draft.title.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        ensure_max_chars("title", &title, CAMPAIGN_TITLE_MAX_CHARS)?;

        if draft.max_sale_value < draft.min_sale_value {
            return Err(ValidationError::invalid_format(
                "max_sale_value",
                "maximum purchase amount must be greater than minimum purchase amount",
            ));
        }

        Ok(Self {
            title,
            min_sale_value: draft.min_sale_value,
            max_sale_value: draft.max_sale_value,
            url: validate_url(draft.url)?,
            bonus_rate: Percentage::try_new("bonus_rate", draft.bonus_rate)?,
            discount_limit_rate: Percentage::try_new("discount_limit_rate", draft.discount_limit_rate)?,
            coupon_lifetime: validate_coupon_lifetime(draft.coupon_lifetime)?,
        })
    }
}

impl Campaign {
    /// Creates a campaign for `store_id` after validating the draft.
    pub fn create(
        store_id: StoreId,
        draft: CampaignDraft,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let is_active = draft.is_active;
        let terms = CampaignTerms::validate(draft)?;
        Ok(Self {
            id: CampaignId::new(),
            store_id,
            title: terms.title,
            min_sale_value: terms.min_sale_value,
            max_sale_value: terms.max_sale_value,
            url: terms.url,
            bonus_rate: terms.bonus_rate,
            discount_limit_rate: terms.discount_limit_rate,
            coupon_lifetime: terms.coupon_lifetime,
            is_active,
            date_added: now,
        })
    }

    /// Replaces the editable fields.
    ///
    /// Coupons already issued keep the terms they were issued with.
    pub fn revise(&mut self, draft: CampaignDraft) -> Result<(), ValidationError> {
        let is_active = draft.is_active;
        let terms = CampaignTerms::validate(draft)?;
        self.title = terms.title;
        self.min_sale_value = terms.min_sale_value;
        self.max_sale_value = terms.max_sale_value;
        self.url = terms.url;
        self.bonus_rate = terms.bonus_rate;
        self.discount_limit_rate = terms.discount_limit_rate;
        self.coupon_lifetime = terms.coupon_lifetime;
        self.is_active = is_active;
        Ok(())
    }

    /// True if a sale with this final value is eligible under the campaign.
    pub fn accepts(&self, sale_final_value: Money) -> bool {
        self.min_sale_value <= sale_final_value && sale_final_value <= self.max_sale_value
    }
}

/// Validates a coupon lifetime in days.
///
/// Only the minimum is a rule; the `u16` ceiling keeps expiration dates
/// representable.
pub fn validate_coupon_lifetime(days: i64) -> Result<u16, ValidationError> {
    let min = i64::from(MIN_COUPON_LIFETIME_DAYS);
    match u16::try_from(days) {
        Ok(lifetime) if days >= min => Ok(lifetime),
        _ => Err(ValidationError::out_of_range(
            "coupon_lifetime",
            min,
            i64::from(u16::MAX),
            days,
        )),
    }
}

/// Validates an optional short URL; blank input means "no URL".
pub fn validate_url(url: Option<String>) -> Result<Option<String>, ValidationError> {
    let Some(url) = url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) else {
        return Ok(None);
    };
    ensure_max_chars("url", &url, URL_MAX_CHARS)?;
    let host = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| ValidationError::invalid_format("url", "must start with http:// or https://"))?;
    if !host.contains('.') || host.starts_with('.') || host.contains(char::is_whitespace) {
        return Err(ValidationError::invalid_format("url", "must contain a valid host"));
    }
    Ok(Some(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> CampaignDraft {
        CampaignDraft {
            title: "Summer cashback".to_string(),
            min_sale_value: Money::ZERO,
            max_sale_value: Money::from_units(100_000),
            url: Some("https://loja.io".to_string()),
            bonus_rate: 20,
            discount_limit_rate: 30,
            coupon_lifetime: 45,
            is_active: true,
        }
    }

    #[test]
    fn creates_valid_campaign() {
        let campaign = Campaign::create(StoreId::new(), draft(), Timestamp::now()).unwrap();
        assert_eq!(campaign.bonus_rate.value(), 20);
        assert_eq!(campaign.coupon_lifetime, 45);
        assert!(campaign.is_active);
    }

    #[test]
    fn rejects_min_above_max() {
        let mut d = draft();
        d.min_sale_value = Money::from_units(500);
        d.max_sale_value = Money::from_units(100);
        let err = Campaign::create(StoreId::new(), d, Timestamp::now()).unwrap_err();
        assert_eq!(err.field(), "max_sale_value");
    }

    #[test]
    fn accepts_equal_min_and_max() {
        let mut d = draft();
        d.min_sale_value = Money::from_units(100);
        d.max_sale_value = Money::from_units(100);
        let campaign = Campaign::create(StoreId::new(), d, Timestamp::now()).unwrap();
        assert!(campaign.accepts(Money::from_units(100)));
        assert!(!campaign.accepts(Money::from_cents(10_001).unwrap()));
    }

    #[test]
    fn rejects_lifetime_under_five_days() {
        let mut d = draft();
        d.coupon_lifetime = 4;
        assert!(Campaign::create(StoreId::new(), d.clone(), Timestamp::now()).is_err());
        d.coupon_lifetime = 5;
        assert!(Campaign::create(StoreId::new(), d, Timestamp::now()).is_ok());
    }

    #[test]
    fn accepts_rates_above_hundred_and_long_lifetimes() {
        let mut d = draft();
        d.bonus_rate = 150;
        d.discount_limit_rate = 200;
        d.coupon_lifetime = 5_000;
        let campaign = Campaign::create(StoreId::new(), d, Timestamp::now()).unwrap();
        assert_eq!(campaign.bonus_rate.value(), 150);
        assert_eq!(campaign.discount_limit_rate.value(), 200);
        assert_eq!(campaign.coupon_lifetime, 5_000);
    }

    #[test]
    fn rejects_negative_rates() {
        let mut d = draft();
        d.bonus_rate = -5;
        assert!(Campaign::create(StoreId::new(), d, Timestamp::now()).is_err());
    }

    #[test]
    fn rejects_blank_title() {
        let mut d = draft();
        d.title = "   ".to_string();
        assert!(matches!(
            Campaign::create(StoreId::new(), d, Timestamp::now()),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn eligibility_bounds_are_inclusive() {
        let mut d = draft();
        d.min_sale_value = Money::from_units(100);
        d.max_sale_value = Money::from_units(200);
        let campaign = Campaign::create(StoreId::new(), d, Timestamp::now()).unwrap();

        assert!(campaign.accepts(Money::from_units(100)));
        assert!(campaign.accepts(Money::from_units(200)));
        assert!(!campaign.accepts(Money::from_cents(9_999).unwrap()));
        assert!(!campaign.accepts(Money::from_cents(20_001).unwrap()));
    }

    #[test]
    fn revise_updates_terms_and_keeps_identity() {
        let mut campaign = Campaign::create(StoreId::new(), draft(), Timestamp::now()).unwrap();
        let id = campaign.id;
        let mut d = draft();
        d.bonus_rate = 10;
        d.is_active = false;

        campaign.revise(d).unwrap();
        assert_eq!(campaign.id, id);
        assert_eq!(campaign.bonus_rate.value(), 10);
        assert!(!campaign.is_active);
    }

    #[test]
    fn revise_rejects_invalid_draft_without_partial_update() {
        let mut campaign = Campaign::create(StoreId::new(), draft(), Timestamp::now()).unwrap();
        let before = campaign.clone();
        let mut d = draft();
        d.bonus_rate = 15;
        d.coupon_lifetime = 1;

        assert!(campaign.revise(d).is_err());
        assert_eq!(campaign, before);
    }

    #[test]
    fn prefilled_draft_uses_store_defaults() {
        let settings = StoreSettings::defaults_for(StoreId::new());
        let d = CampaignDraft::prefilled(&settings);
        assert_eq!(d.min_sale_value, Money::ZERO);
        assert_eq!(d.max_sale_value, Money::from_units(100_000));
        assert_eq!(d.bonus_rate, 20);
        assert_eq!(d.discount_limit_rate, 30);
        assert_eq!(d.coupon_lifetime, 45);
    }

    #[test]
    fn url_validation() {
        assert_eq!(validate_url(None).unwrap(), None);
        assert_eq!(validate_url(Some("  ".to_string())).unwrap(), None);
        assert!(validate_url(Some("loja.io".to_string())).is_err());
        assert!(validate_url(Some("https://a-very-long-domain.com".to_string())).is_err());
        assert_eq!(
            validate_url(Some("http://x.co".to_string())).unwrap(),
            Some("http://x.co".to_string())
        );
    }
}

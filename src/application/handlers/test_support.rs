//! Shared fixtures for handler tests.

use std::sync::Arc;

use crate::adapters::memory::{InMemoryCashbackStore, RecordingSmsSender};
use crate::domain::cashback::{Campaign, CampaignDraft, Coupon, Customer, new_coupon_code};
use crate::domain::foundation::{
    Cellphone, CouponId, Money, Percentage, SaleId, StoreId, Timestamp,
};
use crate::ports::{CampaignRepository, CustomerRepository};

pub const PHONE: &str = "5511999998888";

pub struct Fixture {
    pub store: Arc<InMemoryCashbackStore>,
    pub sms: Arc<RecordingSmsSender>,
    pub store_id: StoreId,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryCashbackStore::new()),
            sms: Arc::new(RecordingSmsSender::new()),
            store_id: StoreId::new(),
        }
    }

    pub async fn campaign(&self, draft: CampaignDraft) -> Campaign {
        let campaign = Campaign::create(self.store_id, draft, Timestamp::now()).unwrap();
        CampaignRepository::save(self.store.as_ref(), &campaign).await.unwrap();
        campaign
    }

    pub async fn customer(&self, phone: &str) -> Customer {
        let customer =
            Customer::register_verified(self.store_id, Cellphone::parse(phone).unwrap(), Timestamp::now());
        CustomerRepository::save(self.store.as_ref(), &customer).await.unwrap();
        customer
    }

    /// Places a coupon directly in the store, skipping issuance.
    pub async fn coupon(
        &self,
        customer: &Customer,
        campaign: &Campaign,
        value: u32,
        issued: Timestamp,
    ) -> Coupon {
        let coupon = Coupon {
            id: CouponId::new(),
            store_id: self.store_id,
            sale_id: SaleId::new(),
            campaign_id: campaign.id,
            customer_id: customer.id,
            code: new_coupon_code(),
            discount_value: Money::from_units(value),
            discount_limit_rate: campaign.discount_limit_rate,
            expiration_date: issued.date()
                + chrono::Duration::days(i64::from(campaign.coupon_lifetime)),
            is_valid: false,
            is_activated: false,
            is_expired: false,
            is_redeemed: false,
            last_notified_on: None,
            date_added: issued,
        };
        self.store.seed_coupon(coupon.clone()).await;
        coupon
    }
}

/// A campaign open to every sale.
pub fn draft(bonus: i64, limit: i64, lifetime: i64) -> CampaignDraft {
    CampaignDraft {
        title: format!("{}% cashback", bonus),
        min_sale_value: Money::ZERO,
        max_sale_value: Money::from_units(100_000),
        url: Some("https://loja.io".to_string()),
        bonus_rate: bonus,
        discount_limit_rate: limit,
        coupon_lifetime: lifetime,
        is_active: true,
    }
}

pub fn pct(value: u16) -> Percentage {
    Percentage::new(value)
}

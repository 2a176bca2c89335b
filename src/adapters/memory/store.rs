//! In-memory cashback store.
//!
//! Implements every repository port over one set of tables behind a single
//! `tokio::sync::RwLock`, so each write operation is atomic the same way a
//! database transaction is. Enforces the same integrity rules as the
//! PostgreSQL schema.
//!
//! Intended for tests and local runs; nothing is persisted.
//!
//! # Example
//!
//! ```ignore
//! let store = Arc::new(InMemoryCashbackStore::new());
//! let sales: Arc<dyn SaleRepository> = store.clone();
//! let coupons: Arc<dyn CouponRepository> = store.clone();
//! ```

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::cashback::{Campaign, Coupon, Customer, Sale, StoreSettings};
use crate::domain::foundation::{
    CampaignId, Cellphone, CouponId, CustomerId, DomainError, ErrorCode, SaleId, StoreId,
    Timestamp,
};
use crate::ports::{
    ActivationCandidate, CampaignRepository, CouponRepository, CustomerRepository,
    SaleRepository, StoreSettingsRepository,
};

#[derive(Default)]
struct Tables {
    customers: HashMap<CustomerId, Customer>,
    sales: HashMap<SaleId, Sale>,
    campaigns: HashMap<CampaignId, Campaign>,
    coupons: HashMap<CouponId, Coupon>,
    settings: HashMap<StoreId, StoreSettings>,
}

/// In-memory implementation of the cashback repositories.
#[derive(Default)]
pub struct InMemoryCashbackStore {
    tables: RwLock<Tables>,
}

impl InMemoryCashbackStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // === Test Helpers ===

    /// Number of coupons held.
    pub async fn coupon_count(&self) -> usize {
        self.tables.read().await.coupons.len()
    }

    /// Inserts a coupon directly, bypassing issuance.
    ///
    /// Lets tests place coupons at arbitrary points of their lifecycle.
    pub async fn seed_coupon(&self, coupon: Coupon) {
        self.tables.write().await.coupons.insert(coupon.id, coupon);
    }
}

fn not_found(code: ErrorCode, entity: &str, id: impl ToString) -> DomainError {
    let id = id.to_string();
    DomainError::new(code, format!("{} not found: {}", entity, id)).with_detail("id", id)
}

fn newest_first<T>(mut items: Vec<T>, key: impl Fn(&T) -> (Timestamp, Uuid)) -> Vec<T> {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
    items
}

#[async_trait]
impl CustomerRepository for InMemoryCashbackStore {
    async fn save(&self, customer: &Customer) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let duplicate = tables
            .customers
            .values()
            .any(|c| c.store_id == customer.store_id && c.cellphone == customer.cellphone);
        if duplicate || tables.customers.contains_key(&customer.id) {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                format!("Customer {} already exists", customer.cellphone),
            ));
        }
        tables.customers.insert(customer.id, customer.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, DomainError> {
        Ok(self.tables.read().await.customers.get(id).cloned())
    }

    async fn find_by_cellphone(
        &self,
        store_id: &StoreId,
        cellphone: &Cellphone,
    ) -> Result<Option<Customer>, DomainError> {
        Ok(self
            .tables
            .read()
            .await
            .customers
            .values()
            .find(|c| &c.store_id == store_id && &c.cellphone == cellphone)
            .cloned())
    }
}

#[async_trait]
impl SaleRepository for InMemoryCashbackStore {
    async fn insert(&self, sale: &Sale) -> Result<(), DomainError> {
        if !sale.is_conciliated() {
            return Err(DomainError::validation(
                "final_value",
                "final value must equal initial value minus effective discount",
            ));
        }
        let mut tables = self.tables.write().await;
        if tables.sales.contains_key(&sale.id) {
            return Err(DomainError::new(ErrorCode::Conflict, format!("Sale {} already exists", sale.id)));
        }
        if let Some(coupon_id) = sale.redeemed_coupon {
            let coupon = tables
                .coupons
                .get_mut(&coupon_id)
                .filter(|c| c.store_id == sale.store_id && c.customer_id == sale.customer_id)
                .ok_or_else(|| not_found(ErrorCode::CouponNotFound, "Coupon", coupon_id))?;
            coupon.redeem()?;
        }
        tables.sales.insert(sale.id, sale.clone());
        Ok(())
    }

    async fn complete_evaluation(
        &self,
        sale: &Sale,
        coupon: Option<&Coupon>,
    ) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.sales.contains_key(&sale.id) {
            return Err(not_found(ErrorCode::SaleNotFound, "Sale", sale.id));
        }
        if let Some(coupon) = coupon {
            if tables.coupons.values().any(|c| c.sale_id == coupon.sale_id) {
                return Err(DomainError::new(
                    ErrorCode::Conflict,
                    format!("Sale {} already has a coupon", coupon.sale_id),
                ));
            }
            tables.coupons.insert(coupon.id, coupon.clone());
        }
        if let Some(stored) = tables.sales.get_mut(&sale.id) {
            stored.mark_evaluated();
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &SaleId) -> Result<Option<Sale>, DomainError> {
        Ok(self.tables.read().await.sales.get(id).cloned())
    }

    async fn list_by_store(&self, store_id: &StoreId) -> Result<Vec<Sale>, DomainError> {
        let tables = self.tables.read().await;
        let sales = tables
            .sales
            .values()
            .filter(|s| &s.store_id == store_id)
            .cloned()
            .collect();
        Ok(newest_first(sales, |s| (s.date_added, *s.id.as_uuid())))
    }
}

#[async_trait]
impl CampaignRepository for InMemoryCashbackStore {
    async fn save(&self, campaign: &Campaign) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if tables.campaigns.contains_key(&campaign.id) {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                format!("Campaign {} already exists", campaign.id),
            ));
        }
        tables.campaigns.insert(campaign.id, campaign.clone());
        Ok(())
    }

    async fn update(&self, campaign: &Campaign) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .campaigns
            .get_mut(&campaign.id)
            .ok_or_else(|| not_found(ErrorCode::CampaignNotFound, "Campaign", campaign.id))?;
        *stored = campaign.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &CampaignId) -> Result<Option<Campaign>, DomainError> {
        Ok(self.tables.read().await.campaigns.get(id).cloned())
    }

    async fn list_by_store(&self, store_id: &StoreId) -> Result<Vec<Campaign>, DomainError> {
        let tables = self.tables.read().await;
        let campaigns = tables
            .campaigns
            .values()
            .filter(|c| &c.store_id == store_id)
            .cloned()
            .collect();
        Ok(newest_first(campaigns, |c| (c.date_added, *c.id.as_uuid())))
    }

    async fn list_active(&self, store_id: &StoreId) -> Result<Vec<Campaign>, DomainError> {
        let mut active = CampaignRepository::list_by_store(self, store_id).await?;
        active.retain(|c| c.is_active);
        Ok(active)
    }
}

#[async_trait]
impl CouponRepository for InMemoryCashbackStore {
    async fn find_by_id(&self, id: &CouponId) -> Result<Option<Coupon>, DomainError> {
        Ok(self.tables.read().await.coupons.get(id).cloned())
    }

    async fn list_by_store(&self, store_id: &StoreId) -> Result<Vec<Coupon>, DomainError> {
        let tables = self.tables.read().await;
        let coupons = tables
            .coupons
            .values()
            .filter(|c| &c.store_id == store_id)
            .cloned()
            .collect();
        Ok(newest_first(coupons, |c| (c.date_added, *c.id.as_uuid())))
    }

    async fn list_by_customer(
        &self,
        store_id: &StoreId,
        customer_id: &CustomerId,
    ) -> Result<Vec<Coupon>, DomainError> {
        let mut coupons = CouponRepository::list_by_store(self, store_id).await?;
        coupons.retain(|c| &c.customer_id == customer_id);
        Ok(coupons)
    }

    async fn list_by_campaign(&self, campaign_id: &CampaignId) -> Result<Vec<Coupon>, DomainError> {
        let tables = self.tables.read().await;
        let coupons = tables
            .coupons
            .values()
            .filter(|c| &c.campaign_id == campaign_id)
            .cloned()
            .collect();
        Ok(newest_first(coupons, |c| (c.date_added, *c.id.as_uuid())))
    }

    async fn list_redeemable(
        &self,
        store_id: &StoreId,
        customer_id: &CustomerId,
    ) -> Result<Vec<Coupon>, DomainError> {
        let mut coupons = self.list_by_customer(store_id, customer_id).await?;
        coupons.retain(Coupon::is_redeemable);
        coupons.sort_by_key(|c| (Reverse(c.discount_value), c.date_added, *c.id.as_uuid()));
        Ok(coupons)
    }

    async fn list_expiration_candidates(&self) -> Result<Vec<Coupon>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .coupons
            .values()
            .filter(|c| c.is_valid && !c.is_redeemed && !c.is_expired)
            .cloned()
            .collect())
    }

    async fn list_activation_candidates(&self) -> Result<Vec<ActivationCandidate>, DomainError> {
        let tables = self.tables.read().await;
        let candidates = tables
            .coupons
            .values()
            .filter(|c| c.is_activation_candidate())
            .filter_map(|coupon| {
                let customer = tables.customers.get(&coupon.customer_id)?;
                let campaign = tables.campaigns.get(&coupon.campaign_id)?;
                Some(ActivationCandidate {
                    coupon: coupon.clone(),
                    cellphone: customer.cellphone.clone(),
                    campaign_lifetime: campaign.coupon_lifetime,
                    campaign_url: campaign.url.clone(),
                })
            })
            .collect();
        Ok(candidates)
    }

    async fn update_lifecycle(&self, coupon: &Coupon) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .coupons
            .get_mut(&coupon.id)
            .ok_or_else(|| not_found(ErrorCode::CouponNotFound, "Coupon", coupon.id))?;
        stored.is_valid = coupon.is_valid;
        stored.is_activated = coupon.is_activated;
        stored.is_expired = coupon.is_expired;
        stored.last_notified_on = coupon.last_notified_on;
        Ok(())
    }
}

#[async_trait]
impl StoreSettingsRepository for InMemoryCashbackStore {
    async fn find(&self, store_id: &StoreId) -> Result<Option<StoreSettings>, DomainError> {
        Ok(self.tables.read().await.settings.get(store_id).cloned())
    }

    async fn insert(&self, settings: &StoreSettings) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if tables.settings.contains_key(&settings.store_id) {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                format!("Store {} already has settings", settings.store_id),
            ));
        }
        tables.settings.insert(settings.store_id, settings.clone());
        Ok(())
    }

    async fn update(&self, settings: &StoreSettings) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .settings
            .get_mut(&settings.store_id)
            .ok_or_else(|| not_found(ErrorCode::SettingsNotFound, "Settings", settings.store_id))?;
        *stored = settings.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cashback::{
        evaluate_sale_for_coupon, new_coupon_code, CampaignDraft, SaleDraft,
    };
    use crate::domain::foundation::Money;

    fn campaign(store: StoreId) -> Campaign {
        Campaign::create(
            store,
            CampaignDraft {
                title: "Cashback".to_string(),
                min_sale_value: Money::ZERO,
                max_sale_value: Money::from_units(100_000),
                url: None,
                bonus_rate: 20,
                discount_limit_rate: 30,
                coupon_lifetime: 45,
                is_active: true,
            },
            Timestamp::now(),
        )
        .unwrap()
    }

    fn sale(store: StoreId, customer: CustomerId, initial: u32, coupon: Option<&Coupon>) -> Sale {
        let now = Timestamp::now();
        Sale::record(
            store,
            customer,
            SaleDraft {
                initial_value: Money::from_units(initial),
                identifier: None,
                date: now.date(),
            },
            coupon,
            now,
        )
        .unwrap()
    }

    async fn issued_coupon(store: &InMemoryCashbackStore, store_id: StoreId, customer: CustomerId) -> Coupon {
        let campaign = campaign(store_id);
        CampaignRepository::save(store, &campaign).await.unwrap();
        let mut sale = sale(store_id, customer, 1000, None);
        SaleRepository::insert(store, &sale).await.unwrap();
        let coupon =
            evaluate_sale_for_coupon(&mut sale, &[campaign], new_coupon_code(), Timestamp::now()).unwrap();
        store.complete_evaluation(&sale, Some(&coupon)).await.unwrap();
        coupon
    }

    #[tokio::test]
    async fn rejects_duplicate_cellphone_per_store() {
        let store = InMemoryCashbackStore::new();
        let store_id = StoreId::new();
        let phone = Cellphone::parse("5511988887777").unwrap();

        CustomerRepository::save(&store, &Customer::register_verified(store_id, phone.clone(), Timestamp::now()))
            .await
            .unwrap();
        let err = CustomerRepository::save(
            &store,
            &Customer::register_verified(store_id, phone.clone(), Timestamp::now()),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);

        // Same number at another store is a different customer.
        CustomerRepository::save(&store, &Customer::register_verified(StoreId::new(), phone, Timestamp::now()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn complete_evaluation_stores_flag_and_coupon() {
        let store = InMemoryCashbackStore::new();
        let store_id = StoreId::new();
        let coupon = issued_coupon(&store, store_id, CustomerId::new()).await;

        let stored = SaleRepository::find_by_id(&store, &coupon.sale_id).await.unwrap().unwrap();
        assert!(stored.is_evaluated);
        assert_eq!(store.coupon_count().await, 1);
    }

    #[tokio::test]
    async fn second_coupon_for_same_sale_is_rejected() {
        let store = InMemoryCashbackStore::new();
        let store_id = StoreId::new();
        let coupon = issued_coupon(&store, store_id, CustomerId::new()).await;
        let sale = SaleRepository::find_by_id(&store, &coupon.sale_id).await.unwrap().unwrap();

        let mut again = coupon.clone();
        again.id = CouponId::new();
        let err = store.complete_evaluation(&sale, Some(&again)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(store.coupon_count().await, 1);
    }

    #[tokio::test]
    async fn redemption_flips_coupon_once() {
        let store = InMemoryCashbackStore::new();
        let store_id = StoreId::new();
        let customer = CustomerId::new();
        let mut coupon = issued_coupon(&store, store_id, customer).await;
        coupon.is_valid = true;
        store.update_lifecycle(&coupon).await.unwrap();

        let first = sale(store_id, customer, 500, Some(&coupon));
        SaleRepository::insert(&store, &first).await.unwrap();
        let stored = CouponRepository::find_by_id(&store, &coupon.id).await.unwrap().unwrap();
        assert!(stored.is_redeemed);

        let second = sale(store_id, customer, 500, Some(&coupon));
        let err = SaleRepository::insert(&store, &second).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CouponNotRedeemable);
        assert!(SaleRepository::find_by_id(&store, &second.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn rejects_unconciliated_sale() {
        let store = InMemoryCashbackStore::new();
        let mut bad = sale(StoreId::new(), CustomerId::new(), 100, None);
        bad.final_value = Money::from_units(90);
        let err = SaleRepository::insert(&store, &bad).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn redeemable_coupons_are_ordered_by_value() {
        let store = InMemoryCashbackStore::new();
        let store_id = StoreId::new();
        let customer = CustomerId::new();
        for value in [50, 300, 120] {
            let mut c = issued_coupon(&store, store_id, customer).await;
            c.is_valid = true;
            c.discount_value = Money::from_units(value);
            store.seed_coupon(c).await;
        }
        let mut not_valid = issued_coupon(&store, store_id, customer).await;
        not_valid.discount_value = Money::from_units(999);
        store.seed_coupon(not_valid).await;

        let values: Vec<Money> = store
            .list_redeemable(&store_id, &customer)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.discount_value)
            .collect();
        assert_eq!(
            values,
            vec![Money::from_units(300), Money::from_units(120), Money::from_units(50)]
        );
    }

    #[tokio::test]
    async fn equal_value_coupons_are_ordered_oldest_first() {
        let store = InMemoryCashbackStore::new();
        let store_id = StoreId::new();
        let customer = CustomerId::new();
        let mut expected = Vec::new();
        for days_ago in [1, 10, 5] {
            let mut c = issued_coupon(&store, store_id, customer).await;
            c.is_valid = true;
            c.discount_value = Money::from_units(100);
            c.date_added = Timestamp::now().minus_days(days_ago);
            expected.push((days_ago, c.id));
            store.seed_coupon(c).await;
        }
        expected.sort_by_key(|(days_ago, _)| std::cmp::Reverse(*days_ago));
        let expected: Vec<CouponId> = expected.into_iter().map(|(_, id)| id).collect();

        let ids: Vec<CouponId> = store
            .list_redeemable(&store_id, &customer)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn settings_insert_is_unique_per_store() {
        let store = InMemoryCashbackStore::new();
        let settings = StoreSettings::defaults_for(StoreId::new());
        StoreSettingsRepository::insert(&store, &settings).await.unwrap();
        let err = StoreSettingsRepository::insert(&store, &settings).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert!(store.find(&settings.store_id).await.unwrap().is_some());
        assert!(store.find(&StoreId::new()).await.unwrap().is_none());
    }
}

//! PostgreSQL implementation of CouponRepository.

use crate::domain::cashback::{Coupon, CouponCode};
use crate::domain::foundation::{
    CampaignId, Cellphone, CouponId, CustomerId, DomainError, ErrorCode, Money, Percentage,
    SaleId, StoreId, Timestamp,
};
use crate::ports::{ActivationCandidate, CouponRepository};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{corrupt_row, database_error};

/// PostgreSQL implementation of the CouponRepository port.
pub struct PostgresCouponRepository {
    pool: PgPool,
}

impl PostgresCouponRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CouponRow {
    id: Uuid,
    store_id: Uuid,
    sale_id: Uuid,
    campaign_id: Uuid,
    customer_id: Uuid,
    code: String,
    discount_value: i64,
    discount_limit_rate: i32,
    expiration_date: NaiveDate,
    is_valid: bool,
    is_activated: bool,
    is_expired: bool,
    is_redeemed: bool,
    last_notified_on: Option<NaiveDate>,
    date_added: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct ActivationCandidateRow {
    #[sqlx(flatten)]
    coupon: CouponRow,
    cellphone: String,
    campaign_lifetime: i32,
    campaign_url: Option<String>,
}

impl TryFrom<CouponRow> for Coupon {
    type Error = DomainError;

    fn try_from(row: CouponRow) -> Result<Self, Self::Error> {
        Ok(Coupon {
            id: CouponId::from_uuid(row.id),
            store_id: StoreId::from_uuid(row.store_id),
            sale_id: SaleId::from_uuid(row.sale_id),
            campaign_id: CampaignId::from_uuid(row.campaign_id),
            customer_id: CustomerId::from_uuid(row.customer_id),
            code: CouponCode::try_new(&row.code).map_err(|e| corrupt_row("code", e))?,
            discount_value: Money::from_cents(row.discount_value)
                .map_err(|e| corrupt_row("discount_value", e))?,
            discount_limit_rate: Percentage::try_new(
                "discount_limit_rate",
                i64::from(row.discount_limit_rate),
            )
            .map_err(|e| corrupt_row("discount_limit_rate", e))?,
            expiration_date: row.expiration_date,
            is_valid: row.is_valid,
            is_activated: row.is_activated,
            is_expired: row.is_expired,
            is_redeemed: row.is_redeemed,
            last_notified_on: row.last_notified_on,
            date_added: Timestamp::from_datetime(row.date_added),
        })
    }
}

impl TryFrom<ActivationCandidateRow> for ActivationCandidate {
    type Error = DomainError;

    fn try_from(row: ActivationCandidateRow) -> Result<Self, Self::Error> {
        Ok(ActivationCandidate {
            coupon: Coupon::try_from(row.coupon)?,
            cellphone: Cellphone::parse(&row.cellphone).map_err(|e| corrupt_row("cellphone", e))?,
            campaign_lifetime: u16::try_from(row.campaign_lifetime)
                .map_err(|e| corrupt_row("coupon_lifetime", e))?,
            campaign_url: row.campaign_url,
        })
    }
}

#[async_trait]
impl CouponRepository for PostgresCouponRepository {
    async fn find_by_id(&self, id: &CouponId) -> Result<Option<Coupon>, DomainError> {
        let row: Option<CouponRow> = sqlx::query_as(
            r#"
            SELECT id, store_id, sale_id, campaign_id, customer_id, code, discount_value,
                   discount_limit_rate, expiration_date, is_valid, is_activated, is_expired,
                   is_redeemed, last_notified_on, date_added
            FROM coupons
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("find coupon", e))?;

        row.map(Coupon::try_from).transpose()
    }

    async fn list_by_store(&self, store_id: &StoreId) -> Result<Vec<Coupon>, DomainError> {
        let rows: Vec<CouponRow> = sqlx::query_as(
            r#"
            SELECT id, store_id, sale_id, campaign_id, customer_id, code, discount_value,
                   discount_limit_rate, expiration_date, is_valid, is_activated, is_expired,
                   is_redeemed, last_notified_on, date_added
            FROM coupons
            WHERE store_id = $1
            ORDER BY date_added DESC, id DESC
            "#,
        )
        .bind(store_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("list coupons", e))?;

        rows.into_iter().map(Coupon::try_from).collect()
    }

    async fn list_by_customer(
        &self,
        store_id: &StoreId,
        customer_id: &CustomerId,
    ) -> Result<Vec<Coupon>, DomainError> {
        let rows: Vec<CouponRow> = sqlx::query_as(
            r#"
            SELECT id, store_id, sale_id, campaign_id, customer_id, code, discount_value,
                   discount_limit_rate, expiration_date, is_valid, is_activated, is_expired,
                   is_redeemed, last_notified_on, date_added
            FROM coupons
            WHERE store_id = $1 AND customer_id = $2
            ORDER BY date_added DESC, id DESC
            "#,
        )
        .bind(store_id.as_uuid())
        .bind(customer_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("list customer coupons", e))?;

        rows.into_iter().map(Coupon::try_from).collect()
    }

    async fn list_by_campaign(&self, campaign_id: &CampaignId) -> Result<Vec<Coupon>, DomainError> {
        let rows: Vec<CouponRow> = sqlx::query_as(
            r#"
            SELECT id, store_id, sale_id, campaign_id, customer_id, code, discount_value,
                   discount_limit_rate, expiration_date, is_valid, is_activated, is_expired,
                   is_redeemed, last_notified_on, date_added
            FROM coupons
            WHERE campaign_id = $1
            ORDER BY date_added DESC, id DESC
            "#,
        )
        .bind(campaign_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("list campaign coupons", e))?;

        rows.into_iter().map(Coupon::try_from).collect()
    }

    async fn list_redeemable(
        &self,
        store_id: &StoreId,
        customer_id: &CustomerId,
    ) -> Result<Vec<Coupon>, DomainError> {
        let rows: Vec<CouponRow> = sqlx::query_as(
            r#"
            SELECT id, store_id, sale_id, campaign_id, customer_id, code, discount_value,
                   discount_limit_rate, expiration_date, is_valid, is_activated, is_expired,
                   is_redeemed, last_notified_on, date_added
            FROM coupons
            WHERE store_id = $1
              AND customer_id = $2
              AND is_valid
              AND NOT is_redeemed
              AND NOT is_expired
            ORDER BY discount_value DESC, date_added ASC, id ASC
            "#,
        )
        .bind(store_id.as_uuid())
        .bind(customer_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("list redeemable coupons", e))?;

        rows.into_iter().map(Coupon::try_from).collect()
    }

    async fn list_expiration_candidates(&self) -> Result<Vec<Coupon>, DomainError> {
        let rows: Vec<CouponRow> = sqlx::query_as(
            r#"
            SELECT id, store_id, sale_id, campaign_id, customer_id, code, discount_value,
                   discount_limit_rate, expiration_date, is_valid, is_activated, is_expired,
                   is_redeemed, last_notified_on, date_added
            FROM coupons
            WHERE is_valid AND NOT is_redeemed AND NOT is_expired
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("list expiration candidates", e))?;

        rows.into_iter().map(Coupon::try_from).collect()
    }

    async fn list_activation_candidates(&self) -> Result<Vec<ActivationCandidate>, DomainError> {
        let rows: Vec<ActivationCandidateRow> = sqlx::query_as(
            r#"
            SELECT c.id, c.store_id, c.sale_id, c.campaign_id, c.customer_id, c.code,
                   c.discount_value, c.discount_limit_rate, c.expiration_date, c.is_valid,
                   c.is_activated, c.is_expired, c.is_redeemed, c.last_notified_on,
                   c.date_added,
                   cu.cellphone,
                   ca.coupon_lifetime AS campaign_lifetime,
                   ca.url AS campaign_url
            FROM coupons c
            JOIN customers cu ON cu.id = c.customer_id
            JOIN campaigns ca ON ca.id = c.campaign_id
            WHERE NOT c.is_redeemed AND NOT c.is_expired AND NOT c.is_activated
            ORDER BY c.store_id, c.date_added
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("list activation candidates", e))?;

        rows.into_iter().map(ActivationCandidate::try_from).collect()
    }

    async fn update_lifecycle(&self, coupon: &Coupon) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE coupons SET
                is_valid = $2,
                is_activated = $3,
                is_expired = $4,
                last_notified_on = $5
            WHERE id = $1
            "#,
        )
        .bind(coupon.id.as_uuid())
        .bind(coupon.is_valid)
        .bind(coupon.is_activated)
        .bind(coupon.is_expired)
        .bind(coupon.last_notified_on)
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("update coupon lifecycle", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::CouponNotFound, "Coupon not found")
                .with_detail("id", coupon.id.to_string()));
        }

        Ok(())
    }
}

//! PostgreSQL implementation of CampaignRepository.

use crate::domain::cashback::Campaign;
use crate::domain::foundation::{
    CampaignId, DomainError, ErrorCode, Money, Percentage, StoreId, Timestamp,
};
use crate::ports::CampaignRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{corrupt_row, database_error};

/// PostgreSQL implementation of the CampaignRepository port.
pub struct PostgresCampaignRepository {
    pool: PgPool,
}

impl PostgresCampaignRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CampaignRow {
    id: Uuid,
    store_id: Uuid,
    title: String,
    min_sale_value: i64,
    max_sale_value: i64,
    url: Option<String>,
    bonus_rate: i32,
    discount_limit_rate: i32,
    coupon_lifetime: i32,
    is_active: bool,
    date_added: DateTime<Utc>,
}

impl TryFrom<CampaignRow> for Campaign {
    type Error = DomainError;

    fn try_from(row: CampaignRow) -> Result<Self, Self::Error> {
        Ok(Campaign {
            id: CampaignId::from_uuid(row.id),
            store_id: StoreId::from_uuid(row.store_id),
            title: row.title,
            min_sale_value: Money::from_cents(row.min_sale_value)
                .map_err(|e| corrupt_row("min_sale_value", e))?,
            max_sale_value: Money::from_cents(row.max_sale_value)
                .map_err(|e| corrupt_row("max_sale_value", e))?,
            url: row.url,
            bonus_rate: Percentage::try_new("bonus_rate", i64::from(row.bonus_rate))
                .map_err(|e| corrupt_row("bonus_rate", e))?,
            discount_limit_rate: Percentage::try_new(
                "discount_limit_rate",
                i64::from(row.discount_limit_rate),
            )
            .map_err(|e| corrupt_row("discount_limit_rate", e))?,
            coupon_lifetime: u16::try_from(row.coupon_lifetime)
                .map_err(|e| corrupt_row("coupon_lifetime", e))?,
            is_active: row.is_active,
            date_added: Timestamp::from_datetime(row.date_added),
        })
    }
}

#[async_trait]
impl CampaignRepository for PostgresCampaignRepository {
    async fn save(&self, campaign: &Campaign) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO campaigns (
                id, store_id, title, min_sale_value, max_sale_value, url,
                bonus_rate, discount_limit_rate, coupon_lifetime, is_active, date_added
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(campaign.id.as_uuid())
        .bind(campaign.store_id.as_uuid())
        .bind(&campaign.title)
        .bind(campaign.min_sale_value.cents())
        .bind(campaign.max_sale_value.cents())
        .bind(&campaign.url)
        .bind(i32::from(campaign.bonus_rate.value()))
        .bind(i32::from(campaign.discount_limit_rate.value()))
        .bind(i32::from(campaign.coupon_lifetime))
        .bind(campaign.is_active)
        .bind(campaign.date_added.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("save campaign", e))?;

        Ok(())
    }

    async fn update(&self, campaign: &Campaign) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE campaigns SET
                title = $2,
                min_sale_value = $3,
                max_sale_value = $4,
                url = $5,
                bonus_rate = $6,
                discount_limit_rate = $7,
                coupon_lifetime = $8,
                is_active = $9
            WHERE id = $1
            "#,
        )
        .bind(campaign.id.as_uuid())
        .bind(&campaign.title)
        .bind(campaign.min_sale_value.cents())
        .bind(campaign.max_sale_value.cents())
        .bind(&campaign.url)
        .bind(i32::from(campaign.bonus_rate.value()))
        .bind(i32::from(campaign.discount_limit_rate.value()))
        .bind(i32::from(campaign.coupon_lifetime))
        .bind(campaign.is_active)
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("update campaign", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::CampaignNotFound, "Campaign not found")
                .with_detail("id", campaign.id.to_string()));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &CampaignId) -> Result<Option<Campaign>, DomainError> {
        let row: Option<CampaignRow> = sqlx::query_as(
            r#"
            SELECT id, store_id, title, min_sale_value, max_sale_value, url,
                   bonus_rate, discount_limit_rate, coupon_lifetime, is_active, date_added
            FROM campaigns
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("find campaign", e))?;

        row.map(Campaign::try_from).transpose()
    }

    async fn list_by_store(&self, store_id: &StoreId) -> Result<Vec<Campaign>, DomainError> {
        let rows: Vec<CampaignRow> = sqlx::query_as(
            r#"
            SELECT id, store_id, title, min_sale_value, max_sale_value, url,
                   bonus_rate, discount_limit_rate, coupon_lifetime, is_active, date_added
            FROM campaigns
            WHERE store_id = $1
            ORDER BY date_added DESC, id DESC
            "#,
        )
        .bind(store_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("list campaigns", e))?;

        rows.into_iter().map(Campaign::try_from).collect()
    }

    async fn list_active(&self, store_id: &StoreId) -> Result<Vec<Campaign>, DomainError> {
        let rows: Vec<CampaignRow> = sqlx::query_as(
            r#"
            SELECT id, store_id, title, min_sale_value, max_sale_value, url,
                   bonus_rate, discount_limit_rate, coupon_lifetime, is_active, date_added
            FROM campaigns
            WHERE store_id = $1 AND is_active
            ORDER BY bonus_rate DESC, date_added ASC, id ASC
            "#,
        )
        .bind(store_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("list active campaigns", e))?;

        rows.into_iter().map(Campaign::try_from).collect()
    }
}

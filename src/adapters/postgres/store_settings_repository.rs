//! PostgreSQL implementation of StoreSettingsRepository.

use crate::domain::cashback::StoreSettings;
use crate::domain::foundation::{DomainError, ErrorCode, Percentage, StoreId};
use crate::ports::StoreSettingsRepository;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{corrupt_row, database_error, violates};

/// PostgreSQL implementation of the StoreSettingsRepository port.
pub struct PostgresStoreSettingsRepository {
    pool: PgPool,
}

impl PostgresStoreSettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct StoreSettingsRow {
    store_id: Uuid,
    title: String,
    currency: String,
    country_code: String,
    long_distance_code: String,
    url: Option<String>,
    bonus_rate: i32,
    discount_limit_rate: i32,
    coupon_lifetime: i32,
}

impl TryFrom<StoreSettingsRow> for StoreSettings {
    type Error = DomainError;

    fn try_from(row: StoreSettingsRow) -> Result<Self, Self::Error> {
        Ok(StoreSettings {
            store_id: StoreId::from_uuid(row.store_id),
            title: row.title,
            currency: row.currency,
            country_code: row.country_code,
            long_distance_code: row.long_distance_code,
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
        })
    }
}

#[async_trait]
impl StoreSettingsRepository for PostgresStoreSettingsRepository {
    async fn find(&self, store_id: &StoreId) -> Result<Option<StoreSettings>, DomainError> {
        let row: Option<StoreSettingsRow> = sqlx::query_as(
            r#"
            SELECT store_id, title, currency, country_code, long_distance_code, url,
                   bonus_rate, discount_limit_rate, coupon_lifetime
            FROM store_settings
            WHERE store_id = $1
            "#,
        )
        .bind(store_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("find store settings", e))?;

        row.map(StoreSettings::try_from).transpose()
    }

    async fn insert(&self, settings: &StoreSettings) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO store_settings (
                store_id, title, currency, country_code, long_distance_code, url,
                bonus_rate, discount_limit_rate, coupon_lifetime
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(settings.store_id.as_uuid())
        .bind(&settings.title)
        .bind(&settings.currency)
        .bind(&settings.country_code)
        .bind(&settings.long_distance_code)
        .bind(&settings.url)
        .bind(i32::from(settings.bonus_rate.value()))
        .bind(i32::from(settings.discount_limit_rate.value()))
        .bind(i32::from(settings.coupon_lifetime))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if violates(&e, "store_settings_pkey") {
                return DomainError::new(
                    ErrorCode::Conflict,
                    format!("Store {} already has settings", settings.store_id),
                );
            }
            database_error("insert store settings", e)
        })?;

        Ok(())
    }

    async fn update(&self, settings: &StoreSettings) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE store_settings SET
                title = $2,
                currency = $3,
                country_code = $4,
                long_distance_code = $5,
                url = $6,
                bonus_rate = $7,
                discount_limit_rate = $8,
                coupon_lifetime = $9
            WHERE store_id = $1
            "#,
        )
        .bind(settings.store_id.as_uuid())
        .bind(&settings.title)
        .bind(&settings.currency)
        .bind(&settings.country_code)
        .bind(&settings.long_distance_code)
        .bind(&settings.url)
        .bind(i32::from(settings.bonus_rate.value()))
        .bind(i32::from(settings.discount_limit_rate.value()))
        .bind(i32::from(settings.coupon_lifetime))
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("update store settings", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::SettingsNotFound, "Store settings not found")
                .with_detail("id", settings.store_id.to_string()));
        }

        Ok(())
    }
}

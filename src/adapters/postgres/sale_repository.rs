//! PostgreSQL implementation of SaleRepository.
//!
//! `insert` and `complete_evaluation` each run in one transaction, so a sale
//! is never stored without its coupon flip, and `is_evaluated` is never
//! stored without the issued coupon.

use crate::domain::cashback::{Coupon, Sale};
use crate::domain::foundation::{
    CouponId, CustomerId, DomainError, ErrorCode, Money, SaleId, StoreId, Timestamp,
};
use crate::ports::SaleRepository;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{corrupt_row, database_error, violates};

/// PostgreSQL implementation of the SaleRepository port.
pub struct PostgresSaleRepository {
    pool: PgPool,
}

impl PostgresSaleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SaleRow {
    id: Uuid,
    store_id: Uuid,
    customer_id: Uuid,
    initial_value: i64,
    effective_discount: i64,
    final_value: i64,
    redeemed_coupon_id: Option<Uuid>,
    identifier: Option<String>,
    is_evaluated: bool,
    date: NaiveDate,
    date_added: DateTime<Utc>,
}

impl TryFrom<SaleRow> for Sale {
    type Error = DomainError;

    fn try_from(row: SaleRow) -> Result<Self, Self::Error> {
        Ok(Sale {
            id: SaleId::from_uuid(row.id),
            store_id: StoreId::from_uuid(row.store_id),
            customer_id: CustomerId::from_uuid(row.customer_id),
            initial_value: Money::from_cents(row.initial_value)
                .map_err(|e| corrupt_row("initial_value", e))?,
            effective_discount: Money::from_cents(row.effective_discount)
                .map_err(|e| corrupt_row("effective_discount", e))?,
            final_value: Money::from_cents(row.final_value)
                .map_err(|e| corrupt_row("final_value", e))?,
            redeemed_coupon: row.redeemed_coupon_id.map(CouponId::from_uuid),
            identifier: row.identifier,
            is_evaluated: row.is_evaluated,
            date: row.date,
            date_added: Timestamp::from_datetime(row.date_added),
        })
    }
}

#[async_trait]
impl SaleRepository for PostgresSaleRepository {
    async fn insert(&self, sale: &Sale) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| database_error("start transaction", e))?;

        if let Some(coupon_id) = sale.redeemed_coupon {
            let result = sqlx::query(
                r#"
                UPDATE coupons SET is_redeemed = TRUE
                WHERE id = $1
                  AND store_id = $2
                  AND customer_id = $3
                  AND is_valid
                  AND NOT is_redeemed
                  AND NOT is_expired
                "#,
            )
            .bind(coupon_id.as_uuid())
            .bind(sale.store_id.as_uuid())
            .bind(sale.customer_id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| database_error("redeem coupon", e))?;

            if result.rows_affected() == 0 {
                return Err(DomainError::new(
                    ErrorCode::CouponNotRedeemable,
                    format!("Coupon {} is no longer redeemable", coupon_id),
                )
                .with_detail("coupon_id", coupon_id.to_string()));
            }
        }

        sqlx::query(
            r#"
            INSERT INTO sales (
                id, store_id, customer_id, initial_value, effective_discount, final_value,
                redeemed_coupon_id, identifier, is_evaluated, date, date_added
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(sale.id.as_uuid())
        .bind(sale.store_id.as_uuid())
        .bind(sale.customer_id.as_uuid())
        .bind(sale.initial_value.cents())
        .bind(sale.effective_discount.cents())
        .bind(sale.final_value.cents())
        .bind(sale.redeemed_coupon.map(|id| *id.as_uuid()))
        .bind(&sale.identifier)
        .bind(sale.is_evaluated)
        .bind(sale.date)
        .bind(sale.date_added.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if violates(&e, "sales_final_value_conciliation") {
                return DomainError::validation(
                    "final_value",
                    "final value must equal initial value minus effective discount",
                );
            }
            if violates(&e, "sales_date_window") {
                return DomainError::validation("date", "sale date is outside the allowed window");
            }
            if violates(&e, "sales_redeemed_coupon_key") {
                return DomainError::new(ErrorCode::Conflict, "Coupon already redeemed by another sale");
            }
            database_error("insert sale", e)
        })?;

        tx.commit()
            .await
            .map_err(|e| database_error("commit sale", e))?;

        Ok(())
    }

    async fn complete_evaluation(
        &self,
        sale: &Sale,
        coupon: Option<&Coupon>,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| database_error("start transaction", e))?;

        let result = sqlx::query("UPDATE sales SET is_evaluated = TRUE WHERE id = $1")
            .bind(sale.id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| database_error("mark sale evaluated", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::SaleNotFound, "Sale not found")
                .with_detail("id", sale.id.to_string()));
        }

        if let Some(coupon) = coupon {
            sqlx::query(
                r#"
                INSERT INTO coupons (
                    id, store_id, sale_id, campaign_id, customer_id, code,
                    discount_value, discount_limit_rate, expiration_date,
                    is_valid, is_activated, is_expired, is_redeemed, last_notified_on,
                    date_added
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
                "#,
            )
            .bind(coupon.id.as_uuid())
            .bind(coupon.store_id.as_uuid())
            .bind(coupon.sale_id.as_uuid())
            .bind(coupon.campaign_id.as_uuid())
            .bind(coupon.customer_id.as_uuid())
            .bind(coupon.code.as_str())
            .bind(coupon.discount_value.cents())
            .bind(i32::from(coupon.discount_limit_rate.value()))
            .bind(coupon.expiration_date)
            .bind(coupon.is_valid)
            .bind(coupon.is_activated)
            .bind(coupon.is_expired)
            .bind(coupon.is_redeemed)
            .bind(coupon.last_notified_on)
            .bind(coupon.date_added.as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if violates(&e, "coupons_sale_id_key") {
                    return DomainError::new(
                        ErrorCode::Conflict,
                        format!("Sale {} already has a coupon", coupon.sale_id),
                    );
                }
                database_error("insert coupon", e)
            })?;
        }

        tx.commit()
            .await
            .map_err(|e| database_error("commit evaluation", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &SaleId) -> Result<Option<Sale>, DomainError> {
        let row: Option<SaleRow> = sqlx::query_as(
            r#"
            SELECT id, store_id, customer_id, initial_value, effective_discount, final_value,
                   redeemed_coupon_id, identifier, is_evaluated, date, date_added
            FROM sales
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("find sale", e))?;

        row.map(Sale::try_from).transpose()
    }

    async fn list_by_store(&self, store_id: &StoreId) -> Result<Vec<Sale>, DomainError> {
        let rows: Vec<SaleRow> = sqlx::query_as(
            r#"
            SELECT id, store_id, customer_id, initial_value, effective_discount, final_value,
                   redeemed_coupon_id, identifier, is_evaluated, date, date_added
            FROM sales
            WHERE store_id = $1
            ORDER BY date_added DESC, id DESC
            "#,
        )
        .bind(store_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("list sales", e))?;

        rows.into_iter().map(Sale::try_from).collect()
    }
}

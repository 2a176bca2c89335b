//! PostgreSQL implementation of CustomerRepository.

use crate::domain::cashback::Customer;
use crate::domain::foundation::{
    Cellphone, CustomerId, DomainError, ErrorCode, StoreId, Timestamp,
};
use crate::ports::CustomerRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{corrupt_row, database_error, violates};

/// PostgreSQL implementation of the CustomerRepository port.
pub struct PostgresCustomerRepository {
    pool: PgPool,
}

impl PostgresCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: Uuid,
    store_id: Uuid,
    cellphone: String,
    is_verified: bool,
    date_added: DateTime<Utc>,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = DomainError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        Ok(Customer {
            id: CustomerId::from_uuid(row.id),
            store_id: StoreId::from_uuid(row.store_id),
            cellphone: Cellphone::parse(&row.cellphone).map_err(|e| corrupt_row("cellphone", e))?,
            is_verified: row.is_verified,
            date_added: Timestamp::from_datetime(row.date_added),
        })
    }
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    async fn save(&self, customer: &Customer) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO customers (id, store_id, cellphone, is_verified, date_added)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(customer.id.as_uuid())
        .bind(customer.store_id.as_uuid())
        .bind(customer.cellphone.as_str())
        .bind(customer.is_verified)
        .bind(customer.date_added.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if violates(&e, "customers_store_cellphone_key") {
                return DomainError::new(
                    ErrorCode::Conflict,
                    format!("Customer {} already exists", customer.cellphone),
                );
            }
            database_error("save customer", e)
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, DomainError> {
        let row: Option<CustomerRow> = sqlx::query_as(
            r#"
            SELECT id, store_id, cellphone, is_verified, date_added
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("find customer", e))?;

        row.map(Customer::try_from).transpose()
    }

    async fn find_by_cellphone(
        &self,
        store_id: &StoreId,
        cellphone: &Cellphone,
    ) -> Result<Option<Customer>, DomainError> {
        let row: Option<CustomerRow> = sqlx::query_as(
            r#"
            SELECT id, store_id, cellphone, is_verified, date_added
            FROM customers
            WHERE store_id = $1 AND cellphone = $2
            "#,
        )
        .bind(store_id.as_uuid())
        .bind(cellphone.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("find customer by cellphone", e))?;

        row.map(Customer::try_from).transpose()
    }
}

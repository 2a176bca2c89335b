//! Sale queries.

use std::sync::Arc;

use crate::domain::cashback::{CashbackError, Sale};
use crate::domain::foundation::{SaleId, StoreId};
use crate::ports::SaleRepository;

/// Query for a single sale.
#[derive(Debug, Clone)]
pub struct GetSaleQuery {
    pub store_id: StoreId,
    pub sale_id: SaleId,
}

pub struct GetSaleHandler {
    sales: Arc<dyn SaleRepository>,
}

impl GetSaleHandler {
    pub fn new(sales: Arc<dyn SaleRepository>) -> Self {
        Self { sales }
    }

    /// Returns the sale, or `NotFound` if it belongs to another store.
    pub async fn handle(&self, query: GetSaleQuery) -> Result<Sale, CashbackError> {
        self.sales
            .find_by_id(&query.sale_id)
            .await?
            .filter(|s| s.is_owned_by(&query.store_id))
            .ok_or_else(|| CashbackError::not_found("sale", query.sale_id))
    }
}

/// Query for all sales of a store.
#[derive(Debug, Clone)]
pub struct ListSalesQuery {
    pub store_id: StoreId,
}

pub struct ListSalesHandler {
    sales: Arc<dyn SaleRepository>,
}

impl ListSalesHandler {
    pub fn new(sales: Arc<dyn SaleRepository>) -> Self {
        Self { sales }
    }

    /// Newest first.
    pub async fn handle(&self, query: ListSalesQuery) -> Result<Vec<Sale>, CashbackError> {
        Ok(self.sales.list_by_store(&query.store_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::cashback::SaleDraft;
    use crate::domain::foundation::{CustomerId, Money, Timestamp};

    async fn sale(fx: &Fixture, store_id: StoreId) -> Sale {
        let now = Timestamp::now();
        let sale = Sale::record(
            store_id,
            CustomerId::new(),
            SaleDraft {
                initial_value: Money::from_units(80),
                identifier: None,
                date: now.date(),
            },
            None,
            now,
        )
        .unwrap();
        SaleRepository::insert(fx.store.as_ref(), &sale).await.unwrap();
        sale
    }

    #[tokio::test]
    async fn get_hides_other_stores() {
        let fx = Fixture::new();
        let own = sale(&fx, fx.store_id).await;
        let foreign = sale(&fx, StoreId::new()).await;
        let handler = GetSaleHandler::new(fx.store.clone());

        let found = handler
            .handle(GetSaleQuery {
                store_id: fx.store_id,
                sale_id: own.id,
            })
            .await
            .unwrap();
        assert_eq!(found.id, own.id);

        let err = handler
            .handle(GetSaleQuery {
                store_id: fx.store_id,
                sale_id: foreign.id,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CashbackError::NotFound { entity: "sale", .. }));
    }

    #[tokio::test]
    async fn list_returns_only_store_sales() {
        let fx = Fixture::new();
        sale(&fx, fx.store_id).await;
        sale(&fx, fx.store_id).await;
        sale(&fx, StoreId::new()).await;

        let sales = ListSalesHandler::new(fx.store.clone())
            .handle(ListSalesQuery {
                store_id: fx.store_id,
            })
            .await
            .unwrap();

        assert_eq!(sales.len(), 2);
    }
}

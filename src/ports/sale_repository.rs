//! Sale repository port.
//!
//! Both write operations are single transactions:
//!
//! - `insert` stores the sale and, when it redeems a coupon, flips that
//!   coupon to redeemed.
//! - `complete_evaluation` stores `is_evaluated` together with the issued
//!   coupon, if any.

use crate::domain::cashback::{Coupon, Sale};
use crate::domain::foundation::{DomainError, SaleId, StoreId};
use async_trait::async_trait;

#[async_trait]
pub trait SaleRepository: Send + Sync {
    /// Insert a new sale, redeeming `sale.redeemed_coupon` when set.
    ///
    /// # Errors
    ///
    /// - `CouponNotRedeemable` if the coupon was redeemed, expired or
    ///   invalidated since it was chosen; nothing is written
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, sale: &Sale) -> Result<(), DomainError>;

    /// Persist the issuance decision for an evaluated sale.
    ///
    /// # Errors
    ///
    /// - `SaleNotFound` if the sale does not exist
    /// - `Conflict` if a coupon was already issued for the sale
    /// - `DatabaseError` on persistence failure
    async fn complete_evaluation(
        &self,
        sale: &Sale,
        coupon: Option<&Coupon>,
    ) -> Result<(), DomainError>;

    /// Find a sale by ID.
    async fn find_by_id(&self, id: &SaleId) -> Result<Option<Sale>, DomainError>;

    /// All sales of a store, newest first.
    async fn list_by_store(&self, store_id: &StoreId) -> Result<Vec<Sale>, DomainError>;
}

//! Customer repository port.

use crate::domain::cashback::Customer;
use crate::domain::foundation::{Cellphone, CustomerId, DomainError, StoreId};
use async_trait::async_trait;

/// Repository port for customers.
///
/// Implementations must enforce one customer per `(store_id, cellphone)`.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Save a new customer.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the store already has a customer with this cellphone
    /// - `DatabaseError` on persistence failure
    async fn save(&self, customer: &Customer) -> Result<(), DomainError>;

    /// Find a customer by ID.
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, DomainError>;

    /// Find a store's customer by normalized cellphone.
    async fn find_by_cellphone(
        &self,
        store_id: &StoreId,
        cellphone: &Cellphone,
    ) -> Result<Option<Customer>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn CustomerRepository) {}
    }
}

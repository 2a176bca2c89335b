//! Customer entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Cellphone, CustomerId, StoreId, Timestamp};

/// A store's customer, identified by a normalized cellphone number.
///
/// Customers are created once, already verified, and never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub store_id: StoreId,
    pub cellphone: Cellphone,
    pub is_verified: bool,
    pub date_added: Timestamp,
}

impl Customer {
    /// Registers a customer whose phone was verified at the counter.
    pub fn register_verified(store_id: StoreId, cellphone: Cellphone, now: Timestamp) -> Self {
        Self {
            id: CustomerId::new(),
            store_id,
            cellphone,
            is_verified: true,
            date_added: now,
        }
    }

    /// True if the record belongs to `store_id`.
    pub fn is_owned_by(&self, store_id: &StoreId) -> bool {
        &self.store_id == store_id
    }
}

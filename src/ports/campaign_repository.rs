//! Campaign repository port.

use crate::domain::cashback::Campaign;
use crate::domain::foundation::{CampaignId, DomainError, StoreId};
use async_trait::async_trait;

#[async_trait]
pub trait CampaignRepository: Send + Sync {
    /// Save a new campaign.
    async fn save(&self, campaign: &Campaign) -> Result<(), DomainError>;

    /// Update an existing campaign.
    ///
    /// # Errors
    ///
    /// - `CampaignNotFound` if the campaign doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, campaign: &Campaign) -> Result<(), DomainError>;

    /// Find a campaign by ID.
    async fn find_by_id(&self, id: &CampaignId) -> Result<Option<Campaign>, DomainError>;

    /// All campaigns of a store, newest first.
    async fn list_by_store(&self, store_id: &StoreId) -> Result<Vec<Campaign>, DomainError>;

    /// Active campaigns of a store.
    ///
    /// Read fresh on every sale evaluation.
    async fn list_active(&self, store_id: &StoreId) -> Result<Vec<Campaign>, DomainError>;
}

//! Campaign handlers.
//!
//! ## Commands
//! - Creating and updating campaigns
//!
//! ## Queries
//! - Pre-filled draft for the new-campaign form
//! - Get / list campaigns
//! - Campaign summary

mod campaign_summary;
mod create_campaign;
mod get_campaign;
mod prepare_campaign_draft;
mod update_campaign;

// Commands
pub use create_campaign::{CreateCampaignCommand, CreateCampaignHandler};
pub use update_campaign::{UpdateCampaignCommand, UpdateCampaignHandler};

// Queries
pub use campaign_summary::{GetCampaignSummaryHandler, GetCampaignSummaryQuery};
pub use get_campaign::{
    GetCampaignHandler, GetCampaignQuery, ListCampaignsHandler, ListCampaignsQuery,
};
pub use prepare_campaign_draft::{PrepareCampaignDraftHandler, PrepareCampaignDraftQuery};

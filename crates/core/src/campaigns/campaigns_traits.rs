//! Campaign repository and service traits.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::campaigns_model::{
    Campaign, CampaignFilter, CampaignProgress, CampaignSummary, CampaignUpdate,
    LedgerReconciliation, NewCampaign,
};
use crate::errors::Result;
use crate::files::UploadedFile;

/// Trait defining the contract for Campaign repository operations.
///
/// None of these operations may change a campaign's running total; that is
/// owned by [`crate::donations::DonationRepositoryTrait::transition_status`].
#[async_trait]
pub trait CampaignRepositoryTrait: Send + Sync {
    /// Creates a new campaign. `current_amount` becomes both the running
    /// total and the recorded initial amount.
    async fn create(&self, new_campaign: NewCampaign) -> Result<Campaign>;

    /// Updates the editable fields of an existing campaign.
    async fn update(&self, campaign_update: CampaignUpdate) -> Result<Campaign>;

    /// Deletes a campaign by its ID.
    ///
    /// Returns the number of deleted records.
    async fn delete(&self, campaign_id: &str) -> Result<usize>;

    /// Replaces the stored image reference.
    async fn set_image_path(&self, campaign_id: &str, image_path: Option<String>)
        -> Result<Campaign>;

    /// Retrieves a campaign by its ID.
    fn get_by_id(&self, campaign_id: &str) -> Result<Campaign>;

    /// Lists campaigns newest-first.
    fn list(&self, filter: &CampaignFilter) -> Result<Vec<Campaign>>;
}

/// Trait defining the contract for Campaign service operations.
#[async_trait]
pub trait CampaignServiceTrait: Send + Sync {
    async fn create_campaign(&self, new_campaign: NewCampaign) -> Result<Campaign>;

    async fn update_campaign(&self, campaign_update: CampaignUpdate) -> Result<Campaign>;

    /// Deletes a campaign that has no donations, together with its image.
    async fn delete_campaign(&self, campaign_id: &str) -> Result<()>;

    /// Stores a new campaign image and removes the one it replaces.
    async fn set_campaign_image(&self, campaign_id: &str, image: UploadedFile)
        -> Result<Campaign>;

    fn get_campaign(&self, campaign_id: &str) -> Result<Campaign>;

    fn get_campaign_progress(&self, campaign_id: &str) -> Result<CampaignProgress>;

    fn list_campaigns(&self, filter: &CampaignFilter) -> Result<Vec<Campaign>>;

    /// Campaigns accepting donations at `now`, with their progress.
    fn list_open_campaigns(&self, now: NaiveDateTime) -> Result<Vec<CampaignProgress>>;

    fn get_campaign_summary(&self, campaign_id: &str) -> Result<CampaignSummary>;

    fn reconcile_campaign(&self, campaign_id: &str) -> Result<LedgerReconciliation>;
}

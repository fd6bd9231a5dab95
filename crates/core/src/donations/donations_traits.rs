//! Donation repository and service traits.

use async_trait::async_trait;

use super::donations_model::{
    Donation, DonationFilter, DonationSearchResponse, DonationStatus, DonationStatusTotals,
    DonationSubmission, NewDonation, StatusTransition,
};
use crate::errors::Result;

/// Trait defining the contract for Donation repository operations.
#[async_trait]
pub trait DonationRepositoryTrait: Send + Sync {
    /// Inserts a new donation in `pending` status.
    ///
    /// Fails with `NotFound` if the referenced campaign does not exist.
    async fn create(&self, new_donation: NewDonation) -> Result<Donation>;

    /// Moves a donation to `target` and applies the resulting ledger
    /// adjustment to its campaign.
    ///
    /// Implementations must run the status read, the status write and the
    /// running-total update as one atomic unit: either both writes are
    /// committed or neither is.
    async fn transition_status(
        &self,
        donation_id: &str,
        target: DonationStatus,
    ) -> Result<StatusTransition>;

    /// Retrieves a donation by its ID.
    fn get_by_id(&self, donation_id: &str) -> Result<Donation>;

    /// Paginated, newest-first listing joined with campaign titles.
    fn search(&self, filter: &DonationFilter) -> Result<DonationSearchResponse>;

    /// Number of donations (any status) referencing a campaign.
    fn count_for_campaign(&self, campaign_id: &str) -> Result<i64>;

    /// Per-status counts and amounts for a campaign.
    fn status_totals(&self, campaign_id: &str) -> Result<DonationStatusTotals>;
}

/// Trait defining the contract for Donation service operations.
#[async_trait]
pub trait DonationServiceTrait: Send + Sync {
    /// Validates a public submission, stores its receipt and records it as pending.
    async fn submit_donation(&self, submission: DonationSubmission) -> Result<Donation>;

    /// Administrative status decision. `status` is the raw requested value.
    async fn set_donation_status(
        &self,
        donation_id: &str,
        status: &str,
    ) -> Result<StatusTransition>;

    fn get_donation(&self, donation_id: &str) -> Result<Donation>;

    fn search_donations(&self, filter: &DonationFilter) -> Result<DonationSearchResponse>;
}

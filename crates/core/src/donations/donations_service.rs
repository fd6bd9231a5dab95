use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::donations_model::{
    Donation, DonationFilter, DonationSearchResponse, DonationStatus, DonationSubmission,
    StatusTransition,
};
use super::donations_traits::{DonationRepositoryTrait, DonationServiceTrait};
use crate::campaigns::CampaignRepositoryTrait;
use crate::constants::RECEIPTS_FOLDER;
use crate::errors::Result;
use crate::files::{stored_name, FileStoreTrait};

/// Service for donor submissions and the verification workflow.
pub struct DonationService {
    repository: Arc<dyn DonationRepositoryTrait>,
    campaign_repository: Arc<dyn CampaignRepositoryTrait>,
    file_store: Arc<dyn FileStoreTrait>,
}

impl DonationService {
    pub fn new(
        repository: Arc<dyn DonationRepositoryTrait>,
        campaign_repository: Arc<dyn CampaignRepositoryTrait>,
        file_store: Arc<dyn FileStoreTrait>,
    ) -> Self {
        Self {
            repository,
            campaign_repository,
            file_store,
        }
    }
}

#[async_trait]
impl DonationServiceTrait for DonationService {
    async fn submit_donation(&self, mut submission: DonationSubmission) -> Result<Donation> {
        submission.validate()?;
        // Fails with NotFound before anything reaches the file store.
        let campaign = self
            .campaign_repository
            .get_by_id(submission.campaign_id.trim())?;

        let extension = submission.receipt.extension().unwrap_or_default();
        let receipt_bytes = std::mem::take(&mut submission.receipt.bytes);
        let receipt_path = self
            .file_store
            .store(receipt_bytes, &stored_name(RECEIPTS_FOLDER, &extension))
            .await?;
        debug!("Stored receipt {} for campaign {}", receipt_path, campaign.id);

        let result = match submission.into_new_donation(receipt_path.clone()) {
            Ok(new_donation) => self.repository.create(new_donation).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(donation) => {
                info!(
                    "Donation {} of {} submitted for campaign {}",
                    donation.id, donation.amount, donation.campaign_id
                );
                Ok(donation)
            }
            Err(e) => {
                if let Err(cleanup) = self.file_store.delete(&receipt_path).await {
                    warn!(
                        "Failed to remove orphaned receipt {}: {}",
                        receipt_path, cleanup
                    );
                }
                Err(e)
            }
        }
    }

    async fn set_donation_status(
        &self,
        donation_id: &str,
        status: &str,
    ) -> Result<StatusTransition> {
        let target: DonationStatus = status.parse()?;
        let transition = self.repository.transition_status(donation_id, target).await?;
        info!(
            "Donation {} moved {} -> {} ({:?}); campaign {} total is now {}",
            donation_id,
            transition.previous_status,
            transition.donation.status,
            transition.adjustment,
            transition.donation.campaign_id,
            transition.campaign_current_amount
        );
        Ok(transition)
    }

    fn get_donation(&self, donation_id: &str) -> Result<Donation> {
        self.repository.get_by_id(donation_id)
    }

    fn search_donations(&self, filter: &DonationFilter) -> Result<DonationSearchResponse> {
        self.repository.search(filter)
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use log::{debug, info, warn};

use super::campaigns_model::{
    Campaign, CampaignFilter, CampaignProgress, CampaignSummary, CampaignUpdate,
    LedgerReconciliation, NewCampaign,
};
use super::campaigns_traits::{CampaignRepositoryTrait, CampaignServiceTrait};
use crate::constants::{CAMPAIGN_IMAGES_FOLDER, IMAGE_EXTENSIONS, MAX_UPLOAD_BYTES};
use crate::donations::DonationRepositoryTrait;
use crate::errors::{Error, Result};
use crate::files::{stored_name, FileStoreTrait, UploadedFile};
use crate::validation::FieldErrors;

/// Service for managing fundraising campaigns.
pub struct CampaignService {
    repository: Arc<dyn CampaignRepositoryTrait>,
    donation_repository: Arc<dyn DonationRepositoryTrait>,
    file_store: Arc<dyn FileStoreTrait>,
}

impl CampaignService {
    pub fn new(
        repository: Arc<dyn CampaignRepositoryTrait>,
        donation_repository: Arc<dyn DonationRepositoryTrait>,
        file_store: Arc<dyn FileStoreTrait>,
    ) -> Self {
        Self {
            repository,
            donation_repository,
            file_store,
        }
    }

    /// Best-effort removal of a file that is no longer referenced.
    async fn discard_file(&self, reference: &str) {
        if let Err(e) = self.file_store.delete(reference).await {
            warn!("Failed to delete stored file {}: {}", reference, e);
        }
    }
}

#[async_trait]
impl CampaignServiceTrait for CampaignService {
    async fn create_campaign(&self, new_campaign: NewCampaign) -> Result<Campaign> {
        new_campaign.validate()?;
        let campaign = self.repository.create(new_campaign).await?;
        info!("Created campaign {} ({})", campaign.id, campaign.title);
        Ok(campaign)
    }

    async fn update_campaign(&self, campaign_update: CampaignUpdate) -> Result<Campaign> {
        campaign_update.validate()?;
        self.repository.update(campaign_update).await
    }

    async fn delete_campaign(&self, campaign_id: &str) -> Result<()> {
        let campaign = self.repository.get_by_id(campaign_id)?;
        let donation_count = self.donation_repository.count_for_campaign(campaign_id)?;
        if donation_count > 0 {
            return Err(Error::ConstraintViolation(format!(
                "Campaign '{}' has {} donation(s) and cannot be deleted",
                campaign.title, donation_count
            )));
        }

        self.repository.delete(campaign_id).await?;
        if let Some(image_path) = campaign.image_path.as_deref() {
            self.discard_file(image_path).await;
        }
        info!("Deleted campaign {}", campaign_id);
        Ok(())
    }

    async fn set_campaign_image(
        &self,
        campaign_id: &str,
        image: UploadedFile,
    ) -> Result<Campaign> {
        let mut errors = FieldErrors::new();
        image.validate("image", IMAGE_EXTENSIONS, MAX_UPLOAD_BYTES, &mut errors);
        errors.into_result()?;

        let previous = self.repository.get_by_id(campaign_id)?.image_path;
        let extension = image.extension().unwrap_or_default();
        let reference = self
            .file_store
            .store(image.bytes, &stored_name(CAMPAIGN_IMAGES_FOLDER, &extension))
            .await?;

        let updated = match self
            .repository
            .set_image_path(campaign_id, Some(reference.clone()))
            .await
        {
            Ok(campaign) => campaign,
            Err(e) => {
                self.discard_file(&reference).await;
                return Err(e);
            }
        };

        if let Some(old) = previous.filter(|old| *old != reference) {
            debug!("Replacing image {} of campaign {}", old, campaign_id);
            self.discard_file(&old).await;
        }
        Ok(updated)
    }

    fn get_campaign(&self, campaign_id: &str) -> Result<Campaign> {
        self.repository.get_by_id(campaign_id)
    }

    fn get_campaign_progress(&self, campaign_id: &str) -> Result<CampaignProgress> {
        self.get_campaign(campaign_id).map(CampaignProgress::from)
    }

    fn list_campaigns(&self, filter: &CampaignFilter) -> Result<Vec<Campaign>> {
        self.repository.list(filter)
    }

    fn list_open_campaigns(&self, now: NaiveDateTime) -> Result<Vec<CampaignProgress>> {
        Ok(self
            .repository
            .list(&CampaignFilter::default())?
            .into_iter()
            .filter(|c| c.is_open(now))
            .map(CampaignProgress::from)
            .collect())
    }

    fn get_campaign_summary(&self, campaign_id: &str) -> Result<CampaignSummary> {
        let campaign = self.get_campaign_progress(campaign_id)?;
        let donations = self.donation_repository.status_totals(campaign_id)?;
        Ok(CampaignSummary {
            campaign,
            donations,
        })
    }

    fn reconcile_campaign(&self, campaign_id: &str) -> Result<LedgerReconciliation> {
        let campaign = self.get_campaign(campaign_id)?;
        let totals = self.donation_repository.status_totals(campaign_id)?;
        let reconciliation = LedgerReconciliation::compute(&campaign, totals.verified_amount)?;
        if !reconciliation.is_consistent {
            warn!(
                "Campaign {} running total {} differs from expected {}",
                campaign_id, reconciliation.recorded_total, reconciliation.expected_total
            );
        }
        Ok(reconciliation)
    }
}

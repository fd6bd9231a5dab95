//! In-memory test doubles shared by the service tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::campaigns::{Campaign, CampaignFilter, CampaignRepositoryTrait, CampaignUpdate, NewCampaign};
use crate::donations::{
    plan_transition, Donation, DonationFilter, DonationListItem, DonationRepositoryTrait,
    DonationSearchResponse, DonationSearchResponseMeta, DonationStatus, DonationStatusTotals,
    DonationSubmission, NewDonation, StatusTransition,
};
use crate::errors::{DatabaseError, Error, Result};
use crate::files::{FileStoreTrait, UploadedFile};

#[derive(Default)]
struct LedgerState {
    campaigns: Vec<Campaign>,
    donations: Vec<Donation>,
}

/// Campaign and donation repositories over one mutex, so a status transition
/// and its ledger adjustment happen under a single lock.
#[derive(Default)]
pub(crate) struct InMemoryLedger {
    state: Mutex<LedgerState>,
    fail_next_insert: AtomicBool,
}

impl InMemoryLedger {
    pub fn fail_next_insert(&self) {
        self.fail_next_insert.store(true, Ordering::SeqCst);
    }

    pub fn donation_count(&self) -> usize {
        self.state.lock().unwrap().donations.len()
    }

    /// Overwrites a running total, bypassing the workflow.
    pub fn force_current_amount(&self, campaign_id: &str, amount: Decimal) {
        let mut state = self.state.lock().unwrap();
        if let Some(c) = state.campaigns.iter_mut().find(|c| c.id == campaign_id) {
            c.current_amount = amount;
        }
    }
}

#[async_trait]
impl CampaignRepositoryTrait for InMemoryLedger {
    async fn create(&self, new_campaign: NewCampaign) -> Result<Campaign> {
        let now = Utc::now().naive_utc();
        let campaign = Campaign {
            id: new_campaign
                .id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            title: new_campaign.title,
            description: new_campaign.description,
            goal_amount: new_campaign.goal_amount,
            current_amount: new_campaign.current_amount,
            initial_amount: new_campaign.current_amount,
            image_path: None,
            bank_name: new_campaign.bank_name,
            bank_account_number: new_campaign.bank_account_number,
            bank_account_name: new_campaign.bank_account_name,
            starts_at: new_campaign.starts_at,
            ends_at: new_campaign.ends_at,
            is_active: new_campaign.is_active,
            created_at: now,
            updated_at: now,
        };
        self.state.lock().unwrap().campaigns.push(campaign.clone());
        Ok(campaign)
    }

    async fn update(&self, campaign_update: CampaignUpdate) -> Result<Campaign> {
        let id = campaign_update.id.clone().unwrap_or_default();
        let mut state = self.state.lock().unwrap();
        let campaign = state
            .campaigns
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::not_found("Campaign", &id))?;
        campaign.title = campaign_update.title;
        campaign.description = campaign_update.description;
        campaign.goal_amount = campaign_update.goal_amount;
        campaign.starts_at = campaign_update.starts_at;
        campaign.ends_at = campaign_update.ends_at;
        campaign.is_active = campaign_update.is_active;
        Ok(campaign.clone())
    }

    async fn delete(&self, campaign_id: &str) -> Result<usize> {
        let mut state = self.state.lock().unwrap();
        let before = state.campaigns.len();
        state.campaigns.retain(|c| c.id != campaign_id);
        Ok(before - state.campaigns.len())
    }

    async fn set_image_path(
        &self,
        campaign_id: &str,
        image_path: Option<String>,
    ) -> Result<Campaign> {
        let mut state = self.state.lock().unwrap();
        let campaign = state
            .campaigns
            .iter_mut()
            .find(|c| c.id == campaign_id)
            .ok_or_else(|| Error::not_found("Campaign", campaign_id))?;
        campaign.image_path = image_path;
        Ok(campaign.clone())
    }

    fn get_by_id(&self, campaign_id: &str) -> Result<Campaign> {
        self.state
            .lock()
            .unwrap()
            .campaigns
            .iter()
            .find(|c| c.id == campaign_id)
            .cloned()
            .ok_or_else(|| Error::not_found("Campaign", campaign_id))
    }

    fn list(&self, filter: &CampaignFilter) -> Result<Vec<Campaign>> {
        let keyword = filter.keyword().map(str::to_lowercase);
        let state = self.state.lock().unwrap();
        Ok(state
            .campaigns
            .iter()
            .rev()
            .filter(|c| {
                keyword.as_deref().map_or(true, |k| {
                    c.title.to_lowercase().contains(k) || c.description.to_lowercase().contains(k)
                })
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl DonationRepositoryTrait for InMemoryLedger {
    async fn create(&self, new_donation: NewDonation) -> Result<Donation> {
        if self.fail_next_insert.swap(false, Ordering::SeqCst) {
            return Err(Error::Database(DatabaseError::QueryFailed(
                "disk I/O error".to_string(),
            )));
        }
        let mut state = self.state.lock().unwrap();
        if !state.campaigns.iter().any(|c| c.id == new_donation.campaign_id) {
            return Err(Error::not_found("Campaign", &new_donation.campaign_id));
        }
        let now = Utc::now().naive_utc();
        let donation = Donation {
            id: Uuid::new_v4().to_string(),
            campaign_id: new_donation.campaign_id,
            donor_name: new_donation.donor_name,
            donor_phone: new_donation.donor_phone,
            donor_address: new_donation.donor_address,
            amount: new_donation.amount,
            receipt_path: new_donation.receipt_path,
            status: DonationStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        state.donations.push(donation.clone());
        Ok(donation)
    }

    async fn transition_status(
        &self,
        donation_id: &str,
        target: DonationStatus,
    ) -> Result<StatusTransition> {
        let mut state = self.state.lock().unwrap();
        let LedgerState {
            campaigns,
            donations,
        } = &mut *state;
        let donation = donations
            .iter_mut()
            .find(|d| d.id == donation_id)
            .ok_or_else(|| Error::not_found("Donation", donation_id))?;
        let campaign = campaigns
            .iter_mut()
            .find(|c| c.id == donation.campaign_id)
            .ok_or_else(|| Error::not_found("Campaign", &donation.campaign_id))?;

        let previous_status = donation.status;
        let adjustment = plan_transition(previous_status, target, donation.amount)?;
        let new_total = adjustment.apply(campaign.current_amount)?;
        campaign.current_amount = new_total;
        donation.status = target;
        Ok(StatusTransition {
            donation: donation.clone(),
            previous_status,
            adjustment,
            campaign_current_amount: new_total,
        })
    }

    fn get_by_id(&self, donation_id: &str) -> Result<Donation> {
        self.state
            .lock()
            .unwrap()
            .donations
            .iter()
            .find(|d| d.id == donation_id)
            .cloned()
            .ok_or_else(|| Error::not_found("Donation", donation_id))
    }

    fn search(&self, filter: &DonationFilter) -> Result<DonationSearchResponse> {
        let state = self.state.lock().unwrap();
        let titles: HashMap<&str, &str> = state
            .campaigns
            .iter()
            .map(|c| (c.id.as_str(), c.title.as_str()))
            .collect();
        let matching: Vec<DonationListItem> = state
            .donations
            .iter()
            .rev()
            .filter(|d| filter.status.map_or(true, |s| d.status == s))
            .map(|d| DonationListItem {
                donation: d.clone(),
                campaign_title: titles.get(d.campaign_id.as_str()).unwrap_or(&"").to_string(),
            })
            .filter(|item| {
                filter.keyword().map(str::to_lowercase).map_or(true, |k| {
                    item.donation.donor_name.to_lowercase().contains(&k)
                        || item.donation.donor_phone.contains(&k)
                        || item.campaign_title.to_lowercase().contains(&k)
                })
            })
            .collect();
        let (page, page_size) = filter.normalized_page();
        let (offset, limit) = filter.offset_limit();
        Ok(DonationSearchResponse {
            meta: DonationSearchResponseMeta {
                total_row_count: matching.len() as i64,
                page,
                page_size,
            },
            data: matching
                .into_iter()
                .skip(offset as usize)
                .take(limit as usize)
                .collect(),
        })
    }

    fn count_for_campaign(&self, campaign_id: &str) -> Result<i64> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .donations
            .iter()
            .filter(|d| d.campaign_id == campaign_id)
            .count() as i64)
    }

    fn status_totals(&self, campaign_id: &str) -> Result<DonationStatusTotals> {
        DonationStatusTotals::from_rows(
            self.state
                .lock()
                .unwrap()
                .donations
                .iter()
                .filter(|d| d.campaign_id == campaign_id)
                .map(|d| (d.status, d.amount)),
        )
    }
}

/// File store keeping bytes in a map.
#[derive(Default)]
pub(crate) struct MemoryFileStore {
    files: Mutex<HashMap<String, Vec<u8>>>,
    fail_writes: AtomicBool,
}

impl MemoryFileStore {
    pub fn failing() -> Self {
        let store = Self::default();
        store.fail_writes.store(true, Ordering::SeqCst);
        store
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.files.lock().unwrap().contains_key(reference)
    }

    pub fn len(&self) -> usize {
        self.files.lock().unwrap().len()
    }
}

#[async_trait]
impl FileStoreTrait for MemoryFileStore {
    async fn store(&self, bytes: Vec<u8>, proposed_path: &str) -> Result<String> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::FileStore("disk full".to_string()));
        }
        self.files
            .lock()
            .unwrap()
            .insert(proposed_path.to_string(), bytes);
        Ok(proposed_path.to_string())
    }

    async fn delete(&self, reference: &str) -> Result<()> {
        self.files.lock().unwrap().remove(reference);
        Ok(())
    }
}

pub(crate) fn datetime(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

pub(crate) fn new_campaign(title: &str, goal: Decimal) -> NewCampaign {
    NewCampaign {
        id: None,
        title: title.to_string(),
        description: format!("{} description", title),
        goal_amount: goal,
        current_amount: Decimal::ZERO,
        bank_name: Some("National Bank".to_string()),
        bank_account_number: Some("0012345678".to_string()),
        bank_account_name: Some("Alumni Association".to_string()),
        starts_at: datetime(2025, 1, 1),
        ends_at: None,
        is_active: true,
    }
}

pub(crate) fn submission(campaign_id: &str, amount: Option<Decimal>) -> DonationSubmission {
    DonationSubmission {
        campaign_id: campaign_id.to_string(),
        donor_name: "Siti Rahma".to_string(),
        donor_phone: "08123456789".to_string(),
        donor_address: "Jl. Merdeka 1".to_string(),
        amount: amount.into(),
        receipt: UploadedFile::new("transfer.jpg", vec![0xFF, 0xD8, 0xFF]),
    }
}

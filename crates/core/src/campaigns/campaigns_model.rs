//! Campaign domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::progress::percentage;
use crate::constants::MAX_AMOUNT;
use crate::donations::DonationStatusTotals;
use crate::errors::{Error, Result, ValidationError};
use crate::validation::FieldErrors;

const MAX_TITLE_LEN: usize = 255;

/// Domain model representing a fundraising campaign.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub title: String,
    pub description: String,
    pub goal_amount: Decimal,
    /// Running total. Only the donation verification workflow moves it.
    pub current_amount: Decimal,
    /// Seed recorded by the administrator at creation time.
    pub initial_amount: Decimal,
    pub image_path: Option<String>,
    pub bank_name: Option<String>,
    pub bank_account_number: Option<String>,
    pub bank_account_name: Option<String>,
    pub starts_at: NaiveDateTime,
    pub ends_at: Option<NaiveDateTime>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Campaign {
    /// Percentage of the goal reached so far.
    pub fn progress(&self) -> Decimal {
        percentage(self.goal_amount, self.current_amount)
    }

    /// Whether donors can currently give to this campaign.
    pub fn is_open(&self, now: NaiveDateTime) -> bool {
        self.is_active && self.starts_at <= now && self.ends_at.map_or(true, |end| now <= end)
    }
}

/// Input model for creating a new campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCampaign {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub goal_amount: Decimal,
    #[serde(default)]
    pub current_amount: Decimal,
    pub bank_name: Option<String>,
    pub bank_account_number: Option<String>,
    pub bank_account_name: Option<String>,
    pub starts_at: NaiveDateTime,
    pub ends_at: Option<NaiveDateTime>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl NewCampaign {
    /// Validates the new campaign data.
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        validate_details(
            &mut errors,
            &self.title,
            &self.description,
            self.goal_amount,
            self.starts_at,
            self.ends_at,
        );
        errors.require_non_negative("currentAmount", self.current_amount);
        errors.require_at_most("currentAmount", self.current_amount, MAX_AMOUNT);
        errors.into_result()
    }
}

/// Input model for updating an existing campaign. The running total is
/// deliberately absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignUpdate {
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub goal_amount: Decimal,
    pub bank_name: Option<String>,
    pub bank_account_number: Option<String>,
    pub bank_account_name: Option<String>,
    pub starts_at: NaiveDateTime,
    pub ends_at: Option<NaiveDateTime>,
    pub is_active: bool,
}

impl CampaignUpdate {
    /// Validates the campaign update data.
    pub fn validate(&self) -> Result<()> {
        if self.id.as_deref().map_or(true, |id| id.trim().is_empty()) {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Campaign ID is required for updates".to_string(),
            )));
        }
        let mut errors = FieldErrors::new();
        validate_details(
            &mut errors,
            &self.title,
            &self.description,
            self.goal_amount,
            self.starts_at,
            self.ends_at,
        );
        errors.into_result()
    }
}

fn validate_details(
    errors: &mut FieldErrors,
    title: &str,
    description: &str,
    goal_amount: Decimal,
    starts_at: NaiveDateTime,
    ends_at: Option<NaiveDateTime>,
) {
    errors.require_text("title", title);
    errors.require_max_len("title", title, MAX_TITLE_LEN);
    errors.require_text("description", description);
    errors.require_non_negative("goalAmount", goal_amount);
    errors.require_at_most("goalAmount", goal_amount, MAX_AMOUNT);
    if let Some(end) = ends_at {
        if end < starts_at {
            errors.add("endsAt", "endsAt must be a date after or equal to startsAt");
        }
    }
}

/// Listing filter for the back office.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignFilter {
    /// Case-insensitive substring matched against title and description.
    pub search_text: Option<String>,
}

impl CampaignFilter {
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search_text: Some(text.into()),
        }
    }

    /// The search text with surrounding whitespace removed, if anything is left.
    pub fn keyword(&self) -> Option<&str> {
        self.search_text
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Read-only projection of a campaign with its display percentage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CampaignProgress {
    #[serde(flatten)]
    pub campaign: Campaign,
    pub percentage: Decimal,
}

impl From<Campaign> for CampaignProgress {
    fn from(campaign: Campaign) -> Self {
        let percentage = campaign.progress();
        Self {
            campaign,
            percentage,
        }
    }
}

/// Campaign report with donation counts and amounts per status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSummary {
    pub campaign: CampaignProgress,
    pub donations: DonationStatusTotals,
}

/// Audit of the running-total invariant for one campaign.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerReconciliation {
    pub campaign_id: String,
    pub recorded_total: Decimal,
    pub initial_amount: Decimal,
    pub verified_total: Decimal,
    pub expected_total: Decimal,
    pub difference: Decimal,
    pub is_consistent: bool,
}

impl LedgerReconciliation {
    /// Fails when the expected total falls outside the decimal range.
    pub fn compute(campaign: &Campaign, verified_total: Decimal) -> Result<Self> {
        let out_of_range = || {
            Error::ConstraintViolation(format!(
                "Campaign {} ledger totals are out of range",
                campaign.id
            ))
        };
        let expected_total = campaign
            .initial_amount
            .checked_add(verified_total)
            .ok_or_else(out_of_range)?;
        let difference = campaign
            .current_amount
            .checked_sub(expected_total)
            .ok_or_else(out_of_range)?;
        Ok(Self {
            campaign_id: campaign.id.clone(),
            recorded_total: campaign.current_amount,
            initial_amount: campaign.initial_amount,
            verified_total,
            expected_total,
            difference,
            is_consistent: difference.is_zero(),
        })
    }
}

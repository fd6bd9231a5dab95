//! Donation domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::verification::LedgerAdjustment;
use crate::constants::{
    DEFAULT_PAGE_SIZE, MAX_AMOUNT, MAX_DONOR_NAME_LEN, MAX_DONOR_PHONE_LEN, MAX_PAGE_SIZE, MAX_UPLOAD_BYTES,
    RECEIPT_EXTENSIONS,
};
use crate::errors::{Error, Result};
use crate::files::UploadedFile;
use crate::validation::FieldErrors;

/// Lifecycle status of a donation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DonationStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
}

impl DonationStatus {
    pub const ALL: [DonationStatus; 3] = [
        DonationStatus::Pending,
        DonationStatus::Verified,
        DonationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DonationStatus::Pending => "pending",
            DonationStatus::Verified => "verified",
            DonationStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DonationStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        DonationStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let mut errors = FieldErrors::new();
                errors.add(
                    "status",
                    format!("status must be one of: pending, verified, rejected (got '{}')", s),
                );
                errors.into()
            })
    }
}

/// Domain model representing a donor's pledge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: String,
    pub campaign_id: String,
    pub donor_name: String,
    pub donor_phone: String,
    pub donor_address: String,
    pub amount: Decimal,
    /// Reference into the external file store.
    pub receipt_path: String,
    pub status: DonationStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Amount as typed into the donation form.
#[derive(Debug, Clone, PartialEq)]
pub enum AmountInput {
    Missing,
    /// Text that does not parse as a decimal number.
    Invalid(String),
    Value(Decimal),
}

impl AmountInput {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return AmountInput::Missing;
        }
        match Decimal::from_str(raw) {
            Ok(value) => AmountInput::Value(value),
            Err(_) => AmountInput::Invalid(raw.to_string()),
        }
    }

    pub fn value(&self) -> Option<Decimal> {
        match self {
            AmountInput::Value(value) => Some(*value),
            _ => None,
        }
    }

    fn validate(&self, field: &str, errors: &mut FieldErrors) {
        match self {
            AmountInput::Missing => errors.require_positive(field, None),
            AmountInput::Invalid(_) => errors.add(field, format!("{} must be a number", field)),
            AmountInput::Value(value) => {
                errors.require_positive(field, Some(*value));
                errors.require_at_most(field, *value, MAX_AMOUNT);
            }
        }
    }
}

impl From<Option<Decimal>> for AmountInput {
    fn from(value: Option<Decimal>) -> Self {
        value.map_or(AmountInput::Missing, AmountInput::Value)
    }
}

/// A public donor submission, including the uploaded receipt.
#[derive(Debug, Clone)]
pub struct DonationSubmission {
    pub campaign_id: String,
    pub donor_name: String,
    pub donor_phone: String,
    pub donor_address: String,
    pub amount: AmountInput,
    pub receipt: UploadedFile,
}

impl DonationSubmission {
    /// Validates every field, reporting all problems at once.
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        errors.require_text("campaignId", &self.campaign_id);
        errors.require_text("donorName", &self.donor_name);
        errors.require_max_len("donorName", &self.donor_name, MAX_DONOR_NAME_LEN);
        errors.require_text("donorPhone", &self.donor_phone);
        errors.require_max_len("donorPhone", &self.donor_phone, MAX_DONOR_PHONE_LEN);
        errors.require_text("donorAddress", &self.donor_address);
        self.amount.validate("amount", &mut errors);
        self.receipt
            .validate("receipt", RECEIPT_EXTENSIONS, MAX_UPLOAD_BYTES, &mut errors);
        errors.into_result()
    }

    /// Builds the record to persist once the receipt has been stored.
    pub fn into_new_donation(self, receipt_path: String) -> Result<NewDonation> {
        let amount = self.amount.value().ok_or_else(|| {
            let mut errors = FieldErrors::new();
            self.amount.validate("amount", &mut errors);
            Error::from(errors)
        })?;
        Ok(NewDonation {
            id: None,
            campaign_id: self.campaign_id.trim().to_string(),
            donor_name: self.donor_name.trim().to_string(),
            donor_phone: self.donor_phone.trim().to_string(),
            donor_address: self.donor_address.trim().to_string(),
            amount,
            receipt_path,
        })
    }
}

/// Input model for inserting a donation. Status is always `pending`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDonation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub campaign_id: String,
    pub donor_name: String,
    pub donor_phone: String,
    pub donor_address: String,
    pub amount: Decimal,
    pub receipt_path: String,
}

/// Back-office listing filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationFilter {
    /// Matched against donor name, donor phone and campaign title.
    pub search_text: Option<String>,
    pub status: Option<DonationStatus>,
    /// 1-based page number
    pub page: i64,
    pub page_size: i64,
}

impl Default for DonationFilter {
    fn default() -> Self {
        Self {
            search_text: None,
            status: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl DonationFilter {
    pub fn keyword(&self) -> Option<&str> {
        self.search_text
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Page and page size clamped into their valid ranges.
    pub fn normalized_page(&self) -> (i64, i64) {
        (self.page.max(1), self.page_size.clamp(1, MAX_PAGE_SIZE))
    }

    /// Row offset and limit for the requested page.
    pub fn offset_limit(&self) -> (i64, i64) {
        let (page, page_size) = self.normalized_page();
        ((page - 1) * page_size, page_size)
    }
}

/// Donation joined with the title of its campaign.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DonationListItem {
    #[serde(flatten)]
    pub donation: Donation,
    pub campaign_title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DonationSearchResponseMeta {
    pub total_row_count: i64,
    pub page: i64,
    pub page_size: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DonationSearchResponse {
    pub data: Vec<DonationListItem>,
    pub meta: DonationSearchResponseMeta,
}

/// Donation counts and amounts per status for a single campaign.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DonationStatusTotals {
    pub pending_count: i64,
    pub pending_amount: Decimal,
    pub verified_count: i64,
    pub verified_amount: Decimal,
    pub rejected_count: i64,
    pub rejected_amount: Decimal,
}

impl DonationStatusTotals {
    /// Counts one donation. Fails when the status amount leaves the decimal range.
    pub fn add(&mut self, status: DonationStatus, amount: Decimal) -> Result<()> {
        let (count, total) = match status {
            DonationStatus::Pending => (&mut self.pending_count, &mut self.pending_amount),
            DonationStatus::Verified => (&mut self.verified_count, &mut self.verified_amount),
            DonationStatus::Rejected => (&mut self.rejected_count, &mut self.rejected_amount),
        };
        *total = total.checked_add(amount).ok_or_else(|| {
            Error::ConstraintViolation(format!("Sum of {} donations is out of range", status))
        })?;
        *count += 1;
        Ok(())
    }

    pub fn from_rows<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = (DonationStatus, Decimal)>,
    {
        let mut totals = Self::default();
        for (status, amount) in rows {
            totals.add(status, amount)?;
        }
        Ok(totals)
    }

    pub fn total_count(&self) -> i64 {
        self.pending_count + self.verified_count + self.rejected_count
    }
}


/// Outcome of a status change, as committed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusTransition {
    pub donation: Donation,
    pub previous_status: DonationStatus,
    pub adjustment: LedgerAdjustment,
    /// Campaign running total after the adjustment.
    pub campaign_current_amount: Decimal,
}

//! Database models for donations.

use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::campaigns::{parse_decimal, CampaignDB};
use crate::errors::StorageError;
use tracer_core::donations::{Donation, DonationStatus, NewDonation};
use tracer_core::Result;

pub(crate) fn parse_status(value: &str) -> Result<DonationStatus> {
    DonationStatus::from_str(value).map_err(|_| {
        StorageError::CorruptValue(format!("'{}' is not a donation status", value)).into()
    })
}

/// Database model for donations
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Associations,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(CampaignDB, foreign_key = campaign_id))]
#[diesel(table_name = crate::schema::donations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct DonationDB {
    pub id: String,
    pub campaign_id: String,
    pub donor_name: String,
    pub donor_phone: String,
    pub donor_address: String,
    pub amount: String,
    pub receipt_path: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<DonationDB> for Donation {
    type Error = tracer_core::Error;

    fn try_from(db: DonationDB) -> Result<Self> {
        Ok(Self {
            amount: parse_decimal(&db.amount, "amount")?,
            status: parse_status(&db.status)?,
            id: db.id,
            campaign_id: db.campaign_id,
            donor_name: db.donor_name,
            donor_phone: db.donor_phone,
            donor_address: db.donor_address,
            receipt_path: db.receipt_path,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl DonationDB {
    /// Row for a freshly submitted donation; always `pending`.
    pub fn from_new(domain: NewDonation, id: String, now: NaiveDateTime) -> Self {
        Self {
            id,
            campaign_id: domain.campaign_id,
            donor_name: domain.donor_name,
            donor_phone: domain.donor_phone,
            donor_address: domain.donor_address,
            amount: domain.amount.to_string(),
            receipt_path: domain.receipt_path,
            status: DonationStatus::Pending.as_str().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

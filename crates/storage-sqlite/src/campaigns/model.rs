//! Database models for campaigns.

use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::StorageError;
use tracer_core::campaigns::{Campaign, CampaignUpdate, NewCampaign};
use tracer_core::Result;

/// Parses a decimal column. A malformed value is an error, never a silent zero.
pub(crate) fn parse_decimal(value: &str, column: &str) -> Result<Decimal> {
    Decimal::from_str(value).map_err(|e| {
        StorageError::CorruptValue(format!("{} '{}' is not a decimal: {}", column, value, e))
            .into()
    })
}

/// Database model for campaigns
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::campaigns)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct CampaignDB {
    pub id: String,
    pub title: String,
    pub description: String,
    pub goal_amount: String,
    pub current_amount: String,
    pub initial_amount: String,
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

/// Editable campaign columns. `current_amount` and `initial_amount` are not
/// part of it; only the verification workflow writes the running total.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::campaigns)]
#[diesel(treat_none_as_null = true)]
pub struct CampaignChangesetDB {
    pub title: String,
    pub description: String,
    pub goal_amount: String,
    pub bank_name: Option<String>,
    pub bank_account_number: Option<String>,
    pub bank_account_name: Option<String>,
    pub starts_at: NaiveDateTime,
    pub ends_at: Option<NaiveDateTime>,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<CampaignDB> for Campaign {
    type Error = tracer_core::Error;

    fn try_from(db: CampaignDB) -> Result<Self> {
        Ok(Self {
            goal_amount: parse_decimal(&db.goal_amount, "goal_amount")?,
            current_amount: parse_decimal(&db.current_amount, "current_amount")?,
            initial_amount: parse_decimal(&db.initial_amount, "initial_amount")?,
            id: db.id,
            title: db.title,
            description: db.description,
            image_path: db.image_path,
            bank_name: db.bank_name,
            bank_account_number: db.bank_account_number,
            bank_account_name: db.bank_account_name,
            starts_at: db.starts_at,
            ends_at: db.ends_at,
            is_active: db.is_active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl CampaignDB {
    /// Row for a new campaign. The seed amount becomes both the running total
    /// and the recorded initial amount.
    pub fn from_new(domain: NewCampaign, id: String, now: NaiveDateTime) -> Self {
        let seed = domain.current_amount.to_string();
        Self {
            id,
            title: domain.title.trim().to_string(),
            description: domain.description,
            goal_amount: domain.goal_amount.to_string(),
            current_amount: seed.clone(),
            initial_amount: seed,
            image_path: None,
            bank_name: domain.bank_name,
            bank_account_number: domain.bank_account_number,
            bank_account_name: domain.bank_account_name,
            starts_at: domain.starts_at,
            ends_at: domain.ends_at,
            is_active: domain.is_active,
            created_at: now,
            updated_at: now,
        }
    }
}

impl CampaignChangesetDB {
    pub fn from_update(domain: CampaignUpdate, now: NaiveDateTime) -> Self {
        Self {
            title: domain.title.trim().to_string(),
            description: domain.description,
            goal_amount: domain.goal_amount.to_string(),
            bank_name: domain.bank_name,
            bank_account_number: domain.bank_account_number,
            bank_account_name: domain.bank_account_name,
            starts_at: domain.starts_at,
            ends_at: domain.ends_at,
            is_active: domain.is_active,
            updated_at: now,
        }
    }
}

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use super::model::{CampaignChangesetDB, CampaignDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::campaigns;
use crate::search::{contains_pattern, fold_case, LIKE_ESCAPE};
use tracer_core::campaigns::{
    Campaign, CampaignFilter, CampaignRepositoryTrait, CampaignUpdate, NewCampaign,
};
use tracer_core::errors::{Error, Result, ValidationError};

pub struct CampaignRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CampaignRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CampaignRepository { pool, writer }
    }
}

/// Loads one campaign row on an existing connection.
pub(crate) fn find_campaign(conn: &mut SqliteConnection, campaign_id: &str) -> Result<CampaignDB> {
    campaigns::table
        .find(campaign_id)
        .select(CampaignDB::as_select())
        .first(conn)
        .optional()
        .map_err(StorageError::from)?
        .ok_or_else(|| Error::not_found("Campaign", campaign_id))
}

#[async_trait]
impl CampaignRepositoryTrait for CampaignRepository {
    async fn create(&self, new_campaign: NewCampaign) -> Result<Campaign> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Campaign> {
                let id = new_campaign
                    .id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                let row = CampaignDB::from_new(new_campaign, id, Utc::now().naive_utc());

                let inserted = diesel::insert_into(campaigns::table)
                    .values(&row)
                    .returning(CampaignDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Campaign::try_from(inserted)
            })
            .await
    }

    async fn update(&self, campaign_update: CampaignUpdate) -> Result<Campaign> {
        let campaign_id = campaign_update.id.clone().ok_or_else(|| {
            Error::Validation(ValidationError::InvalidInput(
                "Campaign ID is required for updates".to_string(),
            ))
        })?;
        let changes = CampaignChangesetDB::from_update(campaign_update, Utc::now().naive_utc());

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Campaign> {
                let updated = diesel::update(campaigns::table.find(&campaign_id))
                    .set(&changes)
                    .returning(CampaignDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| Error::not_found("Campaign", &campaign_id))?;
                Campaign::try_from(updated)
            })
            .await
    }

    async fn delete(&self, campaign_id: &str) -> Result<usize> {
        let campaign_id = campaign_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(campaigns::table.find(campaign_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn set_image_path(
        &self,
        campaign_id: &str,
        image_path: Option<String>,
    ) -> Result<Campaign> {
        let campaign_id = campaign_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Campaign> {
                let updated = diesel::update(campaigns::table.find(&campaign_id))
                    .set((
                        campaigns::image_path.eq(image_path),
                        campaigns::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(CampaignDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| Error::not_found("Campaign", &campaign_id))?;
                Campaign::try_from(updated)
            })
            .await
    }

    fn get_by_id(&self, campaign_id: &str) -> Result<Campaign> {
        let mut conn = get_connection(&self.pool)?;
        Campaign::try_from(find_campaign(&mut conn, campaign_id)?)
    }

    fn list(&self, filter: &CampaignFilter) -> Result<Vec<Campaign>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = campaigns::table
            .select(CampaignDB::as_select())
            .into_boxed();
        if let Some(keyword) = filter.keyword() {
            let pattern = contains_pattern(keyword);
            query = query.filter(
                fold_case(campaigns::title)
                    .like(pattern.clone())
                    .escape(LIKE_ESCAPE)
                    .or(fold_case(campaigns::description)
                        .like(pattern)
                        .escape(LIKE_ESCAPE)),
            );
        }

        query
            .order((campaigns::created_at.desc(), campaigns::id.asc()))
            .load::<CampaignDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(Campaign::try_from)
            .collect()
    }
}

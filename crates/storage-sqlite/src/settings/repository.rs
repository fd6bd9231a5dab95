use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use super::model::AppSettingDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::app_settings::dsl::*;
use tracer_core::errors::Result;
use tracer_core::settings::{SettingsRepositoryTrait, SiteProfile, SiteProfileUpdate};

pub struct SettingsRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SettingsRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SettingsRepository { pool, writer }
    }
}

#[async_trait]
impl SettingsRepositoryTrait for SettingsRepository {
    fn get_site_profile(&self) -> Result<SiteProfile> {
        let mut conn = get_connection(&self.pool)?;
        let rows = app_settings
            .select((setting_key, setting_value))
            .load::<(String, String)>(&mut conn)
            .map_err(StorageError::from)?;

        let mut profile = SiteProfile::default();
        for (key, value) in rows {
            profile.apply_setting(&key, value);
        }
        Ok(profile)
    }

    async fn update_site_profile(&self, update: &SiteProfileUpdate) -> Result<()> {
        let entries = update.entries();
        self.writer
            .exec(move |conn| {
                for (key, value) in entries {
                    diesel::replace_into(app_settings)
                        .values(&AppSettingDB {
                            setting_key: key.to_string(),
                            setting_value: value,
                        })
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(())
            })
            .await
    }
}

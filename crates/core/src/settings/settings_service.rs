use super::SettingsRepositoryTrait;
use crate::errors::Result;
use crate::settings::{SiteProfile, SiteProfileUpdate};
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

#[async_trait]
pub trait SettingsServiceTrait: Send + Sync {
    fn get_site_profile(&self) -> Result<SiteProfile>;

    async fn update_site_profile(&self, update: &SiteProfileUpdate) -> Result<SiteProfile>;
}

pub struct SettingsService {
    settings_repository: Arc<dyn SettingsRepositoryTrait>,
}

impl SettingsService {
    pub fn new(settings_repository: Arc<dyn SettingsRepositoryTrait>) -> Self {
        Self {
            settings_repository,
        }
    }
}

#[async_trait]
impl SettingsServiceTrait for SettingsService {
    fn get_site_profile(&self) -> Result<SiteProfile> {
        self.settings_repository.get_site_profile()
    }

    async fn update_site_profile(&self, update: &SiteProfileUpdate) -> Result<SiteProfile> {
        update.validate()?;
        debug!("Updating site profile keys: {:?}", update.entries());
        self.settings_repository.update_site_profile(update).await?;
        self.get_site_profile()
    }
}

//! Repository traits for settings.

use async_trait::async_trait;

use crate::errors::Result;
use crate::settings::{SiteProfile, SiteProfileUpdate};

/// Repository trait for the site profile key/value settings.
#[async_trait]
pub trait SettingsRepositoryTrait: Send + Sync {
    /// Stored profile, with defaults for keys that were never written.
    fn get_site_profile(&self) -> Result<SiteProfile>;

    /// Upserts every provided field.
    async fn update_site_profile(&self, update: &SiteProfileUpdate) -> Result<()>;
}

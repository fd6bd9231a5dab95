use std::sync::Arc;

use crate::config::Config;
use tracer_core::{
    campaigns::{CampaignService, CampaignServiceTrait},
    donations::{DonationService, DonationServiceTrait},
    files::{FileStoreTrait, LocalFileStore},
    settings::{SettingsService, SettingsServiceTrait},
};
use tracer_storage_sqlite::{
    campaigns::CampaignRepository, db, donations::DonationRepository,
    settings::SettingsRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub campaign_service: Arc<dyn CampaignServiceTrait>,
    pub donation_service: Arc<dyn DonationServiceTrait>,
    pub settings_service: Arc<dyn SettingsServiceTrait>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("TRACER_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone())?;

    tokio::fs::create_dir_all(&config.upload_dir).await?;
    tracing::info!("Uploads stored under {}", config.upload_dir);
    let file_store: Arc<dyn FileStoreTrait> = Arc::new(LocalFileStore::new(&config.upload_dir));

    let campaign_repo = Arc::new(CampaignRepository::new(pool.clone(), writer.clone()));
    let donation_repo = Arc::new(DonationRepository::new(pool.clone(), writer.clone()));
    let settings_repo = Arc::new(SettingsRepository::new(pool.clone(), writer));

    let campaign_service = Arc::new(CampaignService::new(
        campaign_repo.clone(),
        donation_repo.clone(),
        file_store.clone(),
    ));
    let donation_service = Arc::new(DonationService::new(
        donation_repo,
        campaign_repo,
        file_store,
    ));
    let settings_service = Arc::new(SettingsService::new(settings_repo));

    Ok(Arc::new(AppState {
        campaign_service,
        donation_service,
        settings_service,
        db_path,
    }))
}

//! SQLite storage implementation for the site profile settings.

mod model;
mod repository;

pub use model::AppSettingDB;
pub use repository::SettingsRepository;

// Re-export trait from core for convenience
pub use tracer_core::settings::SettingsRepositoryTrait;

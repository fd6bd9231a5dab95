//! Campaigns module - domain models, progress projection, services, and traits.

mod campaigns_model;
mod campaigns_service;
mod campaigns_traits;
mod progress;

#[cfg(test)]
mod campaigns_service_tests;

pub use campaigns_model::{
    Campaign, CampaignFilter, CampaignProgress, CampaignSummary, CampaignUpdate,
    LedgerReconciliation, NewCampaign,
};
pub use campaigns_service::CampaignService;
pub use campaigns_traits::{CampaignRepositoryTrait, CampaignServiceTrait};
pub use progress::percentage;

//! Donations module - domain models, verification rules, services, and traits.

mod donations_model;
mod donations_service;
mod donations_traits;
mod verification;


pub use donations_model::{
    AmountInput, Donation, DonationFilter, DonationListItem, DonationSearchResponse,
    DonationSearchResponseMeta, DonationStatus, DonationStatusTotals, DonationSubmission,
    NewDonation, StatusTransition,
};
pub use donations_service::DonationService;
pub use donations_traits::{DonationRepositoryTrait, DonationServiceTrait};
pub use verification::{plan_transition, LedgerAdjustment};

//! SQLite storage implementation for donations and the verification workflow.

mod model;
mod repository;

pub use model::DonationDB;
pub use repository::DonationRepository;

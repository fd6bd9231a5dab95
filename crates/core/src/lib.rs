//! Tracer Core - fundraising ledger domain entities, services, and traits.
//!
//! This crate contains the business rules for campaigns, donations and the
//! verification workflow that keeps a campaign's running total in line with
//! its verified donations. It is database-agnostic and defines traits that
//! are implemented by the `storage-sqlite` crate.

pub mod campaigns;
pub mod constants;
pub mod donations;
pub mod errors;
pub mod files;
pub mod settings;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

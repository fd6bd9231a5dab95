//! SQLite storage implementation for the alumni tracer fundraising ledger.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `tracer-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for campaigns, donations and the site profile
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! `tracer-core` is database-agnostic and works with traits.
//!
//! ```text
//!   core (domain)  ◄──── server (HTTP)
//!         ▲                  │
//!         │                  ▼
//!    storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```
//!
//! All writes go through a single writer actor ([`WriteHandle`]), and each
//! write job runs in one `IMMEDIATE` transaction.

pub mod db;
pub mod errors;
pub mod schema;
pub mod search;

// Repository implementations
pub mod campaigns;
pub mod donations;
pub mod settings;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from tracer-core for convenience
pub use tracer_core::errors::{DatabaseError, Error, Result};

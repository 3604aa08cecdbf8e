//! # vetlink-database
//!
//! PostgreSQL access layer for VetLink: connection pool management,
//! migrations, and one repository per entity. Uniqueness constraints at
//! the storage layer are the source of truth for duplicate detection;
//! application-level existence checks only produce friendlier messages.

pub mod connection;
pub mod repositories;

pub use connection::DatabasePool;

//! # vetlink-entity
//!
//! Domain entity models for VetLink: users and profiles, connections,
//! events and registrations, jobs and applications, posts, and
//! notifications. Models derive `sqlx::FromRow` for direct mapping from
//! PostgreSQL rows and `serde` for JSON serialization.

pub mod connection;
pub mod event;
pub mod job;
pub mod notification;
pub mod post;
pub mod user;

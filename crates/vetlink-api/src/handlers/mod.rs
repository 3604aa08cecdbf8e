//! HTTP request handlers, one module per domain.

pub mod auth;
pub mod connection;
pub mod event;
pub mod health;
pub mod job;
pub mod notification;
pub mod post;
pub mod user;

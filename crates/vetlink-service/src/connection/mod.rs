//! Connection request lifecycle.

pub mod service;

pub use service::{ConnectionService, ConnectionView};

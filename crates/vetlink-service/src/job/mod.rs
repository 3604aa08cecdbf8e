//! Job posting and application workflow.

pub mod service;

pub use service::JobService;

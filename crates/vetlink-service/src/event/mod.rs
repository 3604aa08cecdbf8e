//! Event publication and registration workflow.

pub mod service;

pub use service::EventService;

//! Account registration, authentication, and profile management.

pub mod service;

pub use service::{RegisterData, UserService};

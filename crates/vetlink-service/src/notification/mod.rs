//! Notification emission and management.

pub mod emitter;
pub mod service;

pub use emitter::{NotificationEmitter, NotificationEvent};
pub use service::NotificationService;

//! # vetlink-service
//!
//! Business logic service layer for VetLink. Each service orchestrates
//! repositories and the notification emitter to implement application-level
//! use cases: the connection lifecycle, event and job engagement, the feed,
//! and account management.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod connection;
pub mod context;
pub mod event;
pub mod job;
pub mod notification;
pub mod post;
pub mod user;

pub use connection::ConnectionService;
pub use context::RequestContext;
pub use event::EventService;
pub use job::JobService;
pub use notification::{NotificationEmitter, NotificationEvent, NotificationService};
pub use post::PostService;
pub use user::UserService;

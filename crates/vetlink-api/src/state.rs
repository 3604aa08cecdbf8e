//! Application state shared across all handlers.

use std::sync::Arc;

use vetlink_auth::jwt::JwtDecoder;
use vetlink_core::config::AppConfig;
use vetlink_database::DatabasePool;
use vetlink_service::{
    ConnectionService, EventService, JobService, NotificationService, PostService, UserService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Database pool wrapper (detailed health probe).
    pub db: DatabasePool,
    /// JWT decoder for the `AuthUser` extractor.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Account and profile service.
    pub user_service: Arc<UserService>,
    /// Connection lifecycle service.
    pub connection_service: Arc<ConnectionService>,
    /// Event and registration service.
    pub event_service: Arc<EventService>,
    /// Job and application service.
    pub job_service: Arc<JobService>,
    /// Feed post service.
    pub post_service: Arc<PostService>,
    /// Notification service.
    pub notification_service: Arc<NotificationService>,
}

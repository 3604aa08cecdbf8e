//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::NotificationKind;

/// A notification addressed to one user.
///
/// Purely informational: created as a side effect of state transitions and
/// never mutates business state.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// The recipient user.
    pub recipient_id: Uuid,
    /// Notification kind.
    pub kind: NotificationKind,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Frontend navigation target.
    pub action_url: Option<String>,
    /// The user who triggered the notification (if applicable).
    pub actor_id: Option<Uuid>,
    /// Referenced post (if applicable).
    pub post_id: Option<Uuid>,
    /// Referenced event (if applicable).
    pub event_id: Option<Uuid>,
    /// Referenced job (if applicable).
    pub job_id: Option<Uuid>,
    /// Whether the recipient has read this notification.
    pub is_read: bool,
    /// When the notification was read.
    pub read_at: Option<DateTime<Utc>>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to persist a new notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNotification {
    /// The recipient user.
    pub recipient_id: Uuid,
    /// Notification kind.
    pub kind: NotificationKind,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Frontend navigation target.
    pub action_url: Option<String>,
    /// The user who triggered the notification.
    pub actor_id: Option<Uuid>,
    /// Referenced post.
    pub post_id: Option<Uuid>,
    /// Referenced event.
    pub event_id: Option<Uuid>,
    /// Referenced job.
    pub job_id: Option<Uuid>,
}

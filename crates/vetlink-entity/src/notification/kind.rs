//! Notification kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type tag carried by every notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Someone sent the recipient a connection request.
    ConnectionRequest,
    /// The recipient's connection request was accepted.
    ConnectionAccepted,
    /// Someone liked the recipient's post.
    PostLiked,
    /// Someone commented on the recipient's post.
    PostCommented,
    /// The recipient received a direct message.
    NewMessage,
}

impl NotificationKind {
    /// Return the kind as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConnectionRequest => "connection_request",
            Self::ConnectionAccepted => "connection_accepted",
            Self::PostLiked => "post_liked",
            Self::PostCommented => "post_commented",
            Self::NewMessage => "new_message",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//! Connection entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::ConnectionStatus;

/// A connection row between two users.
///
/// The pair is ordered (requester, target) but at most one row exists per
/// *unordered* pair; lookups must check both orderings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Connection {
    /// Unique connection identifier.
    pub id: Uuid,
    /// The user who sent the request.
    pub requester_id: Uuid,
    /// The user who received the request.
    pub target_id: Uuid,
    /// Current lifecycle status.
    pub status: ConnectionStatus,
    /// Optional message attached to the request.
    pub message: Option<String>,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
    /// When the target accepted or rejected the request.
    pub responded_at: Option<DateTime<Utc>>,
}

impl Connection {
    /// Check whether the given user is one of the two parties.
    pub fn involves(&self, user_id: Uuid) -> bool {
        self.requester_id == user_id || self.target_id == user_id
    }

    /// Check whether the given user sent the original request.
    pub fn is_requester(&self, user_id: Uuid) -> bool {
        self.requester_id == user_id
    }

    /// Return the other party relative to the given viewer.
    pub fn other_party(&self, viewer_id: Uuid) -> Uuid {
        if self.requester_id == viewer_id {
            self.target_id
        } else {
            self.requester_id
        }
    }
}

/// Data required to create a new connection request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateConnection {
    /// The requesting user.
    pub requester_id: Uuid,
    /// The target user.
    pub target_id: Uuid,
    /// Optional message.
    pub message: Option<String>,
}

/// Relationship status as seen by a viewer, including whether the viewer
/// sent the original request (the UI needs this to offer "cancel" vs
/// "accept/reject").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipStatus {
    /// No row exists between the pair.
    None,
    /// A request is pending.
    Pending,
    /// The pair is connected.
    Accepted,
    /// The last request was rejected.
    Rejected,
    /// The pair is blocked.
    Blocked,
}

impl From<ConnectionStatus> for RelationshipStatus {
    fn from(status: ConnectionStatus) -> Self {
        match status {
            ConnectionStatus::Pending => Self::Pending,
            ConnectionStatus::Accepted => Self::Accepted,
            ConnectionStatus::Rejected => Self::Rejected,
            ConnectionStatus::Blocked => Self::Blocked,
        }
    }
}

/// The relationship between a viewer and another user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipView {
    /// Relationship status.
    pub status: RelationshipStatus,
    /// Connection row ID, when a row exists.
    pub connection_id: Option<Uuid>,
    /// Whether the viewer sent the original request, when a row exists.
    pub viewer_is_requester: Option<bool>,
}

impl RelationshipView {
    /// No row exists between the pair.
    pub fn none() -> Self {
        Self {
            status: RelationshipStatus::None,
            connection_id: None,
            viewer_is_requester: None,
        }
    }

    /// Build the view from an existing connection row.
    pub fn from_connection(viewer_id: Uuid, connection: &Connection) -> Self {
        Self {
            status: connection.status.into(),
            connection_id: Some(connection.id),
            viewer_is_requester: Some(connection.is_requester(viewer_id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(requester: Uuid, target: Uuid) -> Connection {
        Connection {
            id: Uuid::new_v4(),
            requester_id: requester,
            target_id: target,
            status: ConnectionStatus::Pending,
            message: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            responded_at: None,
        }
    }

    #[test]
    fn test_other_party_resolution() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let conn = sample(a, b);
        assert_eq!(conn.other_party(a), b);
        assert_eq!(conn.other_party(b), a);
    }

    #[test]
    fn test_relationship_view_marks_requester() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let conn = sample(a, b);
        let view = RelationshipView::from_connection(a, &conn);
        assert_eq!(view.status, RelationshipStatus::Pending);
        assert_eq!(view.viewer_is_requester, Some(true));
        let view = RelationshipView::from_connection(b, &conn);
        assert_eq!(view.viewer_is_requester, Some(false));
    }
}

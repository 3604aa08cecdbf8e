//! Connection status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a connection row between two users.
///
/// `Blocked` is terminal and reachable only through administrative action;
/// once present it blocks new requests in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "connection_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    /// Request sent, awaiting the target's decision.
    Pending,
    /// Both parties are connected.
    Accepted,
    /// The target declined the request.
    Rejected,
    /// One party blocked the other.
    Blocked,
}

impl ConnectionStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Blocked => "blocked",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

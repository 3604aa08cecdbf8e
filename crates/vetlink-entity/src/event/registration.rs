//! Event registration entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Status of an event registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "registration_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    /// Registered, pending organizer approval.
    Registered,
    /// Seat confirmed.
    Approved,
    /// Cancelled by the attendee or the organizer.
    Cancelled,
}

impl RegistrationStatus {
    /// Check whether this registration still occupies a seat.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

/// A user's claim on a seat at an event. Unique per (event, user); the row
/// is permanent once created — cancellation is a status value.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventRegistration {
    /// Unique registration identifier.
    pub id: Uuid,
    /// The event.
    pub event_id: Uuid,
    /// The registered user.
    pub user_id: Uuid,
    /// Registration status.
    pub status: RegistrationStatus,
    /// When the registration was created.
    pub created_at: DateTime<Utc>,
    /// When the registration was last updated.
    pub updated_at: DateTime<Utc>,
}

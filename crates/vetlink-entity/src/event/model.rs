//! Event entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Publication status of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "event_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    /// Not yet visible; registration closed.
    Draft,
    /// Open for registration.
    Published,
    /// Cancelled by the organizer.
    Cancelled,
    /// Took place; registration closed.
    Completed,
}

/// A professional event (congress, workshop, webinar).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    /// Unique event identifier.
    pub id: Uuid,
    /// The organizing user (individual or company profile).
    pub organizer_id: Uuid,
    /// Event title.
    pub title: String,
    /// Event description.
    pub description: String,
    /// Venue or "online".
    pub location: String,
    /// When the event starts.
    pub starts_at: DateTime<Utc>,
    /// When the event ends.
    pub ends_at: Option<DateTime<Utc>>,
    /// Last moment a registration is accepted.
    pub registration_deadline: Option<DateTime<Utc>>,
    /// Capacity limit (None = unlimited).
    pub max_attendees: Option<i32>,
    /// Whether registrations start as `registered` pending organizer approval.
    pub requires_approval: bool,
    /// Publication status.
    pub status: EventStatus,
    /// Cached count of non-cancelled registrations (advisory; capacity
    /// checks derive from a live count).
    pub registrations_count: i32,
    /// Best-effort detail view counter.
    pub views_count: i32,
    /// When the event was created.
    pub created_at: DateTime<Utc>,
    /// When the event was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Check whether the registration deadline has passed at `now`.
    pub fn deadline_passed(&self, now: DateTime<Utc>) -> bool {
        self.registration_deadline.is_some_and(|d| d < now)
    }

    /// Check whether a live registration count has reached capacity.
    pub fn at_capacity(&self, active_registrations: i64) -> bool {
        self.max_attendees
            .is_some_and(|max| active_registrations >= max as i64)
    }
}

/// Data required to create a new event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEvent {
    /// Event title.
    pub title: String,
    /// Event description.
    pub description: String,
    /// Venue or "online".
    pub location: String,
    /// When the event starts.
    pub starts_at: DateTime<Utc>,
    /// When the event ends.
    pub ends_at: Option<DateTime<Utc>>,
    /// Registration deadline.
    pub registration_deadline: Option<DateTime<Utc>>,
    /// Capacity limit.
    pub max_attendees: Option<i32>,
    /// Whether registrations require organizer approval.
    pub requires_approval: bool,
}

/// Optional predicates for event listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventFilter {
    /// Case-insensitive substring match over title and description.
    pub keyword: Option<String>,
    /// Case-insensitive substring match over location.
    pub location: Option<String>,
    /// Restrict to events that have not started yet.
    pub upcoming_only: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_event(deadline: Option<DateTime<Utc>>, max: Option<i32>) -> Event {
        Event {
            id: Uuid::new_v4(),
            organizer_id: Uuid::new_v4(),
            title: "Feline Medicine Congress".into(),
            description: "Annual congress".into(),
            location: "Madrid".into(),
            starts_at: Utc::now() + Duration::days(30),
            ends_at: None,
            registration_deadline: deadline,
            max_attendees: max,
            requires_approval: false,
            status: EventStatus::Published,
            registrations_count: 0,
            views_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_deadline_passed() {
        let now = Utc::now();
        let event = sample_event(Some(now - Duration::hours(1)), None);
        assert!(event.deadline_passed(now));
        let event = sample_event(Some(now + Duration::hours(1)), None);
        assert!(!event.deadline_passed(now));
        let event = sample_event(None, None);
        assert!(!event.deadline_passed(now));
    }

    #[test]
    fn test_at_capacity() {
        let event = sample_event(None, Some(2));
        assert!(!event.at_capacity(1));
        assert!(event.at_capacity(2));
        assert!(event.at_capacity(3));
        let unlimited = sample_event(None, None);
        assert!(!unlimited.at_capacity(10_000));
    }
}

//! Event registration workflow: publication, deadline, capacity, and
//! duplicate guards around the repository's transactional operations.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use vetlink_core::error::AppError;
use vetlink_core::result::AppResult;
use vetlink_core::types::pagination::{PageRequest, PageResponse};
use vetlink_database::repositories::event::EventRepository;
use vetlink_entity::event::model::{CreateEvent, EventFilter};
use vetlink_entity::event::{Event, EventRegistration, EventStatus, RegistrationStatus};

use crate::context::RequestContext;

/// Manages events and their registrations.
#[derive(Debug, Clone)]
pub struct EventService {
    /// Event repository.
    event_repo: Arc<EventRepository>,
}

impl EventService {
    /// Create a new event service.
    pub fn new(event_repo: Arc<EventRepository>) -> Self {
        Self { event_repo }
    }

    /// Create and publish a new event organized by the current user.
    pub async fn create_event(&self, ctx: &RequestContext, data: CreateEvent) -> AppResult<Event> {
        let event = self.event_repo.create(ctx.user_id, &data).await?;
        info!(event_id = %event.id, organizer_id = %ctx.user_id, "Event created");
        Ok(event)
    }

    /// Fetch an event by ID, bumping the best-effort view counter.
    pub async fn get_event(&self, event_id: Uuid) -> AppResult<Event> {
        let event = self.require_event(event_id).await?;
        // Fire-and-forget; a lost increment is acceptable.
        if let Err(e) = self.event_repo.increment_views(event_id).await {
            tracing::warn!(event_id = %event_id, error = %e, "Failed to bump event views");
        }
        Ok(event)
    }

    /// List published events, soonest first.
    pub async fn list_events(
        &self,
        filter: EventFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<Event>> {
        self.event_repo.find_published(&filter, &page).await
    }

    /// Register the current user for an event.
    ///
    /// Guards, in order: the event must be published; the registration
    /// deadline must not have passed; the event must not be full; the
    /// user must not already hold a registration (a cancelled one still
    /// consumes the slot). Capacity is re-checked inside the repository
    /// transaction; the checks here only shortcut the common failures.
    pub async fn register(
        &self,
        ctx: &RequestContext,
        event_id: Uuid,
    ) -> AppResult<EventRegistration> {
        let event = self.require_event(event_id).await?;
        guard_registration_open(&event, ctx.request_time)?;

        if self
            .event_repo
            .find_registration(event_id, ctx.user_id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Already registered for this event"));
        }

        let active = self.event_repo.count_active_registrations(event_id).await?;
        if event.at_capacity(active) {
            return Err(AppError::conflict("Event is full"));
        }

        let status = if event.requires_approval {
            RegistrationStatus::Registered
        } else {
            RegistrationStatus::Approved
        };

        let registration = self.event_repo.register(event_id, ctx.user_id, status).await?;
        info!(
            event_id = %event_id,
            user_id = %ctx.user_id,
            registration_id = %registration.id,
            "Event registration created"
        );
        Ok(registration)
    }

    /// Cancel the current user's registration for an event.
    pub async fn cancel_registration(&self, ctx: &RequestContext, event_id: Uuid) -> AppResult<()> {
        let registration = self
            .event_repo
            .find_registration(event_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Registration not found"))?;

        if self
            .event_repo
            .cancel_registration(registration.id)
            .await?
            .is_none()
        {
            return Err(AppError::conflict("Registration is already cancelled"));
        }

        info!(
            event_id = %event_id,
            user_id = %ctx.user_id,
            "Event registration cancelled"
        );
        Ok(())
    }

    /// Change a registration's status (approve, reject, cancel). Organizer
    /// only; a cancelled registration cannot be reactivated, so freed
    /// seats are only retaken through the capacity-checked `register`
    /// path. The repository re-enforces both rules inside its
    /// transaction.
    pub async fn update_registration_status(
        &self,
        ctx: &RequestContext,
        registration_id: Uuid,
        status: RegistrationStatus,
    ) -> AppResult<EventRegistration> {
        let registration = self
            .event_repo
            .find_registration_by_id(registration_id)
            .await?
            .ok_or_else(|| AppError::not_found("Registration not found"))?;

        let event = self.require_event(registration.event_id).await?;
        if event.organizer_id != ctx.user_id {
            return Err(AppError::forbidden(
                "Only the event organizer can manage registrations",
            ));
        }
        guard_registration_update(registration.status)?;

        self.event_repo
            .update_registration_status(registration_id, status)
            .await?
            .ok_or_else(|| AppError::conflict("Registration is already cancelled"))
    }

    /// List registrations for an event. Organizer only.
    pub async fn list_registrations(
        &self,
        ctx: &RequestContext,
        event_id: Uuid,
        page: PageRequest,
    ) -> AppResult<PageResponse<EventRegistration>> {
        let event = self.require_event(event_id).await?;
        if event.organizer_id != ctx.user_id {
            return Err(AppError::forbidden(
                "Only the event organizer can list registrations",
            ));
        }
        self.event_repo
            .find_registrations_by_event(event_id, &page)
            .await
    }

    async fn require_event(&self, event_id: Uuid) -> AppResult<Event> {
        self.event_repo
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::not_found("Event not found"))
    }
}

/// Check that an event accepts registrations at `now`.
fn guard_registration_open(event: &Event, now: DateTime<Utc>) -> AppResult<()> {
    if event.status != EventStatus::Published {
        return Err(AppError::conflict("Event is not open for registration"));
    }
    if event.deadline_passed(now) {
        return Err(AppError::conflict("Registration deadline has passed"));
    }
    Ok(())
}

/// Organizer status changes never resurrect a cancelled registration.
fn guard_registration_update(current: RegistrationStatus) -> AppResult<()> {
    if current == RegistrationStatus::Cancelled {
        return Err(AppError::conflict("Registration is already cancelled"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use vetlink_core::error::ErrorKind;

    fn event(status: EventStatus, deadline: Option<DateTime<Utc>>) -> Event {
        Event {
            id: Uuid::new_v4(),
            organizer_id: Uuid::new_v4(),
            title: "Taller de anestesia".into(),
            description: "Taller práctico".into(),
            location: "Valencia".into(),
            starts_at: Utc::now() + Duration::days(7),
            ends_at: None,
            registration_deadline: deadline,
            max_attendees: None,
            requires_approval: false,
            status,
            registrations_count: 0,
            views_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_registration_requires_published_event() {
        let now = Utc::now();
        for status in [EventStatus::Draft, EventStatus::Cancelled, EventStatus::Completed] {
            let err = guard_registration_open(&event(status, None), now).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Conflict);
        }
        assert!(guard_registration_open(&event(EventStatus::Published, None), now).is_ok());
    }

    #[test]
    fn test_registration_closed_after_deadline() {
        let now = Utc::now();
        let past = event(EventStatus::Published, Some(now - Duration::hours(1)));
        let err = guard_registration_open(&past, now).unwrap_err();
        assert!(err.message.contains("deadline"));

        let future = event(EventStatus::Published, Some(now + Duration::hours(1)));
        assert!(guard_registration_open(&future, now).is_ok());
    }

    #[test]
    fn test_cancelled_registration_cannot_be_reactivated() {
        let err = guard_registration_update(RegistrationStatus::Cancelled).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert!(err.message.contains("cancelled"));

        assert!(guard_registration_update(RegistrationStatus::Registered).is_ok());
        assert!(guard_registration_update(RegistrationStatus::Approved).is_ok());
    }
}

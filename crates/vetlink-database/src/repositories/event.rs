//! Event and registration repository implementation.
//!
//! Registration creation and cancellation run as single transactions that
//! keep the cached counter consistent with the rows. The capacity check
//! re-derives the live count inside the transaction while holding a row
//! lock on the event, so concurrent registrations at the boundary cannot
//! overshoot `max_attendees`.

use sqlx::PgPool;
use uuid::Uuid;

use vetlink_core::error::{AppError, ErrorKind};
use vetlink_core::result::AppResult;
use vetlink_core::types::pagination::{PageRequest, PageResponse};
use vetlink_entity::event::model::{CreateEvent, EventFilter};
use vetlink_entity::event::{Event, EventRegistration, RegistrationStatus};

use super::conflict_on_unique;

/// Repository for event CRUD and registration operations.
#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Create a new event repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an event by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Event>> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find event", e))
    }

    /// Create a new published event.
    pub async fn create(&self, organizer_id: Uuid, data: &CreateEvent) -> AppResult<Event> {
        sqlx::query_as::<_, Event>(
            "INSERT INTO events (organizer_id, title, description, location, starts_at, ends_at, \
             registration_deadline, max_attendees, requires_approval, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'published') RETURNING *",
        )
        .bind(organizer_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.location)
        .bind(data.starts_at)
        .bind(data.ends_at)
        .bind(data.registration_deadline)
        .bind(data.max_attendees)
        .bind(data.requires_approval)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create event", e))
    }

    /// List published events with optional filters, soonest first.
    pub async fn find_published(
        &self,
        filter: &EventFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Event>> {
        let keyword = filter.keyword.as_ref().map(|k| format!("%{k}%"));
        let location = filter.location.as_ref().map(|l| format!("%{l}%"));

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM events WHERE status = 'published' \
             AND ($1::text IS NULL OR title ILIKE $1 OR description ILIKE $1) \
             AND ($2::text IS NULL OR location ILIKE $2) \
             AND (NOT $3 OR starts_at > NOW())",
        )
        .bind(&keyword)
        .bind(&location)
        .bind(filter.upcoming_only)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count events", e))?;

        let events = sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE status = 'published' \
             AND ($1::text IS NULL OR title ILIKE $1 OR description ILIKE $1) \
             AND ($2::text IS NULL OR location ILIKE $2) \
             AND (NOT $3 OR starts_at > NOW()) \
             ORDER BY starts_at ASC LIMIT $4 OFFSET $5",
        )
        .bind(&keyword)
        .bind(&location)
        .bind(filter.upcoming_only)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list events", e))?;

        Ok(PageResponse::new(
            events,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Best-effort detail view counter. Not transactional by design.
    pub async fn increment_views(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE events SET views_count = views_count + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to bump views", e))?;
        Ok(())
    }

    /// Find the registration row for a (event, user) pair, any status.
    pub async fn find_registration(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<EventRegistration>> {
        sqlx::query_as::<_, EventRegistration>(
            "SELECT * FROM event_registrations WHERE event_id = $1 AND user_id = $2",
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find registration", e))
    }

    /// Find a registration by primary key.
    pub async fn find_registration_by_id(&self, id: Uuid) -> AppResult<Option<EventRegistration>> {
        sqlx::query_as::<_, EventRegistration>("SELECT * FROM event_registrations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find registration", e)
            })
    }

    /// Count registrations that still occupy a seat.
    pub async fn count_active_registrations(&self, event_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM event_registrations \
             WHERE event_id = $1 AND status <> 'cancelled'",
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count registrations", e))
    }

    /// Atomically register a user for an event.
    ///
    /// Locks the event row, re-derives the live seat count, inserts the
    /// registration, and bumps the cached counter in one transaction. The
    /// in-transaction capacity check is the authoritative one; callers'
    /// pre-checks only shortcut the common failure cases.
    pub async fn register(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        status: RegistrationStatus,
    ) -> AppResult<EventRegistration> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let max_attendees: Option<i32> =
            sqlx::query_scalar("SELECT max_attendees FROM events WHERE id = $1 FOR UPDATE")
                .bind(event_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock event", e))?
                .ok_or_else(|| AppError::not_found("Event not found"))?;

        if let Some(max) = max_attendees {
            let active: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM event_registrations \
                 WHERE event_id = $1 AND status <> 'cancelled'",
            )
            .bind(event_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count registrations", e)
            })?;

            if active >= max as i64 {
                return Err(AppError::conflict("Event is full"));
            }
        }

        let registration = sqlx::query_as::<_, EventRegistration>(
            "INSERT INTO event_registrations (event_id, user_id, status) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(event_id)
        .bind(user_id)
        .bind(status)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            conflict_on_unique(
                e,
                "Already registered for this event",
                "Failed to create registration",
            )
        })?;

        sqlx::query("UPDATE events SET registrations_count = registrations_count + 1 WHERE id = $1")
            .bind(event_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to bump registration count", e)
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit registration", e)
        })?;

        Ok(registration)
    }

    /// Atomically cancel a registration and decrement the cached counter.
    ///
    /// Returns `None` if the registration was already cancelled.
    pub async fn cancel_registration(
        &self,
        registration_id: Uuid,
    ) -> AppResult<Option<EventRegistration>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let registration = sqlx::query_as::<_, EventRegistration>(
            "UPDATE event_registrations SET status = 'cancelled', updated_at = NOW() \
             WHERE id = $1 AND status <> 'cancelled' RETURNING *",
        )
        .bind(registration_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to cancel registration", e)
        })?;

        if let Some(ref reg) = registration {
            sqlx::query(
                "UPDATE events SET registrations_count = GREATEST(registrations_count - 1, 0) \
                 WHERE id = $1",
            )
            .bind(reg.event_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to drop registration count", e)
            })?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit cancellation", e)
        })?;

        Ok(registration)
    }

    /// Organizer-driven status change (approve, reject a request, cancel).
    ///
    /// A cancelled registration is terminal on this path too: the update
    /// only matches rows whose status is not `cancelled`, so a freed seat
    /// can never be retaken outside the capacity check in [`register`].
    /// Moving a live registration to `cancelled` releases the cached
    /// counter in the same transaction. Returns `None` when the row is
    /// already cancelled.
    ///
    /// [`register`]: EventRepository::register
    pub async fn update_registration_status(
        &self,
        registration_id: Uuid,
        status: RegistrationStatus,
    ) -> AppResult<Option<EventRegistration>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let registration = sqlx::query_as::<_, EventRegistration>(
            "UPDATE event_registrations SET status = $2, updated_at = NOW() \
             WHERE id = $1 AND status <> 'cancelled' RETURNING *",
        )
        .bind(registration_id)
        .bind(status)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update registration status", e)
        })?;

        if let Some(ref reg) = registration {
            if reg.status == RegistrationStatus::Cancelled {
                sqlx::query(
                    "UPDATE events SET registrations_count = GREATEST(registrations_count - 1, 0) \
                     WHERE id = $1",
                )
                .bind(reg.event_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to drop registration count", e)
                })?;
            }
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit status update", e)
        })?;

        Ok(registration)
    }

    /// List registrations for an event, newest first (organizer view).
    pub async fn find_registrations_by_event(
        &self,
        event_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<EventRegistration>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM event_registrations WHERE event_id = $1")
                .bind(event_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count registrations", e)
                })?;

        let rows = sqlx::query_as::<_, EventRegistration>(
            "SELECT * FROM event_registrations WHERE event_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(event_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list registrations", e)
        })?;

        Ok(PageResponse::new(
            rows,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}

//! Connection repository implementation.
//!
//! At most one row exists per unordered pair of users, enforced by a
//! unique index over `(LEAST(requester_id, target_id),
//! GREATEST(requester_id, target_id))`; symmetric lookups check both
//! orderings.

use sqlx::PgPool;
use uuid::Uuid;

use vetlink_core::error::{AppError, ErrorKind};
use vetlink_core::result::AppResult;
use vetlink_core::types::pagination::{PageRequest, PageResponse};
use vetlink_entity::connection::model::CreateConnection;
use vetlink_entity::connection::{Connection, ConnectionStatus};

use super::conflict_on_unique;

/// Repository for connection CRUD and symmetric pair lookups.
#[derive(Debug, Clone)]
pub struct ConnectionRepository {
    pool: PgPool,
}

impl ConnectionRepository {
    /// Create a new connection repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a connection by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Connection>> {
        sqlx::query_as::<_, Connection>("SELECT * FROM connections WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find connection", e))
    }

    /// Find the row between two users regardless of direction.
    pub async fn find_between(&self, a: Uuid, b: Uuid) -> AppResult<Option<Connection>> {
        sqlx::query_as::<_, Connection>(
            "SELECT * FROM connections \
             WHERE (requester_id = $1 AND target_id = $2) \
                OR (requester_id = $2 AND target_id = $1)",
        )
        .bind(a)
        .bind(b)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find connection between pair", e)
        })
    }

    /// Create a new pending connection request.
    pub async fn create(&self, data: &CreateConnection) -> AppResult<Connection> {
        sqlx::query_as::<_, Connection>(
            "INSERT INTO connections (requester_id, target_id, message) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(data.requester_id)
        .bind(data.target_id)
        .bind(&data.message)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            conflict_on_unique(
                e,
                "A connection already exists between these users",
                "Failed to create connection",
            )
        })
    }

    /// Resolve a pending request, stamping the response time.
    ///
    /// The `status = 'pending'` predicate makes the transition
    /// single-shot under concurrency: of two racing accepts (or an
    /// accept racing a cancel-then-resend), only the first one matches
    /// the row. Losers get Conflict.
    pub async fn set_status(&self, id: Uuid, status: ConnectionStatus) -> AppResult<Connection> {
        sqlx::query_as::<_, Connection>(
            "UPDATE connections SET status = $2, responded_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND status = 'pending' RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update connection status", e)
        })?
        .ok_or_else(|| AppError::conflict("Connection request is not pending"))
    }

    /// Delete a connection row (cancel a pending request or remove an
    /// accepted connection).
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM connections WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete connection", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// List pending requests received by a user, most recent first.
    pub async fn find_pending_for(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Connection>> {
        self.find_directed(user_id, "target_id", ConnectionStatus::Pending, page)
            .await
    }

    /// List pending requests sent by a user, most recent first.
    pub async fn find_sent_by(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Connection>> {
        self.find_directed(user_id, "requester_id", ConnectionStatus::Pending, page)
            .await
    }

    async fn find_directed(
        &self,
        user_id: Uuid,
        column: &str,
        status: ConnectionStatus,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Connection>> {
        // `column` is a fixed identifier chosen by the two callers above,
        // never user input.
        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM connections WHERE {column} = $1 AND status = $2"
        ))
        .bind(user_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count requests", e))?;

        let rows = sqlx::query_as::<_, Connection>(&format!(
            "SELECT * FROM connections WHERE {column} = $1 AND status = $2 \
             ORDER BY created_at DESC LIMIT $3 OFFSET $4"
        ))
        .bind(user_id)
        .bind(status)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list requests", e))?;

        Ok(PageResponse::new(
            rows,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List accepted connections involving a user, most recently accepted
    /// first.
    pub async fn find_accepted_for(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Connection>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM connections \
             WHERE (requester_id = $1 OR target_id = $1) AND status = 'accepted'",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count connections", e)
        })?;

        let rows = sqlx::query_as::<_, Connection>(
            "SELECT * FROM connections \
             WHERE (requester_id = $1 OR target_id = $1) AND status = 'accepted' \
             ORDER BY responded_at DESC NULLS LAST LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list connections", e))?;

        Ok(PageResponse::new(
            rows,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}

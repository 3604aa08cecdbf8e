//! User repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use vetlink_core::error::{AppError, ErrorKind};
use vetlink_core::result::AppResult;
use vetlink_core::types::pagination::{PageRequest, PageResponse};
use vetlink_entity::user::model::{CreateUser, UpdateProfile, UserFilter};
use vetlink_entity::user::{User, UserStatus};

use super::conflict_on_unique;

/// Repository for user CRUD and query operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    /// Find all users with the given IDs. Order is unspecified.
    pub async fn find_many(&self, ids: &[Uuid]) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find users", e))
    }

    /// Create a new user.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash, profile_type, first_name, last_name, company_name) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(data.profile_type)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.company_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            conflict_on_unique(e, "An account with this email already exists", "Failed to create user")
        })
    }

    /// Update profile fields of an existing user. Only provided fields change.
    pub async fn update_profile(&self, id: Uuid, data: &UpdateProfile) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET \
             first_name = COALESCE($2, first_name), \
             last_name = COALESCE($3, last_name), \
             company_name = COALESCE($4, company_name), \
             headline = COALESCE($5, headline), \
             bio = COALESCE($6, bio), \
             avatar_url = COALESCE($7, avatar_url), \
             updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.company_name)
        .bind(&data.headline)
        .bind(&data.bio)
        .bind(&data.avatar_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update profile", e))
    }

    /// Change account status. Sets the soft-delete timestamp for
    /// `deactivated`, clears it otherwise.
    pub async fn set_status(&self, id: Uuid, status: UserStatus) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE users SET status = $2, \
             deleted_at = CASE WHEN $2 = 'deactivated'::user_status THEN NOW() ELSE NULL END, \
             updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(status)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to set user status", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Record a successful login.
    pub async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<()> {
        sqlx::query("UPDATE users SET last_login_at = $2 WHERE id = $1")
            .bind(id)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record login", e))?;
        Ok(())
    }

    /// Search active users with optional filters, newest first.
    pub async fn search(
        &self,
        filter: &UserFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>> {
        let keyword = filter.keyword.as_ref().map(|k| format!("%{k}%"));

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE status = 'active' \
             AND ($1::text IS NULL OR first_name ILIKE $1 OR last_name ILIKE $1 \
                  OR company_name ILIKE $1 OR headline ILIKE $1) \
             AND ($2::profile_type IS NULL OR profile_type = $2)",
        )
        .bind(&keyword)
        .bind(filter.profile_type)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))?;

        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE status = 'active' \
             AND ($1::text IS NULL OR first_name ILIKE $1 OR last_name ILIKE $1 \
                  OR company_name ILIKE $1 OR headline ILIKE $1) \
             AND ($2::profile_type IS NULL OR profile_type = $2) \
             ORDER BY created_at DESC LIMIT $3 OFFSET $4",
        )
        .bind(&keyword)
        .bind(filter.profile_type)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search users", e))?;

        Ok(PageResponse::new(
            users,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Connection suggestions for a viewer: most recently created active
    /// profiles, excluding the viewer and anyone with an accepted, pending,
    /// or blocked row in either direction. Placeholder ranking by design.
    pub async fn suggestions(&self, viewer_id: Uuid, limit: u64) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users u WHERE u.id <> $1 AND u.status = 'active' \
             AND NOT EXISTS (\
                 SELECT 1 FROM connections c \
                 WHERE ((c.requester_id = $1 AND c.target_id = u.id) \
                        OR (c.requester_id = u.id AND c.target_id = $1)) \
                 AND c.status IN ('pending', 'accepted', 'blocked')) \
             ORDER BY u.created_at DESC LIMIT $2",
        )
        .bind(viewer_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load suggestions", e))
    }
}

//! Post repository implementation.
//!
//! Likes and comments update the cached counters on the post row inside
//! the same transaction as the child-row insert.

use sqlx::PgPool;
use uuid::Uuid;

use vetlink_core::error::{AppError, ErrorKind};
use vetlink_core::result::AppResult;
use vetlink_core::types::pagination::{PageRequest, PageResponse};
use vetlink_entity::post::model::{CreatePost, PostFilter};
use vetlink_entity::post::{Post, PostComment};

use super::conflict_on_unique;

/// Repository for posts, likes, and comments.
#[derive(Debug, Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    /// Create a new post repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a post by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Post>> {
        sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find post", e))
    }

    /// Create a new post.
    pub async fn create(&self, author_id: Uuid, data: &CreatePost) -> AppResult<Post> {
        sqlx::query_as::<_, Post>(
            "INSERT INTO posts (author_id, content, image_url) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(author_id)
        .bind(&data.content)
        .bind(&data.image_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create post", e))
    }

    /// List posts newest first, optionally scoped to one author and/or a
    /// content keyword.
    pub async fn find_recent(
        &self,
        filter: &PostFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Post>> {
        let keyword = filter.keyword.as_ref().map(|k| format!("%{k}%"));

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM posts WHERE ($1::uuid IS NULL OR author_id = $1) \
             AND ($2::text IS NULL OR content ILIKE $2)",
        )
        .bind(filter.author_id)
        .bind(&keyword)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count posts", e))?;

        let posts = sqlx::query_as::<_, Post>(
            "SELECT * FROM posts WHERE ($1::uuid IS NULL OR author_id = $1) \
             AND ($2::text IS NULL OR content ILIKE $2) \
             ORDER BY created_at DESC LIMIT $3 OFFSET $4",
        )
        .bind(filter.author_id)
        .bind(&keyword)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list posts", e))?;

        Ok(PageResponse::new(
            posts,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Atomically record a like and bump the post's counter.
    pub async fn like(&self, post_id: Uuid, user_id: Uuid) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query("INSERT INTO post_likes (post_id, user_id) VALUES ($1, $2)")
            .bind(post_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                conflict_on_unique(e, "Post already liked", "Failed to record like")
            })?;

        sqlx::query("UPDATE posts SET likes_count = likes_count + 1 WHERE id = $1")
            .bind(post_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to bump like count", e)
            })?;

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit like", e))?;

        Ok(())
    }

    /// Atomically add a comment and bump the post's counter.
    pub async fn add_comment(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        content: &str,
    ) -> AppResult<PostComment> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let comment = sqlx::query_as::<_, PostComment>(
            "INSERT INTO post_comments (post_id, author_id, content) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(post_id)
        .bind(author_id)
        .bind(content)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create comment", e))?;

        sqlx::query("UPDATE posts SET comments_count = comments_count + 1 WHERE id = $1")
            .bind(post_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to bump comment count", e)
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit comment", e)
        })?;

        Ok(comment)
    }

    /// List comments on a post, oldest first.
    pub async fn find_comments(
        &self,
        post_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<PostComment>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM post_comments WHERE post_id = $1")
                .bind(post_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count comments", e)
                })?;

        let rows = sqlx::query_as::<_, PostComment>(
            "SELECT * FROM post_comments WHERE post_id = $1 \
             ORDER BY created_at ASC LIMIT $2 OFFSET $3",
        )
        .bind(post_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list comments", e))?;

        Ok(PageResponse::new(
            rows,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}

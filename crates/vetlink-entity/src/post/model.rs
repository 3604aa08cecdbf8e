//! Post entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A feed post authored by a user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    /// Unique post identifier.
    pub id: Uuid,
    /// The authoring user.
    pub author_id: Uuid,
    /// Post body.
    pub content: String,
    /// Attached image URL (opaque string; media storage is external).
    pub image_url: Option<String>,
    /// Cached like counter (advisory).
    pub likes_count: i32,
    /// Cached comment counter (advisory).
    pub comments_count: i32,
    /// When the post was created.
    pub created_at: DateTime<Utc>,
    /// When the post was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePost {
    /// Post body.
    pub content: String,
    /// Attached image URL.
    pub image_url: Option<String>,
}

/// A comment on a post.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PostComment {
    /// Unique comment identifier.
    pub id: Uuid,
    /// The commented post.
    pub post_id: Uuid,
    /// The commenting user.
    pub author_id: Uuid,
    /// Comment body.
    pub content: String,
    /// When the comment was created.
    pub created_at: DateTime<Utc>,
}

/// Optional predicates for post listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostFilter {
    /// Case-insensitive substring match over the post body.
    pub keyword: Option<String>,
    /// Restrict to a single author.
    pub author_id: Option<Uuid>,
}

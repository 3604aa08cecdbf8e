//! Post handlers — feed, likes, comments.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use vetlink_core::types::pagination::PageResponse;
use vetlink_entity::post::model::{CreatePost, PostFilter};
use vetlink_entity::post::{Post, PostComment};

use crate::dto::request::{CreateCommentRequest, CreatePostRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::dto::validate_request;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// Query parameters for post listing.
#[derive(Debug, Clone, Deserialize)]
pub struct PostListQuery {
    /// Substring match against post content.
    pub q: Option<String>,
    /// Restrict to a single author.
    pub author_id: Option<Uuid>,
}

/// POST /api/posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreatePostRequest>,
) -> Result<Json<ApiResponse<Post>>, ApiError> {
    validate_request(&req)?;

    let post = state
        .post_service
        .create_post(
            &auth,
            CreatePost {
                content: req.content,
                image_url: req.image_url,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(post)))
}

/// GET /api/posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Post>>, ApiError> {
    let post = state.post_service.get_post(id).await?;
    Ok(Json(ApiResponse::ok(post)))
}

/// GET /api/posts
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PostListQuery>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Post>>>, ApiError> {
    let posts = state
        .post_service
        .list_posts(
            PostFilter {
                keyword: query.q,
                author_id: query.author_id,
            },
            pagination.into_page_request(),
        )
        .await?;
    Ok(Json(ApiResponse::ok(posts)))
}

/// POST /api/posts/{id}/like
pub async fn like_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.post_service.like_post(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Post liked"))))
}

/// POST /api/posts/{id}/comments
pub async fn add_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateCommentRequest>,
) -> Result<Json<ApiResponse<PostComment>>, ApiError> {
    validate_request(&req)?;

    let comment = state.post_service.add_comment(&auth, id, req.content).await?;
    Ok(Json(ApiResponse::ok(comment)))
}

/// GET /api/posts/{id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<PostComment>>>, ApiError> {
    let comments = state
        .post_service
        .list_comments(id, pagination.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(comments)))
}

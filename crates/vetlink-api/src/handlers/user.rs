//! User handlers — profiles, search, deactivation.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use vetlink_core::types::pagination::PageResponse;
use vetlink_entity::user::model::{UpdateProfile, UserFilter};
use vetlink_entity::user::{ProfileType, User};

use crate::dto::request::UpdateProfileRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::dto::validate_request;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// Query parameters for user search.
#[derive(Debug, Clone, Deserialize)]
pub struct UserSearchQuery {
    /// Keyword over name fields and headline.
    pub q: Option<String>,
    /// Restrict to a profile kind.
    pub profile_type: Option<ProfileType>,
}

/// GET /api/users/{id}
pub async fn get_profile(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state.user_service.get_profile(id).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// PUT /api/users/me
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    validate_request(&req)?;

    let user = state
        .user_service
        .update_profile(
            &auth,
            UpdateProfile {
                first_name: req.first_name,
                last_name: req.last_name,
                company_name: req.company_name,
                headline: req.headline,
                bio: req.bio,
                avatar_url: req.avatar_url,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// GET /api/users
pub async fn search(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<UserSearchQuery>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<User>>>, ApiError> {
    let users = state
        .user_service
        .search(
            UserFilter {
                keyword: query.q,
                profile_type: query.profile_type,
            },
            pagination.into_page_request(),
        )
        .await?;
    Ok(Json(ApiResponse::ok(users)))
}

/// DELETE /api/users/me
pub async fn deactivate(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.user_service.deactivate(&auth).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Account deactivated",
    ))))
}

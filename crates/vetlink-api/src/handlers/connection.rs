//! Connection handlers — request lifecycle, listings, status, suggestions.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use vetlink_core::types::pagination::PageResponse;
use vetlink_entity::connection::{Connection, RelationshipView};
use vetlink_entity::user::model::UserSummary;
use vetlink_service::connection::ConnectionView;

use crate::dto::request::SendConnectionRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::dto::validate_request;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /api/connections
pub async fn send_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SendConnectionRequest>,
) -> Result<Json<ApiResponse<ConnectionView>>, ApiError> {
    validate_request(&req)?;

    let view = state
        .connection_service
        .send_request(&auth, req.target_id, req.message)
        .await?;
    Ok(Json(ApiResponse::ok(view)))
}

/// PUT /api/connections/{id}/accept
pub async fn accept_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Connection>>, ApiError> {
    let connection = state.connection_service.accept_request(&auth, id).await?;
    Ok(Json(ApiResponse::ok(connection)))
}

/// PUT /api/connections/{id}/reject
pub async fn reject_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.connection_service.reject_request(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Connection request rejected",
    ))))
}

/// DELETE /api/connections/{id}/cancel
pub async fn cancel_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.connection_service.cancel_request(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Connection request cancelled",
    ))))
}

/// DELETE /api/connections/{id}
pub async fn remove_connection(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.connection_service.remove_connection(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Connection removed",
    ))))
}

/// GET /api/connections/status/{user_id}
pub async fn connection_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<RelationshipView>>, ApiError> {
    let view = state
        .connection_service
        .connection_status(&auth, user_id)
        .await?;
    Ok(Json(ApiResponse::ok(view)))
}

/// GET /api/connections/pending
pub async fn list_pending(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<ConnectionView>>>, ApiError> {
    let page = state
        .connection_service
        .list_pending(&auth, pagination.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/connections/sent
pub async fn list_sent(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<ConnectionView>>>, ApiError> {
    let page = state
        .connection_service
        .list_sent(&auth, pagination.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/connections
pub async fn list_connections(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<ConnectionView>>>, ApiError> {
    let page = state
        .connection_service
        .list_connections(&auth, pagination.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/connections/suggestions
pub async fn suggestions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<UserSummary>>>, ApiError> {
    let users = state.connection_service.suggestions(&auth).await?;
    Ok(Json(ApiResponse::ok(users)))
}

//! Event handlers — CRUD, listing, registration workflow.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use vetlink_core::types::pagination::PageResponse;
use vetlink_entity::event::model::{CreateEvent, EventFilter};
use vetlink_entity::event::{Event, EventRegistration};

use crate::dto::request::{CreateEventRequest, UpdateRegistrationStatusRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::dto::validate_request;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// Query parameters for event listing.
#[derive(Debug, Clone, Deserialize)]
pub struct EventListQuery {
    /// Keyword over title and description.
    pub q: Option<String>,
    /// Location substring.
    pub location: Option<String>,
    /// Restrict to events that have not started yet.
    #[serde(default)]
    pub upcoming: bool,
}

/// POST /api/events
pub async fn create_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateEventRequest>,
) -> Result<Json<ApiResponse<Event>>, ApiError> {
    validate_request(&req)?;

    let event = state
        .event_service
        .create_event(
            &auth,
            CreateEvent {
                title: req.title,
                description: req.description,
                location: req.location,
                starts_at: req.starts_at,
                ends_at: req.ends_at,
                registration_deadline: req.registration_deadline,
                max_attendees: req.max_attendees,
                requires_approval: req.requires_approval,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(event)))
}

/// GET /api/events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Event>>, ApiError> {
    let event = state.event_service.get_event(id).await?;
    Ok(Json(ApiResponse::ok(event)))
}

/// GET /api/events
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventListQuery>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Event>>>, ApiError> {
    let events = state
        .event_service
        .list_events(
            EventFilter {
                keyword: query.q,
                location: query.location,
                upcoming_only: query.upcoming,
            },
            pagination.into_page_request(),
        )
        .await?;
    Ok(Json(ApiResponse::ok(events)))
}

/// POST /api/events/{id}/register
pub async fn register(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<EventRegistration>>, ApiError> {
    let registration = state.event_service.register(&auth, id).await?;
    Ok(Json(ApiResponse::ok(registration)))
}

/// DELETE /api/events/{id}/register
pub async fn cancel_registration(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.event_service.cancel_registration(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Registration cancelled",
    ))))
}

/// PUT /api/events/registrations/{id}
pub async fn update_registration_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRegistrationStatusRequest>,
) -> Result<Json<ApiResponse<EventRegistration>>, ApiError> {
    let registration = state
        .event_service
        .update_registration_status(&auth, id, req.status)
        .await?;
    Ok(Json(ApiResponse::ok(registration)))
}

/// GET /api/events/{id}/registrations
pub async fn list_registrations(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<EventRegistration>>>, ApiError> {
    let page = state
        .event_service
        .list_registrations(&auth, id, pagination.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

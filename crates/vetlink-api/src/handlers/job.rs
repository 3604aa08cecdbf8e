//! Job handlers — postings, listing, application workflow.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use vetlink_core::types::pagination::PageResponse;
use vetlink_entity::job::model::{CreateJob, JobFilter};
use vetlink_entity::job::{Job, JobApplication};

use crate::dto::request::{ApplyJobRequest, CreateJobRequest, UpdateApplicationStatusRequest};
use crate::dto::response::ApiResponse;
use crate::dto::validate_request;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// Query parameters for job listing.
#[derive(Debug, Clone, Deserialize)]
pub struct JobListQuery {
    /// Keyword over title and description.
    pub q: Option<String>,
    /// Location substring.
    pub location: Option<String>,
    /// Exact employment type.
    pub employment_type: Option<String>,
    /// Restrict to a posting company.
    pub company_id: Option<Uuid>,
}

/// POST /api/jobs
pub async fn create_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateJobRequest>,
) -> Result<Json<ApiResponse<Job>>, ApiError> {
    validate_request(&req)?;

    let job = state
        .job_service
        .create_job(
            &auth,
            CreateJob {
                title: req.title,
                description: req.description,
                location: req.location,
                employment_type: req.employment_type,
                salary_range: req.salary_range,
                is_sponsored: req.is_sponsored,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(job)))
}

/// GET /api/jobs/{id}
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Job>>, ApiError> {
    let job = state.job_service.get_job(id).await?;
    Ok(Json(ApiResponse::ok(job)))
}

/// GET /api/jobs
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Job>>>, ApiError> {
    let jobs = state
        .job_service
        .list_jobs(
            JobFilter {
                keyword: query.q,
                location: query.location,
                employment_type: query.employment_type,
                company_id: query.company_id,
            },
            pagination.into_page_request(),
        )
        .await?;
    Ok(Json(ApiResponse::ok(jobs)))
}

/// POST /api/jobs/{id}/apply
pub async fn apply(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ApplyJobRequest>,
) -> Result<Json<ApiResponse<JobApplication>>, ApiError> {
    validate_request(&req)?;

    let application = state.job_service.apply(&auth, id, req.cover_letter).await?;
    Ok(Json(ApiResponse::ok(application)))
}

/// PUT /api/jobs/{id}/withdraw
pub async fn withdraw(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<JobApplication>>, ApiError> {
    let application = state.job_service.withdraw(&auth, id).await?;
    Ok(Json(ApiResponse::ok(application)))
}

/// PUT /api/jobs/applications/{id}
pub async fn update_application_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateApplicationStatusRequest>,
) -> Result<Json<ApiResponse<JobApplication>>, ApiError> {
    let application = state
        .job_service
        .update_application_status(&auth, id, req.status)
        .await?;
    Ok(Json(ApiResponse::ok(application)))
}

/// GET /api/jobs/{id}/applications
pub async fn list_applications(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<JobApplication>>>, ApiError> {
    let page = state
        .job_service
        .list_applications(&auth, id, pagination.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/jobs/applications/mine
pub async fn my_applications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<JobApplication>>>, ApiError> {
    let page = state
        .job_service
        .my_applications(&auth, pagination.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

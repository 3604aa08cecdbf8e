//! Auth handlers — register, login, refresh, me.

use axum::Json;
use axum::extract::State;

use crate::dto::request::{LoginRequest, RefreshRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, AuthResponse};
use crate::dto::validate_request;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

use vetlink_auth::jwt::TokenPair;
use vetlink_entity::user::User;
use vetlink_service::user::RegisterData;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    validate_request(&req)?;

    let (user, tokens) = state
        .user_service
        .register(RegisterData {
            email: req.email,
            password: req.password,
            profile_type: req.profile_type,
            first_name: req.first_name,
            last_name: req.last_name,
            company_name: req.company_name,
        })
        .await?;

    Ok(Json(ApiResponse::ok(AuthResponse::new(tokens, user))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    validate_request(&req)?;

    let (user, tokens) = state.user_service.login(&req.email, &req.password).await?;
    Ok(Json(ApiResponse::ok(AuthResponse::new(tokens, user))))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<TokenPair>>, ApiError> {
    let tokens = state.user_service.refresh(&req.refresh_token).await?;
    Ok(Json(ApiResponse::ok(tokens)))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state.user_service.me(&auth).await?;
    Ok(Json(ApiResponse::ok(user)))
}

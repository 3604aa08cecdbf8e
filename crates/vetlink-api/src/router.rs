//! Route definitions for the VetLink HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The
//! router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use vetlink_core::config::app::CorsConfig;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(connection_routes())
        .merge(event_routes())
        .merge(job_routes())
        .merge(post_routes())
        .merge(notification_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Auth endpoints: register, login, refresh, me.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/me", get(handlers::auth::me))
}

/// Profile and search endpoints.
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::user::search))
        .route("/users/me", put(handlers::user::update_profile))
        .route("/users/me", delete(handlers::user::deactivate))
        .route("/users/{id}", get(handlers::user::get_profile))
}

/// Connection lifecycle, listings, status, and suggestions.
fn connection_routes() -> Router<AppState> {
    Router::new()
        .route("/connections", post(handlers::connection::send_request))
        .route("/connections", get(handlers::connection::list_connections))
        .route("/connections/pending", get(handlers::connection::list_pending))
        .route("/connections/sent", get(handlers::connection::list_sent))
        .route(
            "/connections/suggestions",
            get(handlers::connection::suggestions),
        )
        .route(
            "/connections/status/{user_id}",
            get(handlers::connection::connection_status),
        )
        .route(
            "/connections/{id}/accept",
            put(handlers::connection::accept_request),
        )
        .route(
            "/connections/{id}/reject",
            put(handlers::connection::reject_request),
        )
        .route(
            "/connections/{id}/cancel",
            delete(handlers::connection::cancel_request),
        )
        .route(
            "/connections/{id}",
            delete(handlers::connection::remove_connection),
        )
}

/// Event CRUD and registration workflow.
fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/events", post(handlers::event::create_event))
        .route("/events", get(handlers::event::list_events))
        .route(
            "/events/registrations/{id}",
            put(handlers::event::update_registration_status),
        )
        .route("/events/{id}", get(handlers::event::get_event))
        .route("/events/{id}/register", post(handlers::event::register))
        .route(
            "/events/{id}/register",
            delete(handlers::event::cancel_registration),
        )
        .route(
            "/events/{id}/registrations",
            get(handlers::event::list_registrations),
        )
}

/// Job postings and application workflow.
fn job_routes() -> Router<AppState> {
    Router::new()
        .route("/jobs", post(handlers::job::create_job))
        .route("/jobs", get(handlers::job::list_jobs))
        .route(
            "/jobs/applications/mine",
            get(handlers::job::my_applications),
        )
        .route(
            "/jobs/applications/{id}",
            put(handlers::job::update_application_status),
        )
        .route("/jobs/{id}", get(handlers::job::get_job))
        .route("/jobs/{id}/apply", post(handlers::job::apply))
        .route("/jobs/{id}/withdraw", put(handlers::job::withdraw))
        .route(
            "/jobs/{id}/applications",
            get(handlers::job::list_applications),
        )
}

/// Feed posts, likes, and comments.
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", post(handlers::post::create_post))
        .route("/posts", get(handlers::post::list_posts))
        .route("/posts/{id}", get(handlers::post::get_post))
        .route("/posts/{id}/like", post(handlers::post::like_post))
        .route("/posts/{id}/comments", post(handlers::post::add_comment))
        .route("/posts/{id}/comments", get(handlers::post::list_comments))
}

/// Owner-scoped notification endpoints.
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(handlers::notification::list))
        .route(
            "/notifications/unread",
            get(handlers::notification::unread_count),
        )
        .route(
            "/notifications/read-all",
            put(handlers::notification::mark_all_read),
        )
        .route(
            "/notifications/{id}/read",
            put(handlers::notification::mark_read),
        )
        .route(
            "/notifications/{id}",
            delete(handlers::notification::delete),
        )
}

/// Liveness and detailed health probes.
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}

/// Build a CORS tower layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new();

    if config.allowed_origins.iter().any(|o| o == "*") {
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer = layer.allow_origin(origins);
    }

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    layer = layer.allow_methods(methods);

    if config.allowed_headers.iter().any(|h| h == "*") {
        layer = layer.allow_headers(Any);
    }

    layer.max_age(std::time::Duration::from_secs(config.max_age_seconds))
}

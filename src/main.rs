//! VetLink Server — veterinary professional network backend.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use vetlink_core::config::AppConfig;
use vetlink_core::error::{AppError, ErrorKind};

use vetlink_api::state::AppState;
use vetlink_auth::jwt::{JwtDecoder, JwtEncoder};
use vetlink_auth::password::PasswordHasher;
use vetlink_database::connection::DatabasePool;
use vetlink_database::repositories::connection::ConnectionRepository;
use vetlink_database::repositories::event::EventRepository;
use vetlink_database::repositories::job::JobRepository;
use vetlink_database::repositories::notification::NotificationRepository;
use vetlink_database::repositories::post::PostRepository;
use vetlink_database::repositories::user::UserRepository;
use vetlink_service::{
    ConnectionService, EventService, JobService, NotificationEmitter, NotificationService,
    PostService, UserService,
};

#[tokio::main]
async fn main() {
    let env = std::env::var("VETLINK_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing from the logging configuration.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Connect, migrate, wire dependencies, and serve until shutdown.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting VetLink v{}", env!("CARGO_PKG_VERSION"));

    let db = DatabasePool::connect(&config.database).await?;
    db.run_migrations().await?;

    // Repositories
    let user_repo = Arc::new(UserRepository::new(db.pool().clone()));
    let connection_repo = Arc::new(ConnectionRepository::new(db.pool().clone()));
    let event_repo = Arc::new(EventRepository::new(db.pool().clone()));
    let job_repo = Arc::new(JobRepository::new(db.pool().clone()));
    let post_repo = Arc::new(PostRepository::new(db.pool().clone()));
    let notification_repo = Arc::new(NotificationRepository::new(db.pool().clone()));

    // Auth primitives
    let password_hasher = Arc::new(PasswordHasher::new());
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

    // Services
    let emitter = Arc::new(NotificationEmitter::new(Arc::clone(&notification_repo)));
    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&jwt_encoder),
        Arc::clone(&jwt_decoder),
        config.auth.password_min_length,
    ));
    let connection_service = Arc::new(ConnectionService::new(
        Arc::clone(&connection_repo),
        Arc::clone(&user_repo),
        Arc::clone(&emitter),
    ));
    let event_service = Arc::new(EventService::new(Arc::clone(&event_repo)));
    let job_service = Arc::new(JobService::new(Arc::clone(&job_repo)));
    let post_service = Arc::new(PostService::new(
        Arc::clone(&post_repo),
        Arc::clone(&user_repo),
        Arc::clone(&emitter),
    ));
    let notification_service = Arc::new(NotificationService::new(Arc::clone(&notification_repo)));

    let state = AppState {
        config: Arc::new(config.clone()),
        db: db.clone(),
        jwt_decoder,
        user_service,
        connection_service,
        event_service,
        job_service,
        post_service,
        notification_service,
    };

    let router = vetlink_api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e)
    })?;

    tracing::info!("Listening on {addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

/// Resolve when SIGINT (or SIGTERM on unix) is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

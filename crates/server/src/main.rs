//! Shoplokalt server - local-marketplace web application.
//!
//! Shops register, list products, and receive orders; customers browse and
//! order from shops in their postal area.
//!
//! # Architecture
//!
//! - Axum web framework with a thin JSON surface
//! - Form validators enforcing field coercion and business rules
//! - `PostgreSQL` for shops, products, orders, and the postcode registry
//! - Fluent message bundles for localized validation errors (da/en)

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Router, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shoplokalt_server::config::{ServerConfig, StorageConfig};
use shoplokalt_server::state::AppState;
use shoplokalt_server::{db, middleware, routes};

#[tokio::main]
async fn main() {
    let mut config = ServerConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter.
    // Defaults to info level for our crate if RUST_LOG is not set.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shoplokalt_server=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Behind the load balancer the allowed-host list comes from ECS task
    // metadata; locally this is a no-op.
    config.resolve_ecs_hosts().await;

    // Initialize database connection pool
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");
    tracing::info!("Database pool created");

    // NOTE: Migrations are NOT run automatically on startup.
    // Run them explicitly via: cargo run -p shoplokalt-cli -- migrate

    let storage = config.storage.clone();
    let state = AppState::new(config, pool).expect("Failed to initialize application state");

    // Build router
    let mut app = Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes());

    // Static and media files are only served by this process in local
    // storage mode; with S3 the URLs point at the bucket.
    if let StorageConfig::Local {
        static_dir,
        media_dir,
        ..
    } = &storage
    {
        app = app
            .nest_service("/static", ServeDir::new(static_dir))
            .nest_service("/media", ServeDir::new(media_dir));
    }

    let app = app
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::allowed_hosts_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    // Start server
    let addr = state.config().socket_addr();
    tracing::info!("server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

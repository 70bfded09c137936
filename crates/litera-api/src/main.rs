//! Litera API server entry point.

use std::sync::Arc;

use litera_api::config::{self, AppConfig};
use litera_api::error::AppError;
use litera_api::routes;
use litera_api::state::AppState;
use litera_api::telemetry;
use litera_core::clock::{Clock, SystemClock};
use litera_store::pg_session_store::PgSessionStore;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Read configuration from environment.
    let config = AppConfig::from_env()?;

    let telemetry = telemetry::init(config.otlp_endpoint.as_deref())?;
    tracing::info!("Starting Litera API server");

    let catalog = config::load_catalog(config.content_path.as_deref())?;
    tracing::info!(
        posts = catalog.posts().len(),
        version_hash = catalog.version_hash(),
        "loaded prebunking catalog"
    );

    // Create database connection pool and bring the schema up to date.
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("../../migrations").run(&pool).await?;

    // Build application state.
    let clock: Arc<dyn Clock + Send + Sync> = Arc::new(SystemClock);
    let app_state = AppState::new(
        Arc::new(PgSessionStore::new(pool.clone())),
        clock,
        Arc::new(catalog),
    );

    // TODO: Replace CorsLayer::permissive() with restricted origins once the
    // frontend origin is fixed.
    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server.
    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down");
    pool.close().await;
    telemetry.shutdown();

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}

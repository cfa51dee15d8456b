//! Sentinel Telemetry
//!
//! Main entry point for the telemetry ingestion service.

use sentinel_telemetry::{
    event_log_service::EventLogService,
    heartbeat_service::HeartbeatService,
    schema,
    state::{AppConfig, AppState},
    web_api,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sentinel_telemetry=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Sentinel Telemetry v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!(
        database_url = %config.database_url,
        host = %config.host,
        port = config.port,
        "Configuration loaded"
    );

    // Create database pool
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .connect(&config.database_url)
        .await?;

    tracing::info!("Database connected");

    // Ensure tables exist
    schema::create_schema(&pool).await?;

    // Initialize components
    let state = AppState {
        pool: pool.clone(),
        config: config.clone(),
        event_log: Arc::new(EventLogService::new(pool.clone())),
        heartbeat: Arc::new(HeartbeatService::new(pool)),
    };

    // Build router with middleware
    let app = web_api::create_router(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

//! Employee Portal - employee records and signup/login backend.
//!
//! Serves a JSON API over a SQLite store: credential signup and login, plus
//! create/list/update/delete for employee detail records.

mod api;
mod config;
mod domain;
mod error;
mod logging;
mod server;
mod storage;
mod validation;

use crate::api::build_router;
use crate::config::Config;
use crate::storage::PortalRepository;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database repository.
    pub repository: PortalRepository,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    // This is optional and won't fail if .env doesn't exist
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Note: No .env file loaded ({e})");
    }

    // Initialize logging
    logging::init();

    tracing::info!("Starting Employee Portal v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration; a missing database URL ends the process here
    let config = Config::load().map_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    tracing::info!(
        host = %config.server.host,
        port = %config.server.port,
        cors_origin = %config.server.cors_origin,
        "Configuration loaded"
    );

    // Connect to database, retrying until it is reachable
    let pool = storage::connect_with_retry(&config.database).await;

    // Initialize repository and schema
    let repository = PortalRepository::new(pool);
    repository.init_schema().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to initialize database schema");
        anyhow::anyhow!("Schema initialization error: {}", e)
    })?;

    tracing::info!("Database connected and schema initialized");
    tracing::warn!("Credentials are stored and compared in plain text");

    // Build router
    let state = AppState { repository };
    let app = build_router(state, &config.server)?;

    // Start server
    let listener = server::bind_with_fallback(&config.server.host, config.server.port)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to start server");
            anyhow::anyhow!("Bind error: {}", e)
        })?;
    let addr = listener.local_addr()?;

    tracing::info!(address = %addr, "Server listening");
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

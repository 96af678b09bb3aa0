//! Accord API Server
//!
//! Main entry point for the Accord workflow service.

use std::sync::Arc;

use chrono::Utc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use accord_api::{AppState, create_router};
use accord_core::catalog::Catalog;
use accord_core::workflow::WorkflowDirectory;
use accord_shared::{AppConfig, AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "accord=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Load the catalog snapshot and seed one workflow per record.
    // The receiver reviews first, so everything starts in review.
    let catalog = load_catalog(&config.catalog.path)?;
    let directory = WorkflowDirectory::new();
    let seeded = directory.seed_from_catalog(&catalog, Utc::now());
    info!(
        records = catalog.record_count(),
        workflows = seeded,
        "Workflow directory seeded"
    );

    // Create application state
    let state = AppState {
        directory: Arc::new(directory),
        catalog: Arc::new(catalog),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Reads and parses the catalog snapshot the directory is seeded from.
fn load_catalog(path: &str) -> AppResult<Catalog> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| AppError::Catalog(format!("failed to read {path}: {e}")))?;
    Ok(Catalog::from_json(&raw)?)
}

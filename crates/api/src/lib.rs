//! HTTP API layer with Axum routes.
//!
//! This crate exposes the workflow directory to presentation
//! collaborators (counterparty dashboards, record detail views):
//! - REST API routes
//! - The acting-role request extractor
//! - Response types

pub mod extractors;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use accord_core::catalog::Catalog;
use accord_core::workflow::WorkflowDirectory;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The process-wide workflow directory.
    pub directory: Arc<WorkflowDirectory>,
    /// The catalog snapshot the directory was seeded from.
    pub catalog: Arc<Catalog>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

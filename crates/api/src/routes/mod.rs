//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod dashboard;
pub mod deliveries;
pub mod health;
pub mod workflows;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(deliveries::routes())
        .merge(workflows::routes())
        .merge(dashboard::routes())
}

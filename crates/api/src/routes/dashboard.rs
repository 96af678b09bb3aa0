//! Dashboard routes.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use serde_json::json;

use crate::AppState;
use accord_core::dashboard::DirectoryMetrics;

/// Creates the dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard/metrics", get(get_metrics))
}

/// GET `/dashboard/metrics` - Aggregate workflow metrics.
async fn get_metrics(State(state): State<AppState>) -> impl IntoResponse {
    let metrics = DirectoryMetrics::compute(&state.directory.list());
    (StatusCode::OK, Json(json!({ "metrics": metrics }))).into_response()
}

//! Delivery catalog routes.
//!
//! Read-only views joining the catalog snapshot with each record's
//! workflow state, for counterparty dashboards.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;

use crate::AppState;
use accord_core::catalog::{Delivery, TradeRecord};
use accord_shared::types::DeliveryId;

/// Creates the delivery routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/deliveries", get(list_deliveries))
}

// ============================================================================
// Response Types
// ============================================================================

/// Response for a delivery batch.
#[derive(Debug, Serialize)]
pub struct DeliveryResponse {
    /// Delivery ID.
    pub id: DeliveryId,
    /// Sending counterparty.
    pub sender: String,
    /// Receiving counterparty.
    pub receiver: String,
    /// Records in the delivery, joined with workflow state.
    pub records: Vec<RecordSummaryResponse>,
}

/// Response for one record in a delivery listing.
#[derive(Debug, Serialize)]
pub struct RecordSummaryResponse {
    /// Record ID.
    pub id: String,
    /// Record name.
    pub name: String,
    /// Record category.
    pub record_type: String,
    /// When the record was received.
    pub received_date: String,
    /// Stated total amount, if any.
    pub total_amount: Option<Decimal>,
    /// Current workflow status, if a workflow governs this record.
    pub workflow_status: Option<String>,
    /// Open dispute count on the governing workflow.
    pub open_feedback: usize,
}

fn record_summary(state: &AppState, record: &TradeRecord) -> RecordSummaryResponse {
    let workflow = state.directory.get_for_record(&record.id);
    RecordSummaryResponse {
        id: record.id.to_string(),
        name: record.name.clone(),
        record_type: record.record_type.as_str().to_string(),
        received_date: record.received_date.to_rfc3339(),
        total_amount: record.total_amount,
        workflow_status: workflow
            .as_ref()
            .map(|w| w.status.as_str().to_string()),
        open_feedback: workflow.map_or(0, |w| w.open_feedback_count()),
    }
}

fn delivery_response(state: &AppState, delivery: &Delivery) -> DeliveryResponse {
    DeliveryResponse {
        id: delivery.id.clone(),
        sender: delivery.sender.clone(),
        receiver: delivery.receiver.clone(),
        records: delivery
            .records
            .iter()
            .map(|record| record_summary(state, record))
            .collect(),
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/deliveries` - Catalog listing with workflow summaries.
async fn list_deliveries(State(state): State<AppState>) -> impl IntoResponse {
    let deliveries: Vec<DeliveryResponse> = state
        .catalog
        .deliveries
        .iter()
        .map(|delivery| delivery_response(&state, delivery))
        .collect();
    (StatusCode::OK, Json(json!({ "deliveries": deliveries }))).into_response()
}

//! Workflow routes: lookup, status transitions, and feedback.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::AppState;
use crate::extractors::ActingRole;
use accord_core::workflow::{
    Feedback, FeedbackDraft, FeedbackStatus, Workflow, WorkflowError, WorkflowStatus, turn,
};
use accord_shared::types::{FeedbackId, RecordId, WorkflowId};

/// Creates the workflow routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/workflows", get(list_workflows))
        .route("/records/{record_id}/workflow", get(get_record_workflow))
        .route("/workflows/{workflow_id}/status", post(update_status))
        .route("/workflows/{workflow_id}/feedbacks", post(add_feedback))
        .route(
            "/workflows/{workflow_id}/feedbacks/{feedback_id}/resolve",
            post(resolve_feedback),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing workflows.
#[derive(Debug, Deserialize)]
pub struct ListWorkflowsQuery {
    /// Filter by status.
    pub status: Option<String>,
}

/// Request body for a status transition.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// Target status.
    pub status: String,
}

/// Response for a workflow.
#[derive(Debug, Serialize)]
pub struct WorkflowResponse {
    /// Workflow ID.
    pub id: WorkflowId,
    /// Governed record ID.
    pub target_id: RecordId,
    /// Record category.
    pub target_type: String,
    /// Current status.
    pub status: String,
    /// The party currently holding the ball, if any.
    pub acting_party: Option<String>,
    /// When the status last changed.
    pub last_status_update: String,
    /// Open dispute count.
    pub open_feedback: usize,
    /// Full dispute ledger, in insertion order.
    pub feedbacks: Vec<FeedbackResponse>,
}

/// Response for a feedback entry.
#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    /// Feedback ID.
    pub id: FeedbackId,
    /// Disputed field or row locator.
    pub component_id: String,
    /// Logical record section.
    pub tab_name: String,
    /// Disputed sub-entity, if any.
    pub record_data_id: Option<String>,
    /// Reason the dispute was raised.
    pub reason_code: String,
    /// Free-text rationale.
    pub comment: String,
    /// Lifecycle state.
    pub status: String,
    /// The party that raised the dispute.
    pub author_role: String,
    /// Creation time.
    pub timestamp: String,
}

fn workflow_response(workflow: &Workflow) -> WorkflowResponse {
    WorkflowResponse {
        id: workflow.id,
        target_id: workflow.target_id.clone(),
        target_type: workflow.target_type.as_str().to_string(),
        status: workflow.status.as_str().to_string(),
        acting_party: turn::holder(workflow.status).map(|role| role.as_str().to_string()),
        last_status_update: workflow.last_status_update.to_rfc3339(),
        open_feedback: workflow.open_feedback_count(),
        feedbacks: workflow.feedbacks.iter().map(feedback_response).collect(),
    }
}

fn feedback_response(feedback: &Feedback) -> FeedbackResponse {
    FeedbackResponse {
        id: feedback.id,
        component_id: feedback.component_id.clone(),
        tab_name: feedback.tab_name.clone(),
        record_data_id: feedback.record_data_id.clone(),
        reason_code: feedback.reason_code.as_str().to_string(),
        comment: feedback.comment.clone(),
        status: match feedback.status {
            FeedbackStatus::Open => "open".to_string(),
            FeedbackStatus::Resolved => "resolved".to_string(),
        },
        author_role: feedback.author_role.as_str().to_string(),
        timestamp: feedback.timestamp.to_rfc3339(),
    }
}

fn workflow_error_response(err: &WorkflowError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string()
        })),
    )
        .into_response()
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/workflows` - List workflows, optionally filtered by status.
async fn list_workflows(
    State(state): State<AppState>,
    Query(query): Query<ListWorkflowsQuery>,
) -> impl IntoResponse {
    let filter = match query.status.as_deref() {
        Some(raw) => match WorkflowStatus::parse(raw) {
            Some(status) => Some(status),
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "invalid_status",
                        "message": "Unknown workflow status"
                    })),
                )
                    .into_response();
            }
        },
        None => None,
    };

    let workflows: Vec<WorkflowResponse> = state
        .directory
        .list()
        .iter()
        .filter(|workflow| filter.is_none_or(|status| workflow.status == status))
        .map(workflow_response)
        .collect();

    (StatusCode::OK, Json(json!({ "workflows": workflows }))).into_response()
}

/// GET `/records/{record_id}/workflow` - The unique workflow governing a
/// record.
async fn get_record_workflow(
    State(state): State<AppState>,
    Path(record_id): Path<String>,
) -> impl IntoResponse {
    match state.directory.get_for_record(&RecordId::new(record_id)) {
        Some(workflow) => {
            (StatusCode::OK, Json(json!({ "workflow": workflow_response(&workflow) })))
                .into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "WORKFLOW_NOT_FOUND",
                "message": "No workflow governs this record"
            })),
        )
            .into_response(),
    }
}

/// POST `/workflows/{workflow_id}/status` - Move a workflow to a target
/// status on behalf of the acting party.
async fn update_status(
    State(state): State<AppState>,
    ActingRole(role): ActingRole,
    Path(workflow_id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> impl IntoResponse {
    let Some(target) = WorkflowStatus::parse(&payload.status) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_status",
                "message": "Unknown workflow status"
            })),
        )
            .into_response();
    };

    match state
        .directory
        .update_status(WorkflowId::from_uuid(workflow_id), target, role)
    {
        Ok(workflow) => {
            info!(
                workflow_id = %workflow.id,
                status = %workflow.status,
                role = %role,
                "workflow status updated"
            );
            (StatusCode::OK, Json(json!({ "workflow": workflow_response(&workflow) })))
                .into_response()
        }
        Err(err) => workflow_error_response(&err),
    }
}

/// POST `/workflows/{workflow_id}/feedbacks` - Raise a dispute on behalf
/// of the acting party.
async fn add_feedback(
    State(state): State<AppState>,
    ActingRole(role): ActingRole,
    Path(workflow_id): Path<Uuid>,
    Json(draft): Json<FeedbackDraft>,
) -> impl IntoResponse {
    match state
        .directory
        .add_feedback(WorkflowId::from_uuid(workflow_id), draft, role)
    {
        Ok(feedback) => {
            info!(
                workflow_id = %workflow_id,
                feedback_id = %feedback.id,
                reason = %feedback.reason_code,
                "feedback added"
            );
            (
                StatusCode::CREATED,
                Json(json!({ "feedback": feedback_response(&feedback) })),
            )
                .into_response()
        }
        Err(err) => workflow_error_response(&err),
    }
}

/// POST `/workflows/{workflow_id}/feedbacks/{feedback_id}/resolve` -
/// Resolve a dispute on behalf of the acting party.
async fn resolve_feedback(
    State(state): State<AppState>,
    ActingRole(role): ActingRole,
    Path((workflow_id, feedback_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    match state.directory.resolve_feedback(
        WorkflowId::from_uuid(workflow_id),
        FeedbackId::from_uuid(feedback_id),
        role,
    ) {
        Ok(feedback) => {
            info!(
                workflow_id = %workflow_id,
                feedback_id = %feedback.id,
                "feedback resolved"
            );
            (
                StatusCode::OK,
                Json(json!({ "feedback": feedback_response(&feedback) })),
            )
                .into_response()
        }
        Err(err) => workflow_error_response(&err),
    }
}

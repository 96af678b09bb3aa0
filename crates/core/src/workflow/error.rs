//! Workflow error types for the approval lifecycle.
//!
//! All variants are local, recoverable conditions reported synchronously
//! to the caller; none are fatal to the process. Presentation layers are
//! expected to make illegal calls unreachable - these checks are the
//! defense-in-depth backstop.

use thiserror::Error;

use accord_shared::types::{FeedbackId, WorkflowId};

use crate::workflow::types::{PartyRole, WorkflowStatus};

/// Errors that can occur during workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Unknown workflow identifier.
    #[error("Workflow {0} not found")]
    WorkflowNotFound(WorkflowId),

    /// Unknown feedback identifier within the workflow's ledger.
    #[error("Feedback {0} not found")]
    FeedbackNotFound(FeedbackId),

    /// The acting party does not currently hold the ball.
    #[error("Role {role} may not act while the workflow is {status}")]
    NotAuthorized {
        /// The party that attempted the action.
        role: PartyRole,
        /// The workflow status at the time of the attempt.
        status: WorkflowStatus,
    },

    /// The target status is not reachable from the current status.
    #[error("Illegal status transition from {from} to {to}")]
    IllegalTransition {
        /// The current status.
        from: WorkflowStatus,
        /// The attempted target status.
        to: WorkflowStatus,
    },

    /// Acceptance attempted while disputes remain open.
    #[error("Cannot accept while {open} feedback entries remain open")]
    BlockedByOpenFeedback {
        /// Number of open feedback entries.
        open: usize,
    },

    /// Changes requested without any open dispute to justify them.
    #[error("Cannot request changes without open feedback")]
    NoOpenFeedback,

    /// Resolution attempted on an already-resolved feedback entry.
    #[error("Feedback {0} is already resolved")]
    AlreadyResolved(FeedbackId),

    /// A party attempted to resolve its own feedback.
    #[error("Role {0} cannot resolve its own feedback")]
    CannotResolveOwnFeedback(PartyRole),
}

impl WorkflowError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::WorkflowNotFound(_) | Self::FeedbackNotFound(_) => 404,
            Self::NotAuthorized { .. } | Self::CannotResolveOwnFeedback(_) => 403,
            Self::IllegalTransition { .. }
            | Self::BlockedByOpenFeedback { .. }
            | Self::NoOpenFeedback
            | Self::AlreadyResolved(_) => 409,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::WorkflowNotFound(_) => "WORKFLOW_NOT_FOUND",
            Self::FeedbackNotFound(_) => "FEEDBACK_NOT_FOUND",
            Self::NotAuthorized { .. } => "NOT_AUTHORIZED",
            Self::IllegalTransition { .. } => "ILLEGAL_TRANSITION",
            Self::BlockedByOpenFeedback { .. } => "BLOCKED_BY_OPEN_FEEDBACK",
            Self::NoOpenFeedback => "NO_OPEN_FEEDBACK",
            Self::AlreadyResolved(_) => "ALREADY_RESOLVED",
            Self::CannotResolveOwnFeedback(_) => "CANNOT_RESOLVE_OWN_FEEDBACK",
        }
    }
}

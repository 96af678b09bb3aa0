//! Dashboard metric types.

use serde::Serialize;

use crate::workflow::types::{PartyRole, Workflow, WorkflowStatus};
use crate::workflow::turn;

/// Workflow counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusBreakdown {
    /// Workflows being drafted by the sender.
    pub draft: usize,
    /// Workflows under review by the receiver.
    pub in_review: usize,
    /// Workflows sent back with disputes.
    pub changes_requested: usize,
    /// Workflows accepted by both sides.
    pub accepted: usize,
}

/// Aggregate view over all workflows in the directory.
///
/// Display-only: nothing here carries deadline semantics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DirectoryMetrics {
    /// Total number of workflows.
    pub total: usize,
    /// Counts by status.
    pub by_status: StatusBreakdown,
    /// Open disputes across all workflows.
    pub open_feedback: usize,
    /// Workflows currently waiting on the receiver.
    pub awaiting_receiver: usize,
    /// Workflows currently waiting on the sender
    /// (e.g. everything sent back with change requests).
    pub awaiting_sender: usize,
}

impl DirectoryMetrics {
    /// Computes metrics over a directory listing.
    #[must_use]
    pub fn compute(workflows: &[Workflow]) -> Self {
        let mut metrics = Self {
            total: workflows.len(),
            ..Self::default()
        };
        for workflow in workflows {
            match workflow.status {
                WorkflowStatus::Draft => metrics.by_status.draft += 1,
                WorkflowStatus::InReview => metrics.by_status.in_review += 1,
                WorkflowStatus::ChangesRequested => metrics.by_status.changes_requested += 1,
                WorkflowStatus::Accepted => metrics.by_status.accepted += 1,
            }
            metrics.open_feedback += workflow.open_feedback_count();
            match turn::holder(workflow.status) {
                Some(PartyRole::Receiver) => metrics.awaiting_receiver += 1,
                Some(PartyRole::Sender) => metrics.awaiting_sender += 1,
                None => {}
            }
        }
        metrics
    }

    /// How many workflows are waiting on the given party.
    #[must_use]
    pub const fn awaiting(&self, role: PartyRole) -> usize {
        match role {
            PartyRole::Receiver => self.awaiting_receiver,
            PartyRole::Sender => self.awaiting_sender,
        }
    }
}

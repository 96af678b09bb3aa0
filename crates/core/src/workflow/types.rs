//! Workflow domain types.
//!
//! This module defines the core types for tracking one record's approval
//! lifecycle between the two counterparties.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use accord_shared::types::{RecordId, WorkflowId};

use crate::catalog::RecordType;
use crate::workflow::feedback::FeedbackLedger;
use crate::workflow::turn;

/// One of the two counterparties to an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyRole {
    /// The party that received the record and reviews it.
    Receiver,
    /// The party that sent the record and amends it on request.
    Sender,
}

impl PartyRole {
    /// Returns the string representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Receiver => "receiver",
            Self::Sender => "sender",
        }
    }

    /// Parses a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "receiver" => Some(Self::Receiver),
            "sender" => Some(Self::Sender),
            _ => None,
        }
    }

    /// The opposite party.
    #[must_use]
    pub const fn counterpart(&self) -> Self {
        match self {
            Self::Receiver => Self::Sender,
            Self::Sender => Self::Receiver,
        }
    }
}

impl fmt::Display for PartyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Workflow status in the bilateral approval protocol.
///
/// The valid transitions are:
/// - Draft → InReview (sender submits for review)
/// - InReview → ChangesRequested (receiver disputes, open feedback required)
/// - InReview → Accepted (receiver accepts, no open feedback)
/// - ChangesRequested → InReview (sender resubmits)
///
/// `Accepted` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    /// The sender is still drafting amendments; not visible for review.
    Draft,
    /// The receiver is reviewing the record.
    InReview,
    /// The receiver sent the record back with disputes to address.
    ChangesRequested,
    /// Both sides agree the record is correct (terminal).
    Accepted,
}

impl WorkflowStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::InReview => "in_review",
            Self::ChangesRequested => "changes_requested",
            Self::Accepted => "accepted",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "in_review" => Some(Self::InReview),
            "changes_requested" => Some(Self::ChangesRequested),
            "accepted" => Some(Self::Accepted),
            _ => None,
        }
    }

    /// Returns true if no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Validated state transition with audit data.
///
/// Produced by [`WorkflowService`](crate::workflow::WorkflowService);
/// applied to a [`Workflow`] by the directory.
#[derive(Debug, Clone)]
pub enum WorkflowAction {
    /// Sender submits a draft for review.
    SubmitForReview {
        /// The new status after submission.
        new_status: WorkflowStatus,
        /// When the record was submitted.
        submitted_at: DateTime<Utc>,
    },
    /// Receiver sends the record back with open disputes.
    RequestChanges {
        /// The new status after the request.
        new_status: WorkflowStatus,
        /// Number of open feedback entries at request time.
        open_feedback: usize,
        /// When the changes were requested.
        requested_at: DateTime<Utc>,
    },
    /// Receiver accepts the record.
    Accept {
        /// The new status after acceptance.
        new_status: WorkflowStatus,
        /// When the record was accepted.
        accepted_at: DateTime<Utc>,
    },
    /// Sender resubmits an amended record for review.
    Resubmit {
        /// The new status after resubmission.
        new_status: WorkflowStatus,
        /// When the record was resubmitted.
        resubmitted_at: DateTime<Utc>,
    },
}

impl WorkflowAction {
    /// Returns the new status resulting from this action.
    #[must_use]
    pub fn new_status(&self) -> WorkflowStatus {
        match self {
            Self::SubmitForReview { new_status, .. }
            | Self::RequestChanges { new_status, .. }
            | Self::Accept { new_status, .. }
            | Self::Resubmit { new_status, .. } => *new_status,
        }
    }

    /// Returns when this action was validated.
    #[must_use]
    pub fn acted_at(&self) -> DateTime<Utc> {
        match self {
            Self::SubmitForReview { submitted_at, .. } => *submitted_at,
            Self::RequestChanges { requested_at, .. } => *requested_at,
            Self::Accept { accepted_at, .. } => *accepted_at,
            Self::Resubmit { resubmitted_at, .. } => *resubmitted_at,
        }
    }
}

/// The governance record tracking one business record's approval lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    /// Unique workflow identifier.
    pub id: WorkflowId,
    /// The record this workflow governs (1:1).
    pub target_id: RecordId,
    /// The record's category (informational only).
    pub target_type: RecordType,
    /// Current status.
    pub status: WorkflowStatus,
    /// Dispute ledger, in insertion order.
    pub feedbacks: FeedbackLedger,
    /// When the status last changed; stamped on transitions and only then.
    pub last_status_update: DateTime<Utc>,
}

impl Workflow {
    /// Creates the workflow for a freshly received record.
    ///
    /// New workflows start in [`WorkflowStatus::InReview`]: the receiver
    /// reviews first.
    #[must_use]
    pub fn new(target_id: RecordId, target_type: RecordType, received_at: DateTime<Utc>) -> Self {
        Self {
            id: WorkflowId::new(),
            target_id,
            target_type,
            status: WorkflowStatus::InReview,
            feedbacks: FeedbackLedger::new(),
            last_status_update: received_at,
        }
    }

    /// Number of unresolved disputes.
    #[must_use]
    pub fn open_feedback_count(&self) -> usize {
        self.feedbacks.open_count()
    }

    /// How long the current turn has lasted.
    ///
    /// Display-only derived value; nothing in the protocol enforces a
    /// deadline.
    #[must_use]
    pub fn turn_duration(&self, now: DateTime<Utc>) -> Duration {
        now - self.last_status_update
    }

    /// Whether `role` is currently barred from mutating this workflow.
    #[must_use]
    pub fn is_read_only(&self, role: PartyRole) -> bool {
        turn::is_read_only(self.status, role)
    }

    /// Applies a validated action: sets the status and stamps the
    /// transition time.
    pub fn apply(&mut self, action: &WorkflowAction) {
        self.status = action.new_status();
        self.last_status_update = action.acted_at();
    }
}

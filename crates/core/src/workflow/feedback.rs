//! Feedback entries and the per-workflow dispute ledger.
//!
//! A feedback entry pins a dispute to a specific field or row of the
//! governed record. The ledger is append-only: entries are never removed,
//! and a resolved entry never reopens, so the full dispute history stays
//! visible after acceptance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use accord_shared::types::FeedbackId;

use crate::workflow::error::WorkflowError;
use crate::workflow::types::PartyRole;

/// Why a feedback entry was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    /// Field value disagrees with the counterparty's records.
    DataMismatch,
    /// An expected attachment is missing.
    MissingFile,
    /// Goods or data quality is disputed.
    QualityIssue,
    /// A quantity is wrong.
    IncorrectQuantity,
    /// Anything else; see the comment.
    Other,
}

impl ReasonCode {
    /// Returns the string representation of the reason code.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DataMismatch => "data_mismatch",
            Self::MissingFile => "missing_file",
            Self::QualityIssue => "quality_issue",
            Self::IncorrectQuantity => "incorrect_quantity",
            Self::Other => "other",
        }
    }

    /// Parses a reason code from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "data_mismatch" => Some(Self::DataMismatch),
            "missing_file" => Some(Self::MissingFile),
            "quality_issue" => Some(Self::QualityIssue),
            "incorrect_quantity" => Some(Self::IncorrectQuantity),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle state of a feedback entry.
///
/// Transitions Open → Resolved only; never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackStatus {
    /// Dispute pending; blocks acceptance.
    Open,
    /// Dispute addressed; kept for audit history.
    Resolved,
}

impl FeedbackStatus {
    /// Returns true while the dispute is pending.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

/// A dispute raised against a specific field or row of a record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    /// Unique feedback identifier.
    pub id: FeedbackId,
    /// Opaque locator for the disputed field or row
    /// (e.g. `total_amount` or `row_li-02`).
    pub component_id: String,
    /// Logical section of the record the dispute belongs to; used for
    /// navigation, not for workflow logic.
    pub tab_name: String,
    /// Sub-entity the dispute targets (e.g. a line item ID), if any.
    pub record_data_id: Option<String>,
    /// Why the dispute was raised.
    pub reason_code: ReasonCode,
    /// Free-text rationale; may be empty.
    pub comment: String,
    /// Current lifecycle state.
    pub status: FeedbackStatus,
    /// The party that raised the dispute.
    pub author_role: PartyRole,
    /// Creation time (immutable).
    pub timestamp: DateTime<Utc>,
}

/// Caller-supplied fields for a new feedback entry.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackDraft {
    /// Locator for the disputed field or row.
    pub component_id: String,
    /// Logical section of the record.
    pub tab_name: String,
    /// Sub-entity the dispute targets, if any.
    #[serde(default)]
    pub record_data_id: Option<String>,
    /// Why the dispute is raised.
    pub reason_code: ReasonCode,
    /// Free-text rationale; may be empty.
    #[serde(default)]
    pub comment: String,
}

/// Append-only, insertion-ordered dispute ledger for one workflow.
///
/// The ledger enforces entry-local invariants (existence, monotonic
/// resolution, counterparty-only resolution). Turn ownership is checked
/// by the directory before any ledger mutation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedbackLedger(Vec<Feedback>);

impl FeedbackLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a new open entry and returns it.
    ///
    /// There is no upper bound on ledger size.
    pub fn add(
        &mut self,
        draft: FeedbackDraft,
        author_role: PartyRole,
        now: DateTime<Utc>,
    ) -> &Feedback {
        let idx = self.0.len();
        self.0.push(Feedback {
            id: FeedbackId::new(),
            component_id: draft.component_id,
            tab_name: draft.tab_name,
            record_data_id: draft.record_data_id,
            reason_code: draft.reason_code,
            comment: draft.comment,
            status: FeedbackStatus::Open,
            author_role,
            timestamp: now,
        });
        &self.0[idx]
    }

    /// Resolves the entry with the given ID in place, preserving its
    /// position and every other field.
    ///
    /// # Errors
    ///
    /// - [`WorkflowError::FeedbackNotFound`] for unknown IDs.
    /// - [`WorkflowError::AlreadyResolved`] if the entry is not open.
    /// - [`WorkflowError::CannotResolveOwnFeedback`] if `resolver` is the
    ///   entry's author; only the counterparty may resolve.
    pub fn resolve(
        &mut self,
        id: FeedbackId,
        resolver: PartyRole,
    ) -> Result<&Feedback, WorkflowError> {
        let entry = self
            .0
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(WorkflowError::FeedbackNotFound(id))?;
        if !entry.status.is_open() {
            return Err(WorkflowError::AlreadyResolved(id));
        }
        if entry.author_role == resolver {
            return Err(WorkflowError::CannotResolveOwnFeedback(resolver));
        }
        entry.status = FeedbackStatus::Resolved;
        Ok(entry)
    }

    /// Number of open entries; gates acceptance.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.0.iter().filter(|f| f.status.is_open()).count()
    }

    /// Iterates entries in insertion (chronological) order.
    pub fn iter(&self) -> std::slice::Iter<'_, Feedback> {
        self.0.iter()
    }

    /// Total number of entries, resolved included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no feedback has ever been raised.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a FeedbackLedger {
    type Item = &'a Feedback;
    type IntoIter = std::slice::Iter<'a, Feedback>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

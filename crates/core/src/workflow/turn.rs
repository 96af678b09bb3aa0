//! Turn-ownership resolver: which party "has the ball".
//!
//! Exactly one side is ever authorized to mutate a workflow, and the
//! status itself encodes which one - the status is the lock. Every
//! access-control decision in the core (and every read-only toggle in a
//! presentation layer) consults this module and nothing else.
//!
//! The matches are exhaustive on purpose: adding a status refuses to
//! compile until its owner is decided here.

use crate::workflow::types::{PartyRole, WorkflowStatus};

/// The party currently authorized to act, if any.
///
/// `None` once the workflow is accepted: the negotiation is closed and
/// neither side may act.
#[must_use]
pub const fn holder(status: WorkflowStatus) -> Option<PartyRole> {
    match status {
        WorkflowStatus::Draft | WorkflowStatus::ChangesRequested => Some(PartyRole::Sender),
        WorkflowStatus::InReview => Some(PartyRole::Receiver),
        WorkflowStatus::Accepted => None,
    }
}

/// Whether `role` currently holds the ball for a workflow in `status`.
#[must_use]
pub const fn has_ball(status: WorkflowStatus, role: PartyRole) -> bool {
    matches!(
        (holder(status), role),
        (Some(PartyRole::Receiver), PartyRole::Receiver)
            | (Some(PartyRole::Sender), PartyRole::Sender)
    )
}

/// Whether `role` is barred from acting on a workflow in `status`.
#[must_use]
pub const fn is_read_only(status: WorkflowStatus, role: PartyRole) -> bool {
    !has_ball(status, role)
}

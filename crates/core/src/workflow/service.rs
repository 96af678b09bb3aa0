//! Workflow service for status transitions.
//!
//! Implements the bilateral approval state machine. Every operation
//! checks turn ownership first, then the transition edge, then the
//! feedback gate, so callers always learn the most fundamental reason
//! an action is rejected.

use chrono::Utc;

use crate::workflow::error::WorkflowError;
use crate::workflow::turn;
use crate::workflow::types::{PartyRole, WorkflowAction, WorkflowStatus};

/// Stateless service validating workflow transitions.
///
/// All methods are associated functions returning the appropriate
/// [`WorkflowAction`] with audit data; the directory applies it to the
/// stored workflow.
pub struct WorkflowService;

impl WorkflowService {
    /// Sender submits a draft record for review (Draft → InReview).
    ///
    /// # Errors
    ///
    /// * [`WorkflowError::NotAuthorized`] if `acting` does not hold the ball
    /// * [`WorkflowError::IllegalTransition`] if not in Draft status
    pub fn submit_for_review(
        current: WorkflowStatus,
        acting: PartyRole,
    ) -> Result<WorkflowAction, WorkflowError> {
        Self::require_ball(current, acting)?;
        match current {
            WorkflowStatus::Draft => Ok(WorkflowAction::SubmitForReview {
                new_status: WorkflowStatus::InReview,
                submitted_at: Utc::now(),
            }),
            _ => Err(WorkflowError::IllegalTransition {
                from: current,
                to: WorkflowStatus::InReview,
            }),
        }
    }

    /// Receiver sends the record back with disputes
    /// (InReview → ChangesRequested).
    ///
    /// Requesting changes is only meaningful while at least one dispute
    /// is open; the open entries tell the sender what to amend.
    ///
    /// # Errors
    ///
    /// * [`WorkflowError::NotAuthorized`] if `acting` does not hold the ball
    /// * [`WorkflowError::IllegalTransition`] if not in InReview status
    /// * [`WorkflowError::NoOpenFeedback`] if no dispute is open
    pub fn request_changes(
        current: WorkflowStatus,
        acting: PartyRole,
        open_feedback: usize,
    ) -> Result<WorkflowAction, WorkflowError> {
        Self::require_ball(current, acting)?;
        match current {
            WorkflowStatus::InReview => {
                if open_feedback == 0 {
                    return Err(WorkflowError::NoOpenFeedback);
                }
                Ok(WorkflowAction::RequestChanges {
                    new_status: WorkflowStatus::ChangesRequested,
                    open_feedback,
                    requested_at: Utc::now(),
                })
            }
            _ => Err(WorkflowError::IllegalTransition {
                from: current,
                to: WorkflowStatus::ChangesRequested,
            }),
        }
    }

    /// Receiver accepts the record (InReview → Accepted, terminal).
    ///
    /// Acceptance is blocked while any dispute is unresolved, so the
    /// terminal state only ever follows from a fully reconciled record.
    /// The ledger is not cleared: resolved disputes remain as audit
    /// history.
    ///
    /// # Errors
    ///
    /// * [`WorkflowError::NotAuthorized`] if `acting` does not hold the ball
    /// * [`WorkflowError::IllegalTransition`] if not in InReview status
    /// * [`WorkflowError::BlockedByOpenFeedback`] if disputes remain open
    pub fn accept(
        current: WorkflowStatus,
        acting: PartyRole,
        open_feedback: usize,
    ) -> Result<WorkflowAction, WorkflowError> {
        Self::require_ball(current, acting)?;
        match current {
            WorkflowStatus::InReview => {
                if open_feedback > 0 {
                    return Err(WorkflowError::BlockedByOpenFeedback {
                        open: open_feedback,
                    });
                }
                Ok(WorkflowAction::Accept {
                    new_status: WorkflowStatus::Accepted,
                    accepted_at: Utc::now(),
                })
            }
            _ => Err(WorkflowError::IllegalTransition {
                from: current,
                to: WorkflowStatus::Accepted,
            }),
        }
    }

    /// Sender resubmits an amended record (ChangesRequested → InReview).
    ///
    /// # Errors
    ///
    /// * [`WorkflowError::NotAuthorized`] if `acting` does not hold the ball
    /// * [`WorkflowError::IllegalTransition`] if not in ChangesRequested status
    pub fn resubmit(
        current: WorkflowStatus,
        acting: PartyRole,
    ) -> Result<WorkflowAction, WorkflowError> {
        Self::require_ball(current, acting)?;
        match current {
            WorkflowStatus::ChangesRequested => Ok(WorkflowAction::Resubmit {
                new_status: WorkflowStatus::InReview,
                resubmitted_at: Utc::now(),
            }),
            _ => Err(WorkflowError::IllegalTransition {
                from: current,
                to: WorkflowStatus::InReview,
            }),
        }
    }

    /// Validates a transition to an arbitrary target status.
    ///
    /// This is the `update_status` surface: callers name the target and
    /// the service dispatches to the matching operation.
    ///
    /// # Errors
    ///
    /// Whatever the matching operation returns;
    /// [`WorkflowError::NotAuthorized`] or
    /// [`WorkflowError::IllegalTransition`] when no operation matches.
    pub fn transition(
        current: WorkflowStatus,
        target: WorkflowStatus,
        acting: PartyRole,
        open_feedback: usize,
    ) -> Result<WorkflowAction, WorkflowError> {
        match (current, target) {
            (WorkflowStatus::Draft, WorkflowStatus::InReview) => {
                Self::submit_for_review(current, acting)
            }
            (WorkflowStatus::ChangesRequested, WorkflowStatus::InReview) => {
                Self::resubmit(current, acting)
            }
            (WorkflowStatus::InReview, WorkflowStatus::ChangesRequested) => {
                Self::request_changes(current, acting, open_feedback)
            }
            (WorkflowStatus::InReview, WorkflowStatus::Accepted) => {
                Self::accept(current, acting, open_feedback)
            }
            _ => {
                Self::require_ball(current, acting)?;
                Err(WorkflowError::IllegalTransition {
                    from: current,
                    to: target,
                })
            }
        }
    }

    /// Check if a status transition is in the table at all, regardless
    /// of actor or feedback gates.
    ///
    /// Valid transitions:
    /// - Draft → InReview (submit for review)
    /// - InReview → ChangesRequested (request changes)
    /// - InReview → Accepted (accept)
    /// - ChangesRequested → InReview (resubmit)
    #[must_use]
    pub fn is_valid_transition(from: WorkflowStatus, to: WorkflowStatus) -> bool {
        matches!(
            (from, to),
            (WorkflowStatus::Draft, WorkflowStatus::InReview)
                | (
                    WorkflowStatus::InReview,
                    WorkflowStatus::ChangesRequested | WorkflowStatus::Accepted
                )
                | (WorkflowStatus::ChangesRequested, WorkflowStatus::InReview)
        )
    }

    fn require_ball(current: WorkflowStatus, acting: PartyRole) -> Result<(), WorkflowError> {
        if turn::has_ball(current, acting) {
            Ok(())
        } else {
            Err(WorkflowError::NotAuthorized {
                role: acting,
                status: current,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_from_draft() {
        let result = WorkflowService::submit_for_review(WorkflowStatus::Draft, PartyRole::Sender);
        assert!(result.is_ok());
        assert_eq!(result.unwrap().new_status(), WorkflowStatus::InReview);
    }

    #[test]
    fn test_submit_by_receiver_fails() {
        let result = WorkflowService::submit_for_review(WorkflowStatus::Draft, PartyRole::Receiver);
        assert!(matches!(result, Err(WorkflowError::NotAuthorized { .. })));
    }

    #[test]
    fn test_request_changes_with_open_feedback() {
        let result =
            WorkflowService::request_changes(WorkflowStatus::InReview, PartyRole::Receiver, 2);
        assert!(result.is_ok());
        let action = result.unwrap();
        assert_eq!(action.new_status(), WorkflowStatus::ChangesRequested);
        if let WorkflowAction::RequestChanges { open_feedback, .. } = action {
            assert_eq!(open_feedback, 2);
        } else {
            panic!("expected RequestChanges action");
        }
    }

    #[test]
    fn test_request_changes_without_feedback_fails() {
        let result =
            WorkflowService::request_changes(WorkflowStatus::InReview, PartyRole::Receiver, 0);
        assert!(matches!(result, Err(WorkflowError::NoOpenFeedback)));
    }

    #[test]
    fn test_accept_with_no_open_feedback() {
        let result = WorkflowService::accept(WorkflowStatus::InReview, PartyRole::Receiver, 0);
        assert!(result.is_ok());
        assert_eq!(result.unwrap().new_status(), WorkflowStatus::Accepted);
    }

    #[test]
    fn test_accept_blocked_by_open_feedback() {
        let result = WorkflowService::accept(WorkflowStatus::InReview, PartyRole::Receiver, 1);
        assert!(matches!(
            result,
            Err(WorkflowError::BlockedByOpenFeedback { open: 1 })
        ));
    }

    #[test]
    fn test_accept_by_sender_fails_not_authorized() {
        // The sender never holds the ball in review, so the failure is an
        // authorization failure rather than a transition failure.
        let result = WorkflowService::accept(WorkflowStatus::InReview, PartyRole::Sender, 0);
        assert!(matches!(
            result,
            Err(WorkflowError::NotAuthorized {
                role: PartyRole::Sender,
                status: WorkflowStatus::InReview,
            })
        ));
    }

    #[test]
    fn test_resubmit_from_changes_requested() {
        let result = WorkflowService::resubmit(WorkflowStatus::ChangesRequested, PartyRole::Sender);
        assert!(result.is_ok());
        assert_eq!(result.unwrap().new_status(), WorkflowStatus::InReview);
    }

    #[test]
    fn test_nothing_moves_out_of_accepted() {
        for target in [
            WorkflowStatus::Draft,
            WorkflowStatus::InReview,
            WorkflowStatus::ChangesRequested,
        ] {
            for role in [PartyRole::Receiver, PartyRole::Sender] {
                let result =
                    WorkflowService::transition(WorkflowStatus::Accepted, target, role, 0);
                assert!(matches!(result, Err(WorkflowError::NotAuthorized { .. })));
            }
        }
    }

    #[test]
    fn test_transition_dispatches_by_target() {
        let action =
            WorkflowService::transition(WorkflowStatus::Draft, WorkflowStatus::InReview, PartyRole::Sender, 0)
                .unwrap();
        assert!(matches!(action, WorkflowAction::SubmitForReview { .. }));

        let action = WorkflowService::transition(
            WorkflowStatus::ChangesRequested,
            WorkflowStatus::InReview,
            PartyRole::Sender,
            1,
        )
        .unwrap();
        assert!(matches!(action, WorkflowAction::Resubmit { .. }));
    }

    #[test]
    fn test_transition_off_table_with_ball_is_illegal() {
        // The receiver holds the ball in review, but review → draft is
        // not an edge.
        let result = WorkflowService::transition(
            WorkflowStatus::InReview,
            WorkflowStatus::Draft,
            PartyRole::Receiver,
            0,
        );
        assert!(matches!(
            result,
            Err(WorkflowError::IllegalTransition {
                from: WorkflowStatus::InReview,
                to: WorkflowStatus::Draft,
            })
        ));
    }

    #[test]
    fn test_is_valid_transition_table() {
        assert!(WorkflowService::is_valid_transition(
            WorkflowStatus::Draft,
            WorkflowStatus::InReview
        ));
        assert!(WorkflowService::is_valid_transition(
            WorkflowStatus::InReview,
            WorkflowStatus::ChangesRequested
        ));
        assert!(WorkflowService::is_valid_transition(
            WorkflowStatus::InReview,
            WorkflowStatus::Accepted
        ));
        assert!(WorkflowService::is_valid_transition(
            WorkflowStatus::ChangesRequested,
            WorkflowStatus::InReview
        ));

        assert!(!WorkflowService::is_valid_transition(
            WorkflowStatus::Draft,
            WorkflowStatus::Accepted
        ));
        assert!(!WorkflowService::is_valid_transition(
            WorkflowStatus::ChangesRequested,
            WorkflowStatus::Accepted
        ));
        assert!(!WorkflowService::is_valid_transition(
            WorkflowStatus::Accepted,
            WorkflowStatus::InReview
        ));
    }
}

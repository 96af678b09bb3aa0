//! Property-based tests for WorkflowService and the turn resolver.
//!
//! These validate the governance properties over randomized inputs:
//! ball exclusivity, authorization-before-edge ordering, and the
//! acceptance gate.

use proptest::prelude::*;

use crate::workflow::error::WorkflowError;
use crate::workflow::service::WorkflowService;
use crate::workflow::turn;
use crate::workflow::types::{PartyRole, WorkflowStatus};

/// Strategy for generating random WorkflowStatus values.
fn arb_status() -> impl Strategy<Value = WorkflowStatus> {
    prop_oneof![
        Just(WorkflowStatus::Draft),
        Just(WorkflowStatus::InReview),
        Just(WorkflowStatus::ChangesRequested),
        Just(WorkflowStatus::Accepted),
    ]
}

/// Strategy for generating random PartyRole values.
fn arb_role() -> impl Strategy<Value = PartyRole> {
    prop_oneof![Just(PartyRole::Receiver), Just(PartyRole::Sender)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Nobody ever holds the ball on an accepted workflow.
    #[test]
    fn prop_accepted_grants_no_ball(role in arb_role()) {
        prop_assert!(!turn::has_ball(WorkflowStatus::Accepted, role));
        prop_assert!(turn::is_read_only(WorkflowStatus::Accepted, role));
    }

    /// The receiver's ball exists exactly while the workflow is in review.
    #[test]
    fn prop_receiver_ball_only_in_review(status in arb_status()) {
        prop_assert_eq!(
            turn::has_ball(status, PartyRole::Receiver),
            status == WorkflowStatus::InReview
        );
    }

    /// The sender's ball exists exactly while drafting or amending.
    #[test]
    fn prop_sender_ball_only_while_amending(status in arb_status()) {
        prop_assert_eq!(
            turn::has_ball(status, PartyRole::Sender),
            matches!(status, WorkflowStatus::Draft | WorkflowStatus::ChangesRequested)
        );
    }

    /// The two roles never hold the ball simultaneously.
    #[test]
    fn prop_ball_is_exclusive(status in arb_status()) {
        prop_assert!(
            !(turn::has_ball(status, PartyRole::Receiver)
                && turn::has_ball(status, PartyRole::Sender))
        );
    }

    /// A caller without the ball is always rejected as unauthorized,
    /// whatever the target.
    #[test]
    fn prop_transition_without_ball_is_unauthorized(
        current in arb_status(),
        target in arb_status(),
        role in arb_role(),
        open in 0usize..5,
    ) {
        prop_assume!(!turn::has_ball(current, role));
        let result = WorkflowService::transition(current, target, role, open);
        prop_assert!(
            matches!(result, Err(WorkflowError::NotAuthorized { .. })),
            "expected NotAuthorized, got {result:?}"
        );
    }

    /// A caller with the ball attempting an off-table move is rejected
    /// as an illegal transition, never as unauthorized.
    #[test]
    fn prop_off_table_with_ball_is_illegal(
        current in arb_status(),
        target in arb_status(),
        role in arb_role(),
        open in 0usize..5,
    ) {
        prop_assume!(turn::has_ball(current, role));
        prop_assume!(!WorkflowService::is_valid_transition(current, target));
        let result = WorkflowService::transition(current, target, role, open);
        prop_assert!(
            matches!(result, Err(WorkflowError::IllegalTransition { .. })),
            "expected IllegalTransition, got {result:?}"
        );
    }

    /// Acceptance is impossible while any dispute remains open.
    #[test]
    fn prop_accept_blocked_by_open_feedback(open in 1usize..10) {
        let result = WorkflowService::accept(WorkflowStatus::InReview, PartyRole::Receiver, open);
        prop_assert!(
            matches!(result, Err(WorkflowError::BlockedByOpenFeedback { .. })),
            "expected BlockedByOpenFeedback, got {result:?}"
        );
    }

    /// Requesting changes is impossible without an open dispute.
    #[test]
    fn prop_request_changes_needs_open_feedback(role in arb_role()) {
        let result = WorkflowService::request_changes(WorkflowStatus::InReview, role, 0);
        prop_assert!(result.is_err());
    }

    /// Every successful transition lands exactly on the requested target.
    #[test]
    fn prop_success_lands_on_target(
        current in arb_status(),
        target in arb_status(),
        role in arb_role(),
        open in 0usize..5,
    ) {
        if let Ok(action) = WorkflowService::transition(current, target, role, open) {
            prop_assert_eq!(action.new_status(), target);
            prop_assert!(WorkflowService::is_valid_transition(current, target));
            prop_assert!(turn::has_ball(current, role));
        }
    }
}

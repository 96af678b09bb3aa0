//! Property-based tests for the feedback ledger.
//!
//! Random operation sequences must preserve the ledger invariants:
//! append-only growth, monotonic resolution, and an open count that
//! matches the entries.

use chrono::Utc;
use proptest::prelude::*;

use accord_shared::types::FeedbackId;

use crate::workflow::feedback::{FeedbackDraft, FeedbackLedger, FeedbackStatus, ReasonCode};
use crate::workflow::types::PartyRole;

/// One randomized ledger operation.
#[derive(Debug, Clone)]
enum LedgerOp {
    /// Append a new entry authored by the given role.
    Add(PartyRole),
    /// Resolve the entry at `index % len` (if any) as the given role.
    Resolve(usize, PartyRole),
    /// Resolve an ID that was never issued.
    ResolveUnknown(PartyRole),
}

fn arb_role() -> impl Strategy<Value = PartyRole> {
    prop_oneof![Just(PartyRole::Receiver), Just(PartyRole::Sender)]
}

fn arb_reason() -> impl Strategy<Value = ReasonCode> {
    prop_oneof![
        Just(ReasonCode::DataMismatch),
        Just(ReasonCode::MissingFile),
        Just(ReasonCode::QualityIssue),
        Just(ReasonCode::IncorrectQuantity),
        Just(ReasonCode::Other),
    ]
}

fn arb_op() -> impl Strategy<Value = LedgerOp> {
    prop_oneof![
        arb_role().prop_map(LedgerOp::Add),
        (any::<usize>(), arb_role()).prop_map(|(i, r)| LedgerOp::Resolve(i, r)),
        arb_role().prop_map(LedgerOp::ResolveUnknown),
    ]
}

fn draft(reason: ReasonCode) -> FeedbackDraft {
    FeedbackDraft {
        component_id: "row_li-01".to_string(),
        tab_name: "line_items".to_string(),
        record_data_id: None,
        reason_code: reason,
        comment: String::new(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Under any operation sequence the ledger only grows, resolved
    /// entries stay resolved, and the open count stays consistent.
    #[test]
    fn prop_ledger_invariants_hold(
        ops in prop::collection::vec(arb_op(), 1..40),
        reason in arb_reason(),
    ) {
        let mut ledger = FeedbackLedger::new();
        let mut issued: Vec<FeedbackId> = Vec::new();
        let mut resolved: Vec<FeedbackId> = Vec::new();

        for op in ops {
            let len_before = ledger.len();
            match op {
                LedgerOp::Add(author) => {
                    let id = ledger.add(draft(reason), author, Utc::now()).id;
                    issued.push(id);
                }
                LedgerOp::Resolve(index, resolver) => {
                    if issued.is_empty() {
                        continue;
                    }
                    let id = issued[index % issued.len()];
                    if ledger.resolve(id, resolver).is_ok() {
                        resolved.push(id);
                    }
                }
                LedgerOp::ResolveUnknown(resolver) => {
                    prop_assert!(ledger.resolve(FeedbackId::new(), resolver).is_err());
                }
            }

            // Append-only: the ledger never shrinks.
            prop_assert!(ledger.len() >= len_before);

            // Monotonic: everything resolved so far is still resolved.
            for id in &resolved {
                let entry = ledger.iter().find(|f| &f.id == id);
                prop_assert!(entry.is_some_and(|f| f.status == FeedbackStatus::Resolved));
            }

            // Open count matches the entries.
            let open = ledger
                .iter()
                .filter(|f| f.status == FeedbackStatus::Open)
                .count();
            prop_assert_eq!(ledger.open_count(), open);
            prop_assert_eq!(ledger.len(), issued.len());
        }
    }

    /// A resolved entry can never be resolved again, by either role.
    #[test]
    fn prop_resolution_is_final(author in arb_role(), reason in arb_reason()) {
        let mut ledger = FeedbackLedger::new();
        let id = ledger.add(draft(reason), author, Utc::now()).id;
        prop_assert!(ledger.resolve(id, author.counterpart()).is_ok());
        prop_assert!(ledger.resolve(id, author).is_err());
        prop_assert!(ledger.resolve(id, author.counterpart()).is_err());
        prop_assert_eq!(ledger.open_count(), 0);
    }

    /// The author can never resolve its own entry while it is open.
    #[test]
    fn prop_author_never_resolves_own_entry(author in arb_role(), reason in arb_reason()) {
        let mut ledger = FeedbackLedger::new();
        let id = ledger.add(draft(reason), author, Utc::now()).id;
        prop_assert!(ledger.resolve(id, author).is_err());
        prop_assert_eq!(ledger.open_count(), 1);
    }
}

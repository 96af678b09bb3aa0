//! Process-wide workflow registry and mutation surface.
//!
//! The directory owns every workflow in the process and is the only
//! mutation entry point reachable from outside the crate. It is an
//! explicitly owned object handed to callers by reference (or `Arc`),
//! never an ambient singleton.
//!
//! Mutations targeting the same workflow serialize on that workflow's
//! map entry lock; mutations targeting different workflows proceed in
//! parallel. Readers observe the latest committed state.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use accord_shared::types::{FeedbackId, RecordId, WorkflowId};

use crate::catalog::{Catalog, RecordType};
use crate::workflow::error::WorkflowError;
use crate::workflow::feedback::{Feedback, FeedbackDraft};
use crate::workflow::service::WorkflowService;
use crate::workflow::turn;
use crate::workflow::types::{PartyRole, Workflow, WorkflowStatus};

/// Registry of all approval workflows in the process.
#[derive(Debug, Default)]
pub struct WorkflowDirectory {
    workflows: DashMap<WorkflowId, Workflow>,
    by_record: DashMap<RecordId, WorkflowId>,
}

impl WorkflowDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds one workflow per catalog record and returns how many were
    /// created.
    ///
    /// Every new workflow starts in review with an empty feedback
    /// ledger. Records that already have a workflow are skipped, so a
    /// record never governs more than one workflow.
    pub fn seed_from_catalog(&self, catalog: &Catalog, seeded_at: DateTime<Utc>) -> usize {
        catalog
            .records()
            .filter(|record| {
                self.seed_record(record.id.clone(), record.record_type, seeded_at)
                    .is_some()
            })
            .count()
    }

    /// Seeds a workflow for a single record.
    ///
    /// Returns the new workflow's ID, or `None` if the record already
    /// has one.
    pub fn seed_record(
        &self,
        target_id: RecordId,
        target_type: RecordType,
        seeded_at: DateTime<Utc>,
    ) -> Option<WorkflowId> {
        match self.by_record.entry(target_id.clone()) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                let workflow = Workflow::new(target_id, target_type, seeded_at);
                let id = workflow.id;
                self.workflows.insert(id, workflow);
                slot.insert(id);
                Some(id)
            }
        }
    }

    /// Looks up a workflow by its own ID.
    #[must_use]
    pub fn get(&self, id: WorkflowId) -> Option<Workflow> {
        self.workflows.get(&id).map(|w| w.value().clone())
    }

    /// Looks up the unique workflow governing a record.
    ///
    /// Absent records are a `None`, never a fault.
    #[must_use]
    pub fn get_for_record(&self, record_id: &RecordId) -> Option<Workflow> {
        let id = *self.by_record.get(record_id)?.value();
        self.get(id)
    }

    /// All workflows, ordered by target record ID for deterministic
    /// aggregate views.
    #[must_use]
    pub fn list(&self) -> Vec<Workflow> {
        let mut workflows: Vec<Workflow> = self
            .workflows
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        workflows.sort_by(|a, b| a.target_id.cmp(&b.target_id));
        workflows
    }

    /// Number of workflows in the directory.
    #[must_use]
    pub fn len(&self) -> usize {
        self.workflows.len()
    }

    /// Returns true if nothing has been seeded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.workflows.is_empty()
    }

    /// Number of open feedback entries on a workflow.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::WorkflowNotFound`] for unknown IDs.
    pub fn open_feedback_count(&self, id: WorkflowId) -> Result<usize, WorkflowError> {
        self.workflows
            .get(&id)
            .map(|w| w.feedbacks.open_count())
            .ok_or(WorkflowError::WorkflowNotFound(id))
    }

    /// Moves a workflow to `target` on behalf of `acting`.
    ///
    /// Validates turn ownership, the transition edge, and the feedback
    /// gate against the live open count, then applies the change and
    /// stamps the transition time. Returns the updated workflow.
    ///
    /// # Errors
    ///
    /// * [`WorkflowError::WorkflowNotFound`] for unknown IDs
    /// * whatever [`WorkflowService::transition`] rejects
    pub fn update_status(
        &self,
        id: WorkflowId,
        target: WorkflowStatus,
        acting: PartyRole,
    ) -> Result<Workflow, WorkflowError> {
        let mut entry = self
            .workflows
            .get_mut(&id)
            .ok_or(WorkflowError::WorkflowNotFound(id))?;
        let action = WorkflowService::transition(
            entry.status,
            target,
            acting,
            entry.feedbacks.open_count(),
        )?;
        entry.apply(&action);
        Ok(entry.value().clone())
    }

    /// Raises feedback on a workflow on behalf of `author`.
    ///
    /// The author must currently hold the ball: disputes are raised by
    /// the party whose turn it is to examine the record.
    ///
    /// # Errors
    ///
    /// * [`WorkflowError::WorkflowNotFound`] for unknown IDs
    /// * [`WorkflowError::NotAuthorized`] if `author` does not hold the ball
    pub fn add_feedback(
        &self,
        id: WorkflowId,
        draft: FeedbackDraft,
        author: PartyRole,
    ) -> Result<Feedback, WorkflowError> {
        let mut entry = self
            .workflows
            .get_mut(&id)
            .ok_or(WorkflowError::WorkflowNotFound(id))?;
        if !turn::has_ball(entry.status, author) {
            return Err(WorkflowError::NotAuthorized {
                role: author,
                status: entry.status,
            });
        }
        Ok(entry.feedbacks.add(draft, author, Utc::now()).clone())
    }

    /// Resolves a feedback entry on behalf of `resolver`.
    ///
    /// The resolver must currently hold the ball, and the ledger
    /// additionally requires the entry to be open and the resolver to be
    /// the author's counterparty.
    ///
    /// # Errors
    ///
    /// * [`WorkflowError::WorkflowNotFound`] for unknown IDs
    /// * [`WorkflowError::NotAuthorized`] if `resolver` does not hold the ball
    /// * whatever [`crate::workflow::FeedbackLedger::resolve`] rejects
    pub fn resolve_feedback(
        &self,
        id: WorkflowId,
        feedback_id: FeedbackId,
        resolver: PartyRole,
    ) -> Result<Feedback, WorkflowError> {
        let mut entry = self
            .workflows
            .get_mut(&id)
            .ok_or(WorkflowError::WorkflowNotFound(id))?;
        if !turn::has_ball(entry.status, resolver) {
            return Err(WorkflowError::NotAuthorized {
                role: resolver,
                status: entry.status,
            });
        }
        entry
            .feedbacks
            .resolve(feedback_id, resolver)
            .map(Clone::clone)
    }
}

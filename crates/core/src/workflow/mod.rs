//! Bilateral approval workflow for exchanged records.
//!
//! This module implements the governance core: the workflow status state
//! machine, the turn-ownership rule deciding which counterparty may act,
//! the feedback (dispute) ledger that gates acceptance, and the
//! process-wide workflow directory.
//!
//! # Modules
//!
//! - `types` - Workflow domain types (WorkflowStatus, PartyRole, Workflow)
//! - `error` - Workflow-specific error types
//! - `turn` - Turn-ownership resolver ("who has the ball")
//! - `feedback` - Feedback entries and the per-workflow ledger
//! - `service` - State transition logic
//! - `directory` - Process-wide workflow registry and mutation surface

pub mod directory;
pub mod error;
pub mod feedback;
pub mod service;
pub mod turn;
pub mod types;

#[cfg(test)]
mod feedback_props;
#[cfg(test)]
mod service_props;

pub use directory::WorkflowDirectory;
pub use error::WorkflowError;
pub use feedback::{Feedback, FeedbackDraft, FeedbackLedger, FeedbackStatus, ReasonCode};
pub use service::WorkflowService;
pub use turn::{has_ball, holder, is_read_only};
pub use types::{PartyRole, Workflow, WorkflowAction, WorkflowStatus};

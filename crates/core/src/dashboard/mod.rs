//! Aggregate metrics over the workflow directory.
//!
//! Presentation dashboards render these to alert each counterparty to
//! the workflows waiting on them.

pub mod types;

pub use types::{DirectoryMetrics, StatusBreakdown};

//! Core governance logic for Accord.
//!
//! This crate contains pure business logic with ZERO web dependencies.
//! It tracks bilateral approval of exchanged business records between a
//! Sender and a Receiver until both sides agree the record is correct.
//!
//! # Modules
//!
//! - `catalog` - Exchanged record catalog consumed at seed time
//! - `workflow` - Approval workflow: status machine, turn ownership,
//!   feedback ledger, and the process-wide workflow directory
//! - `dashboard` - Aggregate metrics over the workflow directory

pub mod catalog;
pub mod dashboard;
pub mod workflow;

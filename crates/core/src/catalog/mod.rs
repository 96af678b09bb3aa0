//! Exchanged record catalog.
//!
//! Catalog storage and retrieval belong to the exchange collaborator;
//! Accord consumes a deserialized snapshot once, at startup, to seed one
//! approval workflow per record.

pub mod types;

pub use types::{
    Assignee, AttachedDocument, Catalog, Delivery, LineItem, Product, RecordType, TradeRecord,
};

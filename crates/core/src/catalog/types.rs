//! Catalog domain types.
//!
//! These mirror what the exchange sends: deliveries batching business
//! records (purchase orders, deliveries, shipment notices), each with
//! its documents, line items, and assignees. Monetary amounts use
//! decimal precision throughout.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use accord_shared::types::{DeliveryId, RecordId};

/// Category of an exchanged business record.
///
/// Informational only: the approval workflow treats every record type
/// the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    /// A purchase order or invoice.
    PurchaseOrder,
    /// A delivery document (bill of lading, packing slip).
    Delivery,
    /// A supply chain notice (advance ship notice).
    SupplyChain,
}

impl RecordType {
    /// Returns the string representation of the record type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PurchaseOrder => "purchase_order",
            Self::Delivery => "delivery",
            Self::SupplyChain => "supply_chain",
        }
    }

    /// Parses a record type from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "purchase_order" => Some(Self::PurchaseOrder),
            "delivery" => Some(Self::Delivery),
            "supply_chain" => Some(Self::SupplyChain),
            _ => None,
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A document attached to a record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachedDocument {
    /// Document identifier.
    pub id: String,
    /// File name.
    pub name: String,
}

/// A priced line item on a purchase order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// Line item identifier within the record.
    pub id: String,
    /// Item description.
    pub description: String,
    /// Ordered quantity.
    pub quantity: u32,
    /// Unit price with decimal precision.
    pub unit_price: Decimal,
}

impl LineItem {
    /// Extended amount for this line (quantity x unit price).
    #[must_use]
    pub fn amount(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

/// A shipped product on a delivery record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier within the record.
    pub id: String,
    /// Product name.
    pub name: String,
    /// Shipped quantity.
    pub quantity: u32,
}

/// A person assigned to review a record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignee {
    /// Assignee identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// One exchanged business record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Record identifier assigned by the exchange.
    pub id: RecordId,
    /// Human-readable record name (e.g. "Purchase Order PO-2025-0761").
    pub name: String,
    /// Record category.
    pub record_type: RecordType,
    /// When the record was received from the counterparty.
    pub received_date: DateTime<Utc>,
    /// Order date, for purchase orders.
    #[serde(default)]
    pub order_date: Option<DateTime<Utc>>,
    /// Current location, for deliveries in transit.
    #[serde(default)]
    pub location: Option<String>,
    /// Stated total amount, when the record carries one.
    #[serde(default)]
    pub total_amount: Option<Decimal>,
    /// Attached documents.
    #[serde(default)]
    pub documents: Vec<AttachedDocument>,
    /// Priced line items, for purchase orders.
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    /// Shipped products, for deliveries.
    #[serde(default)]
    pub products: Vec<Product>,
    /// People assigned to the record.
    #[serde(default)]
    pub assignees: Vec<Assignee>,
}

impl TradeRecord {
    /// Sum of line item amounts.
    ///
    /// Zero when the record has no line items; compare against
    /// [`total_amount`](Self::total_amount) to surface mismatches.
    #[must_use]
    pub fn line_items_total(&self) -> Decimal {
        self.line_items.iter().map(LineItem::amount).sum()
    }
}

/// A delivery batch: records sent from one counterparty to the other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Delivery {
    /// Delivery identifier assigned by the exchange.
    pub id: DeliveryId,
    /// Sending counterparty name.
    pub sender: String,
    /// Receiving counterparty name.
    pub receiver: String,
    /// Records contained in this delivery.
    pub records: Vec<TradeRecord>,
}

/// The catalog snapshot consumed at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// All deliveries known to the exchange.
    pub deliveries: Vec<Delivery>,
}

impl Catalog {
    /// Parses a catalog snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns a deserialization error for malformed snapshots.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Iterates over every record across all deliveries.
    pub fn records(&self) -> impl Iterator<Item = &TradeRecord> {
        self.deliveries.iter().flat_map(|d| d.records.iter())
    }

    /// Total number of records across all deliveries.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.deliveries.iter().map(|d| d.records.len()).sum()
    }

    /// Finds a record by its exchange-assigned identifier.
    #[must_use]
    pub fn find_record(&self, id: &RecordId) -> Option<&TradeRecord> {
        self.records().find(|r| &r.id == id)
    }
}

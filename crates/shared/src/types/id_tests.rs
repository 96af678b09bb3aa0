use super::*;
use std::str::FromStr;
use uuid::Uuid;

#[test]
fn test_typed_id_creation() {
    let id = WorkflowId::new();
    assert!(!id.to_string().is_empty());
}

#[test]
fn test_typed_id_from_uuid() {
    let uuid = Uuid::new_v4();
    let id = WorkflowId::from_uuid(uuid);
    assert_eq!(id.into_inner(), uuid);
}

#[test]
fn test_typed_id_default() {
    let id = FeedbackId::default();
    assert!(!id.to_string().is_empty());
}

#[test]
fn test_typed_id_display() {
    let uuid = Uuid::new_v4();
    let id = FeedbackId::from_uuid(uuid);
    assert_eq!(format!("{}", id), uuid.to_string());
}

#[test]
fn test_typed_id_from_str() {
    let uuid = Uuid::new_v4();
    let id = WorkflowId::from_str(&uuid.to_string()).unwrap();
    assert_eq!(id.into_inner(), uuid);
    assert!(WorkflowId::from_str("not-a-uuid").is_err());
}

#[test]
fn test_typed_id_ordering_is_time_ordered() {
    // UUID v7 sorts by creation time.
    let first = WorkflowId::new();
    let second = WorkflowId::new();
    assert!(first.into_inner() <= second.into_inner());
}

#[test]
fn test_external_id_roundtrip() {
    let id = RecordId::new("2QZQV7FNGL");
    assert_eq!(id.as_str(), "2QZQV7FNGL");
    assert_eq!(format!("{}", id), "2QZQV7FNGL");
}

#[test]
fn test_external_id_from_conversions() {
    let a: RecordId = "DDS-001".into();
    let b: RecordId = String::from("DDS-001").into();
    assert_eq!(a, b);
}

#[test]
fn test_external_id_serde_transparent() {
    let id = DeliveryId::new("DDS-002");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"DDS-002\"");
    let back: DeliveryId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}

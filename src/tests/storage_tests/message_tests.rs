// Message Tests - Testing Message, MessageStatus and MessageCategory

use crate::storage::{Message, MessageCategory, MessageDraft, MessageStatus};
use chrono::{TimeZone, Utc};

fn sample_message() -> Message {
    Message::from_draft(
        MessageDraft {
            property_id: "p1".to_string(),
            property_title: "Loft".to_string(),
            subject: "Hi".to_string(),
            body: "Is this available?".to_string(),
            sender: "Jo".to_string(),
            category: MessageCategory::Viewing,
        },
        "msg_1700000000000_abc123xyz".to_string(),
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
    )
}

#[test]
fn test_from_draft_starts_unread() {
    let msg = sample_message();

    assert_eq!(msg.status, MessageStatus::Unread);
    assert!(msg.is_unread());
    assert_eq!(msg.category, MessageCategory::Viewing);
    assert_eq!(msg.display_date(), "2024-03-01");
}

#[test]
fn test_status_toggle_and_names() {
    assert_eq!(MessageStatus::Unread.toggled(), MessageStatus::Read);
    assert_eq!(MessageStatus::Read.toggled(), MessageStatus::Unread);
    assert_eq!(MessageStatus::default(), MessageStatus::Unread);

    assert_eq!("read".parse::<MessageStatus>().unwrap(), MessageStatus::Read);
    assert_eq!(MessageStatus::Unread.to_string(), "unread");
    assert!("archived".parse::<MessageStatus>().is_err());
}

#[test]
fn test_category_names() {
    for category in MessageCategory::all() {
        assert_eq!(category.as_str().parse::<MessageCategory>().unwrap(), category);
    }
    assert!("complaint".parse::<MessageCategory>().is_err());
}

#[test]
fn test_message_json_shape() {
    let msg = sample_message();
    let value = serde_json::to_value(&msg).expect("Failed to serialize message");

    assert_eq!(value["id"], "msg_1700000000000_abc123xyz");
    assert_eq!(value["propertyId"], "p1");
    assert_eq!(value["propertyTitle"], "Loft");
    assert_eq!(value["body"], "Is this available?");
    assert_eq!(value["status"], "unread");
    assert_eq!(value["category"], "viewing");
    assert_eq!(value["timestamp"], "2024-03-01T12:30:00Z");
}

#[test]
fn test_legacy_field_names_accepted() {
    let json = r#"{
        "id": "msg_1_a",
        "propertyId": "p9",
        "propertyTitle": "Cottage",
        "subject": "Viewing",
        "message": "Can I come Saturday?",
        "sender": "Sam",
        "timestamp": "2024-01-05T09:00:00.000Z",
        "status": "read",
        "type": "offer"
    }"#;

    let msg: Message = serde_json::from_str(json).expect("Failed to parse legacy message");

    assert_eq!(msg.body, "Can I come Saturday?");
    assert_eq!(msg.category, MessageCategory::Offer);
    assert_eq!(msg.status, MessageStatus::Read);
}

#[test]
fn test_current_field_names_win_over_legacy() {
    let json = r#"{
        "id": "msg_1_c",
        "propertyId": "p9",
        "propertyTitle": "Cottage",
        "subject": "Viewing",
        "body": "Saturday at ten?",
        "message": "Can I come Saturday?",
        "sender": "Sam",
        "timestamp": "2024-01-05T09:00:00.000Z",
        "category": "viewing",
        "type": "offer"
    }"#;

    let msg: Message = serde_json::from_str(json).expect("Failed to parse mixed message");

    assert_eq!(msg.body, "Saturday at ten?");
    assert_eq!(msg.category, MessageCategory::Viewing);

    let written = serde_json::to_value(&msg).unwrap();
    assert_eq!(written["body"], "Saturday at ten?");
    assert!(written.get("message").is_none());
    assert!(written.get("type").is_none());
}

#[test]
fn test_record_without_body_is_rejected() {
    let json = r#"{
        "id": "msg_1_d",
        "propertyId": "p9",
        "propertyTitle": "Cottage",
        "subject": "Viewing",
        "sender": "Sam",
        "timestamp": "2024-01-05T09:00:00.000Z",
        "category": "viewing"
    }"#;

    let err = serde_json::from_str::<Message>(json).unwrap_err();
    assert!(err.to_string().contains("no body"));
}

#[test]
fn test_missing_status_defaults_to_unread() {
    let json = r#"{
        "id": "msg_2_b",
        "propertyId": "p1",
        "propertyTitle": "Loft",
        "subject": "Hi",
        "body": "Hello",
        "sender": "Jo",
        "timestamp": "2024-01-05T09:00:00Z",
        "category": "info"
    }"#;

    let msg: Message = serde_json::from_str(json).expect("Failed to parse message");
    assert_eq!(msg.status, MessageStatus::Unread);
}

#[test]
fn test_unknown_status_rejected() {
    let json = r#"{
        "id": "msg_3_c",
        "propertyId": "p1",
        "propertyTitle": "Loft",
        "subject": "Hi",
        "body": "Hello",
        "sender": "Jo",
        "timestamp": "2024-01-05T09:00:00Z",
        "status": "pending",
        "category": "info"
    }"#;

    assert!(serde_json::from_str::<Message>(json).is_err());
}

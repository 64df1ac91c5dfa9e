// MessageStore Tests - Testing create/list/update_status/delete and persistence rules

use crate::storage::message_store::generate_message_id;
use crate::storage::{
    FileStore, KeyValueStore, MemoryStore, Message, MessageCategory, MessageDraft, MessageStatus,
    MessageStore, DEFAULT_NAMESPACE, SCHEMA_VERSION,
};
use crate::Error;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tempfile::TempDir;

fn draft(subject: &str) -> MessageDraft {
    MessageDraft {
        property_id: "p1".to_string(),
        property_title: "Loft".to_string(),
        subject: subject.to_string(),
        body: "Is this available?".to_string(),
        sender: "Jo".to_string(),
        category: MessageCategory::Inquiry,
    }
}

fn new_store() -> MessageStore<MemoryStore> {
    MessageStore::with_default_namespace(MemoryStore::new())
}

fn raw(store: &MessageStore<MemoryStore>) -> Option<String> {
    store
        .backend()
        .get(store.namespace())
        .expect("Failed to read backend")
}

fn write_raw(store: &mut MessageStore<MemoryStore>, value: &str) {
    let key = store.namespace().to_string();
    store
        .backend_mut()
        .set(&key, value)
        .expect("Failed to write backend");
}

#[test]
fn test_empty_store() {
    let store = new_store();

    assert!(store.list().is_empty());
    assert!(store.try_list().expect("Empty store should read").is_empty());
    assert_eq!(store.unread_count(), 0);
    assert_eq!(store.revision(), 0);
    assert_eq!(store.namespace(), DEFAULT_NAMESPACE);
}

#[test]
fn test_create_single_inquiry() {
    let mut store = new_store();

    let created = store
        .create(MessageDraft {
            property_id: "p1".to_string(),
            property_title: "Loft".to_string(),
            subject: "Hi".to_string(),
            body: "Is this available?".to_string(),
            sender: "Jo".to_string(),
            category: MessageCategory::Inquiry,
        })
        .expect("Failed to create message");

    let messages = store.list();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0], created);
    assert_eq!(messages[0].status, MessageStatus::Unread);
    assert_eq!(messages[0].subject, "Hi");
    assert_eq!(store.unread_count(), 1);
}

#[test]
fn test_list_is_reverse_creation_order() {
    let mut store = new_store();

    let created: Vec<Message> = (0..20)
        .map(|i| store.create(draft(&format!("subject {}", i))).unwrap())
        .collect();

    let listed = store.list();
    let expected: Vec<Message> = created.into_iter().rev().collect();
    assert_eq!(listed, expected);
}

#[test]
fn test_store_accepts_blank_drafts() {
    let mut store = new_store();
    let mut blank = draft("");
    blank.body = "   ".to_string();

    let created = store.create(blank).expect("Store should not validate drafts");
    assert_eq!(created.subject, "");
    assert_eq!(store.list().len(), 1);
}

#[test]
fn test_generated_ids_are_unique() {
    let ids: HashSet<String> = (0..10_000).map(|_| generate_message_id()).collect();
    assert_eq!(ids.len(), 10_000);

    for id in ids.iter().take(10) {
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "msg");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }
}

#[test]
fn test_created_ids_are_unique() {
    let mut store = new_store();

    let ids: HashSet<String> = (0..300)
        .map(|i| store.create(draft(&format!("s{}", i))).unwrap().id)
        .collect();

    assert_eq!(ids.len(), 300);
    assert_eq!(store.list().len(), 300);
}

#[test]
fn test_update_status_changes_only_target() {
    let mut store = new_store();
    for i in 0..5 {
        store.create(draft(&format!("s{}", i))).unwrap();
    }
    let before = store.list();
    let target = before[2].id.clone();

    assert!(store.update_status(&target, MessageStatus::Read).unwrap());

    let after = store.list();
    assert_eq!(after.len(), before.len());
    for (old, new) in before.iter().zip(after.iter()) {
        assert_eq!(old.id, new.id);
        if new.id == target {
            assert_eq!(new.status, MessageStatus::Read);
        } else {
            assert_eq!(new.status, old.status);
        }
    }
}

#[test]
fn test_update_status_of_second_listed_message() {
    let mut store = new_store();
    store.create(draft("first")).unwrap();
    store.create(draft("second")).unwrap();

    let listed = store.list();
    let first_status = listed[0].status;
    store
        .update_status(&listed[1].id, MessageStatus::Read)
        .unwrap();

    let listed = store.list();
    assert_eq!(listed[1].status, MessageStatus::Read);
    assert_eq!(listed[0].status, first_status);
}

#[test]
fn test_update_status_unknown_id_is_noop() {
    let mut store = new_store();
    store.create(draft("a")).unwrap();
    store.create(draft("b")).unwrap();

    let raw_before = raw(&store);
    let list_before = store.list();

    let updated = store
        .update_status("msg_0_missing00", MessageStatus::Read)
        .expect("Unknown id should not be an error");

    assert!(!updated);
    assert_eq!(raw(&store), raw_before);
    assert_eq!(
        serde_json::to_string(&store.list()).unwrap(),
        serde_json::to_string(&list_before).unwrap()
    );
}

#[test]
fn test_update_status_same_value_still_writes() {
    let mut store = new_store();
    let msg = store.create(draft("a")).unwrap();
    let revision = store.revision();

    assert!(store.update_status(&msg.id, MessageStatus::Unread).unwrap());
    assert!(store.update_status(&msg.id, MessageStatus::Unread).unwrap());

    assert_eq!(store.revision(), revision + 2);
    assert_eq!(store.get(&msg.id).unwrap().status, MessageStatus::Unread);
}

#[test]
fn test_status_update_keeps_timestamp() {
    let mut store = new_store();
    let msg = store.create(draft("a")).unwrap();

    store.update_status(&msg.id, MessageStatus::Read).unwrap();
    store.update_status(&msg.id, MessageStatus::Unread).unwrap();

    let stored = store.get(&msg.id).unwrap();
    assert_eq!(stored.timestamp, msg.timestamp);
    assert_eq!(stored.id, msg.id);
}

#[test]
fn test_toggle_status() {
    let mut store = new_store();
    let msg = store.create(draft("a")).unwrap();

    assert_eq!(store.toggle_status(&msg.id).unwrap(), Some(MessageStatus::Read));
    assert_eq!(store.toggle_status(&msg.id).unwrap(), Some(MessageStatus::Unread));
    assert_eq!(store.toggle_status("nope").unwrap(), None);
}

#[test]
fn test_delete_preserves_order_of_rest() {
    let mut store = new_store();
    for i in 0..4 {
        store.create(draft(&format!("s{}", i))).unwrap();
    }
    let before = store.list();
    let victim = before[1].id.clone();

    assert!(store.delete(&victim).unwrap());

    let after = store.list();
    let expected: Vec<Message> = before.into_iter().filter(|m| m.id != victim).collect();
    assert_eq!(after, expected);
}

#[test]
fn test_delete_unknown_id_is_noop() {
    let mut store = new_store();
    store.create(draft("a")).unwrap();
    let raw_before = raw(&store);

    assert!(!store.delete("msg_0_missing00").unwrap());
    assert_eq!(raw(&store), raw_before);
}

#[test]
fn test_persisted_record_round_trip() {
    let mut store = new_store();
    let created = store.create(draft("Hello")).unwrap();

    let data = raw(&store).expect("Store should have been written");
    let value: serde_json::Value = serde_json::from_str(&data).unwrap();

    assert_eq!(value["schemaVersion"], SCHEMA_VERSION);
    assert_eq!(value["revision"], 1);

    let record = &value["messages"][0];
    let decoded: Message = serde_json::from_value(record.clone()).unwrap();
    assert_eq!(decoded, created);

    assert!(!decoded.id.is_empty());
    let stamp = record["timestamp"].as_str().expect("timestamp should be a string");
    let parsed = DateTime::parse_from_rfc3339(stamp).expect("timestamp should be ISO-8601");
    assert!(parsed.with_timezone(&Utc) <= Utc::now());
}

#[test]
fn test_not_json_reads_as_empty() {
    let mut store = new_store();
    write_raw(&mut store, "not json");

    assert!(store.list().is_empty());
    assert!(matches!(store.try_list(), Err(Error::CorruptStore(_))));
}

#[test]
fn test_json_string_reads_as_empty() {
    let mut store = new_store();
    write_raw(&mut store, "\"not json\"");

    assert!(store.list().is_empty());
    assert!(matches!(store.try_list(), Err(Error::CorruptStore(_))));
}

#[test]
fn test_blank_value_reads_as_empty() {
    let mut store = new_store();
    write_raw(&mut store, "   ");

    assert!(store.try_list().unwrap().is_empty());
}

#[test]
fn test_create_overwrites_corrupt_store() {
    let mut store = new_store();
    write_raw(&mut store, "{broken");

    let msg = store.create(draft("fresh")).unwrap();

    assert_eq!(store.try_list().unwrap(), vec![msg]);
}

#[test]
fn test_legacy_array_is_read_and_upgraded() {
    let mut store = new_store();
    write_raw(
        &mut store,
        r#"[
            {"id":"msg_2_new","propertyId":"p2","propertyTitle":"Villa","subject":"Offer",
             "message":"Can we discuss pricing?","sender":"Ann","timestamp":"2024-02-01T10:00:00.000Z",
             "status":"unread","type":"offer"},
            {"id":"msg_1_old","propertyId":"p1","propertyTitle":"Loft","subject":"Hi",
             "message":"Is this available?","sender":"Jo","timestamp":"2024-01-01T10:00:00.000Z",
             "status":"read","type":"inquiry"}
        ]"#,
    );

    let messages = store.try_list().expect("Legacy format should be readable");
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].id, "msg_2_new");
    assert_eq!(messages[0].body, "Can we discuss pricing?");
    assert_eq!(messages[1].category, MessageCategory::Inquiry);
    assert_eq!(store.revision(), 0);

    store.update_status("msg_2_new", MessageStatus::Read).unwrap();

    let value: serde_json::Value = serde_json::from_str(&raw(&store).unwrap()).unwrap();
    assert_eq!(value["schemaVersion"], SCHEMA_VERSION);
    assert_eq!(value["messages"][0]["body"], "Can we discuss pricing?");
    assert_eq!(value["messages"][0]["status"], "read");
    assert_eq!(value["messages"][1]["id"], "msg_1_old");
}

#[test]
fn test_newer_schema_is_not_overwritten() {
    let mut store = new_store();
    let future = r#"{"schemaVersion":99,"revision":4,"messages":[]}"#;
    write_raw(&mut store, future);

    assert!(store.list().is_empty());
    assert!(matches!(store.try_list(), Err(Error::UnsupportedSchema(99))));
    assert!(matches!(
        store.create(draft("a")),
        Err(Error::UnsupportedSchema(99))
    ));
    assert_eq!(raw(&store).as_deref(), Some(future));
}

#[test]
fn test_newer_schema_with_unknown_records_is_not_overwritten() {
    let mut store = new_store();
    let future = r#"{"schemaVersion":2,"revision":7,"messages":[{"id":"msg_1_abcdefghi","propertyId":"p1","propertyTitle":"Loft","subject":"Tour","body":"Saturday?","sender":"Jo","timestamp":"2024-03-01T10:00:00.000Z","status":"unread","category":"tour"}]}"#;
    write_raw(&mut store, future);

    assert!(matches!(store.try_list(), Err(Error::UnsupportedSchema(2))));
    assert!(matches!(
        store.create(draft("a")),
        Err(Error::UnsupportedSchema(2))
    ));
    assert!(matches!(
        store.delete("msg_1_abcdefghi"),
        Err(Error::UnsupportedSchema(2))
    ));
    assert_eq!(raw(&store).as_deref(), Some(future));

    // A newer layout without a messages array is still recognised by its version
    let reshaped = r#"{"schemaVersion":3,"records":{}}"#;
    write_raw(&mut store, reshaped);
    assert!(matches!(
        store.create(draft("b")),
        Err(Error::UnsupportedSchema(3))
    ));
    assert_eq!(raw(&store).as_deref(), Some(reshaped));
}

#[test]
fn test_object_without_version_is_corrupt() {
    let mut store = new_store();
    write_raw(&mut store, r#"{"revision":2,"items":[]}"#);

    assert!(matches!(store.try_list(), Err(Error::CorruptStore(_))));
    store.create(draft("fresh")).unwrap();
    assert_eq!(store.list().len(), 1);
}

#[test]
fn test_disabled_storage_surfaces_on_write() {
    let mut store = new_store();
    store.create(draft("kept")).unwrap();
    store.backend_mut().set_disabled(true);

    assert!(store.list().is_empty());
    assert!(matches!(store.try_list(), Err(Error::StorageUnavailable(_))));
    assert!(matches!(
        store.create(draft("lost")),
        Err(Error::StorageUnavailable(_))
    ));

    store.backend_mut().set_disabled(false);
    let messages = store.list();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].subject, "kept");
}

#[test]
fn test_quota_exceeded_leaves_previous_state() {
    let mut store = MessageStore::with_default_namespace(MemoryStore::with_quota(700));
    store.create(draft("first")).expect("First message fits the quota");
    let before = store.list();

    let mut big = draft("second");
    big.body = "x".repeat(1_000);
    let result = store.create(big);

    assert!(matches!(result, Err(Error::StorageUnavailable(_))));
    assert_eq!(store.list(), before);
}

#[test]
fn test_revision_counts_writes() {
    let mut store = new_store();
    let a = store.create(draft("a")).unwrap();
    let b = store.create(draft("b")).unwrap();
    store.update_status(&a.id, MessageStatus::Read).unwrap();
    store.delete(&b.id).unwrap();

    assert_eq!(store.revision(), 4);
}

#[test]
fn test_clear_removes_collection() {
    let mut store = new_store();
    store.create(draft("a")).unwrap();

    store.clear().unwrap();

    assert!(raw(&store).is_none());
    assert!(store.list().is_empty());
}

#[test]
fn test_namespaces_are_independent() {
    let dir = TempDir::new().unwrap();
    let mut tenant = MessageStore::new(FileStore::new(dir.path()).unwrap(), "tenant_inbox");
    let mut landlord = MessageStore::new(FileStore::new(dir.path()).unwrap(), "landlord_inbox");

    tenant.create(draft("to landlord")).unwrap();
    landlord.create(draft("to tenant")).unwrap();
    landlord.create(draft("second")).unwrap();

    assert_eq!(tenant.list().len(), 1);
    assert_eq!(landlord.list().len(), 2);
    assert_eq!(tenant.list()[0].subject, "to landlord");
}

#[test]
fn test_namespaces_differing_in_punctuation_are_independent() {
    let dir = TempDir::new().unwrap();
    let mut nested = MessageStore::new(FileStore::new(dir.path()).unwrap(), "tenant/inbox");
    let flat = MessageStore::new(FileStore::new(dir.path()).unwrap(), "tenant_inbox");

    nested.create(draft("only here")).unwrap();

    assert_eq!(nested.list().len(), 1);
    assert!(flat.list().is_empty());
    assert!(flat.try_list().unwrap().is_empty());
}

#[test]
fn test_store_reopens_from_file() {
    let dir = TempDir::new().unwrap();
    let created = {
        let mut store = MessageStore::with_default_namespace(FileStore::new(dir.path()).unwrap());
        store.create(draft("persisted")).unwrap()
    };

    let reopened = MessageStore::with_default_namespace(FileStore::new(dir.path()).unwrap());
    assert_eq!(reopened.list(), vec![created]);
}

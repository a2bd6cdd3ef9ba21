//! End-to-end behavior tests
//!
//! Whole-surface scenarios exercising the public API the way an
//! embedding application would: mixed inserts, filtered reads, merges,
//! bulk deletes, and sorting.

use papyrusdb::database::Database;
use papyrusdb::document::{Document, Filter, ID_FIELD};
use papyrusdb::errors::DbError;
use papyrusdb::query::{sort_documents, FilterBuilder, SortDirection};
use serde_json::json;
use tempfile::TempDir;

fn doc(value: serde_json::Value) -> Document {
    value.as_object().unwrap().clone()
}

/// Test: the canonical session - insert with and without ids, read,
/// merge, bulk delete, count.
#[test]
fn test_basic_session() {
    let dir = TempDir::new().unwrap();
    let db = Database::open(dir.path().join("data.db")).unwrap();
    let users = db.collection("users");

    // No id: one is generated and returned.
    let bob_id = users.insert(doc(json!({"name": "Bob"}))).unwrap();
    assert!(!bob_id.is_empty());
    assert_eq!(users.find_by_id(&bob_id).unwrap()["name"], "Bob");

    // Explicit id is kept verbatim.
    let ann_id = users
        .insert(doc(json!({"id": "u1", "name": "Ann", "age": 29})))
        .unwrap();
    assert_eq!(ann_id, "u1");

    assert_eq!(users.find(&Filter::new()).len(), 2);

    // Merge preserves untouched fields.
    users.update("u1", &doc(json!({"age": 30}))).unwrap();
    let ann = users.find_by_id("u1").unwrap();
    assert_eq!(ann["name"], "Ann");
    assert_eq!(ann["age"], 30);

    let deleted = users.delete_many(&Filter::new()).unwrap();
    assert_eq!(deleted, 2);
    assert_eq!(users.count(), 0);
}

/// Test: duplicate ids are rejected without touching the original.
#[test]
fn test_duplicate_id_rejected() {
    let dir = TempDir::new().unwrap();
    let db = Database::open(dir.path().join("data.db")).unwrap();
    let users = db.collection("users");

    users.insert(doc(json!({"id": "u1", "name": "Ann"}))).unwrap();
    let err = users
        .insert(doc(json!({"id": "u1", "name": "Impostor"})))
        .unwrap_err();

    assert!(matches!(err, DbError::DuplicateKey { .. }));
    assert_eq!(users.find_by_id("u1").unwrap()["name"], "Ann");
}

/// Test: multi-field filters are a conjunction, and numeric values
/// match their textual forms.
#[test]
fn test_filter_conjunction_and_coercion() {
    let dir = TempDir::new().unwrap();
    let db = Database::open(dir.path().join("data.db")).unwrap();
    let users = db.collection("users");

    users
        .insert(doc(json!({"id": "u1", "role": "admin", "age": 25})))
        .unwrap();
    users
        .insert(doc(json!({"id": "u2", "role": "admin", "age": 30})))
        .unwrap();
    users
        .insert(doc(json!({"id": "u3", "role": "user", "age": 25})))
        .unwrap();

    // Both keys must match.
    let filter = FilterBuilder::new().eq("role", "admin").eq("age", 25).build();
    let matches = users.find(&filter);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0][ID_FIELD], json!("u1"));

    // Textual "25" matches numeric 25, and 25.0 matches 25.
    assert_eq!(users.find(&doc(json!({"age": "25"}))).len(), 2);
    assert_eq!(users.find(&doc(json!({"age": 25.0}))).len(), 2);

    // A key absent from a document never matches.
    assert!(users.find(&doc(json!({"missing": "x"}))).is_empty());
}

/// Test: sorting orders numerically when values parse as numbers and
/// lexicographically otherwise.
#[test]
fn test_sorted_find() {
    let dir = TempDir::new().unwrap();
    let db = Database::open(dir.path().join("data.db")).unwrap();
    let users = db.collection("users");

    users.insert(doc(json!({"id": "u1", "age": 30}))).unwrap();
    users.insert(doc(json!({"id": "u2", "age": 9}))).unwrap();
    users.insert(doc(json!({"id": "u3", "age": 100}))).unwrap();

    let mut docs = users.find_all();
    sort_documents(&mut docs, "age", SortDirection::Ascending);
    let ages: Vec<_> = docs.iter().map(|d| d["age"].as_i64().unwrap()).collect();
    assert_eq!(ages, [9, 30, 100]);

    sort_documents(&mut docs, "age", SortDirection::Descending);
    let ages: Vec<_> = docs.iter().map(|d| d["age"].as_i64().unwrap()).collect();
    assert_eq!(ages, [100, 30, 9]);
}

/// Test: update_many merges into every match and reports the count.
#[test]
fn test_bulk_update_then_count() {
    let dir = TempDir::new().unwrap();
    let db = Database::open(dir.path().join("data.db")).unwrap();
    let users = db.collection("users");

    for i in 1..=4 {
        let role = if i <= 3 { "user" } else { "admin" };
        users
            .insert(doc(json!({"id": format!("u{}", i), "role": role})))
            .unwrap();
    }

    let updated = users
        .update_many(&doc(json!({"role": "user"})), &doc(json!({"active": true})))
        .unwrap();
    assert_eq!(updated, 3);
    assert_eq!(users.count_where(&doc(json!({"active": true}))), 3);
    assert_eq!(users.count(), 4);
}

/// Test: dropping a collection removes it durably, and the name is
/// reusable afterwards.
#[test]
fn test_drop_and_reuse_collection() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.db");

    {
        let db = Database::open(&path).unwrap();
        db.collection("sessions")
            .insert(doc(json!({"id": "s1"})))
            .unwrap();
        db.drop_collection("sessions").unwrap();

        db.collection("sessions")
            .insert(doc(json!({"id": "s2"})))
            .unwrap();
        db.close();
    }

    let db = Database::open(&path).unwrap();
    let sessions = db.collection("sessions");
    assert!(sessions.find_by_id("s1").is_none());
    assert!(sessions.find_by_id("s2").is_some());
}

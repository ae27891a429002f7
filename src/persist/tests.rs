#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::models::{Category, SyncState, Transaction, TxnKind};

fn sample_snapshot() -> Snapshot {
    Snapshot {
        dark_mode: false,
        notifications_enabled: true,
        amount_hidden: Some(true),
        transactions: vec![Transaction {
            id: 42,
            amount: dec!(19.99),
            description: "Streaming".into(),
            category: Category::Entertainment,
            kind: TxnKind::Expense,
            date: "2024-03-01".into(),
            merchant: Some("Streamco".into()),
            sync: SyncState::Synced,
        }],
        budgets: vec![Budget::new(Category::Entertainment, dec!(50), dec!(0.8))],
        recurring_templates: Vec::new(),
    }
}

#[test]
fn test_memory_roundtrip() {
    let mut storage = MemoryStorage::new();
    let snapshot = sample_snapshot();

    save_snapshot(&mut storage, &snapshot);
    let loaded = load_snapshot(&storage);

    assert_eq!(loaded, snapshot);
}

#[test]
fn test_missing_blob_loads_defaults() {
    let storage = MemoryStorage::new();
    let loaded = load_snapshot(&storage);

    assert!(loaded.transactions.is_empty());
    assert!(loaded.budgets.is_empty());
    assert!(loaded.notifications_enabled);
    assert!(loaded.dark_mode);
}

#[test]
fn test_corrupt_blob_loads_defaults() {
    let mut storage = MemoryStorage::new();
    storage.set_item(STORAGE_KEY, "{not json").unwrap();

    let loaded = load_snapshot(&storage);
    assert_eq!(loaded, Snapshot::default());
}

#[test]
fn test_partial_blob_fills_defaults() {
    // Blobs written before newer fields existed still load
    let mut storage = MemoryStorage::new();
    storage
        .set_item(STORAGE_KEY, r#"{"darkMode":false,"transactions":[]}"#)
        .unwrap();

    let loaded = load_snapshot(&storage);
    assert!(!loaded.dark_mode);
    assert!(loaded.notifications_enabled);
    assert_eq!(loaded.amount_hidden, None);
    assert!(loaded.recurring_templates.is_empty());
}

#[test]
fn test_snapshot_json_uses_camel_case() {
    let json = serde_json::to_string(&sample_snapshot()).unwrap();
    assert!(json.contains("\"darkMode\":false"));
    assert!(json.contains("\"notificationsEnabled\":true"));
    assert!(json.contains("\"amountHidden\":true"));
    assert!(!json.contains("recurringTemplates"));
}

#[test]
fn test_file_storage_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = FileStorage::new(dir.path()).unwrap();

    assert_eq!(storage.get_item(STORAGE_KEY).unwrap(), None);

    let snapshot = sample_snapshot();
    save_snapshot(&mut storage, &snapshot);
    assert_eq!(load_snapshot(&storage), snapshot);
}

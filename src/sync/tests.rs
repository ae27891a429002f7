#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::models::{Category, TxnKind};

fn sample_txn() -> Transaction {
    Transaction {
        id: 17,
        amount: dec!(42.50),
        description: "Dinner".into(),
        category: Category::DiningOut,
        kind: TxnKind::Expense,
        date: "2024-03-10".into(),
        merchant: Some("Trattoria".into()),
        sync: SyncState::Local,
    }
}

#[test]
fn test_wire_uses_snake_case() {
    let wire = TransactionWire::from(&sample_txn());
    let json = serde_json::to_string(&wire).unwrap();

    assert!(json.contains("\"category_key\":\"dining_out\""));
    assert!(json.contains("\"transaction_type\":\"expense\""));
    assert!(json.contains("\"transaction_date\":\"2024-03-10\""));
    assert!(json.contains("\"merchant\":\"Trattoria\""));
}

#[test]
fn test_wire_omits_missing_merchant() {
    let mut txn = sample_txn();
    txn.merchant = None;
    let json = serde_json::to_string(&TransactionWire::from(&txn)).unwrap();
    assert!(!json.contains("merchant"));
}

#[test]
fn test_wire_roundtrip() {
    let txn = sample_txn();
    let back = TransactionWire::from(&txn)
        .into_transaction(SyncState::Synced)
        .unwrap();

    assert_eq!(back.id, txn.id);
    assert_eq!(back.amount, txn.amount);
    assert_eq!(back.category, txn.category);
    assert_eq!(back.kind, txn.kind);
    assert_eq!(back.date, txn.date);
    assert_eq!(back.merchant, txn.merchant);
    assert_eq!(back.sync, SyncState::Synced);
}

#[test]
fn test_wire_unknown_category_falls_back() {
    let json = r#"{
        "id": 3,
        "amount": "9.99",
        "description": "Mystery",
        "category_key": "cryptocurrency",
        "transaction_type": "expense",
        "transaction_date": "2024-01-01"
    }"#;
    let wire: TransactionWire = serde_json::from_str(json).unwrap();
    let txn = wire.into_transaction(SyncState::Synced).unwrap();
    assert_eq!(txn.category, Category::Other);
}

#[test]
fn test_wire_unknown_type_is_rejected() {
    // Guessing income or expense would flip the record's sign, so a bad
    // type fails the conversion instead of falling back
    let mut wire = TransactionWire::from(&sample_txn());
    wire.transaction_type = "transfer".into();

    let err = wire.into_transaction(SyncState::Synced).unwrap_err();
    assert!(err.to_string().contains("transfer"));
}

#[test]
fn test_client_url_shape() {
    let client = SyncClient::new("https://api.example.com/", "ann").unwrap();
    assert_eq!(
        client.transactions_url(),
        "https://api.example.com/users/ann/transactions"
    );
}

use anyhow::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Category, SyncState, Transaction, TxnKind};

/// The transaction shape the remote API speaks. Field names follow the
/// server's snake_case convention and differ from the persisted JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionWire {
    pub id: i64,
    pub amount: Decimal,
    pub description: String,
    pub category_key: String,
    pub transaction_type: String,
    pub transaction_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
}

impl From<&Transaction> for TransactionWire {
    fn from(txn: &Transaction) -> Self {
        Self {
            id: txn.id,
            amount: txn.amount,
            description: txn.description.clone(),
            category_key: txn.category.key().to_string(),
            transaction_type: txn.kind.as_str().to_string(),
            transaction_date: txn.date.clone(),
            merchant: txn.merchant.clone(),
        }
    }
}

impl TransactionWire {
    /// Convert a server record into the local shape. Unknown categories fall
    /// back to Other, but an unknown transaction type is rejected: guessing
    /// income or expense would change the record's sign.
    pub fn into_transaction(self, sync: SyncState) -> Result<Transaction> {
        let Some(kind) = TxnKind::parse(&self.transaction_type) else {
            anyhow::bail!("Unknown transaction type: {}", self.transaction_type);
        };
        Ok(Transaction {
            id: self.id,
            amount: self.amount,
            description: self.description,
            category: Category::parse(&self.category_key),
            kind,
            date: self.transaction_date,
            merchant: self.merchant,
            sync,
        })
    }
}

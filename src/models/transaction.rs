use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxnKind {
    Income,
    Expense,
}

impl TxnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl std::fmt::Display for TxnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-record sync state against the remote API.
///
/// `Local` means no remote is configured for this record, `Pending` that the
/// last push attempt failed, `Conflict` that a previously synced record was
/// changed locally but the remote update failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SyncState {
    #[default]
    Local,
    Pending,
    Synced,
    Conflict,
}

impl SyncState {
    /// Short marker shown in transaction listings.
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Local => " ",
            Self::Pending => "~",
            Self::Synced => "✓",
            Self::Conflict => "!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    /// Always positive; `kind` carries the sign.
    pub amount: Decimal,
    pub description: String,
    pub category: Category,
    pub kind: TxnKind,
    /// Format: "YYYY-MM-DD"
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    #[serde(default)]
    pub sync: SyncState,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TxnKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TxnKind::Expense
    }

    /// Amount with the sign implied by `kind` (expenses negative).
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TxnKind::Income => self.amount,
            TxnKind::Expense => -self.amount,
        }
    }
}

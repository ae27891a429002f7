use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
    Info,
}

impl NotificationKind {
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Success => "✔",
            Self::Warning => "▲",
            Self::Error => "✖",
            Self::Info => "ℹ",
        }
    }
}

/// A transient user-facing alert. Once created it is only ever marked read
/// or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    pub kind: NotificationKind,
    pub message: String,
    /// RFC 3339
    pub timestamp: String,
    pub is_read: bool,
}

impl Notification {
    pub fn new(id: i64, kind: NotificationKind, message: String) -> Self {
        Self {
            id,
            kind,
            message,
            timestamp: chrono::Utc::now().to_rfc3339(),
            is_read: false,
        }
    }
}

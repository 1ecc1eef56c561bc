use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One send event. Immutable once constructed: the same value is stored in
/// the sender's sent log and cloned into every recipient's received log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub sender: String,
    /// Recipients exactly as given at send time, in input order.
    pub recipients: Vec<String>,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Build a message stamped with the current wall-clock time.
    ///
    /// No validation: an empty sender, empty recipient list or empty content
    /// are all permitted and simply route to nobody / carry no text.
    pub fn new(sender: impl Into<String>, recipients: Vec<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender: sender.into(),
            recipients,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// True if `username` is the sender or appears among the recipients.
    pub fn involves(&self, username: &str) -> bool {
        self.sender == username || self.recipients.iter().any(|r| r == username)
    }

    /// Human-readable timestamp, e.g. "2026-08-25 14:03:07".
    pub fn formatted_timestamp(&self) -> String {
        format_timestamp(&self.timestamp)
    }
}

/// Stateless timestamp formatter shared by log lines and history dumps.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

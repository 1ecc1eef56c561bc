use serde::{Deserialize, Serialize};

use crate::error::ChatError;
use crate::models::Message;

/// Outcome of the fan-out for a single recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryStatus {
    /// Appended to the recipient's received log.
    Delivered,
    /// Suppressed because the recipient blocks the sender. The recipient is
    /// never notified; only the sender's report carries this.
    Blocked,
    /// The username is not in the directory. Did not abort delivery to the
    /// other recipients.
    NotFound,
}

/// What a send actually did, per recipient, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryReport {
    pub message: Message,
    pub outcomes: Vec<(String, DeliveryStatus)>,
}

impl DeliveryReport {
    /// Usernames the message actually reached, in fan-out order.
    pub fn delivered_to(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|(_, status)| *status == DeliveryStatus::Delivered)
            .map(|(name, _)| name.as_str())
    }

    pub fn status_for(&self, username: &str) -> Option<DeliveryStatus> {
        self.outcomes
            .iter()
            .find(|(name, _)| name == username)
            .map(|(_, status)| *status)
    }

    /// Per-recipient faults from the fan-out: one `RecipientNotFound` for
    /// each recipient absent from the directory, in fan-out order. Empty when
    /// everything was delivered or merely blocked.
    pub fn failures(&self) -> impl Iterator<Item = ChatError> {
        self.outcomes
            .iter()
            .filter(|(_, status)| *status == DeliveryStatus::NotFound)
            .map(|(name, _)| ChatError::RecipientNotFound { username: name.clone() })
    }

    /// True if every recipient got the message.
    pub fn fully_delivered(&self) -> bool {
        self.outcomes
            .iter()
            .all(|(_, status)| *status == DeliveryStatus::Delivered)
    }
}

/// Result of asking to undo the last sent message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UndoOutcome {
    /// The popped message plus the report of the compensating broadcast sent
    /// to the original recipients minus the acting user.
    Undone {
        original: Message,
        compensation: DeliveryReport,
    },
    /// The sent log was empty. Not an error.
    NothingToUndo,
}

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, warn};

use courier_types::{ChatError, DeliveryReport, DeliveryStatus, Message, UndoOutcome};

use crate::history::{ChatHistory, MessagesWith};
use crate::user::User;

/// Per-user mailbox state held by the server directory.
///
/// Receipt alone populates `received`; a user's own sends land only in
/// `sent`, which is what undo operates on.
#[derive(Debug, Default)]
struct UserState {
    received: ChatHistory,
    sent: ChatHistory,
}

/// Central directory and router. The single source of truth for who is
/// registered and who blocks whom; all delivery goes through it.
///
/// Cheap to clone — every handle shares the same state. Delivery is
/// synchronous: the fan-out completes before `send_message` returns, under
/// one coarse lock that serializes register/block/send. No background work,
/// no timeouts.
#[derive(Clone, Debug, Default)]
pub struct ChatServer {
    inner: Arc<ServerInner>,
}

#[derive(Debug, Default)]
struct ServerInner {
    /// username -> mailbox state. A username appears at most once; duplicate
    /// registration is rejected, never overwritten.
    users: RwLock<HashMap<String, UserState>>,

    /// blocker -> set of senders whose messages the blocker suppresses.
    blocks: RwLock<HashMap<String, HashSet<String>>>,
}

impl ChatServer {
    pub fn new() -> Self {
        Self::default()
    }

    // Nothing panics while holding these locks, so a poisoned lock still
    // guards consistent state; recover rather than propagate.
    fn users_read(&self) -> RwLockReadGuard<'_, HashMap<String, UserState>> {
        self.inner.users.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn users_write(&self) -> RwLockWriteGuard<'_, HashMap<String, UserState>> {
        self.inner.users.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn blocks_read(&self) -> RwLockReadGuard<'_, HashMap<String, HashSet<String>>> {
        self.inner.blocks.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn blocks_write(&self) -> RwLockWriteGuard<'_, HashMap<String, HashSet<String>>> {
        self.inner.blocks.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a user to the directory and hand back its handle.
    ///
    /// A taken username is rejected with `DuplicateRegistration` — the first
    /// registrant stays reachable.
    pub fn register(&self, username: impl Into<String>) -> Result<User, ChatError> {
        let username = username.into();
        let mut users = self.users_write();

        if users.contains_key(&username) {
            warn!(%username, "rejected duplicate registration");
            return Err(ChatError::DuplicateRegistration { username });
        }

        users.insert(username.clone(), UserState::default());
        info!(%username, "registered user");

        Ok(User::new(username, self.clone()))
    }

    /// Route one message from `sender` to `recipients`, in input order.
    ///
    /// The whole fan-out happens before this returns. Per-recipient outcomes
    /// are isolated: a recipient that blocks the sender or is missing from
    /// the directory is recorded in the report and the scan moves on. Only an
    /// unregistered *sender* fails the call.
    pub fn send_message(
        &self,
        sender: &str,
        recipients: Vec<String>,
        content: impl Into<String>,
    ) -> Result<DeliveryReport, ChatError> {
        let mut users = self.users_write();
        if !users.contains_key(sender) {
            return Err(ChatError::UnknownUser { username: sender.to_string() });
        }

        let message = Message::new(sender, recipients, content);
        let outcomes = {
            let blocks = self.blocks_read();
            fan_out(&mut users, &blocks, &message)
        };

        // The sender's own copy goes to the sent log, never the received log.
        if let Some(state) = users.get_mut(sender) {
            state.sent.add(message.clone());
        }

        Ok(DeliveryReport { message, outcomes })
    }

    /// Undo the user's last *sent* message.
    ///
    /// This is a compensating broadcast, not a retraction: the entry is
    /// popped from the acting user's sent log and a new message prefixed
    /// "Undo: " is routed to the original recipients minus the acting user.
    /// Nothing is removed from any recipient's history. The compensating
    /// message is not itself recorded in the sent log, so it cannot be
    /// undone in turn.
    pub fn undo_last_message(&self, username: &str) -> Result<UndoOutcome, ChatError> {
        let mut users = self.users_write();
        let state = users
            .get_mut(username)
            .ok_or_else(|| ChatError::UnknownUser { username: username.to_string() })?;

        let Some(original) = state.sent.remove_last() else {
            info!(%username, "no message to undo");
            return Ok(UndoOutcome::NothingToUndo);
        };

        // Defensive: the sender is normally not its own recipient.
        let remaining: Vec<String> = original
            .recipients
            .iter()
            .filter(|r| r.as_str() != username)
            .cloned()
            .collect();

        let compensation_msg =
            Message::new(username, remaining, format!("Undo: {}", original.content));
        let outcomes = {
            let blocks = self.blocks_read();
            fan_out(&mut users, &blocks, &compensation_msg)
        };

        info!(%username, undone_id = %original.id, "undid the last sent message");

        Ok(UndoOutcome::Undone {
            original,
            compensation: DeliveryReport { message: compensation_msg, outcomes },
        })
    }

    /// Record that `blocker` suppresses messages from `blocked`. Idempotent;
    /// the blocked sender is not told.
    pub fn block(&self, blocker: &str, blocked: &str) -> Result<(), ChatError> {
        if !self.users_read().contains_key(blocker) {
            return Err(ChatError::UnknownUser { username: blocker.to_string() });
        }

        self.blocks_write()
            .entry(blocker.to_string())
            .or_default()
            .insert(blocked.to_string());

        info!("{} blocked messages from {}", blocker, blocked);
        Ok(())
    }

    /// Directional, per-pair: true iff `recipient` has blocked `sender`.
    pub fn is_blocked(&self, recipient: &str, sender: &str) -> bool {
        self.blocks_read()
            .get(recipient)
            .is_some_and(|set| set.contains(sender))
    }

    /// Filtered scan over `username`'s received log: entries where `other`
    /// is the sender or a recipient, in arrival order. Built over a snapshot
    /// taken under the lock; create a new one to restart.
    pub fn received_with(&self, username: &str, other: &str) -> Result<MessagesWith, ChatError> {
        let snapshot = self.received_snapshot(username)?;
        Ok(MessagesWith::new(snapshot, other))
    }

    pub fn received_snapshot(&self, username: &str) -> Result<Vec<Message>, ChatError> {
        let users = self.users_read();
        let state = users
            .get(username)
            .ok_or_else(|| ChatError::UnknownUser { username: username.to_string() })?;
        Ok(state.received.snapshot())
    }

    pub fn sent_snapshot(&self, username: &str) -> Result<Vec<Message>, ChatError> {
        let users = self.users_read();
        let state = users
            .get(username)
            .ok_or_else(|| ChatError::UnknownUser { username: username.to_string() })?;
        Ok(state.sent.snapshot())
    }
}

/// Deliver `message` to each of its recipients in order. One recipient's
/// outcome never affects the next one's.
fn fan_out(
    users: &mut HashMap<String, UserState>,
    blocks: &HashMap<String, HashSet<String>>,
    message: &Message,
) -> Vec<(String, DeliveryStatus)> {
    message
        .recipients
        .iter()
        .map(|recipient| {
            let blocked = blocks
                .get(recipient)
                .is_some_and(|set| set.contains(&message.sender));

            let status = if blocked {
                debug!(%recipient, sender = %message.sender, "delivery suppressed by block");
                DeliveryStatus::Blocked
            } else {
                match users.get_mut(recipient) {
                    Some(state) => {
                        state.received.add(message.clone());
                        info!(
                            "{} received message from {} at {}: {}",
                            recipient,
                            message.sender,
                            message.formatted_timestamp(),
                            message.content
                        );
                        DeliveryStatus::Delivered
                    }
                    None => {
                        warn!(%recipient, "recipient not registered, skipping");
                        DeliveryStatus::NotFound
                    }
                }
            };

            (recipient.clone(), status)
        })
        .collect()
}

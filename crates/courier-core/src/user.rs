use courier_types::{ChatError, DeliveryReport, Message, UndoOutcome};

use crate::history::MessagesWith;
use crate::server::ChatServer;

/// Handle for one registered participant. All cross-user effects go through
/// the server; the handle itself holds no message state.
///
/// Obtained from [`ChatServer::register`]; there is no unregister.
#[derive(Clone, Debug)]
pub struct User {
    username: String,
    server: ChatServer,
}

impl User {
    pub(crate) fn new(username: String, server: ChatServer) -> Self {
        Self { username, server }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn send(&self, recipients: Vec<String>, content: &str) -> Result<DeliveryReport, ChatError> {
        self.server.send_message(&self.username, recipients, content)
    }

    pub fn undo_last_message(&self) -> Result<UndoOutcome, ChatError> {
        self.server.undo_last_message(&self.username)
    }

    pub fn block(&self, username: &str) -> Result<(), ChatError> {
        self.server.block(&self.username, username)
    }

    /// Scan this user's received history for messages where `other` is the
    /// sender or a recipient, oldest first. The iterator runs over a
    /// snapshot; call again for a fresh scan.
    pub fn messages_with(&self, other: &str) -> Result<MessagesWith, ChatError> {
        self.server.received_with(&self.username, other)
    }

    /// Everything this user has received, in arrival order.
    pub fn received(&self) -> Result<Vec<Message>, ChatError> {
        self.server.received_snapshot(&self.username)
    }

    /// Everything this user has sent and not undone, in send order.
    pub fn sent(&self) -> Result<Vec<Message>, ChatError> {
        self.server.sent_snapshot(&self.username)
    }
}

use courier_types::Message;

/// Ordered log of messages for one user. Append-only except for
/// `remove_last`, which exists solely so undo can pop its target.
#[derive(Debug, Default, Clone)]
pub struct ChatHistory {
    messages: Vec<Message>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pure append. Insertion order is arrival order.
    pub fn add(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Most recent entry, `None` when empty. Never faults.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Pop the most recent entry. No-op (`None`) when empty.
    pub fn remove_last(&mut self) -> Option<Message> {
        self.messages.pop()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Lazy forward-only scan over entries where `other` is the sender or a
    /// recipient, in storage order. Each call starts a fresh scan.
    pub fn messages_with<'a>(&'a self, other: &'a str) -> impl Iterator<Item = &'a Message> {
        self.messages.iter().filter(move |m| m.involves(other))
    }

    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
    }
}

/// Owning variant of the filtered scan, built over a snapshot taken under the
/// server lock. Restart by creating a new one from a fresh snapshot.
pub struct MessagesWith {
    messages: std::vec::IntoIter<Message>,
    other: String,
}

impl MessagesWith {
    pub(crate) fn new(snapshot: Vec<Message>, other: impl Into<String>) -> Self {
        Self {
            messages: snapshot.into_iter(),
            other: other.into(),
        }
    }
}

impl Iterator for MessagesWith {
    type Item = Message;

    fn next(&mut self) -> Option<Message> {
        loop {
            let message = self.messages.next()?;
            if message.involves(&self.other) {
                return Some(message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(sender: &str, recipients: &[&str], content: &str) -> Message {
        Message::new(
            sender,
            recipients.iter().map(|r| r.to_string()).collect(),
            content,
        )
    }

    #[test]
    fn add_and_last_preserve_order() {
        let mut history = ChatHistory::new();
        assert!(history.last().is_none());

        history.add(msg("alice", &["bob"], "first"));
        history.add(msg("charlie", &["bob"], "second"));

        assert_eq!(history.len(), 2);
        let contents: Vec<_> = history.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second"]);
        assert_eq!(history.last().unwrap().content, "second");
    }

    #[test]
    fn remove_last_on_empty_is_noop() {
        let mut history = ChatHistory::new();
        assert!(history.remove_last().is_none());
        assert!(history.is_empty());
    }

    #[test]
    fn remove_last_pops_exactly_one() {
        let mut history = ChatHistory::new();
        history.add(msg("alice", &["bob"], "keep"));
        history.add(msg("alice", &["bob"], "drop"));

        let removed = history.remove_last().unwrap();
        assert_eq!(removed.content, "drop");
        assert_eq!(history.len(), 1);
        assert_eq!(history.messages().last().unwrap().content, "keep");
    }

    #[test]
    fn filtered_scan_matches_sender_or_recipient() {
        let mut history = ChatHistory::new();
        history.add(msg("alice", &["charlie"], "from alice"));
        history.add(msg("bob", &["charlie"], "unrelated"));
        history.add(msg("charlie", &["alice", "bob"], "to alice"));

        let contents: Vec<_> = history
            .messages_with("alice")
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, vec!["from alice", "to alice"]);
    }

    #[test]
    fn filtered_scan_restarts_on_recreation() {
        let mut history = ChatHistory::new();
        history.add(msg("alice", &["bob"], "one"));
        history.add(msg("alice", &["bob"], "two"));

        let first: Vec<_> = history.messages_with("alice").map(|m| m.id).collect();
        let second: Vec<_> = history.messages_with("alice").map(|m| m.id).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn owning_scan_filters_like_the_borrowed_one() {
        let snapshot = vec![
            msg("alice", &["charlie"], "hit"),
            msg("bob", &["charlie"], "miss"),
        ];

        let contents: Vec<_> = MessagesWith::new(snapshot, "alice")
            .map(|m| m.content)
            .collect();
        assert_eq!(contents, vec!["hit"]);
    }
}

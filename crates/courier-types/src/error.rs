use thiserror::Error;

/// Faults surfaced by the routing core.
///
/// An empty history is deliberately absent: undo / get-last on an empty log
/// is a defined empty result, not a fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    /// A send targeted a username absent from the directory. Carried per
    /// recipient in the delivery report's `failures()`; delivery to the
    /// remaining recipients still proceeds.
    #[error("recipient '{username}' is not registered")]
    RecipientNotFound { username: String },

    /// A second registration of an already-used username. The first user
    /// stays reachable; the second registration is rejected, never a silent
    /// overwrite.
    #[error("username '{username}' is already registered")]
    DuplicateRegistration { username: String },

    /// The acting user (sender, blocker, history owner) is not in the
    /// directory.
    #[error("user '{username}' is not registered")]
    UnknownUser { username: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_username() {
        let err = ChatError::RecipientNotFound { username: "mallory".into() };
        assert_eq!(err.to_string(), "recipient 'mallory' is not registered");

        let err = ChatError::DuplicateRegistration { username: "alice".into() };
        assert!(err.to_string().contains("alice"));
    }
}

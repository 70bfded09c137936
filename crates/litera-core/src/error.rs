//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No player record exists for the session.
    #[error("session not found: {0}")]
    SessionNotFound(String),

    /// The module tag of a choice is not one the resolver knows.
    #[error("unknown module: {0}")]
    UnknownModule(String),

    /// A prebunking post was not found in the catalog.
    #[error("post not found: {0}")]
    PostNotFound(String),

    /// The stored player changed between read and write.
    #[error("concurrency conflict on session {session_id}: expected version {expected}, found {actual}")]
    ConcurrencyConflict {
        /// The session that had the conflict.
        session_id: String,
        /// The version the writer read.
        expected: i64,
        /// The version found in storage.
        actual: i64,
    },

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concurrency_conflict_message_names_versions() {
        let err = DomainError::ConcurrencyConflict {
            session_id: "abc".to_owned(),
            expected: 2,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "concurrency conflict on session abc: expected version 2, found 3"
        );
    }

    #[test]
    fn test_session_not_found_message_includes_id() {
        let err = DomainError::SessionNotFound("s-1".to_owned());
        assert_eq!(err.to_string(), "session not found: s-1");
    }
}

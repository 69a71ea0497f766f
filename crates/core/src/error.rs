//! Error types for store primitives and textual parsing

use thiserror::Error;

/// Failure of a single remote primitive
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Could not obtain a connection to the store
    #[error("connection error: {0}")]
    Connection(String),

    /// The store rejected or failed a command
    #[error("{op} failed: {message}")]
    Command {
        /// Primitive that failed (e.g. "SADD")
        op: &'static str,
        /// Store-provided message
        message: String,
    },

    /// The call's deadline passed before or while the primitive ran
    #[error("{op} exceeded its deadline")]
    DeadlineExceeded {
        /// Primitive that timed out
        op: &'static str,
    },

    /// The store is unreachable or refusing work
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Build a command error for `op`
    pub fn command(op: &'static str, message: impl Into<String>) -> Self {
        StoreError::Command {
            op,
            message: message.into(),
        }
    }

    /// Check if this is a deadline failure
    pub fn is_timeout(&self) -> bool {
        matches!(self, StoreError::DeadlineExceeded { .. })
    }

    /// Check if this is a connectivity failure (connection or unavailability)
    pub fn is_connection(&self) -> bool {
        matches!(self, StoreError::Connection(_) | StoreError::Unavailable(_))
    }
}

/// Result type for store primitives
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Malformed textual input to a set's parser
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input string was empty
    #[error("string parsing failed: empty input")]
    EmptyInput,
}

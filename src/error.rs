//! Unified error types for stringset.

use thiserror::Error;

/// All stringset errors.
#[derive(Debug, Error)]
pub enum Error {
    /// A store primitive failed
    #[error(transparent)]
    Store(#[from] stringset_core::StoreError),

    /// Textual input could not be parsed
    #[error(transparent)]
    Parse(#[from] stringset_core::ParseError),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for stringset operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is retryable.
    ///
    /// Timeouts and connectivity failures may succeed on retry; this crate
    /// never retries on its own.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Store(e) if e.is_timeout() || e.is_connection())
    }

    /// Check if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse(_))
    }
}

impl From<stringset_storage::ConfigError> for Error {
    fn from(e: stringset_storage::ConfigError) -> Self {
        Error::Config(e.to_string())
    }
}

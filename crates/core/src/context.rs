//! Per-call context
//!
//! A `CallContext` carries the deadline for one logical operation. It is
//! passed to every store primitive so the store can bound its own waits
//! (socket timeouts, etc). This layer never retries and never waits on
//! its own; the deadline is purely forwarded.

use crate::error::StoreError;
use std::time::{Duration, Instant};

/// Default per-operation timeout used when none is configured.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(5);

/// Deadline carried through store primitive calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    deadline: Option<Instant>,
}

impl CallContext {
    /// Create a context whose deadline is `timeout` from now.
    ///
    /// `None` means no deadline; prefer an explicit timeout.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            deadline: timeout.map(|t| Instant::now() + t),
        }
    }

    /// Create a context with an explicit deadline.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
        }
    }

    /// Create a context without a deadline.
    ///
    /// The store's own defaults then decide how long a call may block.
    pub fn unbounded() -> Self {
        Self { deadline: None }
    }

    /// The absolute deadline, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline.
    ///
    /// Returns `None` for unbounded contexts and `Some(Duration::ZERO)` once
    /// the deadline has passed.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// Whether the deadline has passed
    pub fn is_expired(&self) -> bool {
        matches!(self.remaining(), Some(r) if r.is_zero())
    }

    /// Fail with `DeadlineExceeded` if the deadline has already passed.
    ///
    /// Stores call this before sending `op`.
    pub fn check(&self, op: &'static str) -> Result<(), StoreError> {
        if self.is_expired() {
            Err(StoreError::DeadlineExceeded { op })
        } else {
            Ok(())
        }
    }
}

impl Default for CallContext {
    fn default() -> Self {
        Self::new(Some(DEFAULT_CALL_TIMEOUT))
    }
}

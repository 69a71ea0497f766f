//! The store collaborator contract
//!
//! A `SetStore` exposes six atomic primitives against a named set. Each
//! call is atomic on its own; nothing is promised across calls. Values are
//! passed through verbatim: callers canonicalize before calling.
//!
//! | Method | Redis analogue | Atomicity |
//! |--------|----------------|-----------|
//! | `add_member` | `SADD` | single command |
//! | `remove_member` | `SREM` | single command |
//! | `is_member` | `SISMEMBER` | single command |
//! | `all_members` | `SMEMBERS` | snapshot at call time |
//! | `cardinality` | `SCARD` | snapshot at call time |
//! | `delete_key` | `DEL` | single command |
//!
//! Missing keys behave as empty sets. The first `add_member` creates the
//! set; removing its last member or `delete_key` destroys it.

use crate::context::CallContext;
use crate::error::StoreResult;

/// Remote set store with per-command atomicity
///
/// Implementations must be safe to share between many handles and threads.
pub trait SetStore: Send + Sync {
    /// Add `value` to the set at `key`. Returns `true` if it was not present.
    fn add_member(&self, ctx: &CallContext, key: &str, value: &str) -> StoreResult<bool>;

    /// Remove `value` from the set at `key`. Returns `true` if it was present.
    fn remove_member(&self, ctx: &CallContext, key: &str, value: &str) -> StoreResult<bool>;

    /// Check whether `value` is in the set at `key`.
    fn is_member(&self, ctx: &CallContext, key: &str, value: &str) -> StoreResult<bool>;

    /// All members of the set at `key`, in store order.
    fn all_members(&self, ctx: &CallContext, key: &str) -> StoreResult<Vec<String>>;

    /// Number of members in the set at `key`.
    fn cardinality(&self, ctx: &CallContext, key: &str) -> StoreResult<usize>;

    /// Delete the set at `key`. Returns `true` if it existed.
    fn delete_key(&self, ctx: &CallContext, key: &str) -> StoreResult<bool>;
}

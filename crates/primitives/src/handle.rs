//! SetHandle: a lock-guarded proxy for one remote set
//!
//! ## Design
//!
//! A `SetHandle` binds a shared store to one key. It never owns the store:
//! many handles over different keys (or the same key) share one
//! `Arc<dyn SetStore>`.
//!
//! Every member is canonicalized (trimmed, lower-cased) before it is sent,
//! so `"Rust"` and `" rust"` are the same member and callers' casing is
//! not preserved.
//!
//! ## Two tiers
//!
//! | Fail-closed | Fallible | On store error |
//! |-------------|----------|----------------|
//! | `has` | `try_has` | `false` |
//! | `insert` | `try_insert` | ignored |
//! | `insert_many` | `try_insert_many` | element skipped |
//! | `remove` | `try_remove` | ignored |
//! | `slice` | `try_slice` | empty |
//! | `len` | `try_len` | 0 |
//! | `union` / `subtract` / `intersect` | `try_*` | step skipped |
//! | `close` | `try_close` | ignored |
//!
//! The fail-closed tier logs every swallowed error at `warn` and cannot
//! report it to the caller. The `try_*` tier returns the first error and
//! stops; prefer it wherever the caller can act on failure.
//!
//! ## Locking
//!
//! Each handle holds one non-reentrant mutex. A public call takes it once
//! for its whole duration; composite operations run their per-element steps
//! through unlocked helpers. The `other` argument of `union`, `subtract` and
//! `intersect` is never locked, so `a.union(&a)` is safe, and a concurrent
//! writer on `other` yields an unspecified interleaving, not a snapshot.
//!
//! The lock only orders calls made through this handle. Other handles on
//! the same key, in this process or elsewhere, are not excluded.
//!
//! ## Deadlines
//!
//! Each public call creates one `CallContext` from the handle's call
//! timeout and forwards it to every primitive the call issues. Composite
//! operations share that single deadline.

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use stringset_core::{
    canonicalize, CallContext, SetStore, StoreError, StoreResult, DEFAULT_CALL_TIMEOUT,
};
use tracing::warn;

/// Local proxy for the remote set stored at one key
///
/// # Example
///
/// ```ignore
/// let store: Arc<dyn SetStore> = Arc::new(MemoryStore::new());
/// let tags = SetHandle::with_members(store, "tags", ["Rust", "rust", "Go"]);
///
/// assert!(tags.has("RUST"));
/// assert_eq!(tags.len(), 2);
/// ```
pub struct SetHandle {
    store: Arc<dyn SetStore>,
    key: String,
    call_timeout: Option<Duration>,
    lock: Mutex<()>,
}

impl SetHandle {
    /// Bind a handle to `key`. Nothing is sent to the store.
    pub fn new(store: Arc<dyn SetStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            call_timeout: Some(DEFAULT_CALL_TIMEOUT),
            lock: Mutex::new(()),
        }
    }

    /// Bind a handle to `key` and insert `initial` (fail-closed).
    pub fn with_members<I>(store: Arc<dyn SetStore>, key: impl Into<String>, initial: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let handle = Self::new(store, key);
        handle.insert_many(initial);
        handle
    }

    /// Set the per-operation deadline. `None` leaves waits to the store.
    pub fn call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// The bound key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The shared store
    pub fn store(&self) -> &Arc<dyn SetStore> {
        &self.store
    }

    /// The configured per-operation timeout
    pub fn timeout(&self) -> Option<Duration> {
        self.call_timeout
    }

    // =========================================================================
    // Fallible API
    // =========================================================================

    /// Check membership. One `is_member` primitive.
    pub fn try_has(&self, element: &str) -> StoreResult<bool> {
        let _guard = self.lock.lock();
        self.contains_unlocked(&self.context(), element)
    }

    /// Insert an element. Returns `true` if it was not already present.
    pub fn try_insert(&self, element: &str) -> StoreResult<bool> {
        let _guard = self.lock.lock();
        self.add_unlocked(&self.context(), element)
    }

    /// Insert every element under one lock acquisition.
    ///
    /// Each element is still its own remote primitive; the batch is not
    /// atomic in the store. Stops at the first failure, leaving earlier
    /// elements inserted. Returns the number of newly added members.
    pub fn try_insert_many<I>(&self, elements: I) -> StoreResult<usize>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let _guard = self.lock.lock();
        let ctx = self.context();
        let mut added = 0;
        for element in elements {
            if self.add_unlocked(&ctx, element.as_ref())? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Remove an element. Returns `true` if it was present.
    pub fn try_remove(&self, element: &str) -> StoreResult<bool> {
        let _guard = self.lock.lock();
        self.remove_unlocked(&self.context(), element)
    }

    /// All members, in store order.
    pub fn try_slice(&self) -> StoreResult<Vec<String>> {
        let _guard = self.lock.lock();
        self.members_unlocked(&self.context())
    }

    /// Member count.
    pub fn try_len(&self) -> StoreResult<usize> {
        let _guard = self.lock.lock();
        self.store.cardinality(&self.context(), &self.key)
    }

    /// Add every member of `other` to this set.
    ///
    /// Reads `other` once (unlocked), then inserts each member. Returns the
    /// number of members added.
    pub fn try_union(&self, other: &SetHandle) -> StoreResult<usize> {
        let _guard = self.lock.lock();
        let ctx = self.context();
        let mut added = 0;
        for member in other.members_unlocked(&ctx)? {
            if self.add_unlocked(&ctx, &member)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Remove every member of `other` from this set.
    ///
    /// Returns the number of members removed.
    pub fn try_subtract(&self, other: &SetHandle) -> StoreResult<usize> {
        let _guard = self.lock.lock();
        let ctx = self.context();
        let mut removed = 0;
        for member in other.members_unlocked(&ctx)? {
            if self.remove_unlocked(&ctx, &member)? {
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Keep only members also present in `other`.
    ///
    /// One membership query against `other` per member of this set.
    /// Returns the number of members removed.
    pub fn try_intersect(&self, other: &SetHandle) -> StoreResult<usize> {
        let _guard = self.lock.lock();
        let ctx = self.context();
        let mut removed = 0;
        for member in self.members_unlocked(&ctx)? {
            if !other.contains_unlocked(&ctx, &member)? && self.remove_stored(&ctx, &member)? {
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Delete the remote set. Returns `true` if it existed.
    ///
    /// The handle stays usable; later inserts recreate the set.
    pub fn try_close(&self) -> StoreResult<bool> {
        let _guard = self.lock.lock();
        self.store.delete_key(&self.context(), &self.key)
    }

    // =========================================================================
    // Fail-closed API
    // =========================================================================

    /// Check membership; `false` on store error.
    pub fn has(&self, element: &str) -> bool {
        self.try_has(element).unwrap_or_else(|e| {
            self.log_failure("has", Some(element), &e);
            false
        })
    }

    /// Insert an element; store errors are logged and dropped.
    pub fn insert(&self, element: &str) {
        if let Err(e) = self.try_insert(element) {
            self.log_failure("insert", Some(element), &e);
        }
    }

    /// Insert every element under one lock acquisition.
    ///
    /// A failed element is logged and skipped; the rest are still sent.
    pub fn insert_many<I>(&self, elements: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let _guard = self.lock.lock();
        let ctx = self.context();
        for element in elements {
            self.add_logged(&ctx, "insert_many", element.as_ref());
        }
    }

    /// Remove an element; store errors are logged and dropped.
    pub fn remove(&self, element: &str) {
        if let Err(e) = self.try_remove(element) {
            self.log_failure("remove", Some(element), &e);
        }
    }

    /// All members; empty on store error.
    pub fn slice(&self) -> Vec<String> {
        self.try_slice().unwrap_or_else(|e| {
            self.log_failure("slice", None, &e);
            Vec::new()
        })
    }

    /// Member count; 0 on store error.
    pub fn len(&self) -> usize {
        self.try_len().unwrap_or_else(|e| {
            self.log_failure("len", None, &e);
            0
        })
    }

    /// Whether `len()` is zero
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add every member of `other`; best-effort merge.
    ///
    /// If `other` cannot be read, nothing is added. Failed inserts are
    /// logged and skipped.
    pub fn union(&self, other: &SetHandle) {
        let _guard = self.lock.lock();
        let ctx = self.context();
        for member in other.members_logged(&ctx, "union") {
            self.add_logged(&ctx, "union", &member);
        }
    }

    /// Remove every member of `other`; best-effort.
    pub fn subtract(&self, other: &SetHandle) {
        let _guard = self.lock.lock();
        let ctx = self.context();
        for member in other.members_logged(&ctx, "subtract") {
            if let Err(e) = self.remove_unlocked(&ctx, &member) {
                self.log_failure("subtract", Some(&member), &e);
            }
        }
    }

    /// Keep only members also present in `other`; best-effort.
    ///
    /// A member is removed only when `other` positively reports it absent;
    /// a failed membership check keeps the member.
    pub fn intersect(&self, other: &SetHandle) {
        let _guard = self.lock.lock();
        let ctx = self.context();
        for member in self.members_logged(&ctx, "intersect") {
            match other.contains_unlocked(&ctx, &member) {
                Ok(true) => {}
                Ok(false) => {
                    if let Err(e) = self.remove_stored(&ctx, &member) {
                        self.log_failure("intersect", Some(&member), &e);
                    }
                }
                Err(e) => other.log_failure("intersect", Some(&member), &e),
            }
        }
    }

    /// Delete the remote set; store errors are logged and dropped.
    ///
    /// Irreversible. Calling it twice is harmless.
    pub fn close(&self) {
        if let Err(e) = self.try_close() {
            self.log_failure("close", None, &e);
        }
    }

    // =========================================================================
    // Unlocked steps (caller holds `self.lock`, or is reading `other`)
    // =========================================================================

    fn context(&self) -> CallContext {
        CallContext::new(self.call_timeout)
    }

    pub(crate) fn add_unlocked(&self, ctx: &CallContext, element: &str) -> StoreResult<bool> {
        self.store.add_member(ctx, &self.key, &canonicalize(element))
    }

    pub(crate) fn add_logged(&self, ctx: &CallContext, op: &'static str, element: &str) {
        if let Err(e) = self.add_unlocked(ctx, element) {
            self.log_failure(op, Some(element), &e);
        }
    }

    fn remove_unlocked(&self, ctx: &CallContext, element: &str) -> StoreResult<bool> {
        self.store.remove_member(ctx, &self.key, &canonicalize(element))
    }

    /// Remove `member` exactly as the store returned it.
    fn remove_stored(&self, ctx: &CallContext, member: &str) -> StoreResult<bool> {
        self.store.remove_member(ctx, &self.key, member)
    }

    fn contains_unlocked(&self, ctx: &CallContext, element: &str) -> StoreResult<bool> {
        self.store.is_member(ctx, &self.key, &canonicalize(element))
    }

    fn members_unlocked(&self, ctx: &CallContext) -> StoreResult<Vec<String>> {
        self.store.all_members(ctx, &self.key)
    }

    fn members_logged(&self, ctx: &CallContext, op: &'static str) -> Vec<String> {
        self.members_unlocked(ctx).unwrap_or_else(|e| {
            self.log_failure(op, None, &e);
            Vec::new()
        })
    }

    pub(crate) fn log_failure(&self, op: &'static str, element: Option<&str>, error: &StoreError) {
        warn!(
            key = %self.key,
            op,
            element = ?element,
            error = %error,
            "set operation failed, continuing fail-closed"
        );
    }
}

impl fmt::Debug for SetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetHandle")
            .field("key", &self.key)
            .field("call_timeout", &self.call_timeout)
            .finish_non_exhaustive()
    }
}

//! SetHandle Comprehensive Test Suite
//!
//! Verifies the handle's contract on top of a store that is atomic only per
//! primitive:
//!
//! 1. Canonical form: members are trimmed and lower-cased
//! 2. Set algebra: union / subtract / intersect results
//! 3. Failure policy: fail-closed tier vs `try_*` tier
//! 4. Locking: composite operations are not interleaved on one handle
//! 5. Deadlines are forwarded to every primitive
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test handle_comprehensive
//!
//! # Live Redis (needs a server)
//! STRINGSET_REDIS_URL=redis://127.0.0.1:6379 \
//!     cargo test --test handle_comprehensive redis_live -- --ignored
//! ```

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

use stringset::{CallContext, MemoryStore, SetHandle, SetStore, StoreError, StringSets};

pub mod codec;
pub mod properties;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// Create an in-process store and a facade over it
pub fn create_sets() -> (Arc<MemoryStore>, StringSets) {
    let mem = Arc::new(MemoryStore::new());
    let sets = StringSets::with_store(mem.clone());
    (mem, sets)
}

/// Sort members for order-independent comparison
pub fn sorted(mut members: Vec<String>) -> Vec<String> {
    members.sort();
    members
}

/// Owned, sorted member list from literals
pub fn members(items: &[&str]) -> Vec<String> {
    sorted(items.iter().map(|s| s.to_string()).collect())
}

/// One primitive call observed by `RecordingStore`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub op: &'static str,
    pub key: String,
    pub value: Option<String>,
    pub deadline_set: bool,
}

/// Store wrapper that records every primitive and can slow them down
pub struct RecordingStore {
    inner: MemoryStore,
    calls: Mutex<Vec<Call>>,
    delay: Option<Duration>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            calls: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new()
        }
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn count(&self, op: &str) -> usize {
        self.calls.lock().iter().filter(|c| c.op == op).count()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    fn record(&self, ctx: &CallContext, op: &'static str, key: &str, value: Option<&str>) {
        self.calls.lock().push(Call {
            op,
            key: key.to_string(),
            value: value.map(str::to_string),
            deadline_set: ctx.deadline().is_some(),
        });
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
    }
}

impl SetStore for RecordingStore {
    fn add_member(&self, ctx: &CallContext, key: &str, value: &str) -> Result<bool, StoreError> {
        self.record(ctx, "SADD", key, Some(value));
        self.inner.add_member(ctx, key, value)
    }

    fn remove_member(&self, ctx: &CallContext, key: &str, value: &str) -> Result<bool, StoreError> {
        self.record(ctx, "SREM", key, Some(value));
        self.inner.remove_member(ctx, key, value)
    }

    fn is_member(&self, ctx: &CallContext, key: &str, value: &str) -> Result<bool, StoreError> {
        self.record(ctx, "SISMEMBER", key, Some(value));
        self.inner.is_member(ctx, key, value)
    }

    fn all_members(&self, ctx: &CallContext, key: &str) -> Result<Vec<String>, StoreError> {
        self.record(ctx, "SMEMBERS", key, None);
        self.inner.all_members(ctx, key)
    }

    fn cardinality(&self, ctx: &CallContext, key: &str) -> Result<usize, StoreError> {
        self.record(ctx, "SCARD", key, None);
        self.inner.cardinality(ctx, key)
    }

    fn delete_key(&self, ctx: &CallContext, key: &str) -> Result<bool, StoreError> {
        self.record(ctx, "DEL", key, None);
        self.inner.delete_key(ctx, key)
    }
}

/// Handle over a fresh `RecordingStore`
pub fn recorded_handle(key: &str) -> (Arc<RecordingStore>, SetHandle) {
    let store = Arc::new(RecordingStore::new());
    let handle = SetHandle::new(store.clone(), key);
    (store, handle)
}

//! In-process set store
//!
//! Replaces a remote store with DashMap + FxHashSet while keeping the
//! remote contract: every primitive is atomic for its key, nothing is
//! atomic across primitives, and empty sets do not exist.
//!
//! # Design
//!
//! - DashMap: sharded by key, so different sets never contend
//! - FxHashSet: O(1) membership, iteration order unspecified
//! - Outage switch: `set_unavailable(true)` makes every primitive fail, for
//!   exercising fail-closed callers without a network
//!
//! # Example
//!
//! ```ignore
//! use stringset_storage::MemoryStore;
//! use std::sync::Arc;
//!
//! let store = Arc::new(MemoryStore::new());
//! ```

use dashmap::DashMap;
use rustc_hash::FxHashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use stringset_core::{CallContext, SetStore, StoreError, StoreResult};

/// Sharded in-memory set store
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Sets by key; an entry is never left holding an empty set
    sets: DashMap<String, FxHashSet<String>>,
    /// Simulated outage flag
    unavailable: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with expected number of keys
    pub fn with_capacity(num_keys: usize) -> Self {
        Self {
            sets: DashMap::with_capacity(num_keys),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Check if a set exists at `key`
    pub fn contains_key(&self, key: &str) -> bool {
        self.sets.contains_key(key)
    }

    /// Number of non-empty sets held
    pub fn key_count(&self) -> usize {
        self.sets.len()
    }

    /// Simulate the store going down (or coming back).
    ///
    /// While unavailable, every primitive returns `StoreError::Unavailable`
    /// and leaves the data untouched.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Whether the simulated outage is active
    pub fn is_unavailable(&self) -> bool {
        self.unavailable.load(Ordering::SeqCst)
    }

    fn guard(&self, ctx: &CallContext, op: &'static str) -> StoreResult<()> {
        if self.is_unavailable() {
            return Err(StoreError::Unavailable(format!(
                "memory store is offline ({})",
                op
            )));
        }
        ctx.check(op)
    }
}

impl SetStore for MemoryStore {
    fn add_member(&self, ctx: &CallContext, key: &str, value: &str) -> StoreResult<bool> {
        self.guard(ctx, "SADD")?;
        Ok(self
            .sets
            .entry(key.to_string())
            .or_default()
            .insert(value.to_string()))
    }

    fn remove_member(&self, ctx: &CallContext, key: &str, value: &str) -> StoreResult<bool> {
        self.guard(ctx, "SREM")?;
        let removed = match self.sets.get_mut(key) {
            Some(mut set) => set.remove(value),
            None => false,
        };
        // The shard guard above is released; re-check emptiness under the
        // shard lock so a concurrent add is never discarded.
        if removed {
            self.sets.remove_if(key, |_, set| set.is_empty());
        }
        Ok(removed)
    }

    fn is_member(&self, ctx: &CallContext, key: &str, value: &str) -> StoreResult<bool> {
        self.guard(ctx, "SISMEMBER")?;
        Ok(self
            .sets
            .get(key)
            .map_or(false, |set| set.contains(value)))
    }

    fn all_members(&self, ctx: &CallContext, key: &str) -> StoreResult<Vec<String>> {
        self.guard(ctx, "SMEMBERS")?;
        Ok(self
            .sets
            .get(key)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default())
    }

    fn cardinality(&self, ctx: &CallContext, key: &str) -> StoreResult<usize> {
        self.guard(ctx, "SCARD")?;
        Ok(self.sets.get(key).map_or(0, |set| set.len()))
    }

    fn delete_key(&self, ctx: &CallContext, key: &str) -> StoreResult<bool> {
        self.guard(ctx, "DEL")?;
        Ok(self.sets.remove(key).is_some())
    }
}

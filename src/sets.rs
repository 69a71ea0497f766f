//! Main entry point for stringset.
//!
//! This module provides `StringSets`, which owns one shared store
//! connection and hands out [`SetHandle`]s bound to it.

use crate::error::Result;
use std::sync::Arc;
use std::time::Duration;
use stringset_core::{SetStore, DEFAULT_CALL_TIMEOUT};
use stringset_primitives::{deduplicate_with_timeout, try_deduplicate, SetHandle};
use stringset_storage::{open_store, BackendKind, MemoryStore, StoreConfig};
use tracing::debug;

/// A shared store connection plus handle defaults.
///
/// Cheap to share by reference; every handle it creates holds its own
/// `Arc` to the store, so handles may outlive it.
///
/// # Example
///
/// ```ignore
/// use stringset::prelude::*;
///
/// // In-process store, no network
/// let sets = StringSets::ephemeral();
///
/// let tags = sets.set("tags");
/// tags.insert("Rust");
/// assert!(tags.has("rust"));
/// ```
pub struct StringSets {
    store: Arc<dyn SetStore>,
    call_timeout: Option<Duration>,
}

impl StringSets {
    /// Open the store described by `config`.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let store = open_store(config)?;
        debug!(backend = ?config.backend, "opened set store");
        Ok(Self {
            store,
            call_timeout: config.call_timeout(),
        })
    }

    /// Open the store described by `STRINGSET_*` environment variables.
    ///
    /// See [`StoreConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self> {
        Self::open(&StoreConfig::from_env()?)
    }

    /// Use an in-process store with no network I/O.
    ///
    /// All data is lost when the last handle is dropped. Use for tests and
    /// single-process deployments.
    pub fn ephemeral() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// Wrap an existing store (dependency injection).
    pub fn with_store(store: Arc<dyn SetStore>) -> Self {
        Self {
            store,
            call_timeout: Some(DEFAULT_CALL_TIMEOUT),
        }
    }

    /// Create a builder for store configuration.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let sets = StringSets::builder()
    ///     .redis("redis://localhost:6379")
    ///     .call_timeout(Duration::from_millis(500))
    ///     .open()?;
    /// ```
    pub fn builder() -> StringSetsBuilder {
        StringSetsBuilder::new()
    }

    /// The shared store
    pub fn store(&self) -> &Arc<dyn SetStore> {
        &self.store
    }

    /// Per-operation timeout given to new handles
    pub fn call_timeout(&self) -> Option<Duration> {
        self.call_timeout
    }

    /// Bind a handle to `key`.
    pub fn set(&self, key: impl Into<String>) -> SetHandle {
        SetHandle::new(Arc::clone(&self.store), key).call_timeout(self.call_timeout)
    }

    /// Bind a handle to `key` and insert `initial` (fail-closed).
    pub fn set_with<I>(&self, key: impl Into<String>, initial: I) -> SetHandle
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let handle = self.set(key);
        handle.insert_many(initial);
        handle
    }

    /// Deduplicate `input` through a transient set at `key` (fail-closed).
    ///
    /// The key is deleted afterwards.
    pub fn deduplicate<I>(&self, key: impl Into<String>, input: I) -> Vec<String>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        deduplicate_with_timeout(Arc::clone(&self.store), key, input, self.call_timeout)
    }

    /// Deduplicate `input`, returning the first store error.
    pub fn try_deduplicate<I>(&self, key: impl Into<String>, input: I) -> Result<Vec<String>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Ok(try_deduplicate(
            Arc::clone(&self.store),
            key,
            input,
            self.call_timeout,
        )?)
    }
}

impl std::fmt::Debug for StringSets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringSets")
            .field("call_timeout", &self.call_timeout)
            .finish_non_exhaustive()
    }
}

/// Builder for store configuration.
///
/// # Example
///
/// ```ignore
/// // Production: shared Redis, namespaced keys
/// let sets = StringSets::builder()
///     .redis("redis://cache:6379/0")
///     .namespace("billing")
///     .open()?;
///
/// // Tests: in-process
/// let sets = StringSets::builder().memory().open()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct StringSetsBuilder {
    config: StoreConfig,
}

impl StringSetsBuilder {
    /// Create a new builder with default settings (memory backend).
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn from_config(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Use the in-process store.
    pub fn memory(mut self) -> Self {
        self.config.backend = BackendKind::Memory;
        self
    }

    /// Use Redis at `url`.
    pub fn redis(mut self, url: impl Into<String>) -> Self {
        self.config.backend = BackendKind::Redis;
        self.config.redis.url = url.into();
        self
    }

    /// Prefix every Redis key with `namespace:`.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.redis.namespace = Some(namespace.into());
        self
    }

    /// Per-operation deadline for handles.
    ///
    /// Anything under one millisecond disables the deadline, same as
    /// [`no_call_timeout`](Self::no_call_timeout).
    pub fn call_timeout(mut self, timeout: Duration) -> Self {
        let ms = timeout.as_millis() as u64;
        self.config.call_timeout_ms = (ms > 0).then_some(ms);
        self
    }

    /// Disable the per-operation deadline.
    ///
    /// Waits are then bounded only by the store's own behavior.
    pub fn no_call_timeout(mut self) -> Self {
        self.config.call_timeout_ms = None;
        self
    }

    /// Upper bound for opening a Redis connection.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.redis.connect_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Idle Redis connections kept for reuse.
    pub fn max_idle_connections(mut self, max: usize) -> Self {
        self.config.redis.max_idle_connections = max;
        self
    }

    /// The configuration built so far
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Open the configured store.
    pub fn open(self) -> Result<StringSets> {
        StringSets::open(&self.config)
    }
}

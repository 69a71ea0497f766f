//! Backend configuration
//!
//! ## Purpose
//! Selects and configures the `SetStore` behind every handle, either in
//! code, from a deserialized config file, or from the environment.
//!
//! ## Environment Variables
//! - `STRINGSET_BACKEND`: "memory" (default) | "redis"
//! - `STRINGSET_REDIS_URL`: Redis server URL (default: "redis://127.0.0.1:6379")
//! - `STRINGSET_REDIS_NAMESPACE`: Key prefix for isolation (default: none)
//! - `STRINGSET_CALL_TIMEOUT_MS`: Per-operation deadline; "0" disables it
//!   (default: 5000)
//!
//! ## Example
//! ```bash
//! export STRINGSET_BACKEND=redis
//! export STRINGSET_REDIS_URL=redis://localhost:6379
//! export STRINGSET_REDIS_NAMESPACE=myapp
//! ```

use crate::memory::MemoryStore;
use crate::redis::RedisStore;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use stringset_core::{SetStore, StoreError, DEFAULT_CALL_TIMEOUT};
use thiserror::Error;

/// Default Redis URL
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 2000;
const DEFAULT_MAX_IDLE_CONNECTIONS: usize = 8;

/// Invalid configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An environment variable held an unusable value
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue {
        /// Variable name
        var: &'static str,
        /// Offending value
        value: String,
    },
}

/// Which store implementation to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// In-process `MemoryStore`
    #[default]
    Memory,
    /// `RedisStore`
    Redis,
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(BackendKind::Memory),
            "redis" => Ok(BackendKind::Redis),
            _ => Err(ConfigError::InvalidValue {
                var: "STRINGSET_BACKEND",
                value: s.to_string(),
            }),
        }
    }
}

/// Redis connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    /// Server URL, e.g. "redis://localhost:6379/0"
    pub url: String,
    /// Optional key prefix
    pub namespace: Option<String>,
    /// Upper bound for opening a new connection
    pub connect_timeout_ms: u64,
    /// Idle connections kept for reuse
    pub max_idle_connections: usize,
}

impl RedisConfig {
    /// Settings for `url` with defaults for everything else
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_REDIS_URL.to_string(),
            namespace: None,
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            max_idle_connections: DEFAULT_MAX_IDLE_CONNECTIONS,
        }
    }
}

/// Store selection plus the per-operation deadline handed to handles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Backend to open
    pub backend: BackendKind,
    /// Redis settings (ignored by the memory backend)
    pub redis: RedisConfig,
    /// Per-operation timeout in milliseconds; `None` or `0` disables the deadline
    pub call_timeout_ms: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Memory,
            redis: RedisConfig::default(),
            call_timeout_ms: Some(DEFAULT_CALL_TIMEOUT.as_millis() as u64),
        }
    }
}

impl StoreConfig {
    /// Read configuration from `STRINGSET_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// Unset variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(backend) = lookup("STRINGSET_BACKEND") {
            config.backend = backend.parse()?;
        }
        if let Some(url) = lookup("STRINGSET_REDIS_URL") {
            config.redis.url = url;
        }
        if let Some(namespace) = lookup("STRINGSET_REDIS_NAMESPACE") {
            config.redis.namespace = Some(namespace).filter(|ns| !ns.is_empty());
        }
        if let Some(raw) = lookup("STRINGSET_CALL_TIMEOUT_MS") {
            let ms: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                var: "STRINGSET_CALL_TIMEOUT_MS",
                value: raw.clone(),
            })?;
            config.call_timeout_ms = (ms > 0).then_some(ms);
        }

        Ok(config)
    }

    /// Per-operation timeout as a `Duration`; `0` means no deadline
    pub fn call_timeout(&self) -> Option<Duration> {
        self.call_timeout_ms
            .filter(|&ms| ms > 0)
            .map(Duration::from_millis)
    }
}

/// Open the configured backend as a shareable store
pub fn open_store(config: &StoreConfig) -> Result<Arc<dyn SetStore>, StoreError> {
    match config.backend {
        BackendKind::Memory => Ok(Arc::new(MemoryStore::new())),
        BackendKind::Redis => Ok(Arc::new(RedisStore::open(&config.redis)?)),
    }
}

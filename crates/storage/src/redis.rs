//! Redis-backed set store
//!
//! ## Purpose
//! Maps the six set primitives onto native Redis set commands
//! (`SADD`, `SREM`, `SISMEMBER`, `SMEMBERS`, `SCARD`, `DEL`). Redis runs
//! each command atomically; nothing here groups commands.
//!
//! ## Connections
//! - Synchronous `redis::Connection`s, kept in a small idle pool so many
//!   handles and threads can share one `RedisStore`
//! - Each command gets read/write timeouts from the caller's
//!   `CallContext`; an expired context fails before anything is sent
//! - A connection that saw an I/O error or timeout is discarded, never
//!   returned to the pool (its reply stream may be out of sync)
//! - No retries
//!
//! ## Usage
//! ```rust,no_run
//! use stringset_core::{CallContext, SetStore};
//! use stringset_storage::{RedisConfig, RedisStore};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = RedisStore::open(&RedisConfig::new("redis://localhost:6379"))?;
//! store.add_member(&CallContext::default(), "tags", "rust")?;
//! # Ok(())
//! # }
//! ```

use crate::config::RedisConfig;
use parking_lot::Mutex;
use redis::{Client, Commands, Connection, RedisError, RedisResult};
use std::borrow::Cow;
use std::time::Duration;
use stringset_core::{CallContext, SetStore, StoreError, StoreResult};
use tracing::debug;

/// Redis set store over pooled synchronous connections
pub struct RedisStore {
    client: Client,
    /// Key prefix (e.g. "myapp"), joined to keys with ':'
    namespace: Option<String>,
    connect_timeout: Duration,
    max_idle: usize,
    idle: Mutex<Vec<Connection>>,
}

impl RedisStore {
    /// Create a store for the configured server.
    ///
    /// Only the URL is validated here; connections are opened lazily on
    /// first use.
    ///
    /// ## Errors
    /// - [`StoreError::Connection`]: if the URL cannot be parsed
    pub fn open(config: &RedisConfig) -> StoreResult<Self> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| StoreError::Connection(format!("invalid redis url: {}", e)))?;

        Ok(Self {
            client,
            namespace: config.namespace.clone().filter(|ns| !ns.is_empty()),
            connect_timeout: Duration::from_millis(config.connect_timeout_ms),
            max_idle: config.max_idle_connections,
            idle: Mutex::new(Vec::new()),
        })
    }

    /// Create a store for `url` with default settings
    pub fn connect(url: &str) -> StoreResult<Self> {
        Self::open(&RedisConfig::new(url))
    }

    /// The configured key prefix
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Number of pooled idle connections
    pub fn idle_connections(&self) -> usize {
        self.idle.lock().len()
    }

    /// Key as sent to Redis
    fn full_key<'a>(&self, key: &'a str) -> Cow<'a, str> {
        match &self.namespace {
            Some(ns) => Cow::Owned(format!("{}:{}", ns, key)),
            None => Cow::Borrowed(key),
        }
    }

    fn checkout(&self, ctx: &CallContext, op: &'static str) -> StoreResult<Connection> {
        if let Some(conn) = self.idle.lock().pop() {
            return Ok(conn);
        }

        let timeout = match ctx.remaining() {
            Some(remaining) => remaining.min(self.connect_timeout),
            None => self.connect_timeout,
        };
        if timeout.is_zero() {
            return Err(StoreError::DeadlineExceeded { op });
        }

        debug!(op, timeout_ms = timeout.as_millis() as u64, "opening redis connection");
        self.client
            .get_connection_with_timeout(timeout)
            .map_err(|e| map_error(op, e))
    }

    fn checkin(&self, conn: Connection) {
        let mut idle = self.idle.lock();
        if idle.len() < self.max_idle {
            idle.push(conn);
        }
    }

    /// Run one command on a pooled connection under the context's deadline
    fn run<T>(
        &self,
        ctx: &CallContext,
        op: &'static str,
        command: impl FnOnce(&mut Connection) -> RedisResult<T>,
    ) -> StoreResult<T> {
        ctx.check(op)?;
        let mut conn = self.checkout(ctx, op)?;

        // None clears any timeout left over from a previous borrower.
        let remaining = ctx.remaining();
        if remaining == Some(Duration::ZERO) {
            self.checkin(conn);
            return Err(StoreError::DeadlineExceeded { op });
        }
        if let Err(e) = conn
            .set_read_timeout(remaining)
            .and_then(|_| conn.set_write_timeout(remaining))
        {
            return Err(map_error(op, e));
        }

        match command(&mut conn) {
            Ok(value) => {
                self.checkin(conn);
                Ok(value)
            }
            Err(e) => {
                if is_poisoning(&e) {
                    debug!(op, error = %e, "discarding redis connection");
                } else {
                    self.checkin(conn);
                }
                Err(map_error(op, e))
            }
        }
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("namespace", &self.namespace)
            .field("connect_timeout", &self.connect_timeout)
            .field("max_idle", &self.max_idle)
            .field("idle", &self.idle_connections())
            .finish()
    }
}

/// Errors after which a connection must not be reused
fn is_poisoning(e: &RedisError) -> bool {
    e.is_io_error() || e.is_timeout() || e.is_connection_dropped()
}

fn map_error(op: &'static str, e: RedisError) -> StoreError {
    if e.is_timeout() {
        StoreError::DeadlineExceeded { op }
    } else if e.is_connection_refusal() || e.is_connection_dropped() || e.is_io_error() {
        StoreError::Connection(format!("{}: {}", op, e))
    } else {
        StoreError::command(op, e.to_string())
    }
}

impl SetStore for RedisStore {
    fn add_member(&self, ctx: &CallContext, key: &str, value: &str) -> StoreResult<bool> {
        let key = self.full_key(key);
        self.run(ctx, "SADD", |conn| conn.sadd::<_, _, usize>(&*key, value))
            .map(|added| added > 0)
    }

    fn remove_member(&self, ctx: &CallContext, key: &str, value: &str) -> StoreResult<bool> {
        let key = self.full_key(key);
        self.run(ctx, "SREM", |conn| conn.srem::<_, _, usize>(&*key, value))
            .map(|removed| removed > 0)
    }

    fn is_member(&self, ctx: &CallContext, key: &str, value: &str) -> StoreResult<bool> {
        let key = self.full_key(key);
        self.run(ctx, "SISMEMBER", |conn| {
            conn.sismember::<_, _, bool>(&*key, value)
        })
    }

    fn all_members(&self, ctx: &CallContext, key: &str) -> StoreResult<Vec<String>> {
        let key = self.full_key(key);
        self.run(ctx, "SMEMBERS", |conn| {
            conn.smembers::<_, Vec<String>>(&*key)
        })
    }

    fn cardinality(&self, ctx: &CallContext, key: &str) -> StoreResult<usize> {
        let key = self.full_key(key);
        self.run(ctx, "SCARD", |conn| conn.scard::<_, usize>(&*key))
    }

    fn delete_key(&self, ctx: &CallContext, key: &str) -> StoreResult<bool> {
        let key = self.full_key(key);
        self.run(ctx, "DEL", |conn| conn.del::<_, usize>(&*key))
            .map(|deleted| deleted > 0)
    }
}

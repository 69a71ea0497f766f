//! Storage backends for stringset
//!
//! This crate implements the `SetStore` contract twice:
//! - MemoryStore: in-process sets on DashMap, with outage injection
//! - RedisStore: native Redis sets over pooled synchronous connections
//!
//! `StoreConfig` selects and configures a backend, from code, from a
//! serde-readable config file, or from `STRINGSET_*` environment variables.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod memory;
pub mod redis;

pub use config::{open_store, BackendKind, ConfigError, RedisConfig, StoreConfig};
pub use memory::MemoryStore;
pub use self::redis::RedisStore;

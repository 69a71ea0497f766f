//! # stringset
//!
//! Mutex-guarded string sets backed by a remote key-value store's native
//! set type.
//!
//! A [`SetHandle`] treats one remote set as a local collection: membership,
//! insertion, removal, case-folding dedup and set algebra. Members are
//! canonicalized (trimmed, lower-cased) before they reach the store.
//!
//! ## Quick Start
//!
//! ```ignore
//! use stringset::prelude::*;
//!
//! let sets = StringSets::builder()
//!     .redis("redis://localhost:6379")
//!     .namespace("myapp")
//!     .open()?;
//!
//! let a = sets.set_with("team:a", ["Alice", "bob"]);
//! let b = sets.set_with("team:b", ["BOB", "carol"]);
//!
//! a.intersect(&b);
//! assert_eq!(a.slice(), vec!["bob"]);
//! ```
//!
//! ## Consistency
//!
//! Every store primitive is atomic. A handle's lock orders the calls made
//! through that handle and nothing else: other handles, processes and
//! machines may interleave with multi-step operations such as `union` or
//! `intersect`.
//!
//! ## Failure policy
//!
//! - `has`, `insert`, `slice`, ... : fail closed (absent / empty / 0) and log
//!   at `warn` via `tracing`
//! - `try_has`, `try_insert`, `try_slice`, ... : return [`StoreError`]

#![warn(missing_docs)]

mod error;
mod sets;

pub mod prelude;

// Re-export main entry points
pub use error::{Error, Result};
pub use sets::{StringSets, StringSetsBuilder};

// Re-export building blocks
pub use stringset_core::{canonicalize, CallContext, ParseError, SetStore, StoreError};
pub use stringset_primitives::{
    deduplicate, deduplicate_with_timeout, try_deduplicate, FlagValue, SetHandle,
};
pub use stringset_storage::{
    open_store, BackendKind, ConfigError, MemoryStore, RedisConfig, RedisStore, StoreConfig,
};

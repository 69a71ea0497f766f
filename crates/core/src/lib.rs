//! Core types for stringset
//!
//! This crate defines the pieces every layer agrees on:
//! - Canonical (lower-case) member form
//! - CallContext: per-call deadline forwarded to every store primitive
//! - StoreError / ParseError
//! - SetStore: the narrow command interface a remote set store exposes

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod canonical;
pub mod context;
pub mod error;
pub mod traits;

pub use canonical::canonicalize;
pub use context::{CallContext, DEFAULT_CALL_TIMEOUT};
pub use error::{ParseError, StoreError, StoreResult};
pub use traits::SetStore;

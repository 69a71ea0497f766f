//! Primitives for stringset
//!
//! - [`SetHandle`]: a local, lock-guarded proxy for one remote set
//! - [`FlagValue`]: encode/decode a set as comma-joined text so it can act
//!   as an accumulating command-line value
//! - [`deduplicate`]: case-folding dedup through a transient remote set
//!
//! # Consistency
//!
//! A handle serializes the operations issued *through it*. It does not
//! coordinate with other handles on the same key, in this process or any
//! other. Each store primitive is atomic; composite operations (`union`,
//! `subtract`, `intersect`, `insert_many`) are sequences of primitives and
//! can interleave with foreign writers.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod dedup;
pub mod handle;

pub use codec::FlagValue;
pub use dedup::{deduplicate, deduplicate_with_timeout, try_deduplicate};
pub use handle::SetHandle;

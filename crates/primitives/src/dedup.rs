//! Case-folding deduplication through a transient remote set
//!
//! Seeds a set at `key`, reads it back and deletes it. The key is touched
//! for the duration of the call; anything already stored under it is
//! merged into the result and then deleted, so use a key nothing else owns.

use crate::handle::SetHandle;
use std::sync::Arc;
use std::time::Duration;
use stringset_core::{SetStore, StoreResult, DEFAULT_CALL_TIMEOUT};

/// Deduplicate `input` case-insensitively (fail-closed).
///
/// Returns the distinct lower-cased elements in store order. Store errors
/// are logged; an unreachable store yields an empty result.
pub fn deduplicate<I>(store: Arc<dyn SetStore>, key: impl Into<String>, input: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    deduplicate_with_timeout(store, key, input, Some(DEFAULT_CALL_TIMEOUT))
}

/// [`deduplicate`] with an explicit per-operation deadline
pub fn deduplicate_with_timeout<I>(
    store: Arc<dyn SetStore>,
    key: impl Into<String>,
    input: I,
    timeout: Option<Duration>,
) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let set = SetHandle::new(store, key).call_timeout(timeout);
    set.insert_many(input);
    let members = set.slice();
    set.close();
    members
}

/// Deduplicate `input`, reporting the first store error.
///
/// The transient key is deleted even when seeding or reading fails.
pub fn try_deduplicate<I>(
    store: Arc<dyn SetStore>,
    key: impl Into<String>,
    input: I,
    timeout: Option<Duration>,
) -> StoreResult<Vec<String>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let set = SetHandle::new(store, key).call_timeout(timeout);
    let result = set.try_insert_many(input).and_then(|_| set.try_slice());
    let closed = set.try_close();
    let members = result?;
    closed?;
    Ok(members)
}

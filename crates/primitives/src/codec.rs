//! Textual codec for command-line accumulation
//!
//! `FlagValue` is the encode/decode pair a flag-parsing layer needs to use
//! a set as a repeatable, comma-separated option:
//!
//! ```text
//! --tag rust,go --tag "  Zig "   =>   {"rust", "go", "zig"}
//! ```
//!
//! Decoding accumulates: it never clears existing members.

use crate::handle::SetHandle;
use std::fmt;
use stringset_core::ParseError;

/// Encode a value as text and accumulate text into it
pub trait FlagValue {
    /// Render the current value.
    fn encode(&self) -> String;

    /// Parse `input` and merge it into the current value.
    fn decode(&self, input: &str) -> Result<(), ParseError>;
}

impl FlagValue for SetHandle {
    /// Members joined with ','. Order is whatever the store returns.
    fn encode(&self) -> String {
        self.slice().join(",")
    }

    /// Split on ',', trim each piece and insert it.
    ///
    /// Only an empty `input` is rejected. Empty pieces (`"a,,b"`) are inserted
    /// as the empty member; duplicates are inserted again (a no-op). Store
    /// failures are logged per piece, as with `insert`.
    fn decode(&self, input: &str) -> Result<(), ParseError> {
        if input.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        self.insert_many(input.split(',').map(str::trim));
        Ok(())
    }
}

impl fmt::Display for SetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

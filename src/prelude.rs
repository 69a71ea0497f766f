//! Convenient imports.
//!
//! ```ignore
//! use stringset::prelude::*;
//! ```

pub use crate::{Error, FlagValue, Result, SetHandle, SetStore, StringSets};

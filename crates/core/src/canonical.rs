//! Canonical member form
//!
//! Members are stored and compared lower-cased with surrounding whitespace
//! removed, so `"Rust"`, `" rust "` and `"RUST"` are one member. Callers'
//! casing is never preserved. No Unicode folding beyond lower-casing.

/// Convert an element into its canonical stored form.
#[inline]
pub fn canonicalize(element: &str) -> String {
    element.trim().to_lowercase()
}

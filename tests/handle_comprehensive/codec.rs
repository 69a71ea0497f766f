//! Textual Codec Tests
//!
//! Tests for FlagValue encode/decode and Display.

use crate::*;
use stringset::{FlagValue, ParseError};

#[test]
fn test_decode_empty_is_parse_error() {
    let (_, sets) = create_sets();
    let set = sets.set("flags");

    assert_eq!(set.decode(""), Err(ParseError::EmptyInput));
    let err: stringset::Error = set.decode("").unwrap_err().into();
    assert!(err.is_parse());
}

#[test]
fn test_decode_splits_and_trims() {
    let (_, sets) = create_sets();
    let set = sets.set("flags");

    set.decode("a, b ,c").unwrap();
    assert_eq!(sorted(set.slice()), members(&["a", "b", "c"]));
}

#[test]
fn test_decode_never_clears() {
    let (_, sets) = create_sets();
    let set = sets.set_with("flags", ["existing"]);

    set.decode("new").unwrap();
    set.decode("NEW,existing").unwrap();
    assert_eq!(sorted(set.slice()), members(&["existing", "new"]));
}

#[test]
fn test_decode_accepts_empty_tokens() {
    let (_, sets) = create_sets();
    let set = sets.set("flags");

    set.decode(",").unwrap();
    assert_eq!(set.slice(), vec![""]);
}

#[test]
fn test_decode_as_repeated_flag() {
    let (_, sets) = create_sets();
    let set = sets.set("flags");

    for arg in ["rust,go", "  Zig ", "GO"] {
        set.decode(arg).unwrap();
    }
    assert_eq!(sorted(set.slice()), members(&["go", "rust", "zig"]));
}

#[test]
fn test_encode_round_trips_membership() {
    let (_, sets) = create_sets();
    let set = sets.set_with("flags", ["x", "y", "z"]);

    let encoded = set.encode();
    let copy = sets.set("copy");
    copy.decode(&encoded).unwrap();
    assert_eq!(sorted(copy.slice()), sorted(set.slice()));
}

#[test]
fn test_encode_empty_set() {
    let (_, sets) = create_sets();
    assert_eq!(sets.set("flags").encode(), "");
}

#[test]
fn test_display_uses_encode() {
    let (_, sets) = create_sets();
    let set = sets.set_with("flags", ["solo"]);
    assert_eq!(format!("{}", set), "solo");
}

#[test]
fn test_decode_through_trait_object() {
    let (_, sets) = create_sets();
    let set = sets.set("flags");
    let value: &dyn FlagValue = &set;

    value.decode("a,b").unwrap();
    assert_eq!(set.len(), 2);
}

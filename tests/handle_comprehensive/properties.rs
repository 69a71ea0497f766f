//! Property Tests
//!
//! Case-insensitivity and length accounting over random inputs.

use crate::*;
use proptest::prelude::*;
use std::collections::HashSet;

fn element() -> impl Strategy<Value = String> {
    "[a-zA-Z]{1,6}"
}

proptest! {
    #[test]
    fn prop_insert_then_has_any_case(e in element()) {
        let (_, sets) = create_sets();
        let set = sets.set("prop");

        set.insert(&e);
        prop_assert!(set.has(&e));
        prop_assert!(set.has(&e.to_uppercase()));
        prop_assert!(set.has(&e.to_lowercase()));
    }

    #[test]
    fn prop_insert_remove_absent(e in element()) {
        let (_, sets) = create_sets();
        let set = sets.set("prop");

        set.insert(&e);
        set.remove(&e.to_uppercase());
        prop_assert!(!set.has(&e));
    }

    #[test]
    fn prop_len_matches_model(
        inserted in prop::collection::vec(element(), 0..20),
        removed in prop::collection::vec(element(), 0..10),
    ) {
        let (_, sets) = create_sets();
        let set = sets.set("prop");

        set.insert_many(&inserted);
        for r in &removed {
            set.remove(r);
        }

        let mut model: HashSet<String> = inserted.iter().map(|e| e.to_lowercase()).collect();
        for r in &removed {
            model.remove(&r.to_lowercase());
        }

        prop_assert_eq!(set.len(), model.len());
        let actual: HashSet<String> = set.slice().into_iter().collect();
        prop_assert_eq!(actual, model);
    }

    #[test]
    fn prop_algebra_matches_hashset(
        left in prop::collection::hash_set("[a-h]", 0..5),
        right in prop::collection::hash_set("[a-h]", 0..5),
    ) {
        let (_, sets) = create_sets();
        let l: HashSet<String> = left;
        let r: HashSet<String> = right;

        let b = sets.set_with("b", &r);

        let u = sets.set_with("u", &l);
        u.union(&b);
        let got: HashSet<String> = u.slice().into_iter().collect();
        prop_assert_eq!(got, l.union(&r).cloned().collect::<HashSet<_>>());

        let s = sets.set_with("s", &l);
        s.subtract(&b);
        let got: HashSet<String> = s.slice().into_iter().collect();
        prop_assert_eq!(got, l.difference(&r).cloned().collect::<HashSet<_>>());

        let i = sets.set_with("i", &l);
        i.intersect(&b);
        let got: HashSet<String> = i.slice().into_iter().collect();
        prop_assert_eq!(got, l.intersection(&r).cloned().collect::<HashSet<_>>());
    }

    #[test]
    fn prop_deduplicate_is_case_folded_set(input in prop::collection::vec(element(), 0..20)) {
        let (mem, sets) = create_sets();
        let out = sets.deduplicate("prop-dedup", &input);

        let expected: HashSet<String> = input.iter().map(|e| e.to_lowercase()).collect();
        prop_assert_eq!(out.len(), expected.len());
        prop_assert_eq!(out.into_iter().collect::<HashSet<_>>(), expected);
        prop_assert!(!mem.contains_key("prop-dedup"));
    }
}

// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for collection-backed derived fields
//!
//! Each property installs the factory on a fresh store holding a generated
//! record list and compares the derived value with a direct scan.

use super::strategies::{records, scalar};
use computable::computable::{find_by, includes, index_by};
use computable::{Store, Value};
use proptest::prelude::*;

fn store_with(records: Vec<Value>, field: &str, descriptor: computable::Descriptor) -> Store {
    Store::builder()
        .value("records", Value::Array(records))
        .derived(field, descriptor)
        .build()
        .expect("fresh store accepts distinct names")
}

proptest! {
    /// Property: find_by returns the first match, or Undefined when none match
    #[test]
    fn prop_find_by_first_match(items in records(), tag in 0u8..5) {
        let store = store_with(items.clone(), "found", find_by("records", "tag", tag));

        let expected = items
            .iter()
            .find(|item| item.attr("tag") == Value::from(tag))
            .cloned()
            .unwrap_or_default();

        prop_assert_eq!(store.get("found"), expected);
    }

    /// Property: index_by keeps the last element for each duplicated key
    ///
    /// Later elements overwrite earlier ones; this is the documented policy.
    #[test]
    fn prop_index_by_last_wins(items in records()) {
        let store = store_with(items.clone(), "byTag", index_by("records", "tag"));
        let index = store.get("byTag");

        for item in &items {
            let tag = item.attr("tag");
            let key = tag.to_display_string();
            if !tag.is_truthy() {
                // Tag 0 is falsy and never indexed
                prop_assert_eq!(index.attr(&key), Value::Undefined);
                continue;
            }
            let last = items
                .iter()
                .rev()
                .find(|candidate| candidate.attr("tag") == tag)
                .cloned()
                .unwrap_or_default();
            prop_assert_eq!(index.attr(&key), last);
        }
    }

    /// Property: includes is true iff some element equals the value
    #[test]
    fn prop_includes_is_membership(
        items in prop::collection::vec(scalar(), 0..10),
        needle in scalar(),
    ) {
        let store = store_with(items.clone(), "has", includes("records", needle.clone()));
        let expected = items.iter().any(|item| item.strict_eq(&needle));
        prop_assert_eq!(store.get("has"), Value::Bool(expected));
    }

    /// Property: includes over an absent collection is always false
    #[test]
    fn prop_includes_absent_collection(needle in scalar()) {
        let store = Store::builder()
            .derived("has", includes("records", needle))
            .build()
            .expect("fresh store accepts distinct names");
        prop_assert_eq!(store.get("has"), Value::Bool(false));
    }
}

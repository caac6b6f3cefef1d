// Copyright (c) 2025 - Cowboy AI, Inc.
//! Shared proptest strategies

use computable::Value;
use proptest::prelude::*;
use std::collections::BTreeMap;

/// Scalars, including every falsy variant
pub fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Undefined),
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-5i32..5).prop_map(Value::from),
        Just(Value::NAN),
        "[a-c]{0,2}".prop_map(Value::from),
    ]
}

/// Records with a small `tag` (so duplicates are common) and a unique `seq`
pub fn records() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(0u8..4, 0..12).prop_map(|tags| {
        tags.into_iter()
            .enumerate()
            .map(|(seq, tag)| {
                let mut record = BTreeMap::new();
                record.insert("tag".to_string(), Value::from(tag));
                record.insert("seq".to_string(), Value::from(seq));
                Value::Object(record)
            })
            .collect()
    })
}

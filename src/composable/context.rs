// Copyright (c) 2025 - Cowboy AI, Inc.
//! Context - Read capability handed to every transform
//!
//! A transform never reaches for ambient state. Whoever invokes it passes a
//! `&dyn Context`, and the transform reads sibling fields through it.

use crate::value::Value;
use std::collections::BTreeMap;

/// Read access to named fields
pub trait Context {
    /// Current value at `key`; unknown keys yield [`Value::Undefined`]
    fn get(&self, key: &str) -> Value;
}

/// A context with no fields
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContext;

impl Context for NoContext {
    fn get(&self, _key: &str) -> Value {
        Value::Undefined
    }
}

/// A plain map is a context; dotted keys walk into nested values
impl Context for BTreeMap<String, Value> {
    fn get(&self, key: &str) -> Value {
        let (root, rest) = match key.split_once('.') {
            Some((root, rest)) => (root, Some(rest)),
            None => (key, None),
        };
        let value = BTreeMap::get(self, root).cloned().unwrap_or_default();
        match rest {
            Some(rest) => value.path(rest),
            None => value,
        }
    }
}

// Copyright (c) 2025 - Cowboy AI, Inc.
//! Collection capability
//!
//! Attribute filtering, attribute projection and membership over a sequence
//! of [`Value`]s. Every scan is O(n) in the collection length; keep target
//! collections small.
//!
//! Implementors only need [`Collection::items`]. Collections with richer
//! equality semantics override [`Collection::is_equal`] and every other
//! operation follows. A collection that also implements `From<Vec<Value>>`
//! can back the `find_by_in`, `includes_in` and `filter_by_in` helpers.

use crate::value::Value;

/// Sequence operations used by the filter, projection and membership helpers
pub trait Collection {
    /// Elements in iteration order
    fn items(&self) -> &[Value];

    /// Equality used for attribute matching and membership
    fn is_equal(&self, a: &Value, b: &Value) -> bool {
        a.strict_eq(b)
    }

    /// Elements whose `key` attribute equals `value`, order preserved
    fn filter_by(&self, key: &str, value: &Value) -> Vec<Value> {
        self.items()
            .iter()
            .filter(|item| self.is_equal(&item.attr(key), value))
            .cloned()
            .collect()
    }

    /// Each element's `key` attribute, order preserved
    fn map_by(&self, key: &str) -> Vec<Value> {
        self.items().iter().map(|item| item.attr(key)).collect()
    }

    /// First element whose `key` attribute equals `value`
    fn find_by(&self, key: &str, value: &Value) -> Option<&Value> {
        self.items()
            .iter()
            .find(|item| self.is_equal(&item.attr(key), value))
    }

    /// Whether any element equals `value`
    fn contains(&self, value: &Value) -> bool {
        self.items().iter().any(|item| self.is_equal(item, value))
    }
}

impl Collection for [Value] {
    fn items(&self) -> &[Value] {
        self
    }
}

impl Collection for Vec<Value> {
    fn items(&self) -> &[Value] {
        self
    }
}

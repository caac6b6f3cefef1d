// Copyright (c) 2025 - Cowboy AI, Inc.
//! Descriptor - A derived field waiting to be installed
//!
//! A descriptor pairs the keys a derived field depends on with the function
//! that recomputes it. It holds no state of its own: caching and
//! invalidation belong to whoever installs it (see [`Store`](crate::Store)).

use crate::composable::Context;
use crate::value::Value;
use std::fmt::Debug;
use std::sync::Arc;

/// Specification of a derived field
#[derive(Clone)]
pub struct Descriptor {
    /// Dependency keys in declared order, duplicates kept
    dependencies: Vec<String>,
    /// Produces the field's value from the current state of its host
    recompute: Arc<dyn Fn(&dyn Context) -> Value + Send + Sync>,
}

impl Debug for Descriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Descriptor")
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}

impl Descriptor {
    /// Create a descriptor from dependency keys and a recompute function
    ///
    /// # Examples
    ///
    /// ```rust
    /// use computable::{Context, Descriptor, Value};
    /// use std::collections::BTreeMap;
    ///
    /// let total = Descriptor::new(["amount", "fee"], |ctx: &dyn Context| {
    ///     let amount = ctx.get("amount").as_f64().unwrap_or(0.0);
    ///     let fee = ctx.get("fee").as_f64().unwrap_or(0.0);
    ///     Value::from(amount + fee)
    /// });
    ///
    /// let mut fields = BTreeMap::new();
    /// fields.insert("amount".to_string(), Value::from(10));
    /// fields.insert("fee".to_string(), Value::from(2));
    /// assert_eq!(total.compute(&fields), Value::from(12));
    /// ```
    pub fn new<K, F>(dependencies: impl IntoIterator<Item = K>, recompute: F) -> Self
    where
        K: Into<String>,
        F: Fn(&dyn Context) -> Value + Send + Sync + 'static,
    {
        Self {
            dependencies: dependencies.into_iter().map(Into::into).collect(),
            recompute: Arc::new(recompute),
        }
    }

    /// Dependency keys in declared order
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// Recompute the field's value against `ctx`
    pub fn compute(&self, ctx: &dyn Context) -> Value {
        (self.recompute)(ctx)
    }
}

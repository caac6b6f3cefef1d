// Copyright (c) 2025 - Cowboy AI, Inc.
//! Func - Shared transform closures
//!
//! A `Func` is the unit every composable helper produces and every
//! composition consumes. It takes a read [`Context`] and positional
//! arguments and returns a single [`Value`].
//!
//! ```text
//! Func ≅ (&dyn Context, [Value]) → Value
//! ```
//!
//! Most helpers only look at their first argument, so [`Func::unary`] and
//! [`Func::variadic`] hide the context and the argument vector.
//!
//! # Examples
//!
//! ```rust
//! use computable::composable::Func;
//! use computable::Value;
//!
//! let double = Func::unary(|v| Value::from(v.as_f64().unwrap_or(0.0) * 2.0));
//! assert_eq!(double.apply(Value::from(4)), Value::from(8));
//! ```

use super::context::{Context, NoContext};
use crate::value::Value;
use std::fmt::Debug;
use std::sync::Arc;

/// Cheaply cloneable transform over positional arguments
///
/// Implemented as `Arc<dyn Fn>` so the same transform can sit in several
/// compositions and descriptors at once.
#[derive(Clone)]
pub struct Func {
    inner: Arc<dyn Fn(&dyn Context, Vec<Value>) -> Value + Send + Sync>,
}

impl Debug for Func {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Func")
    }
}

impl Func {
    /// Create a transform that sees the context and every argument
    ///
    /// # Examples
    ///
    /// ```rust
    /// use computable::composable::{Context, Func};
    /// use computable::Value;
    /// use std::collections::BTreeMap;
    ///
    /// let read_c = Func::new(|ctx: &dyn Context, _args| ctx.get("c"));
    ///
    /// let mut fields = BTreeMap::new();
    /// fields.insert("c".to_string(), Value::from("brown"));
    /// assert_eq!(read_c.call(&fields, vec![]), Value::from("brown"));
    /// ```
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&dyn Context, Vec<Value>) -> Value + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Create a transform of the first argument (`Undefined` when called
    /// with none)
    pub fn unary<F>(f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Self::new(move |_, args| f(args.into_iter().next().unwrap_or_default()))
    }

    /// Create a transform of all positional arguments
    pub fn variadic<F>(f: F) -> Self
    where
        F: Fn(Vec<Value>) -> Value + Send + Sync + 'static,
    {
        Self::new(move |_, args| f(args))
    }

    /// Invoke with an explicit context
    pub fn call(&self, ctx: &dyn Context, args: Vec<Value>) -> Value {
        (self.inner)(ctx, args)
    }

    /// Invoke with a single argument and no context
    pub fn apply(&self, arg: impl Into<Value>) -> Value {
        self.call(&NoContext, vec![arg.into()])
    }
}

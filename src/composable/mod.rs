// Copyright (c) 2025 - Cowboy AI, Inc.
//! Composable - Pure transform library
//!
//! Stateless, curried transforms over [`Value`](crate::Value)s, usable on
//! their own or inside a right-to-left composition.
//!
//! # Core Concepts
//!
//! ## Func
//!
//! Every helper returns a [`Func`]: a shared closure taking a read
//! [`Context`] and positional arguments. Functions that only need their
//! first argument are built with [`Func::unary`].
//!
//! ## Composition
//!
//! ```text
//! compose([f1, f2, f3])(a, b) = f1(f2(f3(a, b)))
//!
//!   a, b ──▶ f3 ──▶ f2 ──▶ f1 ──▶ result
//! ```
//!
//! The rightmost function sees every argument; everything to its left sees
//! a single value.
//!
//! # Available Transforms
//!
//! - `args_to_array`, `identity`, `not`, `compact`
//! - `filter`, `filter_by`, `map_by`, `join`
//! - `parse_int`, `replace`
//! - `default_to`, `lookup_key`
//! - `compose` and the [`compose!`](crate::compose!) macro
//!
//! # Example
//!
//! ```rust
//! use computable::compose;
//! use computable::composable::{filter, map_by};
//! use computable::Value;
//! use serde_json::json;
//!
//! let early_names = compose![
//!     map_by("name"),
//!     filter(|p| p.attr("id").as_f64().is_some_and(|id| id <= 1494.0)),
//! ];
//!
//! let participants = Value::from(json!([
//!     { "name": "Alice", "id": 1492 },
//!     { "name": "Dave", "id": 1495 },
//! ]));
//! assert_eq!(early_names.apply(participants), Value::from(json!(["Alice"])));
//! ```

pub mod compose;
pub mod context;
pub mod func;
pub mod transforms;

pub use compose::compose;
pub use context::{Context, NoContext};
pub use func::Func;
pub use transforms::{
    args_to_array, compact, default_to, filter, filter_by, filter_by_in, identity, join,
    lookup_key, map_by, not, parse_int, replace, Pattern,
};

// Copyright (c) 2025 - Cowboy AI, Inc.
//! Right-to-left composition
//!
//! `compose([f1, f2, ..., fn])(args...) = f1(f2(...fn(args...)))`
//!
//! The rightmost function receives every positional argument of the call.
//! Each predecessor receives the single result of its successor. The same
//! context is handed to every function in the chain, so a function deep in
//! a composition can still read sibling fields.
//!
//! # Laws
//!
//! - **Associativity**: `compose([f, compose([g, h])]) == compose([compose([f, g]), h])`
//! - **Identity**: `compose([identity(), f]) == f == compose([f, identity()])`
//!   (for unary `f`)

use super::context::Context;
use super::func::Func;
use crate::value::Value;

/// Compose transforms right to left
///
/// Composing no transforms returns the first argument (or `Undefined`).
///
/// # Examples
///
/// ```rust
/// use computable::composable::{compose, Func};
/// use computable::Value;
///
/// let divide_by = |divisor: f64| {
///     Func::unary(move |v| Value::from(v.as_f64().unwrap_or(f64::NAN) / divisor))
/// };
///
/// let divide_by_200 = compose(vec![divide_by(20.0), divide_by(10.0)]);
/// assert_eq!(divide_by_200.apply(400), Value::from(2));
/// ```
pub fn compose(fns: impl IntoIterator<Item = Func>) -> Func {
    let fns: Vec<Func> = fns.into_iter().collect();
    Func::new(move |ctx: &dyn Context, args: Vec<Value>| pipe(&fns, ctx, args))
}

/// Feed `args` to the last function and pipe the result leftwards
pub(crate) fn pipe(fns: &[Func], ctx: &dyn Context, args: Vec<Value>) -> Value {
    let Some((last, rest)) = fns.split_last() else {
        return args.into_iter().next().unwrap_or_default();
    };
    rest.iter()
        .rev()
        .fold(last.call(ctx, args), |acc, f| f.call(ctx, vec![acc]))
}

/// Compose transforms right to left
///
/// `compose![f, g, h]` is shorthand for `compose(vec![f, g, h])`.
///
/// ```rust
/// use computable::compose;
/// use computable::composable::{join, map_by};
/// use computable::Value;
///
/// let names = compose![join(", "), map_by("name")];
/// let people = Value::from(serde_json::json!([{ "name": "Alice" }, { "name": "Bob" }]));
/// assert_eq!(names.apply(people), Value::from("Alice, Bob"));
/// ```
#[macro_export]
macro_rules! compose {
    ($($function:expr),* $(,)?) => {
        $crate::composable::compose(::std::vec![$($function),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composable::context::NoContext;
    use crate::composable::transforms::{args_to_array, identity, join, parse_int};
    use std::collections::BTreeMap;

    fn divide_by(divisor: f64) -> Func {
        Func::unary(move |v| Value::from(v.as_f64().unwrap_or(f64::NAN) / divisor))
    }

    #[test]
    fn test_compose_two() {
        let divide_by_200 = compose(vec![divide_by(20.0), divide_by(10.0)]);
        assert_eq!(divide_by_200.apply(400), Value::from(2));
        assert_eq!(divide_by_200.apply(800), Value::from(4));
    }

    #[test]
    fn test_compose_three() {
        let divide_by_6000 = compose(vec![divide_by(30.0), divide_by(20.0), divide_by(10.0)]);
        assert_eq!(divide_by_6000.apply(6000), Value::from(1));
        let tiny = divide_by_6000.apply(6).as_f64().unwrap();
        assert!((tiny - 0.001).abs() < 1e-12);
    }

    #[test]
    fn test_rightmost_receives_all_arguments() {
        let sentence = compose(vec![join(" "), args_to_array()]);
        let words = ["the", "quick", "brown", "fox", "jumps"]
            .into_iter()
            .map(Value::from)
            .collect();
        assert_eq!(
            sentence.call(&NoContext, words),
            Value::from("the quick brown fox jumps")
        );
    }

    #[test]
    fn test_applies_right_to_left() {
        let append = |suffix: &'static str| {
            Func::unary(move |v| Value::from(format!("{}{}", v.to_display_string(), suffix)))
        };
        let chain = compose(vec![append("a"), append("b"), append("c")]);
        assert_eq!(chain.apply(""), Value::from("cba"));
    }

    #[test]
    fn test_context_reaches_every_function() {
        let mut fields = BTreeMap::new();
        fields.insert("suffix".to_string(), Value::from("!"));
        let shout = Func::new(|ctx: &dyn Context, args: Vec<Value>| {
            let head = args.into_iter().next().unwrap_or_default();
            Value::from(format!("{}{}", head, ctx.get("suffix")))
        });
        let chain = compose(vec![shout.clone(), shout]);
        assert_eq!(chain.call(&fields, vec![Value::from("hi")]), Value::from("hi!!"));
    }

    #[test]
    fn test_empty_composition_returns_first_argument() {
        let nothing = compose(Vec::new());
        assert_eq!(
            nothing.call(&NoContext, vec![Value::from(1), Value::from(2)]),
            Value::from(1)
        );
        assert_eq!(nothing.call(&NoContext, vec![]), Value::Undefined);
    }

    #[test]
    fn test_identity_is_neutral() {
        let f = parse_int(10);
        let left = compose(vec![identity(), f.clone()]);
        let right = compose(vec![f.clone(), identity()]);
        assert_eq!(left.apply("12"), f.apply("12"));
        assert_eq!(right.apply("12"), f.apply("12"));
    }

    #[test]
    fn test_macro() {
        let chain = compose![divide_by(2.0), divide_by(5.0)];
        assert_eq!(chain.apply(100), Value::from(10));
    }
}

// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for composition and sequence transforms

use super::strategies::scalar;
use computable::composable::{compact, compose, default_to, identity, not, Func, NoContext};
use computable::Value;
use proptest::prelude::*;

/// Affine maps `x * a + b`, distinct enough that order matters
fn affine(a: f64, b: f64) -> Func {
    Func::unary(move |v| Value::from(v.as_f64().unwrap_or(f64::NAN) * a + b))
}

fn affine_params() -> impl Strategy<Value = Vec<(i8, i8)>> {
    prop::collection::vec((-3i8..4, -5i8..6), 0..6)
}

proptest! {
    /// Property: compose(f1, ..., fn)(x) == f1(f2(...fn(x)))
    #[test]
    fn prop_compose_nests_right_to_left(params in affine_params(), x in -100i32..100) {
        let fns: Vec<Func> = params
            .iter()
            .map(|&(a, b)| affine(f64::from(a), f64::from(b)))
            .collect();

        let composed = compose(fns.clone()).apply(x);
        let nested = fns
            .iter()
            .rev()
            .fold(Value::from(x), |acc, f| f.apply(acc));

        prop_assert_eq!(composed, nested);
    }

    /// Property: composition is associative
    #[test]
    fn prop_compose_is_associative(
        (a1, b1) in (-3i8..4, -5i8..6),
        (a2, b2) in (-3i8..4, -5i8..6),
        (a3, b3) in (-3i8..4, -5i8..6),
        x in -100i32..100,
    ) {
        let f = affine(f64::from(a1), f64::from(b1));
        let g = affine(f64::from(a2), f64::from(b2));
        let h = affine(f64::from(a3), f64::from(b3));

        let left = compose(vec![f.clone(), compose(vec![g.clone(), h.clone()])]);
        let right = compose(vec![compose(vec![f, g]), h]);

        prop_assert_eq!(left.apply(x), right.apply(x));
    }

    /// Property: identity is neutral on both sides
    #[test]
    fn prop_identity_is_neutral(a in -3i8..4, b in -5i8..6, x in -100i32..100) {
        let f = affine(f64::from(a), f64::from(b));
        let expected = f.apply(x);

        prop_assert_eq!(compose(vec![identity(), f.clone()]).apply(x), expected.clone());
        prop_assert_eq!(compose(vec![f, identity()]).apply(x), expected);
    }

    /// Property: compact keeps exactly the truthy elements, in order
    #[test]
    fn prop_compact_keeps_truthy_in_order(items in prop::collection::vec(scalar(), 0..20)) {
        let result = compact().apply(Value::Array(items.clone()));
        let Value::Array(kept) = result else {
            return Err(TestCaseError::fail("compact must return an array"));
        };

        prop_assert!(kept.iter().all(Value::is_truthy));
        prop_assert_eq!(kept.len(), items.iter().filter(|item| item.is_truthy()).count());

        // Every kept element appears in the input after the previous one
        let mut cursor = 0;
        for item in &kept {
            let offset = items[cursor..].iter().position(|candidate| candidate == item);
            prop_assert!(offset.is_some(), "kept element out of order");
            cursor += offset.unwrap_or_default() + 1;
        }
    }

    /// Property: not agrees with truthiness
    #[test]
    fn prop_not_negates_truthiness(value in scalar()) {
        prop_assert_eq!(not().apply(value.clone()), Value::Bool(!value.is_truthy()));
    }

    /// Property: default_to never returns a falsy value when the default is truthy
    #[test]
    fn prop_default_to_is_truthy(value in scalar()) {
        let result = default_to("fallback").apply(value);
        prop_assert!(result.is_truthy());
    }

    /// Property: a composed call hands every argument to the rightmost function
    #[test]
    fn prop_rightmost_sees_all_arguments(args in prop::collection::vec(scalar(), 0..8)) {
        let count = Func::variadic(|args| Value::from(args.len()));
        let composed = compose(vec![identity(), count]);
        prop_assert_eq!(composed.call(&NoContext, args.clone()), Value::from(args.len()));
    }
}

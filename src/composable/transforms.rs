// Copyright (c) 2025 - Cowboy AI, Inc.
//! Transforms - Stateless building blocks for compositions
//!
//! Every helper returns a [`Func`]. The curried ones (`filter`, `join`,
//! `parse_int`, ...) take their configuration up front and return a
//! transform of a single value, ready to sit in a [`compose`](super::compose)
//! chain.
//!
//! All transforms are total. Input of the wrong shape degrades to a safe
//! value instead of failing:
//!
//! - collection helpers treat a non-array as an empty sequence
//! - `join` of a non-array is the empty string
//! - `parse_int` yields `NaN`
//! - `replace` hands nullish input back unchanged
//!
//! # Examples
//!
//! ```rust
//! use computable::composable::{compose, join, args_to_array};
//! use computable::composable::NoContext;
//! use computable::Value;
//!
//! let sentence = compose(vec![join(" "), args_to_array()]);
//! let words = vec![Value::from("the"), Value::from("quick"), Value::from("fox")];
//! assert_eq!(sentence.call(&NoContext, words), Value::from("the quick fox"));
//! ```

use super::func::Func;
use crate::collection::Collection;
use crate::errors::ComputableResult;
use crate::value::Value;
use regex::Regex;

/// All positional arguments as an array, order preserved
pub fn args_to_array() -> Func {
    Func::variadic(Value::Array)
}

/// Returns its argument unchanged
pub fn identity() -> Func {
    Func::unary(|v| v)
}

/// Boolean negation of truthiness
pub fn not() -> Func {
    Func::unary(|v| Value::Bool(!v.is_truthy()))
}

/// Drops falsy elements, order preserved
pub fn compact() -> Func {
    filter(Value::is_truthy)
}

/// Keeps elements satisfying `predicate`, order preserved
pub fn filter<P>(predicate: P) -> Func
where
    P: Fn(&Value) -> bool + Send + Sync + 'static,
{
    Func::unary(move |collection| {
        let items = elements(&collection);
        Value::Array(items.iter().filter(|item| predicate(item)).cloned().collect())
    })
}

/// Keeps elements whose `key` attribute equals `value`
pub fn filter_by(key: impl Into<String>, value: impl Into<Value>) -> Func {
    let key = key.into();
    let value = value.into();
    Func::unary(move |collection| Value::Array(elements(&collection).filter_by(&key, &value)))
}

/// [`filter_by`] with the elements wrapped in the host collection `C`, so
/// its [`Collection::is_equal`] decides the matches
pub fn filter_by_in<C>(key: impl Into<String>, value: impl Into<Value>) -> Func
where
    C: Collection + From<Vec<Value>> + 'static,
{
    let key = key.into();
    let value = value.into();
    Func::unary(move |collection| {
        let host = C::from(elements(&collection).to_vec());
        Value::Array(host.filter_by(&key, &value))
    })
}

/// Joins the display strings of the elements with `separator`
///
/// Nullish elements contribute an empty string.
pub fn join(separator: impl Into<String>) -> Func {
    let separator = separator.into();
    Func::unary(move |collection| {
        let joined = elements(&collection)
            .iter()
            .map(|item| {
                if item.is_nullish() {
                    String::new()
                } else {
                    item.to_display_string()
                }
            })
            .collect::<Vec<_>>()
            .join(&separator);
        Value::String(joined)
    })
}

/// Projects each element's `key` attribute, order preserved
pub fn map_by(key: impl Into<String>) -> Func {
    let key = key.into();
    Func::unary(move |collection| Value::Array(elements(&collection).map_by(&key)))
}

/// Parses the leading integer of the argument in `radix`
///
/// Radix `0` means "decimal unless the text starts with `0x`". A radix
/// outside `2..=36` or text without leading digits yields `NaN`.
pub fn parse_int(radix: u32) -> Func {
    Func::unary(move |v| Value::Number(parse_int_value(&v, radix)))
}

/// What [`replace`] searches for
#[derive(Debug, Clone)]
pub enum Pattern {
    /// First occurrence of a literal substring
    Literal(String),
    /// First match, or every match when `global`
    Regex { regex: Regex, global: bool },
}

impl Pattern {
    /// Replace the first match of a regular expression
    pub fn regex(source: &str) -> ComputableResult<Self> {
        Ok(Pattern::Regex {
            regex: Regex::new(source)?,
            global: false,
        })
    }

    /// Replace every match of a regular expression
    pub fn global(source: &str) -> ComputableResult<Self> {
        Ok(Pattern::Regex {
            regex: Regex::new(source)?,
            global: true,
        })
    }

    fn apply(&self, text: &str, replacement: &str) -> String {
        match self {
            Pattern::Literal(needle) => text.replacen(needle.as_str(), replacement, 1),
            Pattern::Regex { regex, global: true } => {
                regex.replace_all(text, replacement).into_owned()
            }
            Pattern::Regex { regex, global: false } => {
                regex.replace(text, replacement).into_owned()
            }
        }
    }
}

impl From<&str> for Pattern {
    fn from(needle: &str) -> Self {
        Pattern::Literal(needle.to_string())
    }
}

impl From<String> for Pattern {
    fn from(needle: String) -> Self {
        Pattern::Literal(needle)
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Pattern::Regex {
            regex,
            global: false,
        }
    }
}

/// Substitutes `pattern` with `replacement`; nullish input passes through
///
/// Regex replacements may reference groups as `$1` or `${name}`.
pub fn replace(pattern: impl Into<Pattern>, replacement: impl Into<String>) -> Func {
    let pattern = pattern.into();
    let replacement = replacement.into();
    Func::unary(move |v| match v {
        Value::Undefined | Value::Null => v,
        Value::String(text) => Value::String(pattern.apply(&text, &replacement)),
        other => Value::String(pattern.apply(&other.to_display_string(), &replacement)),
    })
}

/// The argument when truthy, otherwise `default_value`
pub fn default_to(default_value: impl Into<Value>) -> Func {
    let default_value = default_value.into();
    Func::unary(move |v| {
        if v.is_truthy() {
            v
        } else {
            default_value.clone()
        }
    })
}

/// `mapping[key]` when present and truthy, otherwise `default_value`
///
/// The key is coerced to its display string before lookup.
pub fn lookup_key(mapping: impl Into<Value>, default_value: impl Into<Value>) -> Func {
    let mapping = mapping.into();
    let default_value = default_value.into();
    Func::unary(move |key| {
        let found = mapping.attr(&key.to_display_string());
        if found.is_truthy() {
            found
        } else {
            default_value.clone()
        }
    })
}

fn elements(collection: &Value) -> &[Value] {
    collection.as_collection().unwrap_or(&[])
}

fn parse_int_value(input: &Value, radix: u32) -> f64 {
    let text = input.to_display_string();
    let trimmed = text.trim_start();
    let (negative, unsigned) = if let Some(rest) = trimmed.strip_prefix('-') {
        (true, rest)
    } else {
        (false, trimmed.strip_prefix('+').unwrap_or(trimmed))
    };

    let hex_body = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"));
    let (radix, digits) = match (radix, hex_body) {
        (0, Some(body)) | (16, Some(body)) => (16, body),
        (0, None) => (10, unsigned),
        (radix, _) => (radix, unsigned),
    };
    if !(2..=36).contains(&radix) {
        return f64::NAN;
    }

    let mut result = 0.0_f64;
    let mut seen_digit = false;
    for digit in digits.chars().map_while(|c| c.to_digit(radix)) {
        result = result * f64::from(radix) + f64::from(digit);
        seen_digit = true;
    }

    match (seen_digit, negative) {
        (false, _) => f64::NAN,
        (true, true) => -result,
        (true, false) => result,
    }
}

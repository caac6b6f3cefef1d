// Copyright (c) 2025 - Cowboy AI, Inc.
//! Value - Dynamically typed field values
//!
//! Fields on a [`Store`](crate::store::Store) hold a [`Value`]. The model is
//! deliberately loose: derived fields read whatever is stored, and every
//! transform is total over every variant.
//!
//! # Truthiness
//!
//! ```text
//! falsy:  Undefined, Null, false, 0, -0, NaN, ""
//! truthy: everything else, including [] and {}
//! ```
//!
//! # Equality
//!
//! [`Value::strict_eq`] never coerces between variants. `NaN` is unequal to
//! itself. Arrays and objects compare structurally.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// A dynamically typed field value
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Absent key, missing attribute or "no match"
    #[default]
    Undefined,
    /// Explicit null
    Null,
    /// Boolean
    Bool(bool),
    /// Number; `NaN` doubles as the not-a-number sentinel
    Number(f64),
    /// String
    String(String),
    /// Ordered sequence
    Array(Vec<Value>),
    /// String-keyed record
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// The not-a-number sentinel
    pub const NAN: Value = Value::Number(f64::NAN);

    /// Whether the value counts as true in a condition
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }

    /// `Undefined` or `Null`
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// Whether this is the not-a-number sentinel
    pub fn is_nan(&self) -> bool {
        matches!(self, Value::Number(n) if n.is_nan())
    }

    /// Non-coercing equality
    pub fn strict_eq(&self, other: &Value) -> bool {
        self == other
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// The elements of an array; `None` for anything that is not iterable
    pub fn as_collection(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// String form used when joining and when coercing to an object key
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::String(s) => s.clone(),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    if item.is_nullish() {
                        String::new()
                    } else {
                        item.to_display_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(","),
            Value::Object(_) => "[object Object]".to_string(),
        }
    }

    /// Look up a single attribute
    ///
    /// Objects resolve their fields. Arrays resolve `length` and numeric
    /// indices, strings resolve `length`. Everything else is `Undefined`.
    pub fn attr(&self, key: &str) -> Value {
        match self {
            Value::Object(map) => map.get(key).cloned().unwrap_or_default(),
            Value::Array(items) if key == "length" => Value::from(items.len()),
            Value::Array(items) => key
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index).cloned())
                .unwrap_or_default(),
            Value::String(s) if key == "length" => Value::from(s.encode_utf16().count()),
            _ => Value::Undefined,
        }
    }

    /// Look up a dotted path such as `eve.name`
    ///
    /// A `[]` segment yields the current value and an `@each` segment ends
    /// the walk, so dependency keys like `posts.[]` read the collection.
    pub fn path(&self, path: &str) -> Value {
        let mut current = self.clone();
        for segment in path.split('.') {
            if segment.is_empty() || segment == "[]" {
                continue;
            }
            if segment.starts_with("@each") {
                break;
            }
            current = current.attr(segment);
            if current == Value::Undefined {
                break;
            }
        }
        current
    }

    /// Write `value` at a nested path
    ///
    /// Numeric segments index into arrays, padding with `Undefined` when the
    /// index is past the end. Anything that is neither an object nor an
    /// array along the way is replaced by an empty object. A non-numeric
    /// segment over an array is returned as the error.
    pub(crate) fn insert_path<'s>(
        &mut self,
        segments: &[&'s str],
        value: Value,
    ) -> Result<(), &'s str> {
        let Some((first, rest)) = segments.split_first() else {
            *self = value;
            return Ok(());
        };
        match self {
            Value::Array(items) => {
                let index = first.parse::<usize>().map_err(|_| *first)?;
                if index >= items.len() {
                    items.resize(index + 1, Value::Undefined);
                }
                items[index].insert_path(rest, value)
            }
            Value::Object(map) => map
                .entry((*first).to_string())
                .or_default()
                .insert_path(rest, value),
            other => {
                *other = Value::Object(BTreeMap::new());
                other.insert_path(segments, value)
            }
        }
    }

    /// Convert to JSON; `Undefined` and non-finite numbers become `null`
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Undefined | Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => number_to_json(*n),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Object(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("{sign}Infinity")
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        // Exponent form with an explicit sign, e.g. 1e+21 and 1.5e-7
        let formatted = format!("{n:e}");
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        }
    } else if n.fract() == 0.0 {
        format!("{n:.0}")
    } else {
        n.to_string()
    }
}

fn number_to_json(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        serde_json::Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Object(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        option.map(Into::into).unwrap_or(Value::Undefined)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

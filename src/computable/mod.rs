// Copyright (c) 2025 - Cowboy AI, Inc.
//! Computable - Derived field factories
//!
//! Each factory returns a [`Descriptor`] bound to one or more named source
//! fields. Install it on a [`Store`](crate::Store) and the store recomputes
//! it whenever one of those fields changes.
//!
//! # Available Factories
//!
//! | Factory        | Value                                          | Depends on                 |
//! |----------------|------------------------------------------------|----------------------------|
//! | `if_else`      | `value` if `dep` truthy else `else_value`      | `dep`                      |
//! | `if_else_keys` | field `key` if `dep` truthy else `else_key`    | `dep`, `key`, `else_key`   |
//! | `find_by`      | first element with `attr == value`             | collection                 |
//! | `includes`     | membership of `value`                          | collection                 |
//! | `*_in::<C>`    | as above, with the equality of collection `C`  | collection                 |
//! | `index_by`     | object keyed by each element's selector        | collection                 |
//! | `equal`        | `dep == value`                                 | `dep`                      |
//! | `not_equal`    | `dep != value`                                 | `dep`                      |
//! | `compose`      | transforms applied to the values of `keys`     | every key                  |
//!
//! Collection scans are O(n).
//!
//! # Example
//!
//! ```rust
//! use computable::computable::if_else;
//! use computable::Store;
//!
//! let store = Store::builder()
//!     .value("isBusiness", true)
//!     .derived(
//!         "message",
//!         if_else("isBusiness", "Hello, Business Customer", "Hola, Personal Customer"),
//!     )
//!     .build()?;
//!
//! assert_eq!(store.get("message").as_str(), Some("Hello, Business Customer"));
//! # Ok::<(), computable::ComputableError>(())
//! ```

pub mod descriptor;

pub use descriptor::Descriptor;

use crate::collection::Collection;
use crate::composable::compose::pipe;
use crate::composable::{Context, Func};
use crate::errors::{ComputableError, ComputableResult};
use crate::value::Value;
use std::collections::BTreeMap;

/// `value` when the field at `dep` is truthy, otherwise `else_value`
pub fn if_else(
    dep: impl Into<String>,
    value: impl Into<Value>,
    else_value: impl Into<Value>,
) -> Descriptor {
    let dep = dep.into();
    let value = value.into();
    let else_value = else_value.into();
    Descriptor::new([dep.clone()], move |ctx: &dyn Context| {
        if ctx.get(&dep).is_truthy() {
            value.clone()
        } else {
            else_value.clone()
        }
    })
}

/// The field at `key` when the field at `dep` is truthy, otherwise the
/// field at `else_key`
///
/// All three keys are dependencies, since which branch is read changes
/// with `dep`.
pub fn if_else_keys(
    dep: impl Into<String>,
    key: impl Into<String>,
    else_key: impl Into<String>,
) -> Descriptor {
    let dep = dep.into();
    let key = key.into();
    let else_key = else_key.into();
    Descriptor::new(
        [dep.clone(), key.clone(), else_key.clone()],
        move |ctx: &dyn Context| {
            if ctx.get(&dep).is_truthy() {
                ctx.get(&key)
            } else {
                ctx.get(&else_key)
            }
        },
    )
}

/// The first element of the collection at `collection_key` whose `attr`
/// equals `value`
///
/// `Undefined` when the collection is absent, empty or has no match.
pub fn find_by(
    collection_key: impl Into<String>,
    attr: impl Into<String>,
    value: impl Into<Value>,
) -> Descriptor {
    let collection_key = collection_key.into();
    let attr = attr.into();
    let value = value.into();
    Descriptor::new([collection_key.clone()], move |ctx: &dyn Context| {
        let collection = ctx.get(&collection_key);
        collection
            .as_collection()
            .and_then(|items| items.find_by(&attr, &value))
            .cloned()
            .unwrap_or_default()
    })
}

/// [`find_by`] matching with the equality of the host collection `C`
///
/// The array at `collection_key` is wrapped in `C` on every recompute.
pub fn find_by_in<C>(
    collection_key: impl Into<String>,
    attr: impl Into<String>,
    value: impl Into<Value>,
) -> Descriptor
where
    C: Collection + From<Vec<Value>> + 'static,
{
    let collection_key = collection_key.into();
    let attr = attr.into();
    let value = value.into();
    Descriptor::new([collection_key.clone()], move |ctx: &dyn Context| {
        ctx.get(&collection_key)
            .as_collection()
            .map(|items| C::from(items.to_vec()))
            .and_then(|host| host.find_by(&attr, &value).cloned())
            .unwrap_or_default()
    })
}

/// Whether `value` is a member of the collection at `collection_key`
///
/// `false` when the collection is absent, empty or not iterable.
pub fn includes(collection_key: impl Into<String>, value: impl Into<Value>) -> Descriptor {
    let collection_key = collection_key.into();
    let value = value.into();
    Descriptor::new([collection_key.clone()], move |ctx: &dyn Context| {
        let collection = ctx.get(&collection_key);
        let found = collection
            .as_collection()
            .is_some_and(|items| Collection::contains(items, &value));
        Value::Bool(found)
    })
}

/// [`includes`] testing membership with the equality of the host
/// collection `C`
pub fn includes_in<C>(collection_key: impl Into<String>, value: impl Into<Value>) -> Descriptor
where
    C: Collection + From<Vec<Value>> + 'static,
{
    let collection_key = collection_key.into();
    let value = value.into();
    Descriptor::new([collection_key.clone()], move |ctx: &dyn Context| {
        let found = ctx
            .get(&collection_key)
            .as_collection()
            .is_some_and(|items| C::from(items.to_vec()).contains(&value));
        Value::Bool(found)
    })
}

/// Alias for [`includes`]
pub fn contains(collection_key: impl Into<String>, value: impl Into<Value>) -> Descriptor {
    includes(collection_key, value)
}

/// An object mapping each element's `selector` value to the element
///
/// Elements are visited in collection order and a later element overwrites
/// an earlier one with the same selector value. Elements whose selector
/// value is falsy are left out. An absent or non-iterable collection gives
/// an empty object.
pub fn index_by(collection_key: impl Into<String>, selector: impl Into<String>) -> Descriptor {
    let collection_key = collection_key.into();
    let selector = selector.into();
    Descriptor::new([collection_key.clone()], move |ctx: &dyn Context| {
        let collection = ctx.get(&collection_key);
        let mut index = BTreeMap::new();
        for item in collection.as_collection().unwrap_or(&[]) {
            let key = item.path(&selector);
            if key.is_truthy() {
                index.insert(key.to_display_string(), item.clone());
            }
        }
        Value::Object(index)
    })
}

/// Whether the field at `dep` strictly equals `value`
pub fn equal(dep: impl Into<String>, value: impl Into<Value>) -> Descriptor {
    let dep = dep.into();
    let value = value.into();
    Descriptor::new([dep.clone()], move |ctx: &dyn Context| {
        Value::Bool(ctx.get(&dep).strict_eq(&value))
    })
}

/// Whether the field at `dep` is strictly unequal to `value`
///
/// # Errors
///
/// [`ComputableError::Assertion`] when `value` is falsy; a comparator is
/// required.
pub fn not_equal(
    dep: impl Into<String>,
    value: impl Into<Value>,
) -> ComputableResult<Descriptor> {
    let dep = dep.into();
    let value = value.into();
    if !value.is_truthy() {
        return Err(ComputableError::Assertion(format!(
            "not_equal requires a value for comparison (got {value:?} for {dep})"
        )));
    }
    Ok(Descriptor::new([dep.clone()], move |ctx: &dyn Context| {
        Value::Bool(!ctx.get(&dep).strict_eq(&value))
    }))
}

/// Feed the values of `keys` through `transforms`, right to left
///
/// The values are read in declared order and passed as positional
/// arguments to the last transform; its result is piped leftwards. Every
/// key is a dependency whether or not a transform uses it. Transforms
/// receive the host as their context and can read any other field.
///
/// ```rust
/// use computable::computable::compose;
/// use computable::composable::Func;
/// use computable::{Store, Value};
///
/// let ratio = Func::variadic(|args| {
///     let n = args[0].as_f64().unwrap_or(f64::NAN);
///     let d = args[1].as_f64().unwrap_or(f64::NAN);
///     Value::from(n / d)
/// });
///
/// let store = Store::builder()
///     .value("numerator", 6)
///     .value("denominator", 2)
///     .derived("result", compose(["numerator", "denominator"], [ratio]))
///     .build()?;
///
/// assert_eq!(store.get("result"), Value::from(3));
/// # Ok::<(), computable::ComputableError>(())
/// ```
pub fn compose<K>(
    keys: impl IntoIterator<Item = K>,
    transforms: impl IntoIterator<Item = Func>,
) -> Descriptor
where
    K: Into<String>,
{
    let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
    let transforms: Vec<Func> = transforms.into_iter().collect();
    let fetch = keys.clone();
    Descriptor::new(keys, move |ctx: &dyn Context| {
        let args = fetch.iter().map(|key| ctx.get(key)).collect();
        pipe(&transforms, ctx, args)
    })
}

/// Alias for [`compose`]
pub fn r#fn<K>(
    keys: impl IntoIterator<Item = K>,
    transforms: impl IntoIterator<Item = Func>,
) -> Descriptor
where
    K: Into<String>,
{
    compose(keys, transforms)
}

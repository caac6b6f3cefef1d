// Copyright (c) 2025 - Cowboy AI, Inc.
//! Store - Observable host for plain and derived fields
//!
//! A `Store` holds named plain values and installed [`Descriptor`]s. Derived
//! fields follow a dirty → recompute → cached cycle:
//!
//! ```text
//!   set("flag") ──▶ invalidate dependents ──▶ publish changed keys
//!                                                    │
//!   get("message") ◀── cache ◀── recompute ◀─────────┘ (lazily, on read)
//! ```
//!
//! # Dependency matching
//!
//! A derived field depends on the root segment of each dependency key, so
//! `posts.[]` and `posts.@each.id` are both invalidated by a change to
//! `posts`. Invalidation is transitive through derived-on-derived chains.
//!
//! # Concurrency
//!
//! Recomputation runs synchronously on the calling thread. Internal state
//! sits behind a mutex that is never held while a recompute function or a
//! subscription callback runs, so both may read the store freely.
//!
//! # Example
//!
//! ```rust
//! use computable::computable::if_else_keys;
//! use computable::{Store, Value};
//!
//! let store = Store::builder()
//!     .value("isBusiness", true)
//!     .value("businessFee", 12)
//!     .value("personalFee", 5)
//!     .derived("fee", if_else_keys("isBusiness", "businessFee", "personalFee"))
//!     .build()?;
//!
//! assert_eq!(store.get("fee"), Value::from(12));
//! store.set("isBusiness", false)?;
//! assert_eq!(store.get("fee"), Value::from(5));
//! # Ok::<(), computable::ComputableError>(())
//! ```

pub mod subscription;

pub use subscription::{ChangeCallback, SubscriptionId};

use crate::composable::Context;
use crate::computable::Descriptor;
use crate::config::StoreConfig;
use crate::errors::{ComputableError, ComputableResult};
use crate::value::Value;
use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use subscription::Subscribers;
use tracing::{debug, trace, warn};

struct DerivedField {
    descriptor: Descriptor,
    cached: Option<Value>,
}

impl DerivedField {
    fn depends_on(&self, root: &str) -> bool {
        self.descriptor
            .dependencies()
            .iter()
            .any(|dependency| split_key(dependency).0 == root)
    }
}

#[derive(Default)]
struct StoreState {
    values: BTreeMap<String, Value>,
    derived: BTreeMap<String, DerivedField>,
    /// Bumped on every invalidation; a recompute that started under an
    /// older generation does not populate the cache
    generation: u64,
}

impl StoreState {
    fn is_defined(&self, name: &str) -> bool {
        self.values.contains_key(name) || self.derived.contains_key(name)
    }

    /// Drop cached values of everything depending on `root`, transitively
    ///
    /// Returns the invalidated derived field names in discovery order.
    fn invalidate(&mut self, root: &str) -> Vec<String> {
        self.generation += 1;
        let mut invalidated: Vec<String> = Vec::new();
        let mut queue = VecDeque::from([root.to_string()]);

        while let Some(changed) = queue.pop_front() {
            let dependents: Vec<String> = self
                .derived
                .iter()
                .filter(|(name, field)| !invalidated.contains(name) && field.depends_on(&changed))
                .map(|(name, _)| name.clone())
                .collect();

            for name in dependents {
                if let Some(field) = self.derived.get_mut(&name) {
                    field.cached = None;
                }
                debug!(field = %name, cause = %changed, "Invalidated derived field");
                queue.push_back(name.clone());
                invalidated.push(name);
            }
        }

        invalidated
    }
}

/// Observable key-value store with derived fields
pub struct Store {
    config: StoreConfig,
    state: Mutex<StoreState>,
    subscribers: Mutex<Subscribers>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("config", &self.config)
            .field("keys", &self.keys())
            .field("subscriptions", &self.subscribers().len())
            .finish_non_exhaustive()
    }
}

impl Store {
    /// Create an empty store with the default configuration
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create an empty store with the given configuration
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            config,
            state: Mutex::new(StoreState::default()),
            subscribers: Mutex::new(Subscribers::default()),
        }
    }

    /// Declare fields, then build the store
    pub fn builder() -> StoreBuilder {
        StoreBuilder::default()
    }

    /// Create a store whose plain fields are the entries of a JSON object
    pub fn from_json(json: serde_json::Value) -> ComputableResult<Self> {
        let serde_json::Value::Object(map) = json else {
            return Err(ComputableError::Serialization(
                "store fields must be a JSON object".to_string(),
            ));
        };
        map.into_iter()
            .fold(Store::builder(), |builder, (key, value)| {
                builder.value(key, Value::from(value))
            })
            .build()
    }

    /// Configuration this store was created with
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Install a derived field
    ///
    /// # Errors
    ///
    /// [`ComputableError::DuplicateField`] if `name` is already a plain or
    /// derived field.
    pub fn define(&self, name: impl Into<String>, descriptor: Descriptor) -> ComputableResult<()> {
        let name = name.into();
        let mut state = self.state();
        if state.is_defined(&name) {
            return Err(ComputableError::DuplicateField(name));
        }
        debug!(field = %name, dependencies = ?descriptor.dependencies(), "Defined derived field");
        state.derived.insert(
            name,
            DerivedField {
                descriptor,
                cached: None,
            },
        );
        Ok(())
    }

    /// Set a plain field
    ///
    /// A dotted key writes into the nested object under its root. Derived
    /// fields depending on the root are invalidated and subscribers notified.
    ///
    /// # Errors
    ///
    /// [`ComputableError::ReadOnlyField`] if the root names a derived field.
    pub fn set(&self, key: &str, value: impl Into<Value>) -> ComputableResult<()> {
        self.set_properties([(key, value.into())])
    }

    /// Set several plain fields, publishing once all of them are applied
    ///
    /// Nothing is written if any key names a derived field or addresses an
    /// array element with a non-numeric segment.
    ///
    /// # Errors
    ///
    /// [`ComputableError::ReadOnlyField`] or [`ComputableError::InvalidPath`].
    pub fn set_properties<K, V>(&self, entries: impl IntoIterator<Item = (K, V)>) -> ComputableResult<()>
    where
        K: AsRef<str>,
        V: Into<Value>,
    {
        let entries: Vec<(K, Value)> = entries
            .into_iter()
            .map(|(key, value)| (key, value.into()))
            .collect();

        let changed = {
            let mut state = self.state();
            if let Some(root) = entries
                .iter()
                .map(|(key, _)| split_key(key.as_ref()).0)
                .find(|root| state.derived.contains_key(*root))
            {
                return Err(ComputableError::ReadOnlyField(root.to_string()));
            }

            // Later entries for the same root build on earlier staged ones
            let mut staged: Vec<(String, Value)> = Vec::new();
            for (key, value) in entries {
                let key = key.as_ref();
                let (root, rest) = split_key(key);
                let next = match rest {
                    Some(rest) => {
                        let mut next = staged
                            .iter()
                            .rev()
                            .find(|(name, _)| name == root)
                            .map(|(_, pending)| pending.clone())
                            .or_else(|| state.values.get(root).cloned())
                            .unwrap_or_default();
                        let segments: Vec<&str> = rest.split('.').collect();
                        next.insert_path(&segments, value).map_err(|segment| {
                            ComputableError::InvalidPath {
                                key: key.to_string(),
                                segment: segment.to_string(),
                            }
                        })?;
                        next
                    }
                    None => value,
                };
                staged.push((root.to_string(), next));
            }

            let mut changed = Vec::new();
            for (root, next) in staged {
                if self.config.skip_unchanged && state.values.get(&root) == Some(&next) {
                    trace!(key = %root, "Skipped unchanged value");
                    continue;
                }

                state.values.insert(root.clone(), next);
                debug!(key = %root, "Set field");
                push_unique(&mut changed, root.clone());
                for name in state.invalidate(&root) {
                    push_unique(&mut changed, name);
                }
            }
            changed
        };

        self.publish(&changed);
        Ok(())
    }

    /// Treat `key` as changed: invalidate dependents and notify subscribers
    ///
    /// Use after mutating a value in place through some other path.
    pub fn notify_property_change(&self, key: &str) {
        let root = split_key(key).0;
        let changed = {
            let mut state = self.state();
            if let Some(field) = state.derived.get_mut(root) {
                field.cached = None;
            }
            let mut changed = vec![root.to_string()];
            for name in state.invalidate(root) {
                push_unique(&mut changed, name);
            }
            changed
        };
        self.publish(&changed);
    }

    /// Current value at `key`, reporting cycles and depth overflow
    ///
    /// Unknown keys yield `Undefined`. Dotted keys resolve their root, then
    /// walk into the value.
    pub fn try_get(&self, key: &str) -> ComputableResult<Value> {
        let resolution = Resolution::new(self);
        let value = resolution.resolve(key)?;
        match resolution.failure.into_inner() {
            Some(err) => Err(err),
            None => Ok(value),
        }
    }

    /// Whether a derived field currently holds a cached value
    pub fn is_cached(&self, key: &str) -> bool {
        self.state()
            .derived
            .get(key)
            .is_some_and(|field| field.cached.is_some())
    }

    /// Whether `key` names a derived field
    pub fn is_derived(&self, key: &str) -> bool {
        self.state().derived.contains_key(key)
    }

    /// All plain and derived field names, sorted
    pub fn keys(&self) -> Vec<String> {
        let state = self.state();
        let mut keys: Vec<String> = state
            .values
            .keys()
            .chain(state.derived.keys())
            .cloned()
            .collect();
        keys.sort();
        keys
    }

    /// Declared dependency keys of a derived field
    pub fn dependencies_of(&self, key: &str) -> Option<Vec<String>> {
        self.state()
            .derived
            .get(key)
            .map(|field| field.descriptor.dependencies().to_vec())
    }

    /// Call `callback` whenever `key` changes or is invalidated
    ///
    /// A dotted key such as `user.name` fires whenever its root `user`
    /// changes, and the callback receives the dotted key.
    pub fn subscribe<F>(&self, key: impl Into<String>, callback: F) -> SubscriptionId
    where
        F: Fn(&dyn Context, &str) + Send + Sync + 'static,
    {
        let key = key.into();
        let id = self.subscribers().add(key.clone(), Arc::new(callback));
        trace!(key = %key, subscription = %id, "Subscribed");
        id
    }

    /// Remove a subscription; `false` if it was already gone
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.subscribers().remove(id);
        trace!(subscription = %id, removed, "Unsubscribed");
        removed
    }

    /// Snapshot of every field, derived ones included, as a JSON object
    pub fn to_json(&self) -> serde_json::Value {
        let fields = self
            .keys()
            .into_iter()
            .map(|key| {
                let value = self.get(&key).to_json();
                (key, value)
            })
            .collect();
        serde_json::Value::Object(fields)
    }

    fn publish(&self, changed: &[String]) {
        if changed.is_empty() {
            return;
        }
        let callbacks = self.subscribers().matching(changed);
        debug!(keys = ?changed, listeners = callbacks.len(), "Publishing changes");
        for (key, callback) in callbacks {
            callback(self, &key);
        }
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn subscribers(&self) -> MutexGuard<'_, Subscribers> {
        self.subscribers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Context for Store {
    /// Current value at `key`
    ///
    /// Resolution failures (cycles, depth overflow) are logged and yield
    /// `Undefined`; use [`Store::try_get`] to observe them.
    fn get(&self, key: &str) -> Value {
        self.try_get(key).unwrap_or_else(|err| {
            warn!(key = %key, error = %err, "Failed to resolve field");
            Value::Undefined
        })
    }
}

impl Store {
    /// Current value at `key`; see [`Context::get`]
    pub fn get(&self, key: &str) -> Value {
        Context::get(self, key)
    }
}

/// One top-level read, carrying the chain of fields being recomputed
///
/// Recompute functions read through this context, so nested reads share the
/// chain and a field that reaches itself is detected.
struct Resolution<'a> {
    store: &'a Store,
    stack: RefCell<Vec<String>>,
    failure: RefCell<Option<ComputableError>>,
}

impl<'a> Resolution<'a> {
    fn new(store: &'a Store) -> Self {
        Self {
            store,
            stack: RefCell::new(Vec::new()),
            failure: RefCell::new(None),
        }
    }

    fn resolve(&self, key: &str) -> ComputableResult<Value> {
        let (root, rest) = split_key(key);
        let value = self.resolve_root(root)?;
        Ok(match rest {
            Some(rest) => value.path(rest),
            None => value,
        })
    }

    fn resolve_root(&self, root: &str) -> ComputableResult<Value> {
        let (descriptor, generation) = {
            let state = self.store.state();
            if let Some(value) = state.values.get(root) {
                return Ok(value.clone());
            }
            let Some(field) = state.derived.get(root) else {
                return Ok(Value::Undefined);
            };
            if let Some(cached) = &field.cached {
                trace!(field = %root, "Cache hit");
                return Ok(cached.clone());
            }
            (field.descriptor.clone(), state.generation)
        };

        {
            let stack = self.stack.borrow();
            if stack.iter().any(|entry| entry == root) {
                let mut chain = stack.clone();
                chain.push(root.to_string());
                return Err(ComputableError::Cycle {
                    key: root.to_string(),
                    chain,
                });
            }
            if stack.len() >= self.store.config.max_depth {
                return Err(ComputableError::DepthExceeded {
                    key: root.to_string(),
                    depth: self.store.config.max_depth,
                });
            }
        }

        debug!(field = %root, "Recomputing derived field");
        self.stack.borrow_mut().push(root.to_string());
        let value = descriptor.compute(self);
        self.stack.borrow_mut().pop();

        if let Some(err) = self.failure.borrow().clone() {
            return Err(err);
        }

        let mut state = self.store.state();
        if state.generation == generation {
            if let Some(field) = state.derived.get_mut(root) {
                field.cached = Some(value.clone());
            }
        } else {
            trace!(field = %root, "Store changed during recompute; not caching");
        }
        Ok(value)
    }
}

impl Context for Resolution<'_> {
    fn get(&self, key: &str) -> Value {
        match self.resolve(key) {
            Ok(value) => value,
            Err(err) => {
                let mut failure = self.failure.borrow_mut();
                if failure.is_none() {
                    *failure = Some(err);
                }
                Value::Undefined
            }
        }
    }
}

/// Builder collecting plain values and derived fields before creation
#[derive(Default)]
pub struct StoreBuilder {
    config: StoreConfig,
    values: Vec<(String, Value)>,
    derived: Vec<(String, Descriptor)>,
}

impl StoreBuilder {
    /// Use `config` instead of the default configuration
    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a plain field
    pub fn value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.push((key.into(), value.into()));
        self
    }

    /// Add a derived field
    pub fn derived(mut self, key: impl Into<String>, descriptor: Descriptor) -> Self {
        self.derived.push((key.into(), descriptor));
        self
    }

    /// Create the store
    ///
    /// # Errors
    ///
    /// [`ComputableError::DuplicateField`] if a name is declared twice.
    pub fn build(self) -> ComputableResult<Store> {
        let store = Store::with_config(self.config);
        {
            let mut state = store.state();
            for (key, value) in self.values {
                if state.values.contains_key(&key) {
                    return Err(ComputableError::DuplicateField(key));
                }
                state.values.insert(key, value);
            }
        }
        for (key, descriptor) in self.derived {
            store.define(key, descriptor)?;
        }
        Ok(store)
    }
}

/// Split `a.b.c` into `("a", Some("b.c"))`
fn split_key(key: &str) -> (&str, Option<&str>) {
    match key.split_once('.') {
        Some((root, rest)) => (root, Some(rest)),
        None => (key, None),
    }
}

fn push_unique(keys: &mut Vec<String>, key: String) {
    if !keys.contains(&key) {
        keys.push(key);
    }
}

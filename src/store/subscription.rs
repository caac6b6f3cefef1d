// Copyright (c) 2025 - Cowboy AI, Inc.
//! Change subscriptions

use super::split_key;
use crate::composable::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Handle returned by [`Store::subscribe`](super::Store::subscribe)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Called with the store (to read new values) and the changed key
pub type ChangeCallback = Arc<dyn Fn(&dyn Context, &str) + Send + Sync>;

struct Subscription {
    id: SubscriptionId,
    key: String,
    callback: ChangeCallback,
}

/// Registered callbacks in subscription order
#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: u64,
    entries: Vec<Subscription>,
}

impl Subscribers {
    pub(crate) fn add(&mut self, key: String, callback: ChangeCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push(Subscription { id, key, callback });
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Callbacks to fire for the changed root `keys`, grouped by key in the
    /// given order
    ///
    /// A subscription matches when the root segment of its key is one of
    /// `keys`; it is paired with its own key, dotted or not.
    pub(crate) fn matching(&self, keys: &[String]) -> Vec<(String, ChangeCallback)> {
        keys.iter()
            .flat_map(|changed| {
                self.entries
                    .iter()
                    .filter(move |entry| split_key(&entry.key).0 == changed.as_str())
                    .map(|entry| (entry.key.clone(), entry.callback.clone()))
            })
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> ChangeCallback {
        Arc::new(|_: &dyn Context, _: &str| {})
    }

    #[test]
    fn test_ids_are_unique() {
        let mut subscribers = Subscribers::default();
        let a = subscribers.add("a".to_string(), noop());
        let b = subscribers.add("a".to_string(), noop());
        assert_ne!(a, b);
        assert_eq!(a.to_string(), "sub-0");
    }

    #[test]
    fn test_remove() {
        let mut subscribers = Subscribers::default();
        let id = subscribers.add("a".to_string(), noop());
        assert!(subscribers.remove(id));
        assert!(!subscribers.remove(id));
        assert_eq!(subscribers.len(), 0);
    }

    #[test]
    fn test_matching_orders_by_key_then_subscription() {
        let mut subscribers = Subscribers::default();
        subscribers.add("b".to_string(), noop());
        subscribers.add("a".to_string(), noop());
        subscribers.add("b".to_string(), noop());
        subscribers.add("c".to_string(), noop());

        let keys: Vec<String> = subscribers
            .matching(&["a".to_string(), "b".to_string()])
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(keys, ["a", "b", "b"]);
    }

    #[test]
    fn test_matching_dotted_key_by_root() {
        let mut subscribers = Subscribers::default();
        subscribers.add("user.name".to_string(), noop());
        subscribers.add("username".to_string(), noop());

        let keys: Vec<String> = subscribers
            .matching(&["user".to_string()])
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(keys, ["user.name"]);
        assert!(subscribers.matching(&["user.name".to_string()]).is_empty());
    }
}

use std::sync::Arc;

use crate::{scene::entity::EntityId, user::UserKey};

use super::change::Change;

/// The callback form observers are stored in. Invoked with the pending
/// change plus the originating user and target entity; the only mutation
/// available through `change` is [`Change::deny`].
pub(crate) type ObserverFn = dyn Fn(&Change, UserKey, EntityId) + Send + Sync;

// ObserverKey
/// Handle returned by [`InterceptRegistry::subscribe`], used to
/// unsubscribe. Unique per registry for the registry's lifetime.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct ObserverKey(u64);

impl ObserverKey {
    pub fn to_u64(&self) -> u64 {
        self.0
    }
}

// InterceptRegistry
/// The ordered list of observers subscribed to "about to modify"
/// notifications on one Scene.
///
/// Subscription order is the invocation order, and dispatch operates on a
/// point-in-time snapshot: subscribing or unsubscribing during an in-flight
/// dispatch never affects that dispatch's observer list.
pub struct InterceptRegistry {
    observers: Vec<(ObserverKey, Arc<ObserverFn>)>,
    next_key: u64,
}

impl InterceptRegistry {
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
            next_key: 1,
        }
    }

    /// Appends an observer to the end of the invocation order.
    pub fn subscribe<F>(&mut self, observer: F) -> ObserverKey
    where
        F: Fn(&Change, UserKey, EntityId) + Send + Sync + 'static,
    {
        let key = ObserverKey(self.next_key);
        self.next_key += 1;
        self.observers.push((key, Arc::new(observer)));
        key
    }

    /// Removes an observer. Idempotent: unsubscribing a key twice is a
    /// no-op, not an error.
    pub fn unsubscribe(&mut self, key: &ObserverKey) {
        self.observers.retain(|(entry_key, _)| entry_key != key);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// The ordered, immutable observer list a single dispatch runs against.
    pub(crate) fn snapshot(&self) -> Vec<(ObserverKey, Arc<ObserverFn>)> {
        self.observers.clone()
    }
}

impl Default for InterceptRegistry {
    fn default() -> Self {
        Self::new()
    }
}

//! Name-keyed handler registry, independent of any transport instance.
//!
//! The registry outlives individual transport connections: on a transient
//! drop it is preserved untouched, which is what makes reconnection
//! transparent to subscribers. Only an explicit disconnect clears it.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

/// A subscriber callback. Identity is the `Arc` allocation: registering the
/// same `Arc` (or a clone of it) twice for one event is idempotent.
pub type Handler = Arc<dyn Fn(&serde_json::Value) + Send + Sync>;

/// Wraps a closure into a [`Handler`].
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&serde_json::Value) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Maps event names to insertion-ordered sets of handlers.
///
/// All methods take brief internal locks and never invoke handlers, so
/// calling them from inside a handler callback is safe.
pub struct EventRegistry {
    entries: RwLock<HashMap<String, Vec<Handler>>>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Adds `handler` to the set for `event`, creating the slot if absent.
    /// Idempotent for the same handler identity. Returns an unregister guard.
    pub fn register(self: &Arc<Self>, event: impl Into<String>, handler: Handler) -> Subscription {
        let event = event.into();
        {
            let mut entries = self.entries.write();
            let slot = entries.entry(event.clone()).or_default();
            if !slot.iter().any(|existing| Arc::ptr_eq(existing, &handler)) {
                slot.push(Arc::clone(&handler));
            }
        }

        Subscription {
            registry: Arc::downgrade(self),
            event,
            handler,
        }
    }

    /// Removes one handler by identity; deletes the slot when it empties so
    /// the map stays bounded.
    pub fn unregister(&self, event: &str, handler: &Handler) {
        let mut entries = self.entries.write();
        if let Some(slot) = entries.get_mut(event) {
            slot.retain(|existing| !Arc::ptr_eq(existing, handler));
            if slot.is_empty() {
                entries.remove(event);
            }
        }
    }

    /// Deletes the slot for `event` outright.
    pub fn unregister_all(&self, event: &str) {
        self.entries.write().remove(event);
    }

    /// Point-in-time copy of the handler set for one event, in insertion
    /// order. Mutations after the copy do not affect it.
    pub fn snapshot(&self, event: &str) -> Vec<Handler> {
        self.entries.read().get(event).cloned().unwrap_or_default()
    }

    /// Point-in-time copy of the full name-to-handlers mapping, used to
    /// replay subscriptions onto a newly established transport.
    pub fn snapshot_all(&self) -> HashMap<String, Vec<Handler>> {
        self.entries.read().clone()
    }

    /// Empties the registry. Called on explicit disconnect only.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for EventRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Undo guard for one registration.
///
/// Dropping the guard without calling [`unsubscribe`](Self::unsubscribe)
/// leaves the registration alive.
pub struct Subscription {
    registry: Weak<EventRegistry>,
    event: String,
    handler: Handler,
}

impl Subscription {
    /// Removes exactly the handler this guard was created for.
    pub fn unsubscribe(self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.unregister(&self.event, &self.handler);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> Handler {
        handler(|_| {})
    }

    #[test]
    fn register_creates_slot() {
        let registry = Arc::new(EventRegistry::new());
        let _sub = registry.register("post:created", noop());

        assert_eq!(registry.snapshot("post:created").len(), 1);
    }

    #[test]
    fn double_register_same_identity_is_idempotent() {
        let registry = Arc::new(EventRegistry::new());
        let h = noop();

        let _a = registry.register("points:awarded", h.clone());
        let _b = registry.register("points:awarded", h.clone());

        assert_eq!(registry.snapshot("points:awarded").len(), 1);
    }

    #[test]
    fn distinct_handlers_keep_insertion_order() {
        let registry = Arc::new(EventRegistry::new());
        let first = noop();
        let second = noop();

        let _a = registry.register("comment:created", first.clone());
        let _b = registry.register("comment:created", second.clone());

        let snapshot = registry.snapshot("comment:created");
        assert_eq!(snapshot.len(), 2);
        assert!(Arc::ptr_eq(&snapshot[0], &first));
        assert!(Arc::ptr_eq(&snapshot[1], &second));
    }

    #[test]
    fn unregister_removes_only_the_given_identity() {
        let registry = Arc::new(EventRegistry::new());
        let keep = noop();
        let drop_me = noop();

        let _a = registry.register("report:filed", keep.clone());
        let _b = registry.register("report:filed", drop_me.clone());
        registry.unregister("report:filed", &drop_me);

        let snapshot = registry.snapshot("report:filed");
        assert_eq!(snapshot.len(), 1);
        assert!(Arc::ptr_eq(&snapshot[0], &keep));
    }

    #[test]
    fn empty_slot_is_deleted() {
        let registry = Arc::new(EventRegistry::new());
        let h = noop();

        let _sub = registry.register("reward:granted", h.clone());
        registry.unregister("reward:granted", &h);

        assert!(registry.is_empty());
        assert!(!registry.snapshot_all().contains_key("reward:granted"));
    }

    #[test]
    fn unregister_all_deletes_slot() {
        let registry = Arc::new(EventRegistry::new());
        let _a = registry.register("post:deleted", noop());
        let _b = registry.register("post:deleted", noop());

        registry.unregister_all("post:deleted");

        assert!(registry.snapshot("post:deleted").is_empty());
    }

    #[test]
    fn snapshot_is_isolated_from_later_mutations() {
        let registry = Arc::new(EventRegistry::new());
        let _a = registry.register("sponsor:joined", noop());

        let snapshot = registry.snapshot_all();
        let _b = registry.register("sponsor:joined", noop());
        let _c = registry.register("sponsor:left", noop());

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot["sponsor:joined"].len(), 1);
    }

    #[test]
    fn subscription_unsubscribe_removes_registration() {
        let registry = Arc::new(EventRegistry::new());
        let sub = registry.register("moderation:user_muted", noop());

        sub.unsubscribe();

        assert!(registry.is_empty());
    }

    #[test]
    fn clear_empties_everything() {
        let registry = Arc::new(EventRegistry::new());
        let _a = registry.register("challenge:created", noop());
        let _b = registry.register("challenge:updated", noop());

        registry.clear();

        assert!(registry.is_empty());
    }
}

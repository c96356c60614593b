use super::types::{EventListener, StoreEvent, StoreEventKind};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use tracing::trace;

/// Single-subscriber event dispatcher shared by the registry and its stores
///
/// Cloning is cheap; every clone delivers to the same listener slot.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    slot: Arc<Mutex<ListenerSlot>>,
}

#[derive(Default)]
struct ListenerSlot {
    listener: Option<Arc<dyn EventListener>>,
    generation: u64,
}

impl ListenerSlot {
    fn replace(&mut self, listener: Option<Arc<dyn EventListener>>) -> u64 {
        self.listener = listener;
        self.generation += 1;
        self.generation
    }
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dispatcher with a listener already installed
    pub fn with_listener(listener: Arc<dyn EventListener>) -> Self {
        let dispatcher = Self::new();
        dispatcher.set_listener(Some(listener));
        dispatcher
    }

    /// Replace the listener wholesale; `None` clears it
    pub fn set_listener(&self, listener: Option<Arc<dyn EventListener>>) {
        self.slot.lock().replace(listener);
    }

    /// Install a listener and return a handle that can remove it again
    pub fn register(&self, listener: Arc<dyn EventListener>) -> ListenerRegistration {
        let generation = self.slot.lock().replace(Some(listener));
        ListenerRegistration {
            slot: Arc::downgrade(&self.slot),
            generation,
        }
    }

    pub fn has_listener(&self) -> bool {
        self.slot.lock().listener.is_some()
    }

    /// Deliver an event to the listener, if any, stamped with the current time
    pub fn emit(&self, kind: StoreEventKind, name: &str) {
        // Clone out so the callback runs without the slot lock held.
        let listener = self.slot.lock().listener.clone();

        match listener {
            Some(listener) => {
                let timestamp_millis = chrono::Utc::now().timestamp_millis();
                trace!(kind = %kind, name = %name, "Dispatching store event");
                listener.notify(kind, timestamp_millis, name);
            }
            None => trace!(kind = %kind, name = %name, "No listener registered, event dropped"),
        }
    }

    /// Deliver a prebuilt event, keeping its timestamp
    pub fn emit_event(&self, event: &StoreEvent) {
        let listener = self.slot.lock().listener.clone();
        if let Some(listener) = listener {
            listener.notify(event.kind, event.timestamp_millis, &event.name);
        }
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slot = self.slot.lock();
        f.debug_struct("EventDispatcher")
            .field("has_listener", &slot.listener.is_some())
            .field("generation", &slot.generation)
            .finish()
    }
}

/// Handle returned by [`EventDispatcher::register`]
///
/// Dropping the handle leaves the listener installed; call
/// [`deregister`](Self::deregister) to remove it.
#[derive(Debug)]
pub struct ListenerRegistration {
    slot: Weak<Mutex<ListenerSlot>>,
    generation: u64,
}

impl ListenerRegistration {
    /// Remove the listener this handle installed
    ///
    /// Returns `false` when the listener was already replaced or cleared, in
    /// which case the slot is left untouched.
    pub fn deregister(self) -> bool {
        let Some(slot) = self.slot.upgrade() else {
            return false;
        };
        let mut slot = slot.lock();
        if slot.generation != self.generation || slot.listener.is_none() {
            return false;
        }
        slot.replace(None);
        true
    }

    /// Whether the registered listener is still the one installed
    pub fn is_active(&self) -> bool {
        self.slot
            .upgrade()
            .map(|slot| {
                let slot = slot.lock();
                slot.generation == self.generation && slot.listener.is_some()
            })
            .unwrap_or(false)
    }
}

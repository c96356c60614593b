//! # Store Registry
//!
//! Name-keyed registry of record stores with create/open/delete lifecycle.
//!
//! ## Overview
//!
//! The StoreRegistry is the sole owner of the name → store mapping and the
//! gatekeeper for every lifecycle transition:
//!
//! ```text
//! ABSENT ──open(name, true)──▶ REGISTERED{open}
//! REGISTERED{open} ──close──▶ REGISTERED{closed}
//! REGISTERED{closed} ──delete──▶ ABSENT
//! ```
//!
//! Opening an absent store without permission to create it fails with
//! [`StoreError::NotFound`]; deleting an open store fails with
//! [`StoreError::Conflict`]. Failed operations never mutate the registry and
//! never notify the listener.
//!
//! The open state is a single flag: opening an already open store is
//! indistinguishable from a first open, and one close clears it.
//!
//! ## Usage
//!
//! ```rust
//! use rms_memstore::{StoreError, StoreRegistry};
//!
//! let mut registry = StoreRegistry::new();
//! assert_eq!(registry.list(), None);
//!
//! let scores = registry.open("scores", true).unwrap();
//! scores.write().add_record(b"alice:10").unwrap();
//!
//! assert_eq!(
//!     registry.delete("scores"),
//!     Err(StoreError::Conflict("scores".to_string()))
//! );
//!
//! scores.close();
//! registry.delete("scores").unwrap();
//! assert_eq!(registry.list(), None);
//! ```

use super::capacity::{truncate_capacity, FixedMemoryProbe, MemoryProbe, SystemMemoryProbe};
use crate::config::RegistryConfig;
use crate::constants::system::BACKEND_NAME;
use crate::error::{Result, StoreError};
use crate::events::{EventDispatcher, EventListener, ListenerRegistration, StoreEventKind};
use crate::logging::log_registry_operation;
use crate::store::{MemoryRecordStore, RecordStore, StoreHandle};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Registry of named in-memory record stores
pub struct StoreRegistry<S: RecordStore = MemoryRecordStore> {
    /// Registered stores keyed by case-sensitive name
    stores: HashMap<String, StoreHandle<S>>,
    /// Listener slot shared with every store
    events: EventDispatcher,
    /// Source of the available capacity estimate
    probe: Arc<dyn MemoryProbe>,
    /// Forward record-level events to the listener
    record_events: bool,
}

impl StoreRegistry<MemoryRecordStore> {
    /// Create an empty registry of memory record stores
    pub fn new() -> Self {
        Self::with_probe(Arc::new(SystemMemoryProbe))
    }
}

impl Default for StoreRegistry<MemoryRecordStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: RecordStore> StoreRegistry<S> {
    /// Create an empty registry sampling capacity from `probe`
    pub fn with_probe(probe: Arc<dyn MemoryProbe>) -> Self {
        Self {
            stores: HashMap::new(),
            events: EventDispatcher::new(),
            probe,
            record_events: true,
        }
    }

    /// Create an empty registry from loaded configuration
    pub fn from_config(config: &RegistryConfig) -> Self {
        let probe: Arc<dyn MemoryProbe> = match config.fixed_free_memory_bytes {
            Some(bytes) => Arc::new(FixedMemoryProbe(bytes)),
            None => Arc::new(SystemMemoryProbe),
        };

        let mut registry = Self::with_probe(probe);
        registry.record_events = config.record_events;
        debug!(
            environment = %config.environment,
            record_events = config.record_events,
            fixed_capacity = ?config.fixed_free_memory_bytes,
            "Record store registry configured"
        );
        registry
    }

    /// Install the listener at construction time
    pub fn with_listener(self, listener: Arc<dyn EventListener>) -> Self {
        self.events.set_listener(Some(listener));
        self
    }

    /// Startup hook called once by the host; performs no state change
    pub fn initialize(&mut self) {
        debug!(backend = BACKEND_NAME, "Record store registry initialized");
    }

    /// Fixed label identifying this storage backend
    pub fn identify(&self) -> &'static str {
        BACKEND_NAME
    }

    /// Open a store, creating it first when allowed
    ///
    /// An existing store is marked open and its handle returned. An absent
    /// store is created, registered, marked open and announced with a
    /// [`StoreEventKind::Created`] event when `create_if_necessary` is set,
    /// otherwise the call fails with [`StoreError::NotFound`].
    pub fn open(&mut self, name: &str, create_if_necessary: bool) -> Result<StoreHandle<S>> {
        if let Some(handle) = self.stores.get(name) {
            handle.set_open(true);
            debug!(name = %name, "Opened existing record store");
            return Ok(handle.clone());
        }

        if !create_if_necessary {
            return Err(StoreError::NotFound(name.to_string()));
        }

        let dispatcher = if self.record_events {
            self.events.clone()
        } else {
            EventDispatcher::new()
        };
        let handle = StoreHandle::new(S::create(name), dispatcher);
        handle.set_open(true);
        self.stores.insert(name.to_string(), handle.clone());

        log_registry_operation("open", name, "created", None);
        self.emit_event(StoreEventKind::Created, name);
        Ok(handle)
    }

    /// Remove a closed store from the registry
    pub fn delete(&mut self, name: &str) -> Result<()> {
        let handle = self
            .stores
            .get(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;

        if handle.is_open() {
            return Err(StoreError::Conflict(name.to_string()));
        }

        self.stores.remove(name);

        log_registry_operation("delete", name, "deleted", None);
        self.emit_event(StoreEventKind::Deleted, name);
        Ok(())
    }

    /// Names of every registered store, or `None` when there are none
    ///
    /// Order is unspecified.
    pub fn list(&self) -> Option<Vec<String>> {
        if self.stores.is_empty() {
            return None;
        }
        Some(self.stores.keys().cloned().collect())
    }

    /// Flush a store; memory-resident stores have nothing to write
    pub fn persist(&self, _handle: &StoreHandle<S>) {}

    /// Reserved for bulk deletion; currently does nothing
    pub fn purge_all(&mut self) {}

    /// Approximate free space, sampled from global free memory
    ///
    /// Not specific to `handle`. The byte count is truncated to `i32` and may
    /// wrap for very large values.
    pub fn available_capacity(&self, _handle: &StoreHandle<S>) -> i32 {
        truncate_capacity(self.probe.free_memory_bytes())
    }

    /// Replace the listener wholesale; `None` clears it
    pub fn set_event_listener(&mut self, listener: Option<Arc<dyn EventListener>>) {
        self.events.set_listener(listener);
    }

    /// Install a listener and return a handle that removes it again
    pub fn register_listener(&self, listener: Arc<dyn EventListener>) -> ListenerRegistration {
        self.events.register(listener)
    }

    /// Dispatcher shared with the stores, for events signalled from outside
    pub fn event_dispatcher(&self) -> &EventDispatcher {
        &self.events
    }

    pub fn contains(&self, name: &str) -> bool {
        self.stores.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Get registry statistics
    pub fn stats(&self) -> RegistryStats {
        let open_stores = self.stores.values().filter(|h| h.is_open()).count();
        RegistryStats {
            total_stores: self.stores.len(),
            open_stores,
        }
    }

    fn emit_event(&self, kind: StoreEventKind, name: &str) {
        self.events.emit(kind, name);
    }
}

impl<S: RecordStore> std::fmt::Debug for StoreRegistry<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreRegistry")
            .field("stores", &self.stores.keys().collect::<Vec<_>>())
            .field("events", &self.events)
            .field("record_events", &self.record_events)
            .finish()
    }
}

/// Statistics about registered stores
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    pub total_stores: usize,
    pub open_stores: usize,
}

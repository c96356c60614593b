//! The record store contract the registry manages, and the shared handle
//! through which callers reach a store.

use crate::events::{EventDispatcher, StoreEvent};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

/// Content container for one named record collection
///
/// The registry only relies on the open flag and `close`; everything else
/// about the records belongs to the implementation. Stores never call the
/// listener themselves: they queue events, and [`StoreHandle`] delivers them
/// once the store lock is released.
pub trait RecordStore: Send + Sync {
    /// Construct an empty store, initially closed
    fn create(name: &str) -> Self
    where
        Self: Sized;

    fn name(&self) -> &str;

    fn is_open(&self) -> bool;

    fn set_open(&mut self, open: bool);

    /// Close the store; a closed store may be deleted from the registry
    fn close(&mut self);

    /// Take the events queued since the last call
    fn drain_events(&mut self) -> Vec<StoreEvent> {
        Vec::new()
    }
}

/// Shared handle to a registered store
///
/// Clones refer to the same store, so a `close` through the caller's handle is
/// visible to the registry.
pub struct StoreHandle<S: RecordStore> {
    name: Arc<str>,
    inner: Arc<RwLock<S>>,
    events: EventDispatcher,
}

impl<S: RecordStore> StoreHandle<S> {
    pub(crate) fn new(store: S, events: EventDispatcher) -> Self {
        Self {
            name: Arc::from(store.name()),
            inner: Arc::new(RwLock::new(store)),
            events,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_open(&self) -> bool {
        self.inner.read().is_open()
    }

    pub(crate) fn set_open(&self, open: bool) {
        self.inner.write().set_open(open);
    }

    pub fn close(&self) {
        let pending = {
            let mut store = self.inner.write();
            store.close();
            store.drain_events()
        };
        self.dispatch(&pending);
    }

    pub fn read(&self) -> RwLockReadGuard<'_, S> {
        self.inner.read()
    }

    /// Exclusive access to the store
    ///
    /// Events raised through the guard reach the listener after the lock is
    /// released, when the guard is dropped.
    pub fn write(&self) -> StoreWriteGuard<'_, S> {
        StoreWriteGuard {
            guard: Some(self.inner.write()),
            events: &self.events,
        }
    }

    /// Whether both handles point at the same store instance
    pub fn same_store(&self, other: &StoreHandle<S>) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn dispatch(&self, pending: &[StoreEvent]) {
        for event in pending {
            self.events.emit_event(event);
        }
    }
}

impl<S: RecordStore> Clone for StoreHandle<S> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            inner: Arc::clone(&self.inner),
            events: self.events.clone(),
        }
    }
}

impl<S: RecordStore> std::fmt::Debug for StoreHandle<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreHandle")
            .field("name", &self.name)
            .field("open", &self.is_open())
            .finish()
    }
}

/// Write guard returned by [`StoreHandle::write`]
///
/// Releases the store lock before delivering queued events on drop.
pub struct StoreWriteGuard<'a, S: RecordStore> {
    // Only `None` while dropping.
    guard: Option<RwLockWriteGuard<'a, S>>,
    events: &'a EventDispatcher,
}

impl<S: RecordStore> Deref for StoreWriteGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        match &self.guard {
            Some(guard) => guard,
            None => unreachable!("store guard used after release"),
        }
    }
}

impl<S: RecordStore> DerefMut for StoreWriteGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        match &mut self.guard {
            Some(guard) => guard,
            None => unreachable!("store guard used after release"),
        }
    }
}

impl<S: RecordStore> Drop for StoreWriteGuard<'_, S> {
    fn drop(&mut self) {
        let pending = match self.guard.take() {
            Some(mut guard) => guard.drain_events(),
            None => return,
        };
        for event in &pending {
            self.events.emit_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventListener, StoreEventKind};
    use crate::store::MemoryRecordStore;
    use parking_lot::Mutex;
    use std::sync::OnceLock;

    /// Handle whose listener reads the handle back on every record event
    fn reentrant_handle() -> (StoreHandle<MemoryRecordStore>, Arc<Mutex<Vec<(StoreEventKind, bool, usize)>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let slot: Arc<OnceLock<StoreHandle<MemoryRecordStore>>> = Arc::new(OnceLock::new());
        let target = Arc::clone(&slot);

        let listener: Arc<dyn EventListener> =
            Arc::new(move |kind: StoreEventKind, _ts: i64, _name: &str| {
                if let Some(handle) = target.get() {
                    let open = handle.is_open();
                    let records = handle.read().record_ids().map(|ids| ids.len()).unwrap_or(0);
                    sink.lock().push((kind, open, records));
                }
            });

        let handle = StoreHandle::new(
            MemoryRecordStore::create("reentrant"),
            EventDispatcher::with_listener(listener),
        );
        handle.set_open(true);
        let _ = slot.set(handle.clone());
        (handle, seen)
    }

    #[test]
    fn test_listener_can_read_store_during_record_events() {
        let (handle, seen) = reentrant_handle();

        let id = handle.write().add_record(b"x").unwrap();
        {
            let mut store = handle.write();
            store.set_record(id, b"y").unwrap();
            store.add_record(b"z").unwrap();
        }

        assert_eq!(
            *seen.lock(),
            vec![
                (StoreEventKind::RecordAdded, true, 1),
                (StoreEventKind::RecordChanged, true, 2),
                (StoreEventKind::RecordAdded, true, 2),
            ]
        );
    }

    #[test]
    fn test_listener_can_read_store_during_close() {
        let (handle, seen) = reentrant_handle();

        handle.close();

        assert_eq!(*seen.lock(), vec![(StoreEventKind::Closed, false, 0)]);
    }

    #[test]
    fn test_listener_can_write_store_after_event() {
        let (handle, _) = reentrant_handle();
        let writer = handle.clone();
        let calls = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&calls);
        handle.events.set_listener(Some(Arc::new(
            move |kind: StoreEventKind, _ts: i64, _name: &str| {
                if kind == StoreEventKind::RecordAdded && *counter.lock() == 0 {
                    *counter.lock() += 1;
                    writer.write().add_record(b"echo").unwrap();
                }
            },
        )));

        handle.write().add_record(b"first").unwrap();

        assert_eq!(handle.read().num_records().unwrap(), 2);
    }
}

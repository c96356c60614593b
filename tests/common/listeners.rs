use parking_lot::Mutex;
use rms_memstore::{EventListener, FixedMemoryProbe, StoreEvent, StoreEventKind, StoreRegistry};
use std::sync::Arc;

/// Listener that keeps every notification it receives
#[derive(Default)]
pub struct RecordingListener {
    events: Mutex<Vec<StoreEvent>>,
}

impl RecordingListener {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<StoreEvent> {
        self.events.lock().clone()
    }

    /// Only the CREATED / DELETED notifications, as (kind, name) pairs
    pub fn structural(&self) -> Vec<(StoreEventKind, String)> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.kind.is_structural())
            .map(|e| (e.kind, e.name.clone()))
            .collect()
    }

    pub fn count_of(&self, kind: StoreEventKind) -> usize {
        self.events.lock().iter().filter(|e| e.kind == kind).count()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl EventListener for RecordingListener {
    fn notify(&self, kind: StoreEventKind, timestamp_millis: i64, name: &str) {
        self.events
            .lock()
            .push(StoreEvent::new(kind, timestamp_millis, name));
    }
}

/// Registry with a deterministic capacity probe and no listener
pub fn test_registry() -> StoreRegistry {
    StoreRegistry::with_probe(Arc::new(FixedMemoryProbe(8 * 1024 * 1024)))
}

/// Registry with a recording listener installed
pub fn recording_registry() -> (StoreRegistry, Arc<RecordingListener>) {
    let listener = RecordingListener::new();
    let registry = test_registry().with_listener(listener.clone());
    (registry, listener)
}

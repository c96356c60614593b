//! # Memory Record Store
//!
//! Volatile record storage for a single named store. Records are opaque byte
//! payloads keyed by monotonically increasing ids; nothing is ever written to
//! disk.

use super::record_store::RecordStore;
use crate::constants::system::FIRST_RECORD_ID;
use crate::error::{Result, StoreError};
use crate::events::{StoreEvent, StoreEventKind};
use crate::logging::log_store_operation;
use std::collections::BTreeMap;
use tracing::debug;

/// Record store backed entirely by process memory
#[derive(Debug)]
pub struct MemoryRecordStore {
    name: String,
    open: bool,
    records: BTreeMap<u32, Vec<u8>>,
    next_record_id: u32,
    version: u32,
    last_modified: i64,
    /// Events awaiting delivery by the owning handle
    pending: Vec<StoreEvent>,
}

impl MemoryRecordStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            open: false,
            records: BTreeMap::new(),
            next_record_id: FIRST_RECORD_ID,
            version: 0,
            last_modified: 0,
            pending: Vec::new(),
        }
    }

    /// Append a record and return its id
    pub fn add_record(&mut self, data: &[u8]) -> Result<u32> {
        self.ensure_open()?;

        let record_id = self.next_record_id;
        self.records.insert(record_id, data.to_vec());
        self.next_record_id += 1;
        self.touch();

        log_store_operation("add_record", &self.name, Some(record_id), "ok", None);
        self.queue(StoreEventKind::RecordAdded);
        Ok(record_id)
    }

    pub fn get_record(&self, record_id: u32) -> Result<Vec<u8>> {
        self.ensure_open()?;
        self.records
            .get(&record_id)
            .cloned()
            .ok_or_else(|| self.invalid_record(record_id))
    }

    /// Replace the payload of an existing record
    pub fn set_record(&mut self, record_id: u32, data: &[u8]) -> Result<()> {
        self.ensure_open()?;

        let slot = self
            .records
            .get_mut(&record_id)
            .ok_or_else(|| StoreError::InvalidRecordId {
                store: self.name.clone(),
                record_id,
            })?;
        *slot = data.to_vec();
        self.touch();

        log_store_operation("set_record", &self.name, Some(record_id), "ok", None);
        self.queue(StoreEventKind::RecordChanged);
        Ok(())
    }

    pub fn delete_record(&mut self, record_id: u32) -> Result<()> {
        self.ensure_open()?;

        if self.records.remove(&record_id).is_none() {
            return Err(self.invalid_record(record_id));
        }
        self.touch();

        log_store_operation("delete_record", &self.name, Some(record_id), "ok", None);
        self.queue(StoreEventKind::RecordDeleted);
        Ok(())
    }

    pub fn num_records(&self) -> Result<usize> {
        self.ensure_open()?;
        Ok(self.records.len())
    }

    /// Ids of the live records in ascending order
    pub fn record_ids(&self) -> Result<Vec<u32>> {
        self.ensure_open()?;
        Ok(self.records.keys().copied().collect())
    }

    /// Total payload bytes held by the store
    pub fn size(&self) -> Result<usize> {
        self.ensure_open()?;
        Ok(self.records.values().map(Vec::len).sum())
    }

    pub fn next_record_id(&self) -> Result<u32> {
        self.ensure_open()?;
        Ok(self.next_record_id)
    }

    /// Modification counter, bumped on every record mutation
    pub fn version(&self) -> Result<u32> {
        self.ensure_open()?;
        Ok(self.version)
    }

    /// Millisecond timestamp of the last mutation, 0 if never modified
    pub fn last_modified(&self) -> Result<i64> {
        self.ensure_open()?;
        Ok(self.last_modified)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.open {
            Ok(())
        } else {
            Err(StoreError::NotOpen(self.name.clone()))
        }
    }

    fn invalid_record(&self, record_id: u32) -> StoreError {
        StoreError::InvalidRecordId {
            store: self.name.clone(),
            record_id,
        }
    }

    fn queue(&mut self, kind: StoreEventKind) {
        let timestamp_millis = chrono::Utc::now().timestamp_millis();
        self.pending
            .push(StoreEvent::new(kind, timestamp_millis, self.name.clone()));
    }

    fn touch(&mut self) {
        self.version = self.version.wrapping_add(1);
        self.last_modified = chrono::Utc::now().timestamp_millis();
    }
}

impl RecordStore for MemoryRecordStore {
    fn create(name: &str) -> Self {
        Self::new(name)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        debug!(store = %self.name, "Record store closed");
        self.queue(StoreEventKind::Closed);
    }

    fn drain_events(&mut self) -> Vec<StoreEvent> {
        std::mem::take(&mut self.pending)
    }
}

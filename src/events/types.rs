//! Event kinds, the serialisable event record, and the listener trait.

use crate::constants::events as codes;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of change reported to the event listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreEventKind {
    RecordAdded,
    RecordChanged,
    RecordDeleted,
    Created,
    Closed,
    Deleted,
}

impl StoreEventKind {
    /// Integer code carried on the listener contract
    pub fn code(self) -> i32 {
        match self {
            StoreEventKind::RecordAdded => codes::RECORD_ADDED,
            StoreEventKind::RecordChanged => codes::RECORD_CHANGED,
            StoreEventKind::RecordDeleted => codes::RECORD_DELETED,
            StoreEventKind::Created => codes::STORE_CREATED,
            StoreEventKind::Closed => codes::STORE_CLOSED,
            StoreEventKind::Deleted => codes::STORE_DELETED,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            codes::RECORD_ADDED => Some(StoreEventKind::RecordAdded),
            codes::RECORD_CHANGED => Some(StoreEventKind::RecordChanged),
            codes::RECORD_DELETED => Some(StoreEventKind::RecordDeleted),
            codes::STORE_CREATED => Some(StoreEventKind::Created),
            codes::STORE_CLOSED => Some(StoreEventKind::Closed),
            codes::STORE_DELETED => Some(StoreEventKind::Deleted),
            _ => None,
        }
    }

    /// Whether the event changes registry membership
    pub fn is_structural(self) -> bool {
        matches!(self, StoreEventKind::Created | StoreEventKind::Deleted)
    }
}

impl fmt::Display for StoreEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StoreEventKind::RecordAdded => "record_added",
            StoreEventKind::RecordChanged => "record_changed",
            StoreEventKind::RecordDeleted => "record_deleted",
            StoreEventKind::Created => "created",
            StoreEventKind::Closed => "closed",
            StoreEventKind::Deleted => "deleted",
        };
        f.write_str(label)
    }
}

/// A single notification as delivered to a listener
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreEvent {
    pub kind: StoreEventKind,
    pub timestamp_millis: i64,
    pub name: String,
}

impl StoreEvent {
    pub fn new(kind: StoreEventKind, timestamp_millis: i64, name: impl Into<String>) -> Self {
        Self {
            kind,
            timestamp_millis,
            name: name.into(),
        }
    }
}

/// Single subscriber notified of store lifecycle and record changes
///
/// Notifications are delivered synchronously on the thread that performed the
/// operation, before the operation returns.
pub trait EventListener: Send + Sync {
    fn notify(&self, kind: StoreEventKind, timestamp_millis: i64, name: &str);
}

impl<F> EventListener for F
where
    F: Fn(StoreEventKind, i64, &str) + Send + Sync,
{
    fn notify(&self, kind: StoreEventKind, timestamp_millis: i64, name: &str) {
        self(kind, timestamp_millis, name)
    }
}

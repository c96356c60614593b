//! # Error Types
//!
//! Errors raised by the record store registry and the stores it manages.
//!
//! The registry itself only ever produces [`StoreError::NotFound`] and
//! [`StoreError::Conflict`]; the remaining variants come from record-level
//! operations on a [`MemoryRecordStore`](crate::store::MemoryRecordStore).

use thiserror::Error;

/// Errors surfaced by registry and record store operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The named record store is not registered
    #[error("Record store '{0}' not found")]
    NotFound(String),

    /// The named record store is still open and cannot be deleted
    #[error("Record store '{0}' is still open")]
    Conflict(String),

    /// A record operation was attempted on a closed store
    #[error("Record store '{0}' is not open")]
    NotOpen(String),

    /// The record id does not exist in the store
    #[error("Invalid record id {record_id} in record store '{store}'")]
    InvalidRecordId { store: String, record_id: u32 },
}

pub type Result<T> = std::result::Result<T, StoreError>;

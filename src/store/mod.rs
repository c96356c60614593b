//! # Record Stores
//!
//! The store contract managed by the registry and its default in-memory
//! implementation.

pub mod memory;
pub mod record_store;

pub use memory::MemoryRecordStore;
pub use record_store::{RecordStore, StoreHandle, StoreWriteGuard};

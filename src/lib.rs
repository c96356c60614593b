#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

//! # RMS Memory Store
//!
//! In-memory record store manager for an emulated mobile runtime's storage
//! subsystem (an RMS-style key/value store API).
//!
//! ## Overview
//!
//! Stores live only in process memory; nothing is persisted. The crate is
//! built around a single [`StoreRegistry`] that owns the mapping from store
//! name to store handle, guards deletion of open stores, and notifies one
//! optional [`EventListener`] of creations and deletions.
//!
//! ## Module Organization
//!
//! - [`registry`] - Store registry and capacity probe
//! - [`store`] - Record store contract and the in-memory implementation
//! - [`events`] - Event kinds, listener trait and dispatcher
//! - [`config`] - Layered configuration loading
//! - [`error`] - Store error types
//! - [`logging`] - Structured logging setup and helpers
//!
//! ## Quick Start
//!
//! ```rust
//! use rms_memstore::{StoreEventKind, StoreRegistry};
//! use std::sync::Arc;
//!
//! let mut registry = StoreRegistry::new().with_listener(Arc::new(
//!     |kind: StoreEventKind, _timestamp: i64, name: &str| println!("{kind}: {name}"),
//! ));
//!
//! let settings = registry.open("settings", true).unwrap();
//! let id = settings.write().add_record(b"volume=7").unwrap();
//! assert_eq!(settings.read().get_record(id).unwrap(), b"volume=7".to_vec());
//!
//! assert_eq!(registry.list(), Some(vec!["settings".to_string()]));
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod logging;
pub mod registry;
pub mod store;

pub use crate::config::{ConfigurationError, RegistryConfig};
pub use error::{Result, StoreError};
pub use events::{EventDispatcher, EventListener, ListenerRegistration, StoreEvent, StoreEventKind};
pub use registry::{
    FixedMemoryProbe, MemoryProbe, RegistryStats, StoreRegistry, SystemMemoryProbe,
};
pub use store::{MemoryRecordStore, RecordStore, StoreHandle, StoreWriteGuard};

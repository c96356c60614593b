//! # Store Events
//!
//! Listener-based notification of record store lifecycle and record changes.
//!
//! A registry holds exactly one listener slot. The same [`EventDispatcher`] is
//! cloned into every store it creates, so record-level events reach the same
//! listener as the registry's own CREATED and DELETED notifications.

pub mod publisher;
pub mod types;

pub use publisher::{EventDispatcher, ListenerRegistration};
pub use types::{EventListener, StoreEvent, StoreEventKind};

//! # Registry Infrastructure
//!
//! The record store registry and the capacity probe it samples.
//!
//! ## Architecture
//!
//! ```text
//! Registry Infrastructure
//! ├── StoreRegistry   (name → store mapping, lifecycle, event dispatch)
//! └── MemoryProbe     (global free-memory estimate for available_capacity)
//! ```

pub mod capacity;
pub mod store_registry;

pub use capacity::{truncate_capacity, FixedMemoryProbe, MemoryProbe, SystemMemoryProbe};
pub use store_registry::{RegistryStats, StoreRegistry};

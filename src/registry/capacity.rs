//! # Capacity Probe
//!
//! Best-effort free space estimate for record stores. The figure is a
//! process-wide memory sample, not per-store accounting.

use sysinfo::System;
use tracing::trace;

/// Source of the global free-memory figure
pub trait MemoryProbe: Send + Sync {
    fn free_memory_bytes(&self) -> u64;
}

/// Samples free system memory through `sysinfo` on every call
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemMemoryProbe;

impl MemoryProbe for SystemMemoryProbe {
    fn free_memory_bytes(&self) -> u64 {
        let mut sys = System::new();
        sys.refresh_memory();

        let free = sys.free_memory();
        trace!(free_bytes = free, total_bytes = sys.total_memory(), "Sampled system memory");
        free
    }
}

/// Reports a constant figure, for deterministic emulation and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedMemoryProbe(pub u64);

impl MemoryProbe for FixedMemoryProbe {
    fn free_memory_bytes(&self) -> u64 {
        self.0
    }
}

/// Narrow a byte count to the 32-bit figure callers expect
///
/// Plain truncating cast: values above `i32::MAX` wrap, possibly to a negative
/// number.
pub fn truncate_capacity(bytes: u64) -> i32 {
    bytes as i32
}

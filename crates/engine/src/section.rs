//! Shared-section access seam
//!
//! All raw access to the session's shared memory (the handle table and
//! the desktop heaps) happens behind this trait. The snapshot core only
//! ever sees by-value copies; the implementation on a live system is the
//! narrowly scoped unsafe boundary, and tests substitute scripted tables.

use hookscope_sdk::{HandleEntry, HookObject, KernelAddr};

/// Read-only view of the session's shared info section.
///
/// The underlying memory is mutated concurrently by win32k. Implementors
/// must copy each value out whole; callers must treat every return value
/// as a point-in-time sample that may already be stale.
pub trait SharedSection {
    /// Current live entry count of the shared handle table.
    ///
    /// May change between calls; the collector samples it once per scan.
    fn handle_count(&self) -> usize;

    /// Copy the handle table entry at `index` by value.
    ///
    /// `index` is less than a previously sampled `handle_count()`; if the
    /// table shrank in between, implementors return whatever the slot now
    /// holds (typically a freed entry, which the collector filters out by
    /// type).
    fn handle_entry(&self, index: usize) -> HandleEntry;

    /// Copy the HOOK object at a client-translated address by value.
    ///
    /// Returns `None` when the address cannot be read (object freed
    /// mid-scan, or the mapping is gone). The collector skips such
    /// entries; the scan as a whole is not atomic by design.
    fn read_hook(&self, client_addr: KernelAddr) -> Option<HookObject>;
}

//! hookscope - hook collection and snapshot diff core
//!
//! This crate reconstructs a consistent per-desktop inventory of HOOK
//! objects from the session's shared handle table and structurally diffs
//! two such snapshots to classify each hook as added, modified, or
//! removed. It is strictly observational: nothing here installs, alters,
//! or removes a hook.
//!
//! # Re-exports
//!
//! This crate re-exports the SDK and engine crates for convenience:
//! - [`sdk`] - raw win32k value types (handle entries, HOOK fields)
//! - [`engine`] - session context and the shared-section access seam

// Re-export SDK and engine crates
pub use hookscope_engine as engine;
pub use hookscope_sdk as sdk;

pub mod collector;
pub mod config;
pub mod diff;
pub mod report;
pub mod snapshot;

// Re-export commonly used items
pub use collector::{collect, CollectError};
pub use config::{ConfigError, ConfigResult, FilterMode, MonitorConfig};
pub use diff::{
    diff_inventories, diff_stores, ChangedField, DiffEntry, DiffKind, HookFilter,
};
pub use snapshot::{
    DesktopHookInventory, HookRecord, HookStore, IntegrityKind, InventoryError,
};

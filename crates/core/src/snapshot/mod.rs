//! Snapshot store
//!
//! A [`HookStore`] is one full snapshot: an ordered sequence of
//! per-desktop inventories plus the time the snapshot completed. Stores
//! are created empty, populated lazily on first collection (one inventory
//! per context desktop, in context order), and soft-reset in place on
//! every collection after that - the per-inventory storage is never
//! reallocated for the life of the store.
//!
//! A store belongs to exactly one session context and is never shared
//! across contexts.

mod inventory;
mod record;

use std::sync::Arc;
use std::time::SystemTime;

use hookscope_engine::Desktop;
use hookscope_sdk::KernelAddr;

pub use inventory::{DesktopHookInventory, IntegrityKind, InventoryError};
pub use record::HookRecord;

/// One snapshot: every tracked desktop's hook inventory.
#[derive(Debug, Default)]
pub struct HookStore {
    inventories: Vec<DesktopHookInventory>,
    init_time: Option<SystemTime>,
}

impl HookStore {
    /// Create an empty store; inventories are built on first collection
    pub fn new() -> Self {
        Self::default()
    }

    /// The per-desktop inventories, in context desktop order
    pub fn inventories(&self) -> &[DesktopHookInventory] {
        &self.inventories
    }

    /// When the snapshot completed, if it has been collected successfully
    pub fn init_time(&self) -> Option<SystemTime> {
        self.init_time
    }

    /// Whether this store holds a completed snapshot
    pub fn is_initialized(&self) -> bool {
        self.init_time.is_some()
    }

    /// Find the inventory whose desktop heap contains `addr`.
    ///
    /// `None` means the object lives on a desktop this session is not
    /// attached to, which is expected for other sessions' hooks.
    pub fn inventory_containing(&self, addr: KernelAddr) -> Option<&DesktopHookInventory> {
        self.inventories.iter().find(|inv| inv.desktop().contains(addr))
    }

    /// Find the inventory for a specific desktop, matched by identity
    pub fn inventory_for(&self, desktop: &Arc<Desktop>) -> Option<&DesktopHookInventory> {
        self.inventories
            .iter()
            .find(|inv| Arc::ptr_eq(inv.desktop(), desktop))
    }

    /// Soft-reset the store: drop every inventory's records and the
    /// completion timestamp, keeping all backing storage.
    pub fn reset(&mut self) {
        self.init_time = None;
        for inv in &mut self.inventories {
            inv.reset();
        }
    }

    /// Prepare the store for a collection pass.
    ///
    /// Builds the inventory list from `desktops` the first time, soft
    /// resets every inventory afterwards. The completion timestamp is
    /// cleared either way; the store only counts as a snapshot again
    /// once collection finishes.
    pub(crate) fn prepare(&mut self, desktops: &[Arc<Desktop>]) {
        if self.inventories.is_empty() {
            self.init_time = None;
            self.inventories = desktops
                .iter()
                .map(|d| DesktopHookInventory::new(Arc::clone(d)))
                .collect();
        } else {
            self.reset();
        }
    }

    pub(crate) fn inventories_mut(&mut self) -> &mut [DesktopHookInventory] {
        &mut self.inventories
    }

    pub(crate) fn stamp(&mut self) {
        self.init_time = Some(SystemTime::now());
    }
}

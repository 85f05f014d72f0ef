//! Per-desktop hook inventory
//!
//! A bounded, reusable array of hook records for one desktop. Capacity is
//! fixed at the session user-object ceiling (65535), allocated once when
//! the inventory is created and reused across snapshots; a re-collection
//! only resets the count.
//!
//! After collection the inventory is finalized: records are sorted
//! ascending by the HOOK's kernel address and the result is validated.
//! A duplicate or null address means the collected data cannot be
//! trusted (a collection bug or a racing table mutation) and is surfaced
//! as an error, never repaired.

use std::sync::Arc;

use hookscope_engine::Desktop;
use hookscope_sdk::{KernelAddr, USER_HANDLE_LIMIT};

use super::record::HookRecord;

/// What a finalize-time integrity check found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityKind {
    /// Two records share one kernel address
    DuplicateAddress,
    /// A record carries a null kernel address
    NullAddress,
}

impl std::fmt::Display for IntegrityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntegrityKind::DuplicateAddress => write!(f, "duplicate pHead"),
            IntegrityKind::NullAddress => write!(f, "null pHead"),
        }
    }
}

/// Error type for inventory mutation
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    /// More hooks than the session user-object ceiling allows; the
    /// environment broke an assumption this design treats as fixed
    #[error("Desktop '{desktop}' exceeded {limit} hook records")]
    CapacityExceeded {
        /// Desktop whose inventory overflowed
        desktop: String,
        /// The configured record ceiling
        limit: usize,
    },

    /// Post-sort validation found an address that cannot be trusted
    #[error("Integrity violation on desktop '{desktop}': {kind} at {address}")]
    IntegrityViolation {
        /// What the check found
        kind: IntegrityKind,
        /// Desktop whose inventory failed validation
        desktop: String,
        /// The offending kernel address
        address: KernelAddr,
    },
}

/// Hook records collected for one desktop at one point in time.
#[derive(Debug, Clone)]
pub struct DesktopHookInventory {
    desktop: Arc<Desktop>,
    records: Vec<HookRecord>,
    capacity: usize,
}

impl DesktopHookInventory {
    /// Create an empty inventory bound to `desktop`, with storage for the
    /// full user-object ceiling reserved up front.
    pub fn new(desktop: Arc<Desktop>) -> Self {
        Self::with_capacity(desktop, USER_HANDLE_LIMIT)
    }

    /// As [`new`](Self::new) but with an explicit record ceiling.
    pub(crate) fn with_capacity(desktop: Arc<Desktop>, capacity: usize) -> Self {
        Self {
            desktop,
            records: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// The desktop this inventory belongs to
    pub fn desktop(&self) -> &Arc<Desktop> {
        &self.desktop
    }

    /// The collected records, sorted by address once finalized
    pub fn records(&self) -> &[HookRecord] {
        &self.records
    }

    /// Number of collected records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records have been collected
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop all records but keep the backing storage for the next scan
    pub fn reset(&mut self) {
        self.records.clear();
    }

    /// Append a record at the next free slot.
    ///
    /// Fails with [`InventoryError::CapacityExceeded`] past the ceiling;
    /// already-appended records are left intact.
    pub fn append(&mut self, record: HookRecord) -> Result<(), InventoryError> {
        if self.records.len() >= self.capacity {
            return Err(InventoryError::CapacityExceeded {
                desktop: self.desktop.name.clone(),
                limit: self.capacity,
            });
        }
        self.records.push(record);
        Ok(())
    }

    /// Sort records ascending by kernel address, then validate that every
    /// address is unique and non-null.
    pub fn finalize(&mut self) -> Result<(), InventoryError> {
        self.records.sort_by_key(|r| r.address());

        if let Some(first) = self.records.first() {
            if first.address().is_null() {
                return Err(self.integrity_error(IntegrityKind::NullAddress, first.address()));
            }
        }
        for pair in self.records.windows(2) {
            let (a, b) = (pair[0].address(), pair[1].address());
            if b.is_null() {
                return Err(self.integrity_error(IntegrityKind::NullAddress, b));
            }
            if a == b {
                return Err(self.integrity_error(IntegrityKind::DuplicateAddress, a));
            }
        }
        Ok(())
    }

    fn integrity_error(&self, kind: IntegrityKind, address: KernelAddr) -> InventoryError {
        InventoryError::IntegrityViolation {
            kind,
            desktop: self.desktop.name.clone(),
            address,
        }
    }
}

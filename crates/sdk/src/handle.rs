//! Shared handle table entry
//!
//! win32k keeps one session-wide table of user-object handle entries
//! (`gSharedInfo.aheList`). Every GUI process maps a read-only view of it,
//! and the table mutates continuously underneath readers. Entries must
//! therefore be copied out by value before inspection.
//!
//! ```text
//! HANDLEENTRY (one slot of aheList)
//! ├── pHead    kernel address of the object (HEAD*)
//! ├── pOwner   owning thread or process (THREADINFO* / PROCESSINFO*)
//! ├── bType    object type index (TYPE_HOOK = 5)
//! ├── bFlags   handle status flags (destroy pending, ...)
//! └── wUniq    uniqueness counter, bumped on slot reuse
//! ```

use crate::address::KernelAddr;

/// Object type index for HOOK objects in the shared handle table
pub const TYPE_HOOK: u8 = 5;

/// Maximum number of user objects per session.
///
/// The handle table never holds more than this many live entries, so a
/// per-desktop hook inventory sized to this ceiling can never legitimately
/// overflow.
pub const USER_HANDLE_LIMIT: usize = 65535;

/// A by-value copy of one shared handle table entry.
///
/// The table may change at any moment, so an entry is always copied out
/// whole and never referenced in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandleEntry {
    /// Kernel address of the object this entry describes
    pub head: KernelAddr,
    /// Kernel address of the owning thread (or process) info
    pub owner: KernelAddr,
    /// Object type index
    pub object_type: u8,
    /// Handle status flags
    pub flags: u8,
    /// Uniqueness counter for this slot
    pub uniq: u16,
}

impl HandleEntry {
    /// Check whether this entry describes a HOOK object
    #[inline]
    pub const fn is_hook(&self) -> bool {
        self.object_type == TYPE_HOOK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_type_check() {
        let mut entry = HandleEntry {
            head: KernelAddr::new(0x1000),
            object_type: TYPE_HOOK,
            ..Default::default()
        };
        assert!(entry.is_hook());

        entry.object_type = 1; // TYPE_WINDOW
        assert!(!entry.is_hook());
    }

    #[test]
    fn test_default_entry_is_free_slot() {
        let entry = HandleEntry::default();
        assert!(entry.head.is_null());
        assert!(!entry.is_hook());
    }
}

//! Collected hook records
//!
//! One record ties together the by-value copies taken during a scan (the
//! handle table entry and the HOOK object behind it) with the resolved
//! identities of the threads involved. Records are plain values owned by
//! their inventory.

use std::sync::Arc;

use hookscope_engine::ThreadIdentity;
use hookscope_sdk::{HandleEntry, HookId, HookObject, KernelAddr};

use crate::report::flags::HookObjectFlags;

/// One collected hook: raw copies plus resolved thread identities.
///
/// Any of the three identities may be unresolved - the thread can be
/// outside the tracked scope. That is a valid state, not an error.
#[derive(Debug, Clone)]
pub struct HookRecord {
    /// By-value copy of the shared handle table entry
    pub entry: HandleEntry,
    /// By-value copy of the HOOK object from the desktop heap
    pub object: HookObject,
    /// Identity resolved from the entry's owning thread (`pOwner`)
    pub owner: Option<Arc<ThreadIdentity>>,
    /// Identity resolved from the installing thread (`pti`)
    pub origin: Option<Arc<ThreadIdentity>>,
    /// Identity resolved from the hooked thread (`ptiHooked`)
    pub target: Option<Arc<ThreadIdentity>>,
}

impl HookRecord {
    /// Kernel address of the HOOK object; the record's identity within an
    /// inventory
    #[inline]
    pub fn address(&self) -> KernelAddr {
        self.entry.head
    }

    /// Decoded WH_* id, if the raw id is a documented one
    #[inline]
    pub fn hook_id(&self) -> Option<HookId> {
        self.object.hook_id()
    }

    /// Whether the hook is global (hooks every thread on the desktop)
    pub fn is_global(&self) -> bool {
        HookObjectFlags::from_bits_truncate(self.object.flags)
            .contains(HookObjectFlags::GLOBAL)
    }
}

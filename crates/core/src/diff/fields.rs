//! Field-level comparison of two records at the same address
//!
//! Two records matched by kernel address are compared over every
//! non-identity field of the handle entry and the hook object, plus the
//! three resolved thread identities. The address itself is the match key
//! and is never reported as changed.

use std::fmt;
use std::sync::Arc;

use hookscope_engine::ThreadIdentity;

use crate::snapshot::HookRecord;

/// A field that differed between two snapshots of the same hook address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangedField {
    /// Handle entry: owning thread address
    EntryOwner,
    /// Handle entry: status flags
    EntryFlags,
    /// Handle entry: slot uniqueness counter
    EntryUniq,
    /// HOOK: WH_* id
    HookId,
    /// HOOK: installing thread address
    InstallerThread,
    /// HOOK: next hook in the chain
    ChainNext,
    /// HOOK: procedure offset within its module
    InstallOffset,
    /// HOOK: HF_* flag word
    HookFlags,
    /// HOOK: module index of the procedure
    ModuleIndex,
    /// HOOK: hooked thread address
    HookedThread,
    /// Resolved owner identity
    OwnerIdentity,
    /// Resolved origin identity
    OriginIdentity,
    /// Resolved target identity
    TargetIdentity,
}

impl fmt::Display for ChangedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChangedField::EntryOwner => "entry.pOwner",
            ChangedField::EntryFlags => "entry.bFlags",
            ChangedField::EntryUniq => "entry.wUniq",
            ChangedField::HookId => "object.iHook",
            ChangedField::InstallerThread => "object.pti",
            ChangedField::ChainNext => "object.phkNext",
            ChangedField::InstallOffset => "object.offPfn",
            ChangedField::HookFlags => "object.flags",
            ChangedField::ModuleIndex => "object.ihmod",
            ChangedField::HookedThread => "object.ptiHooked",
            ChangedField::OwnerIdentity => "owner",
            ChangedField::OriginIdentity => "origin",
            ChangedField::TargetIdentity => "target",
        };
        f.write_str(name)
    }
}

/// Compare two same-address records; empty result means no difference.
pub(super) fn changed_fields(a: &HookRecord, b: &HookRecord) -> Vec<ChangedField> {
    debug_assert_eq!(a.address(), b.address());

    let mut changed = Vec::new();

    if a.entry.owner != b.entry.owner {
        changed.push(ChangedField::EntryOwner);
    }
    if a.entry.flags != b.entry.flags {
        changed.push(ChangedField::EntryFlags);
    }
    if a.entry.uniq != b.entry.uniq {
        changed.push(ChangedField::EntryUniq);
    }
    if a.object.id != b.object.id {
        changed.push(ChangedField::HookId);
    }
    if a.object.installer != b.object.installer {
        changed.push(ChangedField::InstallerThread);
    }
    if a.object.chain_next != b.object.chain_next {
        changed.push(ChangedField::ChainNext);
    }
    if a.object.install_offset != b.object.install_offset {
        changed.push(ChangedField::InstallOffset);
    }
    if a.object.flags != b.object.flags {
        changed.push(ChangedField::HookFlags);
    }
    if a.object.module_index != b.object.module_index {
        changed.push(ChangedField::ModuleIndex);
    }
    if a.object.hooked_thread != b.object.hooked_thread {
        changed.push(ChangedField::HookedThread);
    }
    if !identity_eq(&a.owner, &b.owner) {
        changed.push(ChangedField::OwnerIdentity);
    }
    if !identity_eq(&a.origin, &b.origin) {
        changed.push(ChangedField::OriginIdentity);
    }
    if !identity_eq(&a.target, &b.target) {
        changed.push(ChangedField::TargetIdentity);
    }

    changed
}

/// Identities are compared by who they are, not by where their
/// THREADINFO happened to live.
fn identity_eq(a: &Option<Arc<ThreadIdentity>>, b: &Option<Arc<ThreadIdentity>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => {
            a.thread_id == b.thread_id
                && a.process_id == b.process_id
                && a.process_name == b.process_name
        }
        _ => false,
    }
}

//! Snapshot diff engine
//!
//! Pure structural comparison of two snapshot stores. Inventories are
//! matched by desktop identity; within a matched desktop, records are
//! matched by the HOOK's kernel address via a linear merge-join over the
//! two finalize-sorted sequences. Each difference is classified as
//! Added, Modified, or Removed; Modified entries carry the list of
//! fields that changed.
//!
//! Matching is strictly by address. A freed address reused by an
//! unrelated new hook between snapshots is indistinguishable from a
//! modification of the same hook; no fuzzy matching is attempted.
//!
//! Output order is deterministic: the current store's desktop order,
//! then desktops present only in the previous store, with records in
//! address order inside each desktop - stable enough to compare directly
//! in tests.

mod fields;
mod filter;

use std::sync::Arc;

use tracing::debug;

use hookscope_engine::Desktop;

use crate::snapshot::{DesktopHookInventory, HookRecord, HookStore};

pub use fields::ChangedField;
pub use filter::{FilterMode, HookFilter};

/// How a hook differs between the previous and current snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffKind {
    /// Present only in the current snapshot
    Added,
    /// Present in both with differing fields
    Modified,
    /// Present only in the previous snapshot
    Removed,
}

impl std::fmt::Display for DiffKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiffKind::Added => write!(f, "added"),
            DiffKind::Modified => write!(f, "modified"),
            DiffKind::Removed => write!(f, "removed"),
        }
    }
}

/// One classified difference between two snapshots.
#[derive(Debug, Clone)]
pub struct DiffEntry {
    /// Desktop the hook lives on
    pub desktop: Arc<Desktop>,
    /// Classification of the difference
    pub kind: DiffKind,
    /// The record as it was in the previous snapshot (absent for Added)
    pub before: Option<HookRecord>,
    /// The record as it is in the current snapshot (absent for Removed)
    pub after: Option<HookRecord>,
    /// For Modified: the fields that differ, in declaration order
    pub changed: Vec<ChangedField>,
}

impl DiffEntry {
    /// The hook's kernel address (match key)
    pub fn address(&self) -> hookscope_sdk::KernelAddr {
        self.after
            .as_ref()
            .or(self.before.as_ref())
            .map(|r| r.address())
            .unwrap_or_default()
    }
}

/// Diff two snapshot stores.
///
/// Neither store is mutated; both should be completed snapshots from the
/// same session context, and must not be re-collected while the diff
/// runs (caller obligation).
pub fn diff_stores(
    previous: &HookStore,
    current: &HookStore,
    filter: &HookFilter,
) -> Vec<DiffEntry> {
    let mut out = Vec::new();

    for cur_inv in current.inventories() {
        match previous.inventory_for(cur_inv.desktop()) {
            Some(prev_inv) => diff_inventories(prev_inv, cur_inv, filter, &mut out),
            // whole desktop is new to the current snapshot
            None => one_sided(cur_inv, DiffKind::Added, filter, &mut out),
        }
    }

    // desktops that disappeared from the current snapshot
    for prev_inv in previous.inventories() {
        if current.inventory_for(prev_inv.desktop()).is_none() {
            one_sided(prev_inv, DiffKind::Removed, filter, &mut out);
        }
    }

    debug!(entries = out.len(), "store diff complete");
    out
}

/// Diff two finalize-sorted inventories for the same desktop, appending
/// classified entries to `out`.
pub fn diff_inventories(
    a: &DesktopHookInventory,
    b: &DesktopHookInventory,
    filter: &HookFilter,
    out: &mut Vec<DiffEntry>,
) {
    let desktop = b.desktop();
    let (a_recs, b_recs) = (a.records(), b.records());
    let (mut i, mut j) = (0usize, 0usize);

    // linear merge-join over the two address-sorted sequences
    while i < a_recs.len() && j < b_recs.len() {
        let (ra, rb) = (&a_recs[i], &b_recs[j]);

        if ra.address() < rb.address() {
            push_one_sided(out, desktop, DiffKind::Removed, ra, filter);
            i += 1;
        } else if ra.address() > rb.address() {
            push_one_sided(out, desktop, DiffKind::Added, rb, filter);
            j += 1;
        } else {
            if filter.is_wanted(ra) || filter.is_wanted(rb) {
                let changed = fields::changed_fields(ra, rb);
                if !changed.is_empty() {
                    out.push(DiffEntry {
                        desktop: Arc::clone(desktop),
                        kind: DiffKind::Modified,
                        before: Some(ra.clone()),
                        after: Some(rb.clone()),
                        changed,
                    });
                }
            }
            i += 1;
            j += 1;
        }
    }
    for ra in &a_recs[i..] {
        push_one_sided(out, desktop, DiffKind::Removed, ra, filter);
    }
    for rb in &b_recs[j..] {
        push_one_sided(out, desktop, DiffKind::Added, rb, filter);
    }
}

/// Report every wanted record of an unmatched desktop as one-sided.
fn one_sided(
    inv: &DesktopHookInventory,
    kind: DiffKind,
    filter: &HookFilter,
    out: &mut Vec<DiffEntry>,
) {
    for rec in inv.records() {
        push_one_sided(out, inv.desktop(), kind, rec, filter);
    }
}

fn push_one_sided(
    out: &mut Vec<DiffEntry>,
    desktop: &Arc<Desktop>,
    kind: DiffKind,
    record: &HookRecord,
    filter: &HookFilter,
) {
    if !filter.is_wanted(record) {
        return;
    }
    let (before, after) = match kind {
        DiffKind::Removed => (Some(record.clone()), None),
        _ => (None, Some(record.clone())),
    };
    out.push(DiffEntry {
        desktop: Arc::clone(desktop),
        kind,
        before,
        after,
        changed: Vec::new(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    use hookscope_engine::Desktop;
    use hookscope_sdk::{HandleEntry, HookObject, KernelAddr, TYPE_HOOK};

    fn desktop(name: &str) -> Arc<Desktop> {
        Arc::new(Desktop::new(
            name,
            KernelAddr::new(0x1000),
            KernelAddr::new(0x9000),
            0,
        ))
    }

    fn record_at(addr: u64) -> HookRecord {
        HookRecord {
            entry: HandleEntry {
                head: KernelAddr::new(addr),
                object_type: TYPE_HOOK,
                ..Default::default()
            },
            object: HookObject {
                id: 2,
                ..Default::default()
            },
            owner: None,
            origin: None,
            target: None,
        }
    }

    fn inventory(desktop: &Arc<Desktop>, addrs: &[u64]) -> DesktopHookInventory {
        let mut inv = DesktopHookInventory::new(Arc::clone(desktop));
        for &addr in addrs {
            inv.append(record_at(addr)).unwrap();
        }
        inv.finalize().unwrap();
        inv
    }

    #[test]
    fn test_self_diff_is_empty() {
        let desk = desktop("Default");
        let inv = inventory(&desk, &[0x1000, 0x2000, 0x3000]);

        let mut out = Vec::new();
        diff_inventories(&inv, &inv, &HookFilter::all(), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_single_addition() {
        let desk = desktop("Default");
        let a = inventory(&desk, &[0x1000, 0x3000]);
        let b = inventory(&desk, &[0x1000, 0x2000, 0x3000]);

        let mut out = Vec::new();
        diff_inventories(&a, &b, &HookFilter::all(), &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, DiffKind::Added);
        assert_eq!(out[0].address(), KernelAddr::new(0x2000));
        assert!(out[0].before.is_none());
    }

    #[test]
    fn test_single_removal() {
        let desk = desktop("Default");
        let a = inventory(&desk, &[0x1000, 0x2000, 0x3000]);
        let b = inventory(&desk, &[0x1000, 0x3000]);

        let mut out = Vec::new();
        diff_inventories(&a, &b, &HookFilter::all(), &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, DiffKind::Removed);
        assert_eq!(out[0].address(), KernelAddr::new(0x2000));
        assert!(out[0].after.is_none());
    }

    #[test]
    fn test_modified_names_changed_field() {
        let desk = desktop("Default");
        let a = inventory(&desk, &[0x2000]);
        let mut b = DesktopHookInventory::new(Arc::clone(&desk));
        let mut rec = record_at(0x2000);
        rec.object.flags = 0x1;
        b.append(rec).unwrap();
        b.finalize().unwrap();

        let mut out = Vec::new();
        diff_inventories(&a, &b, &HookFilter::all(), &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, DiffKind::Modified);
        assert_eq!(out[0].changed, vec![ChangedField::HookFlags]);
        assert!(out[0].before.is_some() && out[0].after.is_some());
    }

    #[test]
    fn test_sample_scenario() {
        // first snapshot: {0x1000, 0x2000, 0x3000}
        // second snapshot: {0x1000, 0x3000, 0x4000}
        let desk = desktop("D");
        let first = inventory(&desk, &[0x1000, 0x2000, 0x3000]);
        let second = inventory(&desk, &[0x1000, 0x3000, 0x4000]);

        let mut out = Vec::new();
        diff_inventories(&first, &second, &HookFilter::all(), &mut out);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].kind, DiffKind::Removed);
        assert_eq!(out[0].address(), KernelAddr::new(0x2000));
        assert_eq!(out[1].kind, DiffKind::Added);
        assert_eq!(out[1].address(), KernelAddr::new(0x4000));
    }

    #[test]
    fn test_store_diff_matches_by_desktop_identity() {
        let desk_a = desktop("Default");
        let desk_b = desktop("Winlogon");

        let mut prev = HookStore::new();
        prev.prepare(&[Arc::clone(&desk_a)]);
        let mut cur = HookStore::new();
        cur.prepare(&[Arc::clone(&desk_a), Arc::clone(&desk_b)]);

        // hand-populate: previous has one hook on Default, current has the
        // same hook plus a whole new desktop
        prev.inventories_mut()[0].append(record_at(0x2000)).unwrap();
        prev.inventories_mut()[0].finalize().unwrap();
        cur.inventories_mut()[0].append(record_at(0x2000)).unwrap();
        cur.inventories_mut()[0].finalize().unwrap();
        cur.inventories_mut()[1].append(record_at(0x3000)).unwrap();
        cur.inventories_mut()[1].finalize().unwrap();

        let out = diff_stores(&prev, &cur, &HookFilter::all());

        // the Default hook is unchanged; the Winlogon desktop is all-new
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, DiffKind::Added);
        assert_eq!(out[0].desktop.name, "Winlogon");
    }

    #[test]
    fn test_store_diff_reports_removed_desktop() {
        let desk_a = desktop("Default");

        let mut prev = HookStore::new();
        prev.prepare(&[Arc::clone(&desk_a)]);
        prev.inventories_mut()[0].append(record_at(0x2000)).unwrap();
        prev.inventories_mut()[0].finalize().unwrap();

        let cur = HookStore::new();

        let out = diff_stores(&prev, &cur, &HookFilter::all());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, DiffKind::Removed);
    }

    #[test]
    fn test_filter_excludes_from_output() {
        use hookscope_engine::ThreadIdentity;

        let desk = desktop("Default");
        let a = inventory(&desk, &[0x1000]);

        let mut b = DesktopHookInventory::new(Arc::clone(&desk));
        let mut unwatched = record_at(0x1000);
        unwatched.object.flags = 0x1; // would diff as Modified if wanted
        let mut rec = record_at(0x2000);
        rec.owner = Some(Arc::new(ThreadIdentity::new(
            KernelAddr::new(0x100),
            1,
            42,
            "wanted.exe",
        )));
        b.append(unwatched).unwrap();
        b.append(rec).unwrap();
        b.finalize().unwrap();

        // only hooks owned by pid 42 are wanted; the modified 0x1000 pair
        // has no identities and is filtered out entirely
        let filter = HookFilter::include(vec![], vec![42]);
        let mut out = Vec::new();
        diff_inventories(&a, &b, &filter, &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].address(), KernelAddr::new(0x2000));
        assert_eq!(out[0].kind, DiffKind::Added);
    }
}

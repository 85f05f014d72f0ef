//! End-to-end snapshot and diff scenarios over a scripted handle table.

use hookscope_core::engine::{Desktop, SessionContext, SharedSection, ThreadIdentity};
use hookscope_core::sdk::{HandleEntry, HookObject, KernelAddr, TYPE_HOOK};
use hookscope_core::{collect, diff_stores, DiffKind, HookFilter, HookStore};

const DELTA: u64 = 0x10_0000;

/// Scripted shared section; the test mutates it between collections.
#[derive(Default)]
struct ScriptedTable {
    entries: Vec<HandleEntry>,
    hooks: Vec<(KernelAddr, HookObject)>,
}

impl ScriptedTable {
    fn set_hooks(&mut self, specs: &[(u64, HookObject)]) {
        self.entries.clear();
        self.hooks.clear();
        for &(kernel, object) in specs {
            self.entries.push(HandleEntry {
                head: KernelAddr::new(kernel),
                owner: object.installer,
                object_type: TYPE_HOOK,
                flags: 0,
                uniq: 1,
            });
            self.hooks
                .push((KernelAddr::new(kernel - DELTA), object));
        }
    }
}

impl SharedSection for ScriptedTable {
    fn handle_count(&self) -> usize {
        self.entries.len()
    }

    fn handle_entry(&self, index: usize) -> HandleEntry {
        self.entries[index]
    }

    fn read_hook(&self, client_addr: KernelAddr) -> Option<HookObject> {
        self.hooks
            .iter()
            .find(|(addr, _)| *addr == client_addr)
            .map(|(_, obj)| *obj)
    }
}

fn context() -> SessionContext {
    let ctx = SessionContext::new(vec![Desktop::new(
        "D",
        KernelAddr::new(0x10_1000),
        KernelAddr::new(0x10_9000),
        DELTA,
    )])
    .unwrap();
    ctx.set_threads(vec![ThreadIdentity::new(
        KernelAddr::new(0x42),
        100,
        7,
        "shell.exe",
    )]);
    ctx
}

fn keyboard_hook() -> HookObject {
    HookObject {
        id: 2,
        installer: KernelAddr::new(0x42),
        ..Default::default()
    }
}

#[test]
fn test_sample_scenario_add_and_remove() {
    let ctx = context();
    let mut table = ScriptedTable::default();
    table.set_hooks(&[
        (0x10_1000, keyboard_hook()),
        (0x10_2000, keyboard_hook()),
        (0x10_3000, keyboard_hook()),
    ]);

    let mut first = HookStore::new();
    collect(&mut first, &ctx, &table).unwrap();

    let inv = &first.inventories()[0];
    assert_eq!(inv.len(), 3);
    let addrs: Vec<u64> = inv.records().iter().map(|r| r.address().raw()).collect();
    assert_eq!(addrs, vec![0x10_1000, 0x10_2000, 0x10_3000]);

    // 0x2000 uninstalled, 0x4000 installed
    table.set_hooks(&[
        (0x10_1000, keyboard_hook()),
        (0x10_3000, keyboard_hook()),
        (0x10_4000, keyboard_hook()),
    ]);

    let mut second = HookStore::new();
    collect(&mut second, &ctx, &table).unwrap();

    let out = diff_stores(&first, &second, &HookFilter::all());
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].kind, DiffKind::Removed);
    assert_eq!(out[0].address(), KernelAddr::new(0x10_2000));
    assert_eq!(out[1].kind, DiffKind::Added);
    assert_eq!(out[1].address(), KernelAddr::new(0x10_4000));
}

#[test]
fn test_unchanged_table_diffs_empty() {
    let ctx = context();
    let mut table = ScriptedTable::default();
    table.set_hooks(&[(0x10_2000, keyboard_hook()), (0x10_5000, keyboard_hook())]);

    let mut first = HookStore::new();
    let mut second = HookStore::new();
    collect(&mut first, &ctx, &table).unwrap();
    collect(&mut second, &ctx, &table).unwrap();

    assert!(diff_stores(&first, &second, &HookFilter::all()).is_empty());
    assert!(diff_stores(&second, &first, &HookFilter::all()).is_empty());
}

#[test]
fn test_modified_flags_reported_with_field_detail() {
    let ctx = context();
    let mut table = ScriptedTable::default();
    table.set_hooks(&[(0x10_2000, keyboard_hook())]);

    let mut first = HookStore::new();
    collect(&mut first, &ctx, &table).unwrap();

    let mut changed = keyboard_hook();
    changed.flags = 0x1; // now global
    table.set_hooks(&[(0x10_2000, changed)]);

    let mut second = HookStore::new();
    collect(&mut second, &ctx, &table).unwrap();

    let out = diff_stores(&first, &second, &HookFilter::all());
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].kind, DiffKind::Modified);
    assert_eq!(out[0].changed.len(), 1);
    assert_eq!(out[0].changed[0].to_string(), "object.flags");
}

#[test]
fn test_reused_store_gives_same_result_as_fresh_one() {
    let ctx = context();
    let mut table = ScriptedTable::default();
    table.set_hooks(&[(0x10_2000, keyboard_hook())]);

    let mut reused = HookStore::new();
    collect(&mut reused, &ctx, &table).unwrap();

    table.set_hooks(&[(0x10_2000, keyboard_hook()), (0x10_6000, keyboard_hook())]);
    collect(&mut reused, &ctx, &table).unwrap();

    let mut fresh = HookStore::new();
    collect(&mut fresh, &ctx, &table).unwrap();

    assert!(diff_stores(&reused, &fresh, &HookFilter::all()).is_empty());
    assert_eq!(reused.inventories()[0].len(), 2);
}

#[test]
fn test_owner_resolution_feeds_filters() {
    let ctx = context();
    let mut table = ScriptedTable::default();
    table.set_hooks(&[(0x10_2000, keyboard_hook())]);

    let mut snapshot = HookStore::new();
    collect(&mut snapshot, &ctx, &table).unwrap();

    let rec = &snapshot.inventories()[0].records()[0];
    assert_eq!(rec.origin.as_ref().unwrap().process_name, "shell.exe");

    // include filter on the resolved name keeps the hook ...
    let keep = HookFilter::include(vec!["shell.exe".into()], vec![]);
    let out = diff_stores(&HookStore::new(), &snapshot, &keep);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].kind, DiffKind::Added);

    // ... and an exclude filter on the same name drops it
    let drop = HookFilter::exclude(vec!["shell.exe".into()], vec![]);
    assert!(diff_stores(&HookStore::new(), &snapshot, &drop).is_empty());
}

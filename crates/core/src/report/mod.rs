//! Human-readable diagnostics
//!
//! `Display` implementations for records, inventories, stores, and diff
//! entries. The output is diagnostic text for an operator; it is not a
//! wire format and its exact shape is allowed to evolve.

pub mod flags;

use std::fmt;
use std::sync::Arc;
use std::time::UNIX_EPOCH;

use hookscope_engine::ThreadIdentity;

use crate::diff::{DiffEntry, DiffKind};
use crate::snapshot::{DesktopHookInventory, HookRecord, HookStore};

use flags::{render, HandleStatus, HookObjectFlags};

fn identity(id: &Option<Arc<ThreadIdentity>>) -> String {
    match id {
        Some(id) => format!(
            "{} (pid {}, tid {})",
            id.process_name, id.process_id, id.thread_id
        ),
        None => "<unknown>".to_string(),
    }
}

impl fmt::Display for HookRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = match self.hook_id() {
            Some(id) => id.name().to_string(),
            None => format!("iHook {}", self.object.id),
        };
        let scope = if self.is_global() { "global" } else { "thread" };

        writeln!(f, "hook {} {} ({})", self.address(), id, scope)?;
        writeln!(
            f,
            "  entry: pOwner={} bType={} bFlags={} wUniq={}",
            self.entry.owner,
            self.entry.object_type,
            render::<HandleStatus>(self.entry.flags),
            self.entry.uniq
        )?;
        writeln!(
            f,
            "  object: pti={} phkNext={} offPfn={:#x} flags={} ihmod={} ptiHooked={}",
            self.object.installer,
            self.object.chain_next,
            self.object.install_offset,
            render::<HookObjectFlags>(self.object.flags),
            self.object.module_index,
            self.object.hooked_thread
        )?;
        writeln!(f, "  owner:  {}", identity(&self.owner))?;
        writeln!(f, "  origin: {}", identity(&self.origin))?;
        write!(f, "  target: {}", identity(&self.target))
    }
}

impl fmt::Display for DesktopHookInventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "desktop '{}': {} hook(s)",
            self.desktop().name,
            self.len()
        )?;
        for (i, rec) in self.records().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", rec)?;
        }
        Ok(())
    }
}

impl fmt::Display for HookStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.init_time().and_then(|t| t.duration_since(UNIX_EPOCH).ok()) {
            Some(at) => writeln!(f, "snapshot taken at unix {}", at.as_secs())?,
            None => writeln!(f, "snapshot not collected")?,
        }
        for inv in self.inventories() {
            writeln!(f, "{}", inv)?;
        }
        Ok(())
    }
}

impl fmt::Display for DiffEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.kind {
            DiffKind::Added => '+',
            DiffKind::Modified => '!',
            DiffKind::Removed => '-',
        };
        let record = self
            .after
            .as_ref()
            .or(self.before.as_ref())
            .expect("diff entry without records");
        let id = match record.hook_id() {
            Some(id) => id.name().to_string(),
            None => format!("iHook {}", record.object.id),
        };

        write!(
            f,
            "[{}] {} hook {} on desktop '{}' (origin {})",
            sign,
            id,
            self.address(),
            self.desktop.name,
            identity(&record.origin)
        )?;

        if self.kind == DiffKind::Modified {
            let fields: Vec<String> = self.changed.iter().map(|c| c.to_string()).collect();
            write!(f, " changed: {}", fields.join(", "))?;
        }
        Ok(())
    }
}

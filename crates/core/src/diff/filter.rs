//! Process filters for diff output
//!
//! A hook is attributed to up to three threads (owner, origin, target).
//! The filter decides whether a hook is wanted by matching any of those
//! three identities against the configured process names and pids - a
//! logical OR across identities and across configured entries. An empty
//! filter wants everything.

use serde::{Deserialize, Serialize};

use crate::snapshot::HookRecord;

/// Whether matching hooks are kept or dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Keep only hooks that match the filter
    #[default]
    Include,
    /// Drop hooks that match the filter
    Exclude,
}

/// Caller-supplied predicate pair over owning-process name and id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookFilter {
    /// Keep-or-drop polarity for matching hooks
    pub mode: FilterMode,
    /// Process image names, matched case-insensitively
    pub names: Vec<String>,
    /// Process ids
    pub pids: Vec<u32>,
}

impl HookFilter {
    /// A filter that wants every hook
    pub fn all() -> Self {
        Self::default()
    }

    /// Build an include filter from names and pids
    pub fn include(names: Vec<String>, pids: Vec<u32>) -> Self {
        Self {
            mode: FilterMode::Include,
            names,
            pids,
        }
    }

    /// Build an exclude filter from names and pids
    pub fn exclude(names: Vec<String>, pids: Vec<u32>) -> Self {
        Self {
            mode: FilterMode::Exclude,
            names,
            pids,
        }
    }

    /// Whether no names or pids are configured
    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.pids.is_empty()
    }

    /// Decide whether a record participates in diffing and output.
    pub fn is_wanted(&self, record: &HookRecord) -> bool {
        if self.is_empty() {
            return true;
        }

        let matched = [&record.owner, &record.origin, &record.target]
            .into_iter()
            .flatten()
            .any(|id| {
                self.pids.contains(&id.process_id)
                    || self
                        .names
                        .iter()
                        .any(|n| n.eq_ignore_ascii_case(&id.process_name))
            });

        match self.mode {
            FilterMode::Include => matched,
            FilterMode::Exclude => !matched,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use hookscope_engine::ThreadIdentity;
    use hookscope_sdk::{HandleEntry, HookObject, KernelAddr};

    fn record_owned_by(name: &str, pid: u32) -> HookRecord {
        HookRecord {
            entry: HandleEntry {
                head: KernelAddr::new(0x2000),
                ..Default::default()
            },
            object: HookObject::default(),
            owner: Some(Arc::new(ThreadIdentity::new(
                KernelAddr::new(0x100),
                1,
                pid,
                name,
            ))),
            origin: None,
            target: None,
        }
    }

    #[test]
    fn test_empty_filter_wants_everything() {
        let filter = HookFilter::all();
        assert!(filter.is_wanted(&record_owned_by("anything.exe", 1)));
    }

    #[test]
    fn test_include_by_name_case_insensitive() {
        let filter = HookFilter::include(vec!["Evil.EXE".into()], vec![]);
        assert!(filter.is_wanted(&record_owned_by("evil.exe", 5)));
        assert!(!filter.is_wanted(&record_owned_by("calc.exe", 5)));
    }

    #[test]
    fn test_include_by_pid() {
        let filter = HookFilter::include(vec![], vec![42]);
        assert!(filter.is_wanted(&record_owned_by("a.exe", 42)));
        assert!(!filter.is_wanted(&record_owned_by("a.exe", 43)));
    }

    #[test]
    fn test_exclude_inverts() {
        let filter = HookFilter::exclude(vec!["noisy.exe".into()], vec![]);
        assert!(!filter.is_wanted(&record_owned_by("noisy.exe", 5)));
        assert!(filter.is_wanted(&record_owned_by("other.exe", 5)));
    }

    #[test]
    fn test_any_identity_matches() {
        let mut rec = record_owned_by("host.exe", 1);
        rec.origin = Some(Arc::new(ThreadIdentity::new(
            KernelAddr::new(0x200),
            2,
            99,
            "injector.exe",
        )));

        let filter = HookFilter::include(vec!["injector.exe".into()], vec![]);
        assert!(filter.is_wanted(&rec));
    }

    #[test]
    fn test_unresolved_identities_never_match() {
        let mut rec = record_owned_by("host.exe", 1);
        rec.owner = None;

        let filter = HookFilter::include(vec!["host.exe".into()], vec![]);
        assert!(!filter.is_wanted(&rec));
    }
}

//! GUI thread identity registry
//!
//! The process/thread enumeration collaborator resolves each GUI thread's
//! kernel THREADINFO address to the thread and process behind it. The
//! registry is rebuilt from that data before every snapshot; the core only
//! ever looks identities up by address.
//!
//! A failed lookup is a normal state, not an error: a hook's owner,
//! origin, or target can belong to a thread outside the tracked scope
//! (already exited, or in a session the caller cannot see).

use std::sync::Arc;

use hookscope_sdk::KernelAddr;

/// The resolved identity of one GUI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadIdentity {
    /// Kernel address of the thread's THREADINFO
    pub address: KernelAddr,
    /// Win32 thread id
    pub thread_id: u32,
    /// Owning process id
    pub process_id: u32,
    /// Owning process image name
    pub process_name: String,
}

impl ThreadIdentity {
    /// Create a thread identity
    pub fn new(
        address: KernelAddr,
        thread_id: u32,
        process_id: u32,
        process_name: impl Into<String>,
    ) -> Self {
        Self {
            address,
            thread_id,
            process_id,
            process_name: process_name.into(),
        }
    }
}

/// Address-keyed registry of known GUI threads.
///
/// Kept sorted by THREADINFO address so lookups are a binary search; the
/// registry is replaced wholesale when the collaborator refreshes its
/// thread list.
#[derive(Debug, Default, Clone)]
pub struct ThreadRegistry {
    threads: Vec<Arc<ThreadIdentity>>,
}

impl ThreadRegistry {
    /// Build a registry from resolved identities.
    ///
    /// Duplicate addresses keep the first occurrence; the enumeration
    /// collaborator should not produce them, but a torn refresh can.
    pub fn new(mut identities: Vec<ThreadIdentity>) -> Self {
        identities.sort_by_key(|t| t.address);
        identities.dedup_by_key(|t| t.address);
        Self {
            threads: identities.into_iter().map(Arc::new).collect(),
        }
    }

    /// Resolve a THREADINFO address to a known identity.
    ///
    /// Returns `None` for the null address and for addresses outside the
    /// tracked scope.
    pub fn resolve(&self, address: KernelAddr) -> Option<Arc<ThreadIdentity>> {
        if address.is_null() {
            return None;
        }
        self.threads
            .binary_search_by_key(&address, |t| t.address)
            .ok()
            .map(|i| Arc::clone(&self.threads[i]))
    }

    /// Number of known threads
    pub fn len(&self) -> usize {
        self.threads.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }
}

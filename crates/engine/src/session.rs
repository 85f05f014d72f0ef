//! Session context
//!
//! One explicit context object carries everything a snapshot needs from
//! its collaborators: the attached desktops and the GUI-thread registry.
//! The context is created once, on the thread that will drive collection,
//! and passed by reference into every core call.
//!
//! The thread registry is the only part refreshed between snapshots, so
//! it sits behind an `RwLock`; the desktop list is fixed for the life of
//! the context.

use std::sync::Arc;
use std::thread::ThreadId;

use parking_lot::RwLock;

use hookscope_sdk::KernelAddr;

use crate::desktop::Desktop;
use crate::error::SessionError;
use crate::threads::{ThreadIdentity, ThreadRegistry};

/// Explicit session state passed into collection and diff calls.
pub struct SessionContext {
    /// Desktops the session is attached to, in enumeration order.
    /// These outlive every snapshot taken against this context.
    desktops: Vec<Arc<Desktop>>,

    /// GUI thread registry - refreshed by the enumeration collaborator
    /// before each snapshot
    threads: RwLock<ThreadRegistry>,

    /// Thread the context is bound to; collection must run here
    main_thread: ThreadId,
}

impl SessionContext {
    /// Create a context bound to the calling thread.
    ///
    /// Fails if the desktop enumeration produced nothing to track.
    pub fn new(desktops: Vec<Desktop>) -> Result<Self, SessionError> {
        if desktops.is_empty() {
            return Err(SessionError::NoDesktops);
        }

        let ctx = Self {
            desktops: desktops.into_iter().map(Arc::new).collect(),
            threads: RwLock::new(ThreadRegistry::default()),
            main_thread: std::thread::current().id(),
        };
        tracing::debug!(
            desktops = ctx.desktops.len(),
            "session context created"
        );
        Ok(ctx)
    }

    /// Desktops in enumeration order
    pub fn desktops(&self) -> &[Arc<Desktop>] {
        &self.desktops
    }

    /// Replace the GUI thread registry with freshly enumerated identities
    pub fn set_threads(&self, identities: Vec<ThreadIdentity>) {
        let registry = ThreadRegistry::new(identities);
        tracing::debug!(threads = registry.len(), "thread registry refreshed");
        *self.threads.write() = registry;
    }

    /// Resolve a THREADINFO address against the current registry.
    ///
    /// `None` means the thread is outside the tracked scope - a valid
    /// state, not an error.
    pub fn resolve_thread(&self, address: KernelAddr) -> Option<Arc<ThreadIdentity>> {
        self.threads.read().resolve(address)
    }

    /// Check that the caller is on the context's controlling thread
    pub fn ensure_main_thread(&self) -> Result<(), SessionError> {
        let called = std::thread::current().id();
        if called == self.main_thread {
            Ok(())
        } else {
            Err(SessionError::WrongThread {
                called,
                bound: self.main_thread,
            })
        }
    }
}

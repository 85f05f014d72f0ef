//! Opaque kernel address newtype
//!
//! Addresses read out of the shared section are carried around as plain
//! integers, never as dereferenceable pointers. The only place an address
//! is ever turned back into memory access is the shared-section
//! collaborator, outside this workspace's core.

use std::fmt;

/// A kernel-space address captured from the shared handle table or from a
/// copied HOOK object.
///
/// A null address is a valid in-band value (e.g. a HOOK with no chain
/// successor has a null `chain_next`), but a handle entry whose object
/// address is null fails inventory validation.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KernelAddr(pub u64);

impl KernelAddr {
    /// The null address
    pub const NULL: KernelAddr = KernelAddr(0);

    /// Create an address from a raw integer
    #[inline]
    pub const fn new(raw: u64) -> Self {
        KernelAddr(raw)
    }

    /// Get the raw integer value
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Check whether this is the null address
    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Offset this address downward by `delta` bytes (wrapping).
    ///
    /// Used for the desktop client-delta translation from kernel space
    /// into the caller's mapped view.
    #[inline]
    pub const fn sub(self, delta: u64) -> Self {
        KernelAddr(self.0.wrapping_sub(delta))
    }
}

impl fmt::Debug for KernelAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KernelAddr({:#x})", self.0)
    }
}

impl fmt::Display for KernelAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

impl From<u64> for KernelAddr {
    fn from(raw: u64) -> Self {
        KernelAddr(raw)
    }
}

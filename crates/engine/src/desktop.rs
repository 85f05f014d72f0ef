//! Desktop descriptors
//!
//! A desktop is an isolated GUI boundary; HOOK objects live on a desktop
//! heap and are only addressable within desktops the process is attached
//! to. The desktop enumeration collaborator produces one [`Desktop`] per
//! attached desktop, and they outlive every snapshot taken against them.
//!
//! ```text
//! kernel space                      caller's mapped view
//! ┌────────────────────┐
//! │ desktop heap       │   pHead - client_delta
//! │ [base, limit)      │  ───────────────────────►  readable HOOK copy
//! └────────────────────┘
//! ```

use std::fmt;

use hookscope_sdk::KernelAddr;

/// One attached desktop and the address arithmetic needed to read its heap.
///
/// Snapshots hold desktops as `Arc<Desktop>`; two inventories refer to the
/// same desktop exactly when their `Arc`s point at the same allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Desktop {
    /// Desktop name (e.g. "Default", "Winlogon")
    pub name: String,
    /// Kernel base address of the desktop heap
    pub base: KernelAddr,
    /// Kernel limit address of the desktop heap (exclusive)
    pub limit: KernelAddr,
    /// Offset subtracted from a kernel heap address to reach the same
    /// object in the caller's mapped view
    pub client_delta: u64,
}

impl Desktop {
    /// Create a desktop descriptor
    pub fn new(
        name: impl Into<String>,
        base: KernelAddr,
        limit: KernelAddr,
        client_delta: u64,
    ) -> Self {
        Self {
            name: name.into(),
            base,
            limit,
            client_delta,
        }
    }

    /// Check whether a kernel address falls inside this desktop's heap,
    /// i.e. within `[base, limit)`
    #[inline]
    pub fn contains(&self, addr: KernelAddr) -> bool {
        addr >= self.base && addr < self.limit
    }

    /// Translate a kernel heap address into the caller's mapped view
    #[inline]
    pub fn translate(&self, addr: KernelAddr) -> KernelAddr {
        addr.sub(self.client_delta)
    }
}

impl fmt::Display for Desktop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{} .. {})",
            self.name, self.base, self.limit
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desk() -> Desktop {
        Desktop::new(
            "Default",
            KernelAddr::new(0x1000),
            KernelAddr::new(0x9000),
            0x800,
        )
    }

    #[test]
    fn test_contains_half_open_range() {
        let d = desk();
        assert!(d.contains(KernelAddr::new(0x1000))); // base inclusive
        assert!(d.contains(KernelAddr::new(0x8FFF)));
        assert!(!d.contains(KernelAddr::new(0x9000))); // limit exclusive
        assert!(!d.contains(KernelAddr::new(0x0FFF)));
    }

    #[test]
    fn test_translate_applies_delta() {
        let d = desk();
        assert_eq!(d.translate(KernelAddr::new(0x2800)).raw(), 0x2000);
    }

    #[test]
    fn test_display_names_range() {
        let rendered = format!("{}", desk());
        assert!(rendered.starts_with("Default ["));
    }
}

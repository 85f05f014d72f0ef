//! Symbolic rendering of raw flag words

use bitflags::bitflags;

bitflags! {
    /// Status flags of a shared handle table entry (`bFlags`)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct HandleStatus: u8 {
        /// Object destruction requested
        const DESTROY = 0x01;
        /// Destruction in progress
        const IN_DESTROY = 0x02;
        /// A thread waits on this object's death
        const IN_WAIT_FOR_DEATH = 0x04;
        /// Final destruction pass
        const FINAL_DESTROY = 0x08;
        /// Validation marker
        const MARKED_OK = 0x10;
        /// Granted to another process
        const GRANTED = 0x20;
    }
}

bitflags! {
    /// HF_* flag word of a HOOK object (`flags`)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct HookObjectFlags: u32 {
        /// Hook applies to every thread on the desktop
        const GLOBAL = 0x0001;
        /// Hook procedure expects ANSI strings
        const ANSI = 0x0002;
        /// Skip the next hook-chain callback
        const NEEDHC_SKIP = 0x0004;
        /// Hooked thread stopped responding
        const HUNG = 0x0008;
        /// Hook procedure faulted
        const HOOK_FAULTED = 0x0010;
        /// Journal playback without delays
        const NO_PLAYBACK_DELAY = 0x0020;
        /// Procedure lives in a WX86 known dll
        const WX86_KNOWN_DLL = 0x0040;
        /// Hook has been destroyed but not yet freed
        const DESTROYED = 0x0080;
    }
}

/// Render a flag word as `NAMES (raw)`, keeping unknown bits visible.
pub(super) fn render<F: bitflags::Flags>(raw: F::Bits) -> String
where
    F::Bits: std::fmt::LowerHex + Copy,
{
    let parsed = F::from_bits_truncate(raw);
    let names: Vec<String> = parsed.iter_names().map(|(n, _)| n.to_string()).collect();
    if names.is_empty() {
        format!("{:#x}", raw)
    } else {
        format!("{} ({:#x})", names.join("|"), raw)
    }
}

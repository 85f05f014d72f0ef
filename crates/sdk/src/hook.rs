//! HOOK object fields and WH_* hook ids
//!
//! A HOOK object lives on a desktop heap and describes one installed
//! message hook: which WH_* chain it belongs to, the thread that installed
//! it, the thread it targets (null for global hooks), and where its
//! procedure lives. Like the handle table, desktop heaps are shared and
//! mutable, so the object is always copied out by value.

use crate::address::KernelAddr;

/// A by-value copy of a HOOK object's fields, taken from the desktop heap
/// through the desktop's client-delta mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HookObject {
    /// WH_* hook id (`iHook`)
    pub id: i32,
    /// Kernel address of the installing thread's THREADINFO (`pti`)
    pub installer: KernelAddr,
    /// Kernel address of the next HOOK in the chain (`phkNext`), null at
    /// the end of the chain
    pub chain_next: KernelAddr,
    /// Offset of the hook procedure within its module (`offPfn`)
    pub install_offset: u64,
    /// HF_* flag word (`flags`)
    pub flags: u32,
    /// Index of the module containing the hook procedure (`ihmod`),
    /// -1 when the procedure is in the installer itself
    pub module_index: i32,
    /// Kernel address of the hooked thread's THREADINFO (`ptiHooked`),
    /// null for global hooks
    pub hooked_thread: KernelAddr,
}

impl HookObject {
    /// Decode the WH_* id, if it is one of the documented hook types
    #[inline]
    pub fn hook_id(&self) -> Option<HookId> {
        HookId::from_raw(self.id)
    }
}

/// The documented WH_* hook types.
///
/// Raw ids range from -1 (`WH_MSGFILTER`) through 14 (`WH_MOUSE_LL`);
/// anything outside that range in a collected object is suspicious but is
/// carried through as the raw integer rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookId {
    MsgFilter,
    JournalRecord,
    JournalPlayback,
    Keyboard,
    GetMessage,
    CallWndProc,
    Cbt,
    SysMsgFilter,
    Mouse,
    Hardware,
    Debug,
    Shell,
    ForegroundIdle,
    CallWndProcRet,
    KeyboardLl,
    MouseLl,
}

impl HookId {
    /// Decode a raw `iHook` value
    pub const fn from_raw(raw: i32) -> Option<HookId> {
        match raw {
            -1 => Some(HookId::MsgFilter),
            0 => Some(HookId::JournalRecord),
            1 => Some(HookId::JournalPlayback),
            2 => Some(HookId::Keyboard),
            3 => Some(HookId::GetMessage),
            4 => Some(HookId::CallWndProc),
            5 => Some(HookId::Cbt),
            6 => Some(HookId::SysMsgFilter),
            7 => Some(HookId::Mouse),
            8 => Some(HookId::Hardware),
            9 => Some(HookId::Debug),
            10 => Some(HookId::Shell),
            11 => Some(HookId::ForegroundIdle),
            12 => Some(HookId::CallWndProcRet),
            13 => Some(HookId::KeyboardLl),
            14 => Some(HookId::MouseLl),
            _ => None,
        }
    }

    /// The raw `iHook` value for this hook type
    pub const fn raw(self) -> i32 {
        match self {
            HookId::MsgFilter => -1,
            HookId::JournalRecord => 0,
            HookId::JournalPlayback => 1,
            HookId::Keyboard => 2,
            HookId::GetMessage => 3,
            HookId::CallWndProc => 4,
            HookId::Cbt => 5,
            HookId::SysMsgFilter => 6,
            HookId::Mouse => 7,
            HookId::Hardware => 8,
            HookId::Debug => 9,
            HookId::Shell => 10,
            HookId::ForegroundIdle => 11,
            HookId::CallWndProcRet => 12,
            HookId::KeyboardLl => 13,
            HookId::MouseLl => 14,
        }
    }

    /// The canonical WH_* name
    pub const fn name(self) -> &'static str {
        match self {
            HookId::MsgFilter => "WH_MSGFILTER",
            HookId::JournalRecord => "WH_JOURNALRECORD",
            HookId::JournalPlayback => "WH_JOURNALPLAYBACK",
            HookId::Keyboard => "WH_KEYBOARD",
            HookId::GetMessage => "WH_GETMESSAGE",
            HookId::CallWndProc => "WH_CALLWNDPROC",
            HookId::Cbt => "WH_CBT",
            HookId::SysMsgFilter => "WH_SYSMSGFILTER",
            HookId::Mouse => "WH_MOUSE",
            HookId::Hardware => "WH_HARDWARE",
            HookId::Debug => "WH_DEBUG",
            HookId::Shell => "WH_SHELL",
            HookId::ForegroundIdle => "WH_FOREGROUNDIDLE",
            HookId::CallWndProcRet => "WH_CALLWNDPROCRET",
            HookId::KeyboardLl => "WH_KEYBOARD_LL",
            HookId::MouseLl => "WH_MOUSE_LL",
        }
    }
}

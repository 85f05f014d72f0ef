//! hookscope SDK - raw win32k user-object type definitions
//!
//! This crate contains value-type definitions for the session-shared user
//! handle table and the HOOK object, plus the kernel address newtype used
//! throughout hookscope. It has no dependencies and compiles quickly,
//! allowing parallel compilation of dependent crates.
//!
//! Everything here is a point-in-time *copy* of what lives in shared
//! memory. None of these types hold a reference into the live section.
//!
//! # Modules
//!
//! - [`address`] - Opaque kernel address newtype
//! - [`handle`] - Shared handle table entry
//! - [`hook`] - HOOK object fields and WH_* hook ids

pub mod address;
pub mod handle;
pub mod hook;

pub use address::KernelAddr;
pub use handle::{HandleEntry, TYPE_HOOK, USER_HANDLE_LIMIT};
pub use hook::{HookId, HookObject};

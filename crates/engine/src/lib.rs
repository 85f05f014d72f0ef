//! hookscope engine - session context and shared-section access seam
//!
//! This crate holds everything the snapshot core consumes but does not
//! own: the desktops the session is attached to, the registry of known
//! GUI threads, and the [`SharedSection`] trait behind which all raw
//! shared-memory access lives. The core reads these through an explicit
//! [`SessionContext`] rather than process globals, so tests can stand up
//! a context from plain data.

pub mod desktop;
pub mod error;
pub mod section;
pub mod session;
pub mod threads;

pub use desktop::Desktop;
pub use error::SessionError;
pub use section::SharedSection;
pub use session::SessionContext;
pub use threads::{ThreadIdentity, ThreadRegistry};

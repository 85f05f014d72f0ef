//! Error types for session context operations

/// Error type for session context construction and use
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The desktop enumeration produced nothing to track
    #[error("No accessible desktops in session")]
    NoDesktops,

    /// A context-bound operation ran off the controlling thread
    #[error("Called from {called:?}, but the session is bound to {bound:?}")]
    WrongThread {
        /// Thread the call arrived on
        called: std::thread::ThreadId,
        /// Thread the context was created on
        bound: std::thread::ThreadId,
    },
}

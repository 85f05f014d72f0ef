//! hookscope monitor - polling snapshot loop and log setup
//!
//! The outer surface of hookscope: initializes logging and repeatedly
//! re-snapshots the session at a configured interval, reporting every
//! classified difference to a caller-supplied sink. Presentation beyond
//! the sink callback (console, alerting) stays outside this workspace.

mod logging;
mod poll;

pub use logging::init_logging;
pub use poll::Monitor;

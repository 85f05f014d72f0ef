//! Polling monitor loop
//!
//! Takes a baseline snapshot, then re-snapshots on a fixed interval and
//! diffs each new snapshot against the last. Two stores are reused in a
//! flip-flop: the one holding the older snapshot is soft-reset and
//! collected into, then the roles swap. The baseline itself emits
//! nothing; only changes are reported.
//!
//! The loop runs on the session's controlling thread. Stopping is
//! cooperative via a channel: any message, or the sender going away,
//! ends the loop after the current cycle.

use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError};
use tracing::info;

use hookscope_core::engine::{SessionContext, SharedSection};
use hookscope_core::{collect, diff_stores, CollectError, DiffEntry, HookFilter, HookStore, MonitorConfig};

/// Polling monitor over one session context.
pub struct Monitor<'ctx> {
    ctx: &'ctx SessionContext,
    interval: Duration,
    filter: HookFilter,
}

impl<'ctx> Monitor<'ctx> {
    /// Create a monitor with an explicit interval and filter
    pub fn new(ctx: &'ctx SessionContext, interval: Duration, filter: HookFilter) -> Self {
        Self {
            ctx,
            interval,
            filter,
        }
    }

    /// Create a monitor from the TOML config
    pub fn from_config(ctx: &'ctx SessionContext, config: &MonitorConfig) -> Self {
        Self::new(
            ctx,
            Duration::from_secs(config.poll_interval_secs),
            config.hook_filter(),
        )
    }

    /// Run until `stop` delivers a message or disconnects.
    ///
    /// Every classified difference goes to `sink` in deterministic
    /// order (desktop, then address). A collection error aborts the
    /// loop: a snapshot that failed validation must not silently seed
    /// the next comparison.
    pub fn run<S, F>(
        &self,
        section: &S,
        stop: Receiver<()>,
        mut sink: F,
    ) -> Result<(), CollectError>
    where
        S: SharedSection,
        F: FnMut(&DiffEntry),
    {
        let mut previous = HookStore::new();
        let mut current = HookStore::new();

        collect(&mut previous, self.ctx, section)?;
        info!(
            interval_secs = self.interval.as_secs_f64(),
            "baseline snapshot taken, monitoring"
        );

        loop {
            match stop.recv_timeout(self.interval) {
                Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                    info!("monitor stopped");
                    return Ok(());
                }
                Err(RecvTimeoutError::Timeout) => {}
            }

            collect(&mut current, self.ctx, section)?;
            for entry in diff_stores(&previous, &current, &self.filter) {
                sink(&entry);
            }
            std::mem::swap(&mut previous, &mut current);
        }
    }
}

//! Hook collector
//!
//! One pass over the session's shared handle table that turns the live,
//! concurrently-mutated table into a validated snapshot. The scan is not
//! atomic and does not try to be: every read is a point-in-time copy, a
//! single cooperative yield before the scan lowers (but cannot remove)
//! the chance of observing a table mid-mutation, and any inconsistency
//! that survives into the collected data is caught by finalize-time
//! validation rather than papered over.

use tracing::{debug, trace, warn};

use hookscope_engine::{SessionContext, SessionError, SharedSection};

use crate::snapshot::{HookRecord, HookStore, InventoryError};

/// Error type for a collection pass.
///
/// Every variant aborts the snapshot: a partially valid snapshot would
/// produce a misleading diff, which defeats the tool's purpose.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    /// Collection ran outside the context's controlling thread
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Capacity or integrity failure in a desktop inventory
    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

/// Populate `store` with the hooks currently visible in the shared
/// section, one inventory per context desktop.
///
/// Preconditions: the context's desktop list and thread registry are
/// already populated by their collaborators; the call happens on the
/// context's controlling thread. The store must belong to this context
/// and must not be diffed concurrently.
///
/// On success the store's completion time is stamped; on any error the
/// store is left unstamped and its contents must not be trusted.
#[tracing::instrument(skip_all)]
pub fn collect<S: SharedSection>(
    store: &mut HookStore,
    ctx: &SessionContext,
    section: &S,
) -> Result<(), CollectError> {
    ctx.ensure_main_thread()?;

    store.prepare(ctx.desktops());

    // Give concurrent writers a chance to finish before sampling.
    // Best-effort only; the scan tolerates mutation either way.
    std::thread::yield_now();

    let count = section.handle_count();
    let mut collected = 0usize;
    let mut skipped_foreign = 0usize;

    for index in 0..count {
        // Copy the entry whole; the table may change under us and a live
        // reference would tear.
        let entry = section.handle_entry(index);

        if !entry.is_hook() {
            continue;
        }

        // A hook is only readable if it sits on a desktop we're attached
        // to; anything else is silently out of scope.
        let Some(inv) = store
            .inventories_mut()
            .iter_mut()
            .find(|inv| inv.desktop().contains(entry.head))
        else {
            trace!(address = %entry.head, "hook on inaccessible desktop, skipped");
            skipped_foreign += 1;
            continue;
        };

        let client_addr = inv.desktop().translate(entry.head);
        let Some(object) = section.read_hook(client_addr) else {
            warn!(
                address = %entry.head,
                desktop = %inv.desktop().name,
                "hook object vanished mid-scan, skipped"
            );
            continue;
        };

        let record = HookRecord {
            owner: ctx.resolve_thread(entry.owner),
            origin: ctx.resolve_thread(object.installer),
            target: ctx.resolve_thread(object.hooked_thread),
            entry,
            object,
        };

        inv.append(record)?;
        collected += 1;
    }

    for inv in store.inventories_mut() {
        inv.finalize()?;
    }

    store.stamp();
    debug!(
        scanned = count,
        collected,
        skipped_foreign,
        "hook collection complete"
    );
    Ok(())
}

//! Per-thread setup and teardown entry points.

use simshim_core::context::with_context;
use simshim_core::symbols::{EntryTable, LibraryImage};

use crate::state;

/// Prepares the calling thread for intercepted calls.
///
/// Resolves the thread's entry table from `image` and attaches the thread
/// to the shared lock bank, allocating it with `lock_count` locks on the
/// first attach anywhere in the process. Must run on every thread before
/// that thread's first intercepted call.
///
/// # Panics
///
/// Panics if a mandatory symbol is missing from `image`, or if
/// `lock_count` disagrees with the size the lock bank was first allocated
/// with. Both are programming errors in the embedding.
pub fn initialize(image: &dyn LibraryImage, lock_count: usize) {
    let entries = EntryTable::resolve(image);
    let bank = state::coordinator().bank_attach(lock_count);
    with_context(|ctx| ctx.install(entries, bank));
}

/// Releases the calling thread's interception state.
///
/// Drops the thread's entry table and lock-bank handle and detaches from
/// the shared lock bank; the bank itself is freed when the last thread
/// detaches. The context record is reclaimed automatically when the thread
/// exits.
pub fn clear() {
    with_context(|ctx| ctx.discard());
    state::coordinator().bank_detach();
}

/// Replacement for the library's worker-spawn entry point.
///
/// Worker threads belong to the host scheduler in a simulation; refusing
/// the spawn makes the hosted library fall back to doing the work on the
/// calling thread.
#[must_use]
pub fn spawn_func() -> i32 {
    -1
}

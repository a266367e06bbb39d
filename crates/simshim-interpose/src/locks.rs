//! Locking-callback and thread-identity entry points.
//!
//! The hosted library registers a locking callback and a thread-ID callback
//! for its multithreaded crypto support; these are the implementations the
//! shim installs. The lock bank handle is cached in the thread context at
//! setup time, so the callback path never touches the coordinator mutex.

pub use simshim_core::lockbank::LockMode;

use simshim_core::context::with_context;

/// Locking callback, acquire half: blocks until lock `id` is held in
/// `mode`.
///
/// # Panics
///
/// Panics if `id` is outside the bank the hosted library announced, or if
/// the calling thread never ran [`crate::initialize`].
pub fn lock_acquire(id: usize, mode: LockMode) {
    with_context(|ctx| ctx.bank().acquire(id, mode));
}

/// Locking callback, release half. The hosted library is trusted to pair
/// this with a matching [`lock_acquire`].
pub fn lock_release(id: usize, mode: LockMode) {
    with_context(|ctx| ctx.bank().release(id, mode));
}

/// Thread-identity callback: a distinct identifier, stable for the lifetime
/// of the calling thread.
#[must_use]
pub fn thread_id() -> u64 {
    with_context(|ctx| ctx.id())
}

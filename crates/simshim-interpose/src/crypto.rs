//! Intercepted crypto lifecycle entry points.
//!
//! These replace the hosted library's global init/cleanup routines with
//! coordinator-mediated versions: every simulated node calls them once, the
//! real routines run once per process.

use simshim_core::context::with_context;

use crate::state;

/// Replacement `crypto_early_init`.
///
/// First call process-wide performs the one-time early setup; later calls
/// re-seed the per-call deterministic state instead. Negative statuses from
/// the underlying library propagate unchanged.
pub fn crypto_early_init() -> i32 {
    with_context(|ctx| state::coordinator().early_init(ctx.entries()))
}

/// Replacement `crypto_global_init`.
///
/// Registers the calling node as a user of the main crypto subsystem and
/// forwards the acceleration parameters to the real one-time setup on the
/// first call only.
pub fn crypto_global_init(
    use_accel: bool,
    accel_name: Option<&str>,
    accel_dir: Option<&str>,
) -> i32 {
    with_context(|ctx| {
        state::coordinator().global_init(ctx.entries(), use_accel, accel_name, accel_dir)
    })
}

/// Replacement `crypto_global_cleanup`.
///
/// Deregisters the calling node; the real teardown runs when the last node
/// leaves.
pub fn crypto_global_cleanup() -> i32 {
    with_context(|ctx| state::coordinator().global_cleanup(ctx.entries()))
}

/// Replacement `ssl_global_init`.
///
/// Deliberately empty: the coordinator already ran the real SSL setup under
/// the first [`crypto_global_init`], and running it again per node is
/// exactly the duplication this shim exists to prevent.
pub fn ssl_global_init() {}

//! Replacement random-source family.
//!
//! Installed as the hosted library's sole random method: every byte comes
//! from the process-wide deterministic generator, and there is no path that
//! reaches host entropy. Seed and add are accepted and ignored — the
//! simulation owns the seed — and status always reports ready so the
//! library never blocks waiting for entropy.

use crate::state;

/// OpenSSL-style success status for the rand family.
const RAND_OK: i32 = 1;

/// Replacement `RAND_bytes`: fills `buf` deterministically. Never fails.
pub fn rand_bytes(buf: &mut [u8]) -> i32 {
    state::coordinator().fill_random(buf);
    RAND_OK
}

/// Replacement `RAND_pseudo_bytes`: same stream as [`rand_bytes`].
pub fn rand_pseudo_bytes(buf: &mut [u8]) -> i32 {
    rand_bytes(buf)
}

/// Replacement `RAND_seed`: ignored, the simulation controls seeding.
pub fn rand_seed(_buf: &[u8]) {}

/// Replacement `RAND_add`: ignored, including the entropy estimate.
pub fn rand_add(_buf: &[u8], _entropy: f64) {}

/// Replacement `RAND_poll`: nothing to gather; reports success.
#[must_use]
pub fn rand_poll() -> i32 {
    RAND_OK
}

/// Replacement `RAND_status`: the generator is always ready.
#[must_use]
pub fn rand_status() -> i32 {
    RAND_OK
}

/// Replacement `RAND_cleanup`: the generator state outlives any one node.
pub fn rand_cleanup() {}

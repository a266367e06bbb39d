//! Process-global coordinator singleton.
//!
//! The interpose surface is consumed by a library that expects ordinary
//! process-global externals, so production code funnels every thread
//! through one [`Coordinator`]. The core stays constructible in isolation;
//! only this module pins a singleton.

use std::sync::OnceLock;

use simshim_core::coordinator::Coordinator;
use simshim_core::entropy::DEFAULT_SEED;

/// Environment variable selecting the deterministic entropy seed.
pub(crate) const SEED_ENV: &str = "SIMSHIM_SEED";

/// The process-wide coordinator, created on first use.
pub(crate) fn coordinator() -> &'static Coordinator {
    static COORDINATOR: OnceLock<Coordinator> = OnceLock::new();
    COORDINATOR.get_or_init(|| {
        let seed = std::env::var(SEED_ENV)
            .ok()
            .and_then(|raw| parse_seed(&raw))
            .unwrap_or(DEFAULT_SEED);
        Coordinator::new(seed)
    })
}

/// Parses a seed value: decimal, or hex with an `0x` prefix.
fn parse_seed(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).ok()
    } else {
        raw.parse().ok()
    }
}

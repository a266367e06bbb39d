//! Name-resolved entry tables over an opaque library image.
//!
//! The host loader hands us the hosted library as an opaque image that can
//! be queried for entry points by symbol name. Each thread resolves its own
//! [`EntryTable`] once at setup and treats it as read-only afterward.
//!
//! Mandatory symbols exist in every supported build of the hosted library;
//! a missing one means the embedding loaded the wrong image, which is a
//! programming error and fatal. The early-init family is optional — older
//! builds predate it — so those slots resolve to `None` and callers check
//! before use.

use std::path::Path;
use std::sync::Arc;

/// Spawns a library worker thread. The shim's replacement always refuses.
pub type SpawnFn = Arc<dyn Fn() -> i32 + Send + Sync>;
/// Persists text (or binary) content to a path, returning a status.
pub type WriteFileFn = Arc<dyn Fn(&Path, &str, bool) -> i32 + Send + Sync>;
/// One-time main crypto setup: (use acceleration, accel name, accel dir).
pub type GlobalInitFn = Arc<dyn Fn(bool, Option<&str>, Option<&str>) -> i32 + Send + Sync>;
/// Status-returning nullary entry (early init, siphash init, cleanup).
pub type StatusFn = Arc<dyn Fn() -> i32 + Send + Sync>;
/// Side-effect-only nullary entry (SSL global init).
pub type VoidFn = Arc<dyn Fn() + Send + Sync>;
/// Reseeds the library RNG; the flag marks a startup-time seeding.
pub type SeedRngFn = Arc<dyn Fn(bool) -> i32 + Send + Sync>;

/// Mandatory symbols.
pub const SYM_SPAWN_FUNC: &str = "spawn_func";
pub const SYM_WRITE_STR_TO_FILE: &str = "write_str_to_file";
pub const SYM_CRYPTO_GLOBAL_INIT: &str = "crypto_global_init";
pub const SYM_CRYPTO_GLOBAL_CLEANUP: &str = "crypto_global_cleanup";
pub const SYM_SSL_GLOBAL_INIT: &str = "ssl_global_init";

/// Optional symbols — absent from older library builds.
pub const SYM_CRYPTO_EARLY_INIT: &str = "crypto_early_init";
pub const SYM_CRYPTO_SEED_RNG: &str = "crypto_seed_rng";
pub const SYM_CRYPTO_INIT_SIPHASH_KEY: &str = "crypto_init_siphash_key";

/// A single entry point as produced by symbol lookup, tagged with its
/// signature.
#[derive(Clone)]
pub enum Entry {
    Spawn(SpawnFn),
    WriteFile(WriteFileFn),
    GlobalInit(GlobalInitFn),
    Status(StatusFn),
    Void(VoidFn),
    SeedRng(SeedRngFn),
}

/// Capability interface over a loaded library image.
///
/// The production implementation wraps whatever the host's module loader
/// produced; [`crate::testing::FakeImage`] is the in-process double.
pub trait LibraryImage: Send + Sync {
    /// Looks up the entry point registered under `name`.
    fn entry(&self, name: &str) -> Option<Entry>;
}

/// A thread's resolved entry points into the real library.
///
/// Populated once per thread at setup and read-only afterward.
#[derive(Clone)]
pub struct EntryTable {
    pub spawn_func: SpawnFn,
    pub write_str_to_file: WriteFileFn,
    pub crypto_global_init: GlobalInitFn,
    pub crypto_global_cleanup: StatusFn,
    pub ssl_global_init: VoidFn,
    pub crypto_early_init: Option<StatusFn>,
    pub crypto_seed_rng: Option<SeedRngFn>,
    pub crypto_init_siphash_key: Option<StatusFn>,
}

fn mandatory(image: &dyn LibraryImage, name: &str) -> Entry {
    image
        .entry(name)
        .unwrap_or_else(|| panic!("library image is missing mandatory symbol `{name}`"))
}

fn signature_mismatch(name: &str) -> ! {
    panic!("symbol `{name}` resolved with an unexpected signature")
}

impl EntryTable {
    /// Resolves the full table from `image`.
    ///
    /// # Panics
    ///
    /// Panics if a mandatory symbol is missing or any symbol resolves with
    /// the wrong signature. Both indicate a mismatched library image, which
    /// is a contract violation by the embedding, not a runtime condition.
    #[must_use]
    pub fn resolve(image: &dyn LibraryImage) -> Self {
        let spawn_func = match mandatory(image, SYM_SPAWN_FUNC) {
            Entry::Spawn(f) => f,
            _ => signature_mismatch(SYM_SPAWN_FUNC),
        };
        let write_str_to_file = match mandatory(image, SYM_WRITE_STR_TO_FILE) {
            Entry::WriteFile(f) => f,
            _ => signature_mismatch(SYM_WRITE_STR_TO_FILE),
        };
        let crypto_global_init = match mandatory(image, SYM_CRYPTO_GLOBAL_INIT) {
            Entry::GlobalInit(f) => f,
            _ => signature_mismatch(SYM_CRYPTO_GLOBAL_INIT),
        };
        let crypto_global_cleanup = match mandatory(image, SYM_CRYPTO_GLOBAL_CLEANUP) {
            Entry::Status(f) => f,
            _ => signature_mismatch(SYM_CRYPTO_GLOBAL_CLEANUP),
        };
        let ssl_global_init = match mandatory(image, SYM_SSL_GLOBAL_INIT) {
            Entry::Void(f) => f,
            _ => signature_mismatch(SYM_SSL_GLOBAL_INIT),
        };
        let crypto_early_init = match image.entry(SYM_CRYPTO_EARLY_INIT) {
            Some(Entry::Status(f)) => Some(f),
            Some(_) => signature_mismatch(SYM_CRYPTO_EARLY_INIT),
            None => None,
        };
        let crypto_seed_rng = match image.entry(SYM_CRYPTO_SEED_RNG) {
            Some(Entry::SeedRng(f)) => Some(f),
            Some(_) => signature_mismatch(SYM_CRYPTO_SEED_RNG),
            None => None,
        };
        let crypto_init_siphash_key = match image.entry(SYM_CRYPTO_INIT_SIPHASH_KEY) {
            Some(Entry::Status(f)) => Some(f),
            Some(_) => signature_mismatch(SYM_CRYPTO_INIT_SIPHASH_KEY),
            None => None,
        };

        Self {
            spawn_func,
            write_str_to_file,
            crypto_global_init,
            crypto_global_cleanup,
            ssl_global_init,
            crypto_early_init,
            crypto_seed_rng,
            crypto_init_siphash_key,
        }
    }
}

impl std::fmt::Debug for EntryTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryTable")
            .field("crypto_early_init", &self.crypto_early_init.is_some())
            .field("crypto_seed_rng", &self.crypto_seed_rng.is_some())
            .field(
                "crypto_init_siphash_key",
                &self.crypto_init_siphash_key.is_some(),
            )
            .finish_non_exhaustive()
    }
}

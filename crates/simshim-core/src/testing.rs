//! Test doubles for the hosted library image.
//!
//! [`FakeImage`] stands in for a real loaded image so the dispatch and
//! lifecycle machinery can be exercised entirely in-process. Every entry
//! point records its invocations in a shared [`CallLog`], which is how the
//! tests assert "the underlying setup ran exactly once" style properties.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;

use parking_lot::Mutex;

use crate::symbols::{
    Entry, LibraryImage, SYM_CRYPTO_EARLY_INIT, SYM_CRYPTO_GLOBAL_CLEANUP, SYM_CRYPTO_GLOBAL_INIT,
    SYM_CRYPTO_INIT_SIPHASH_KEY, SYM_CRYPTO_SEED_RNG, SYM_SPAWN_FUNC, SYM_SSL_GLOBAL_INIT,
    SYM_WRITE_STR_TO_FILE,
};

/// One forwarded `write_str_to_file` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedWrite {
    pub path: PathBuf,
    pub content: String,
    pub binary: bool,
}

/// Invocation counts for every fake entry point.
#[derive(Debug, Default)]
pub struct CallLog {
    pub spawn: AtomicUsize,
    pub early_init: AtomicUsize,
    pub seed_rng: AtomicUsize,
    pub siphash_init: AtomicUsize,
    pub ssl_init: AtomicUsize,
    pub global_init: AtomicUsize,
    pub global_cleanup: AtomicUsize,
    pub writes: Mutex<Vec<RecordedWrite>>,
}

/// An in-memory library image with entries registered by symbol name.
pub struct FakeImage {
    entries: HashMap<&'static str, Entry>,
}

impl FakeImage {
    /// An image with no symbols at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// A fully populated image whose entries succeed (status 0) and record
    /// themselves in the returned log.
    #[must_use]
    pub fn recording() -> (Self, Arc<CallLog>) {
        use std::sync::atomic::Ordering::SeqCst;

        let log = Arc::new(CallLog::default());
        let mut image = Self::empty();

        let counts = Arc::clone(&log);
        image.insert(
            SYM_SPAWN_FUNC,
            Entry::Spawn(Arc::new(move || {
                counts.spawn.fetch_add(1, SeqCst);
                0
            })),
        );
        let counts = Arc::clone(&log);
        image.insert(
            SYM_WRITE_STR_TO_FILE,
            Entry::WriteFile(Arc::new(move |path, content, binary| {
                counts.writes.lock().push(RecordedWrite {
                    path: path.to_path_buf(),
                    content: content.to_owned(),
                    binary,
                });
                0
            })),
        );
        let counts = Arc::clone(&log);
        image.insert(
            SYM_CRYPTO_GLOBAL_INIT,
            Entry::GlobalInit(Arc::new(move |_accel, _name, _dir| {
                counts.global_init.fetch_add(1, SeqCst);
                0
            })),
        );
        let counts = Arc::clone(&log);
        image.insert(
            SYM_CRYPTO_GLOBAL_CLEANUP,
            Entry::Status(Arc::new(move || {
                counts.global_cleanup.fetch_add(1, SeqCst);
                0
            })),
        );
        let counts = Arc::clone(&log);
        image.insert(
            SYM_SSL_GLOBAL_INIT,
            Entry::Void(Arc::new(move || {
                counts.ssl_init.fetch_add(1, SeqCst);
            })),
        );
        let counts = Arc::clone(&log);
        image.insert(
            SYM_CRYPTO_EARLY_INIT,
            Entry::Status(Arc::new(move || {
                counts.early_init.fetch_add(1, SeqCst);
                0
            })),
        );
        let counts = Arc::clone(&log);
        image.insert(
            SYM_CRYPTO_SEED_RNG,
            Entry::SeedRng(Arc::new(move |_startup| {
                counts.seed_rng.fetch_add(1, SeqCst);
                0
            })),
        );
        let counts = Arc::clone(&log);
        image.insert(
            SYM_CRYPTO_INIT_SIPHASH_KEY,
            Entry::Status(Arc::new(move || {
                counts.siphash_init.fetch_add(1, SeqCst);
                0
            })),
        );

        (image, log)
    }

    /// Registers (or replaces) the entry for `name`.
    pub fn insert(&mut self, name: &'static str, entry: Entry) {
        self.entries.insert(name, entry);
    }

    /// Drops the entry for `name`, if any.
    pub fn remove(&mut self, name: &str) {
        self.entries.remove(name);
    }
}

impl LibraryImage for FakeImage {
    fn entry(&self, name: &str) -> Option<Entry> {
        self.entries.get(name).cloned()
    }
}

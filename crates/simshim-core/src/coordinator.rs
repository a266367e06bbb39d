//! Reference-counted lifecycle coordination for process-wide library state.
//!
//! The hosted library's init and cleanup routines are not reentrant and were
//! never designed for multiple logical instances in one process. Every
//! simulated node calls them anyway, once each, from its own thread. The
//! coordinator turns "initialize N times, clean up N times" into
//! "initialize once, clean up once" by counting active users and forwarding
//! to the real routines only on the first-in / last-out transitions.
//!
//! Two separate mutexes keep unrelated critical sections from contending:
//! early-init bookkeeping is independent of main-init/cleanup and lock-bank
//! bookkeeping. The one-time forwarded call happens while the owning mutex
//! is held — that is what guarantees at-most-once execution — which
//! serializes the rare first-caller path; steady-state calls never re-enter
//! the hosted library and return after a counter update.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::entropy::{DEFAULT_SEED, EntropySource};
use crate::lockbank::LockBank;
use crate::symbols::EntryTable;

/// Neutral success status, matching the hosted library's convention.
pub const STATUS_OK: i32 = 0;

/// Generic forwarded-failure status.
const STATUS_FAILED: i32 = -1;

#[derive(Debug, Default)]
struct EarlyState {
    initialized: bool,
}

#[derive(Default)]
struct MainState {
    initialized: bool,
    /// Logical nodes that have called `global_init` minus those that have
    /// called `global_cleanup`. Signed so misuse is observable rather than
    /// wrapping.
    active_nodes: i64,
    bank: Option<Arc<LockBank>>,
    /// Threads currently relying on the lock bank.
    bank_threads: i64,
}

/// Process-wide resource state for one hosted library image.
///
/// Production code holds exactly one of these behind a singleton; tests
/// construct as many independent instances as they need.
pub struct Coordinator {
    /// Secondary lock: early-init bookkeeping only.
    early: Mutex<EarlyState>,
    /// Primary lock: main init/cleanup and lock-bank bookkeeping.
    main: Mutex<MainState>,
    entropy: Mutex<EntropySource>,
}

impl Coordinator {
    /// Creates a coordinator whose entropy stream starts from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            early: Mutex::new(EarlyState::default()),
            main: Mutex::new(MainState::default()),
            entropy: Mutex::new(EntropySource::new(seed)),
        }
    }

    /// One-time early crypto setup.
    ///
    /// The first call forwards `crypto_early_init` (when the library build
    /// has it). Every later call instead refreshes the per-call
    /// deterministic state by forwarding the reseed pair — `crypto_seed_rng`
    /// and `crypto_init_siphash_key` — so each node's early init remains
    /// individually effective without repeating the one-time setup. The
    /// reseed pair intentionally never runs on the very first call; the
    /// first early init seeds itself.
    ///
    /// A negative status from any forwarded call propagates as failure.
    pub fn early_init(&self, entries: &EntryTable) -> i32 {
        let mut early = self.early.lock();

        if !early.initialized {
            early.initialized = true;
            return match &entries.crypto_early_init {
                Some(early_init) => early_init(),
                None => STATUS_OK,
            };
        }

        if entries.crypto_early_init.is_none() {
            // Old library build: nothing to re-seed.
            return STATUS_OK;
        }

        let mut status = STATUS_OK;
        if entries
            .crypto_seed_rng
            .as_ref()
            .map_or(STATUS_FAILED, |seed_rng| seed_rng(true))
            < 0
        {
            status = STATUS_FAILED;
        }
        if entries
            .crypto_init_siphash_key
            .as_ref()
            .map_or(STATUS_FAILED, |siphash| siphash())
            < 0
        {
            status = STATUS_FAILED;
        }
        status
    }

    /// Registers a logical node and performs one-time main crypto setup.
    ///
    /// Every call increments the active-node count. Only the call that
    /// transitions the process from uninitialized to initialized forwards to
    /// the hosted library (SSL setup, then main crypto init with the
    /// acceleration parameters); its status is returned. Later calls return
    /// [`STATUS_OK`] without re-entering the library.
    pub fn global_init(
        &self,
        entries: &EntryTable,
        use_accel: bool,
        accel_name: Option<&str>,
        accel_dir: Option<&str>,
    ) -> i32 {
        let mut main = self.main.lock();

        main.active_nodes += 1;
        if main.initialized {
            return STATUS_OK;
        }
        main.initialized = true;

        (entries.ssl_global_init)();
        (entries.crypto_global_init)(use_accel, accel_name, accel_dir)
    }

    /// Releases a logical node, tearing down the hosted library when the
    /// last one leaves.
    ///
    /// Calling this more times than [`Coordinator::global_init`] is caller
    /// misuse: fatal in debug builds, undefined (the count goes negative and
    /// teardown will not re-run) in release builds.
    pub fn global_cleanup(&self, entries: &EntryTable) -> i32 {
        let mut main = self.main.lock();

        debug_assert!(
            main.active_nodes > 0,
            "crypto_global_cleanup without a matching crypto_global_init"
        );

        main.active_nodes -= 1;
        if main.active_nodes == 0 {
            (entries.crypto_global_cleanup)()
        } else {
            STATUS_OK
        }
    }

    /// Attaches the calling thread to the shared lock bank, allocating it on
    /// the first attach.
    ///
    /// # Panics
    ///
    /// Panics if `lock_count` differs from the size the bank was first
    /// allocated with; the hosted library announces one size per image.
    pub fn bank_attach(&self, lock_count: usize) -> Arc<LockBank> {
        let mut main = self.main.lock();

        let bank = match &main.bank {
            Some(bank) => {
                assert_eq!(
                    bank.len(),
                    lock_count,
                    "lock bank already allocated with a different lock count"
                );
                Arc::clone(bank)
            }
            None => {
                let bank = Arc::new(LockBank::new(lock_count));
                main.bank = Some(Arc::clone(&bank));
                bank
            }
        };
        main.bank_threads += 1;
        bank
    }

    /// Detaches the calling thread from the lock bank, dropping the bank
    /// when the last relying thread leaves.
    pub fn bank_detach(&self) {
        let mut main = self.main.lock();

        debug_assert!(
            main.bank_threads > 0,
            "bank_detach without a matching bank_attach"
        );

        main.bank_threads -= 1;
        if main.bank_threads == 0 {
            main.bank = None;
        }
    }

    /// Fills `buf` from the process-wide deterministic entropy stream.
    ///
    /// Never blocks beyond the internal mutex, never fails.
    pub fn fill_random(&self, buf: &mut [u8]) {
        self.entropy.lock().fill(buf);
    }

    /// Restarts the entropy stream from `seed`.
    pub fn reseed_entropy(&self, seed: u64) {
        self.entropy.lock().reseed(seed);
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let main = self.main.lock();
        f.debug_struct("Coordinator")
            .field("early_initialized", &self.early.lock().initialized)
            .field("main_initialized", &main.initialized)
            .field("active_nodes", &main.active_nodes)
            .field("bank_threads", &main.bank_threads)
            .finish_non_exhaustive()
    }
}

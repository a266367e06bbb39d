//! Fixed-size reader-writer lock bank.
//!
//! The hosted library does not create its own locks. It hands the embedding
//! a locking callback contract: "when I pass you lock ID `n` and a mode,
//! block appropriately." The bank is the real synchronization primitive
//! underneath that contract — one reader-writer lock per ID, allocated once
//! at the size the library announces, shared by every thread in the
//! process.
//!
//! Acquire and release are separate calls on the library side, so RAII
//! guards cannot span the callback boundary. The bank therefore drives
//! `parking_lot`'s raw lock interface directly and trusts the library to
//! pair its acquisitions, exactly as the callback contract demands.
//! An out-of-range ID is a contract violation by the hosted library and is
//! fatal.

use parking_lot::RawRwLock;
use parking_lot::lock_api::RawRwLock as _;

/// Access mode requested through the locking callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    /// Shared access: any number of concurrent readers per ID.
    Read,
    /// Exclusive access: one writer, no readers, per ID.
    Write,
}

/// An owned, fixed-length sequence of reader-writer locks indexed by the
/// lock IDs the hosted library supplies.
///
/// The size is fixed at allocation. There is no ordering guarantee across
/// different IDs, and no reader-to-writer upgrade: a caller holding a read
/// lock must release it before requesting a write lock on the same ID.
pub struct LockBank {
    slots: Vec<RawRwLock>,
}

impl LockBank {
    /// Allocates a bank of `lock_count` independent reader-writer locks.
    ///
    /// # Panics
    ///
    /// Panics if `lock_count` is zero; a library that registers a locking
    /// callback announces at least one lock.
    #[must_use]
    pub fn new(lock_count: usize) -> Self {
        assert!(lock_count > 0, "lock bank sized to zero locks");
        Self {
            slots: (0..lock_count).map(|_| RawRwLock::INIT).collect(),
        }
    }

    /// Number of lock IDs this bank serves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn slot(&self, id: usize) -> &RawRwLock {
        let size = self.slots.len();
        self.slots
            .get(id)
            .unwrap_or_else(|| panic!("lock ID {id} out of range for bank of {size} locks"))
    }

    /// Blocks until the lock for `id` is held in `mode`.
    pub fn acquire(&self, id: usize, mode: LockMode) {
        match mode {
            LockMode::Read => self.slot(id).lock_shared(),
            LockMode::Write => self.slot(id).lock_exclusive(),
        }
    }

    /// Releases the lock for `id` previously acquired in `mode`.
    ///
    /// The caller must currently hold the lock for `id` in exactly `mode`;
    /// the hosted library is trusted to pair its callback invocations, and
    /// an unpaired release is undefined behavior at the raw-lock level.
    pub fn release(&self, id: usize, mode: LockMode) {
        match mode {
            // SAFETY: the locking-callback contract guarantees this thread
            // holds the shared lock for `id`.
            LockMode::Read => unsafe { self.slot(id).unlock_shared() },
            // SAFETY: same contract, exclusive side.
            LockMode::Write => unsafe { self.slot(id).unlock_exclusive() },
        }
    }
}

impl std::fmt::Debug for LockBank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockBank")
            .field("lock_count", &self.slots.len())
            .finish()
    }
}

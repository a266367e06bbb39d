//! Per-thread dispatch contexts.
//!
//! Every OS thread that calls into the hosted library — one thread per
//! simulated node — gets its own [`ThreadContext`] holding that thread's
//! resolved entry table, its handle on the shared lock bank, and its
//! private side-effect counter. The registry is keyed by thread-local
//! storage: access is lock-free, two calls from one thread observe the same
//! context, and two threads never share one. The context is dropped
//! automatically when its thread exits; it owns no process-wide resources,
//! so the drop releases only thread-local memory.

use std::cell::RefCell;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::lockbank::LockBank;
use crate::symbols::EntryTable;

/// Source of stable per-thread identifiers. Starts at 1 so 0 can mean
/// "no thread" on the hosted side.
static NEXT_THREAD_ID: AtomicU64 = AtomicU64::new(1);

/// One thread's view of the hosted library.
#[derive(Debug)]
pub struct ThreadContext {
    id: u64,
    entries: Option<EntryTable>,
    bank: Option<Arc<LockBank>>,
    artifact_counter: u32,
}

impl ThreadContext {
    fn new() -> Self {
        Self {
            id: NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed),
            entries: None,
            bank: None,
            artifact_counter: 0,
        }
    }

    /// Distinct, stable identifier for the owning thread.
    ///
    /// The hosted library uses this through its "current thread ID"
    /// callback for internal bookkeeping; it must not change over the
    /// thread's lifetime.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Installs the resolved entry table and lock-bank handle for this
    /// thread. Called once, from the per-thread setup entry point.
    pub fn install(&mut self, entries: EntryTable, bank: Arc<LockBank>) {
        self.entries = Some(entries);
        self.bank = Some(bank);
    }

    /// Drops the entry table and lock-bank handle. Called from the
    /// per-thread teardown entry point; the context itself lives until the
    /// thread exits.
    pub fn discard(&mut self) {
        self.entries = None;
        self.bank = None;
    }

    /// The thread's resolved entry points.
    ///
    /// # Panics
    ///
    /// Panics if the thread never ran setup — an intercepted call arriving
    /// before per-thread initialization is a contract violation by the
    /// embedding.
    #[must_use]
    pub fn entries(&self) -> &EntryTable {
        self.entries
            .as_ref()
            .expect("intercepted call on a thread that was never initialized")
    }

    /// The shared lock bank, as cached at setup time.
    ///
    /// # Panics
    ///
    /// Same contract as [`ThreadContext::entries`].
    #[must_use]
    pub fn bank(&self) -> &Arc<LockBank> {
        self.bank
            .as_ref()
            .expect("locking callback on a thread that was never initialized")
    }

    /// Next version number for this thread's side-effect artifacts.
    /// Monotonically increasing, starting at 0.
    pub fn next_artifact_index(&mut self) -> u32 {
        let index = self.artifact_counter;
        self.artifact_counter += 1;
        index
    }
}

thread_local! {
    static CONTEXT: RefCell<ThreadContext> = RefCell::new(ThreadContext::new());
}

/// Runs `f` with the calling thread's context, creating it on first access.
pub fn with_context<R>(f: impl FnOnce(&mut ThreadContext) -> R) -> R {
    CONTEXT.with(|context| f(&mut context.borrow_mut()))
}

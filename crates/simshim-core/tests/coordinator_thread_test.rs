//! Cross-thread lifecycle properties of the resource coordinator.
//!
//! N threads each register once and release once; the hosted library's
//! one-time setup and teardown must each run exactly once regardless of
//! interleaving.

use std::sync::Arc;
use std::sync::atomic::Ordering::SeqCst;
use std::thread;

use simshim_core::coordinator::{Coordinator, STATUS_OK};
use simshim_core::lockbank::LockMode;
use simshim_core::symbols::EntryTable;
use simshim_core::testing::FakeImage;

fn init_cleanup_round(node_count: usize) {
    let (image, log) = FakeImage::recording();
    let coordinator = Arc::new(Coordinator::default());
    let table = EntryTable::resolve(&image);

    thread::scope(|scope| {
        for _ in 0..node_count {
            let coordinator = Arc::clone(&coordinator);
            let table = table.clone();
            scope.spawn(move || {
                assert_eq!(coordinator.early_init(&table), STATUS_OK);
                assert!(coordinator.global_init(&table, false, None, None) >= 0);
                // Simulated node lifetime.
                thread::yield_now();
                assert_eq!(coordinator.global_cleanup(&table), STATUS_OK);
            });
        }
    });

    assert_eq!(
        log.ssl_init.load(SeqCst),
        1,
        "SSL setup ran more than once for {node_count} nodes"
    );
    assert_eq!(
        log.global_init.load(SeqCst),
        1,
        "main setup ran more than once for {node_count} nodes"
    );
    assert_eq!(
        log.global_cleanup.load(SeqCst),
        1,
        "teardown did not run exactly once for {node_count} nodes"
    );
    assert_eq!(log.early_init.load(SeqCst), 1);
}

#[test]
fn one_node_runs_setup_and_teardown_once() {
    init_cleanup_round(1);
}

#[test]
fn two_nodes_share_one_setup_and_teardown() {
    init_cleanup_round(2);
}

#[test]
fn sixteen_nodes_share_one_setup_and_teardown() {
    init_cleanup_round(16);
}

#[test]
fn bank_attach_detach_is_refcounted_across_threads() {
    let coordinator = Arc::new(Coordinator::default());

    thread::scope(|scope| {
        for _ in 0..8 {
            let coordinator = Arc::clone(&coordinator);
            scope.spawn(move || {
                let bank = coordinator.bank_attach(16);
                bank.acquire(3, LockMode::Read);
                bank.release(3, LockMode::Read);
                coordinator.bank_detach();
            });
        }
    });

    // All threads detached: a fresh attach may re-size the bank.
    let bank = coordinator.bank_attach(4);
    assert_eq!(bank.len(), 4);
    coordinator.bank_detach();
}

#[test]
fn reader_threads_share_a_lock_concurrently() {
    let coordinator = Coordinator::default();
    let bank = coordinator.bank_attach(2);

    thread::scope(|scope| {
        for _ in 0..8 {
            let bank = Arc::clone(&bank);
            scope.spawn(move || {
                bank.acquire(0, LockMode::Read);
                thread::yield_now();
                bank.release(0, LockMode::Read);
            });
        }
    });

    coordinator.bank_detach();
}

//! End-to-end lifecycle through the public interception surface.
//!
//! Sixteen simulated nodes, one per thread, each run the full per-node
//! sequence against the process-global coordinator. The hosted library's
//! one-time setup and teardown must each run exactly once.

use std::collections::HashSet;
use std::sync::atomic::Ordering::SeqCst;
use std::thread;

use simshim_core::testing::FakeImage;
use simshim_interpose::locks::{self, LockMode};
use simshim_interpose::{clear, crypto, initialize, rand, spawn_func};

const LOCK_COUNT: usize = 8;
const NODES: usize = 16;

#[test]
fn sixteen_nodes_share_one_underlying_lifecycle() {
    let (image, log) = FakeImage::recording();
    let image = std::sync::Arc::new(image);

    let workers: Vec<_> = (0..NODES)
        .map(|node| {
            let image = std::sync::Arc::clone(&image);
            thread::spawn(move || {
                initialize(image.as_ref(), LOCK_COUNT);

                assert!(crypto::crypto_global_init(false, None, None) >= 0);
                assert_eq!(spawn_func(), -1);

                // A node's steady-state traffic: locking and randomness.
                let id = node % LOCK_COUNT;
                locks::lock_acquire(id, LockMode::Write);
                locks::lock_release(id, LockMode::Write);
                locks::lock_acquire(id, LockMode::Read);
                locks::lock_release(id, LockMode::Read);

                let mut buf = [0u8; 20];
                assert_eq!(rand::rand_bytes(&mut buf), 1);
                assert_eq!(rand::rand_status(), 1);

                assert_eq!(crypto::crypto_global_cleanup(), 0);
                let thread_id = locks::thread_id();
                clear();
                thread_id
            })
        })
        .collect();

    let ids: HashSet<u64> = workers
        .into_iter()
        .map(|worker| worker.join().expect("node thread panicked"))
        .collect();

    assert_eq!(ids.len(), NODES, "thread identities were not distinct");
    assert_eq!(log.ssl_init.load(SeqCst), 1);
    assert_eq!(log.global_init.load(SeqCst), 1);
    assert_eq!(log.global_cleanup.load(SeqCst), 1);
}

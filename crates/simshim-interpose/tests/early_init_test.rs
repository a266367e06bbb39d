//! Early-init semantics through the public interception surface.
//!
//! The first `crypto_early_init` anywhere in the process forwards the real
//! early setup; every later call forwards only the reseed pair. One test
//! owns the process so the ordering is deterministic.

use std::sync::Arc;
use std::sync::atomic::Ordering::SeqCst;
use std::thread;

use simshim_core::testing::FakeImage;
use simshim_interpose::{clear, crypto, initialize};

const LOCK_COUNT: usize = 8;

#[test]
fn first_call_initializes_later_calls_reseed() {
    let (image, log) = FakeImage::recording();
    let image = Arc::new(image);

    let first_image = Arc::clone(&image);
    thread::spawn(move || {
        initialize(first_image.as_ref(), LOCK_COUNT);
        assert_eq!(crypto::crypto_early_init(), 0);
        clear();
    })
    .join()
    .unwrap();

    assert_eq!(log.early_init.load(SeqCst), 1);
    assert_eq!(log.seed_rng.load(SeqCst), 0);
    assert_eq!(log.siphash_init.load(SeqCst), 0);

    for round in 1..=3 {
        let image = Arc::clone(&image);
        thread::spawn(move || {
            initialize(image.as_ref(), LOCK_COUNT);
            assert_eq!(crypto::crypto_early_init(), 0);
            clear();
        })
        .join()
        .unwrap();

        assert_eq!(log.early_init.load(SeqCst), 1, "early init ran again");
        assert_eq!(log.seed_rng.load(SeqCst), round);
        assert_eq!(log.siphash_init.load(SeqCst), round);
    }
}

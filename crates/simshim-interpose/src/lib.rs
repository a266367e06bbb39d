//! # simshim-interpose
//!
//! The replacement entry points the hosted library calls instead of its
//! normal externals. Each intercepted call falls into one of three
//! policies:
//!
//! 1. **Redirection** — answered entirely by the virtualization core:
//!    crypto lifecycle ([`crypto`]), locking and thread identity
//!    ([`locks`]), the whole random-source family ([`rand`]).
//! 2. **Forwarding with a side effect** — [`fs::write_str_to_file`]
//!    persists a numbered snapshot of tracked artifacts before forwarding
//!    to the real entry point.
//! 3. **No-op / trivial stubs** — worker-spawn refusal ([`setup`]),
//!    synchronous name resolution ([`resolve`]), and the simulation-only
//!    cipher substitutions ([`cipher`], behind the `cipher-stubs` feature).
//!
//! The embedding host calls [`initialize`] on every thread before that
//! thread's first intercepted call, and [`clear`] when the thread is done.

#![deny(unsafe_code)]

#[cfg(feature = "cipher-stubs")]
pub mod cipher;
pub mod crypto;
pub mod fs;
pub mod locks;
pub mod rand;
mod report;
pub mod resolve;
mod setup;
mod state;

pub use setup::{clear, initialize, spawn_func};

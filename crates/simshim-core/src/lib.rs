//! # simshim-core
//!
//! Virtualization core for running many simulated nodes against a single
//! image of a crypto-heavy hosted library.
//!
//! The hosted library was written to own its process: one-time crypto
//! initialization, one set of global locks, one random source. A simulation
//! host runs one logical node per OS thread inside a single process, so the
//! pieces of library state that are genuinely process-wide must be
//! initialized exactly once and torn down only when the last node releases
//! them, while each thread keeps its own dispatch table into the library
//! image.
//!
//! Modules:
//! - [`context`]: per-thread dispatch records, keyed by thread-local storage.
//! - [`coordinator`]: reference-counted lifecycle for process-wide subsystems.
//! - [`lockbank`]: the reader-writer lock array behind the library's locking
//!   callback contract.
//! - [`entropy`]: deterministic replacement for the library's random source.
//! - [`symbols`]: name-resolved entry tables over an opaque library image.
//! - [`testing`]: a fake library image for exercising the core without a
//!   real image.

#![deny(unsafe_code)]

pub mod context;
pub mod coordinator;
pub mod entropy;
#[allow(unsafe_code)]
pub mod lockbank;
pub mod symbols;
pub mod testing;

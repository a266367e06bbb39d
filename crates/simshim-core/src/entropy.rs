//! Deterministic entropy source.
//!
//! Simulation runs must be reproducible: every random byte the hosted
//! library consumes has to be a function of the simulation's own state, not
//! of host entropy. This generator replaces the library's random method
//! outright — there is no fallback path that reaches the host's entropy
//! pool.
//!
//! The generator is SplitMix64: a 64-bit Weyl sequence pushed through a
//! finalizing mix. It is fast, stateless beyond one word, and emphatically
//! not cryptographic, which is fine — the substitution exists for
//! reproducibility, not security.

/// Seed used when the embedding host does not configure one.
pub const DEFAULT_SEED: u64 = 0x5EED_0F5A_D0E5_1A7E;

/// Increment of the underlying Weyl sequence (golden-ratio constant).
const GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// A deterministic, non-cryptographic byte generator.
///
/// Filling never blocks and never fails. Two sources constructed with the
/// same seed produce byte-identical streams for the same call sequence.
#[derive(Debug, Clone)]
pub struct EntropySource {
    state: u64,
}

impl EntropySource {
    /// Creates a source that will replay the stream for `seed`.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Restarts the stream from `seed`, discarding current position.
    pub fn reseed(&mut self, seed: u64) {
        self.state = seed;
    }

    /// Produces the next 64-bit word and advances the generator state.
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GAMMA);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Fills `buf` completely with generated bytes.
    pub fn fill(&mut self, buf: &mut [u8]) {
        for chunk in buf.chunks_mut(8) {
            let word = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }
}

impl Default for EntropySource {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

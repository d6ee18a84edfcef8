//! Seedable RNG used by level generation and spawning
//!
//! One explicitly owned generator per session. Nothing in the simulation
//! reaches for a global or thread-local source.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// PCG generator that remembers the seed it was built from
#[derive(Debug, Clone)]
pub struct GameRng {
    seed: u64,
    inner: Pcg32,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: Pcg32::seed_from_u64(seed),
        }
    }

    /// Pick a fresh seed from the OS so the run can still be replayed from logs
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fair coin flip
    pub fn next_bool(&mut self) -> bool {
        self.inner.random_bool(0.5)
    }

    /// Uniform integer in `0..n`. `n` must be non-zero.
    pub fn next_int(&mut self, n: u32) -> u32 {
        debug_assert!(n > 0, "next_int needs a non-empty range");
        self.inner.random_range(0..n)
    }

    /// Uniform integer in `lower..=upper`
    pub fn range_inclusive(&mut self, lower: i32, upper: i32) -> i32 {
        if upper <= lower {
            return lower;
        }
        self.inner.random_range(lower..=upper)
    }

    /// Uniform float in `[0, 1)`
    pub fn next_float(&mut self) -> f32 {
        self.inner.random::<f32>()
    }

    /// Uniform index into a slice of `len` items
    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.inner.random_range(0..len))
    }

    /// True with probability `1/odds`
    pub fn one_in(&mut self, odds: u32) -> bool {
        odds > 0 && self.next_int(odds) == 0
    }
}

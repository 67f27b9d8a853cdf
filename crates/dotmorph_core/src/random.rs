//! # Random Source
//!
//! All randomness in the engine (spawn points, drift targets, shuffles) flows
//! through [`RandomSource`] so hosts can inject it and tests can seed it.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform random numbers.
pub trait RandomSource {
    /// Uniform integer in `[min, max]` (both inclusive). Swapped bounds are accepted.
    fn int_between(&mut self, min: i32, max: i32) -> i32;

    /// Uniform index in `[0, upper)`. Returns 0 when `upper` is 0.
    fn index_below(&mut self, upper: usize) -> usize;

    /// Fair coin flip.
    fn coin(&mut self) -> bool;
}

/// Deterministic ChaCha8-backed random source.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
    seed: u64,
}

impl SeededRandom {
    /// Creates a source from a fixed seed. Same seed, same sequence.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates a source seeded from the system clock.
    #[must_use]
    pub fn from_time() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x5EED);
        Self::new(seed)
    }

    /// Returns the seed this source was created with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn int_between(&mut self, min: i32, max: i32) -> i32 {
        let (low, high) = if min <= max { (min, max) } else { (max, min) };
        self.rng.gen_range(low..=high)
    }

    fn index_below(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        self.rng.gen_range(0..upper)
    }

    fn coin(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }
}

/// Uniform in-place Fisher-Yates shuffle, walking from the back of the slice.
pub fn shuffle<T, R: RandomSource + ?Sized>(items: &mut [T], rng: &mut R) {
    let mut remaining = items.len();
    while remaining > 1 {
        let pick = rng.index_below(remaining);
        remaining -= 1;
        items.swap(remaining, pick);
    }
}

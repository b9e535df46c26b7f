//! Deterministic randomness for tests and reproducible runs.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::ports::RandomSource;

/// Seeded [`RandomSource`] backed by `StdRng`.
///
/// Two sources built from the same seed produce identical draw sequences,
/// which is what the deterministic engine tests rely on.
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededSource {
    fn next_float(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn next_bit(&mut self) -> u8 {
        self.rng.random_range(0..2u8)
    }
}

//! Production randomness seeded from the operating system entropy pool.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::ports::RandomSource;

/// OS-entropy-backed [`RandomSource`].
///
/// Seeds a fast local generator from the system entropy pool at
/// construction; the engine never performs I/O per draw.
#[derive(Debug)]
pub struct EntropySource {
    rng: StdRng,
}

impl EntropySource {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }
}

impl Default for EntropySource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for EntropySource {
    fn next_float(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn next_bit(&mut self) -> u8 {
        self.rng.random_range(0..2u8)
    }
}

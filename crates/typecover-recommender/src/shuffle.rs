//! Candidate pool ordering strategies

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Reorders the candidate pool before the first search pass
pub trait PoolShuffle: Send {
    /// Shuffle the pool in place
    fn shuffle(&mut self, pool: &mut [String]);
}

/// Random shuffle driven by a seedable ChaCha generator
#[derive(Debug, Clone)]
pub struct SeededShuffle {
    rng: ChaCha8Rng,
}

impl SeededShuffle {
    /// Create a shuffle that always produces the same order for the same seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create a shuffle seeded from the thread RNG
    pub fn random() -> Self {
        Self::new(rand::random())
    }
}

impl PoolShuffle for SeededShuffle {
    fn shuffle(&mut self, pool: &mut [String]) {
        pool.shuffle(&mut self.rng);
    }
}

/// Keeps the pool in catalog order
#[derive(Debug, Clone, Copy, Default)]
pub struct NoShuffle;

impl PoolShuffle for NoShuffle {
    fn shuffle(&mut self, _pool: &mut [String]) {}
}

//! Deterministic random number generation.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Context streams**: Independent sequences for the mystery draw and
//!   for each automated player, all derived from one match seed
//!
//! ```
//! use mystery_guess::core::GameRng;
//!
//! let rng = GameRng::new(42);
//!
//! // Each bot gets its own stream, keyed by name
//! let mut bot_a = rng.for_context("Bot-0");
//! let mut bot_b = rng.for_context("Bot-1");
//!
//! let a: Vec<_> = (0..8).map(|_| bot_a.gen_inclusive(-32, 32)).collect();
//! let b: Vec<_> = (0..8).map(|_| bot_b.gen_inclusive(-32, 32)).collect();
//! assert_ne!(a, b);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

use super::Value;

/// Deterministic RNG for mystery draws and bot sampling.
///
/// Uses ChaCha8 for speed while keeping good statistical quality.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this generator was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Uniform value in `[low, high]`. Bounds may be given in either order.
    pub fn gen_inclusive(&mut self, low: Value, high: Value) -> Value {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        self.inner.gen_range(low..=high)
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn gen_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }
}

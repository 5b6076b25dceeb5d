//! Deterministic random number generation for deck shuffles.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces the same deck
//! - **Forkable**: Every session draws an independent, reproducible stream
//!
//! ## Session Usage
//!
//! ```
//! use concentric_pairs::core::GameRng;
//!
//! let mut master = GameRng::new(42);
//!
//! // Each session (and each restart) gets its own fork
//! let first = master.fork();
//! let second = master.fork();
//! assert_ne!(first.seed(), second.seed());
//!
//! // Forks are deterministic - same fork counter = same seed
//! let mut master2 = GameRng::new(42);
//! assert_eq!(master2.fork().seed(), first.seed());
//! ```

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG with forking for session restarts.
///
/// Uses ChaCha8 for speed while keeping the shuffle statistically uniform.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Create an RNG from a seed drawn from the operating system.
    ///
    /// The drawn seed is still reported by [`GameRng::seed`], so the
    /// stream can be reproduced later.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy().next_u64())
    }

    /// Fork this RNG to create an independent stream.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self::new(fork_seed)
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle a slice in place.
    ///
    /// `SliceRandom::shuffle` is a Fisher–Yates shuffle, so every
    /// permutation is equally likely.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}

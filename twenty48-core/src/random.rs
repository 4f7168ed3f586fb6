//! Injectable randomness.
//!
//! Every operation that needs randomness takes a `&mut R where R: RandomSource`.
//! Closures returning `f64` are sources, so tests can script exact draws:
//!
//! ```
//! use twenty48_core::Board;
//!
//! let mut draws = vec![0.0, 0.95].into_iter();
//! let mut rng = move || draws.next().unwrap_or(0.0);
//! let board = Board::empty(4).unwrap().spawn_random_tile(&mut rng);
//! assert_eq!(board.get(0, 0), Some(4));
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform draws in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<F: FnMut() -> f64> RandomSource for F {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        self()
    }
}

/// Adapter turning any `rand` generator into a [`RandomSource`].
#[derive(Clone, Debug)]
pub struct RngSource<R>(R);

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        RngSource(rng)
    }

    pub fn into_inner(self) -> R {
        self.0
    }
}

impl RngSource<StdRng> {
    /// Reproducible source for replays and tests.
    pub fn seeded(seed: u64) -> Self {
        RngSource(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// The default source: the thread-local generator.
#[cfg(feature = "thread-rng")]
pub fn thread_source() -> RngSource<rand::rngs::ThreadRng> {
    RngSource(rand::rng())
}

//! Injected choices: random playback and search result selection
//!
//! Neither the random number generator nor the interactive prompt lives in
//! the controller. Callers hand in a [`RandomSource`] when building the
//! controller and a [`ResultSelector`] with each search.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed indices
pub trait RandomSource: Send {
    /// Pick an index in `0..len`; `len` is never zero
    fn pick(&mut self, len: usize) -> usize;
}

/// Random source backed by the thread-local generator
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&mut self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Reproducible random source
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// Answers the "play any of the above?" prompt after a search
pub trait ResultSelector {
    /// Return the number the user entered for `count` listed results, or
    /// `None` when the answer was not a number
    fn select(&mut self, count: usize) -> Option<i64>;
}

impl<F> ResultSelector for F
where
    F: FnMut(usize) -> Option<i64>,
{
    fn select(&mut self, count: usize) -> Option<i64> {
        self(count)
    }
}

/// Selector that always declines
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSelection;

impl ResultSelector for NoSelection {
    fn select(&mut self, _count: usize) -> Option<i64> {
        None
    }
}

/// Map an entered number onto a result index
///
/// Numbers are 1-based. The accepted range is `0..=count`, and `0` picks the
/// last result; this matches the long-standing behaviour of the interactive
/// front-end and is kept until the intended bound is confirmed.
pub fn resolve_selection(choice: i64, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }

    let choice = usize::try_from(choice).ok()?;
    match choice {
        0 => Some(count - 1),
        n if n <= count => Some(n - 1),
        _ => None,
    }
}

//! Randomness seam for the simulation.
//!
//! All simulation draws go through [`RandomSource`] so that tests can
//! replace the seeded generator with a fixed script of values.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform integer source.
pub trait RandomSource {
    /// Returns a value uniformly distributed in `0..bound`. `bound` is never zero.
    fn draw(&mut self, bound: u32) -> u32;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn draw(&mut self, bound: u32) -> u32 {
        (**self).draw(bound)
    }
}

/// Seeded generator backed by any `rand` RNG (ChaCha8 by default).
#[derive(Debug, Clone)]
pub struct RngSource<R = ChaCha8Rng> {
    rng: R,
}

impl RngSource<ChaCha8Rng> {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn draw(&mut self, bound: u32) -> u32 {
        self.rng.gen_range(0..bound)
    }
}

/// Replays a fixed list of draws in order.
///
/// Running past the end of the script, or scripting a value outside the
/// requested bound, is a broken test fixture and panics.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    draws: VecDeque<u32>,
    consumed: usize,
}

impl ScriptedSource {
    pub fn new(draws: impl IntoIterator<Item = u32>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            consumed: 0,
        }
    }

    /// Draws not yet consumed.
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl RandomSource for ScriptedSource {
    fn draw(&mut self, bound: u32) -> u32 {
        let Some(value) = self.draws.pop_front() else {
            panic!(
                "scripted source exhausted after {} draws (next bound {bound})",
                self.consumed
            );
        };
        assert!(
            value < bound,
            "scripted draw #{} = {value} is outside 0..{bound}",
            self.consumed
        );
        self.consumed += 1;
        value
    }
}

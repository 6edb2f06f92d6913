//! Seedable randomness for world generation
//!
//! Every random draw in the simulation goes through [`RandomSource`] so a
//! session can be replayed from its seed and tests can substitute their own
//! source.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Random draws used by the generator
pub trait RandomSource {
    /// Uniform float in `[min, max]`
    fn uniform(&mut self, min: f32, max: f32) -> f32;

    /// Uniform integer in `[min, max]`
    fn between(&mut self, min: i32, max: i32) -> i32;

    /// Roll a d100 and succeed on `percent` or less
    fn chance(&mut self, percent: u32) -> bool {
        self.between(1, 100) <= percent as i32
    }

    /// Pick one element of a non-empty slice
    fn pick<T: Copy>(&mut self, items: &[T]) -> T
    where
        Self: Sized,
    {
        debug_assert!(!items.is_empty(), "pick from empty slice");
        let last = items.len().saturating_sub(1) as i32;
        items[self.between(0, last) as usize]
    }
}

/// PCG32-backed source used by live sessions
#[derive(Debug, Clone)]
pub struct SimRng {
    seed: u64,
    rng: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed this source was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw a fresh seed (used when a session restarts)
    pub fn next_seed(&mut self) -> u64 {
        self.rng.random()
    }
}

impl RandomSource for SimRng {
    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    fn between(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..=max)
    }
}

/// Deterministic source that always lands at a fixed fraction of each range
///
/// `bias = 0.0` makes every `chance` succeed and picks the first element;
/// `bias = 1.0` makes every `chance` below 100 fail and picks the last.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub(crate) struct ScriptedRng {
    pub bias: f32,
}

#[cfg(test)]
impl ScriptedRng {
    /// Nothing optional ever spawns
    pub fn calm() -> Self {
        Self { bias: 1.0 }
    }

    /// Everything optional spawns
    pub fn wild() -> Self {
        Self { bias: 0.0 }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRng {
    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.bias
    }

    fn between(&mut self, min: i32, max: i32) -> i32 {
        min + ((max - min) as f32 * self.bias).round() as i32
    }
}

use rand::prelude::*;
use rand::rngs::SmallRng;

use crate::*;

/// Session random source for colors and 1-based indices.
#[derive(Clone, Debug)]
pub struct Randomizer {
    rng: SmallRng,
}

impl Randomizer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Uniform color, every channel drawn independently over its full range.
    pub fn random_color(&mut self) -> Color {
        Color::new(
            self.rng.random_range(0..=u8::MAX),
            self.rng.random_range(0..=u8::MAX),
            self.rng.random_range(0..=u8::MAX),
        )
    }

    /// Uniform integer in `1..=max_inclusive`. Zero is never returned, callers indexing with it must subtract one.
    pub fn random_int(&mut self, max_inclusive: u32) -> Result<u32> {
        if max_inclusive == 0 {
            return Err(GameError::EmptyRange);
        }
        Ok(self.rng.random_range(1..=max_inclusive))
    }
}

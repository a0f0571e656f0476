use alloc::vec::Vec;

use super::*;

/// Fills every cell with an independent random color, so duplicates can happen, then picks one cell as the target.
#[derive(Clone, Debug)]
pub struct RandomRoundGenerator {
    randomizer: Randomizer,
}

impl RandomRoundGenerator {
    pub fn new(seed: u64) -> Self {
        Self::from_randomizer(Randomizer::new(seed))
    }

    pub fn from_randomizer(randomizer: Randomizer) -> Self {
        Self { randomizer }
    }
}

impl RoundGenerator for RandomRoundGenerator {
    fn generate(&mut self, tier: DifficultyTier) -> Result<Round> {
        let cell_count = tier.params().cell_count;
        let cells: Vec<Color> = (0..cell_count)
            .map(|_| self.randomizer.random_color())
            .collect();

        let pick = self.randomizer.random_int(cells.len() as u32)?;
        let target = cells[(pick - 1) as usize];
        log::trace!("generated {} round, target {} at #{}", tier, target, pick);

        Round::new(tier, cells, target)
    }
}

use crate::*;
pub use random::*;

mod random;

pub trait RoundGenerator {
    fn generate(&mut self, tier: DifficultyTier) -> Result<Round>;
}

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// One "find this color" challenge. Replaced wholesale by the next round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Round {
    tier: DifficultyTier,
    cells: Vec<Color>,
    target: Color,
}

impl Round {
    pub fn new(tier: DifficultyTier, cells: Vec<Color>, target: Color) -> Result<Self> {
        if cells.is_empty() {
            return Err(GameError::EmptyRound);
        }
        if !cells.contains(&target) {
            return Err(GameError::TargetNotInRound);
        }
        Ok(Self {
            tier,
            cells,
            target,
        })
    }

    pub fn tier(&self) -> DifficultyTier {
        self.tier
    }

    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

    pub fn target(&self) -> Color {
        self.target
    }

    pub fn time_limit(&self) -> Seconds {
        self.tier.params().time_limit
    }

    pub fn is_match(&self, color: Color) -> bool {
        self.target == color
    }

    /// Lays the round out on the fixed grid, leading slots first, the rest left empty.
    pub fn grid(&self) -> [Cell; GRID_CELLS] {
        let mut grid = [Cell::Empty; GRID_CELLS];
        for (slot, &color) in grid.iter_mut().zip(&self.cells) {
            *slot = Cell::Colored(color);
        }
        grid
    }
}

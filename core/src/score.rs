use core::num::Saturating;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreKeeper {
    current: Saturating<Score>,
}

impl ScoreKeeper {
    pub fn add(&mut self, points: Score) {
        self.current += points;
    }

    pub fn reset(&mut self) {
        self.current = Saturating(0);
    }

    pub fn current(&self) -> Score {
        self.current.0
    }
}

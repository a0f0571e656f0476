use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Fixed per-tier round parameters.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierParams {
    pub cell_count: usize,
    pub time_limit: Seconds,
    pub score_increment: Score,
    /// Wins at the highest unlocked tier needed before promotion.
    pub rounds_to_promote: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DifficultyTier {
    Easy,
    Normal,
    Hard,
}

impl DifficultyTier {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Normal, Self::Hard];

    pub const fn params(self) -> TierParams {
        use DifficultyTier::*;
        match self {
            Easy => TierParams {
                cell_count: 3,
                time_limit: 40,
                score_increment: 10,
                rounds_to_promote: 2,
            },
            Normal => TierParams {
                cell_count: 6,
                time_limit: 30,
                score_increment: 20,
                rounds_to_promote: 2,
            },
            Hard => TierParams {
                cell_count: 9,
                time_limit: 20,
                score_increment: 30,
                rounds_to_promote: 2,
            },
        }
    }

    pub const fn next(self) -> Option<Self> {
        use DifficultyTier::*;
        match self {
            Easy => Some(Normal),
            Normal => Some(Hard),
            Hard => None,
        }
    }

    pub const fn previous(self) -> Option<Self> {
        use DifficultyTier::*;
        match self {
            Easy => None,
            Normal => Some(Easy),
            Hard => Some(Normal),
        }
    }

    /// Lower-case identifier, as carried by difficulty buttons.
    pub const fn key(self) -> &'static str {
        use DifficultyTier::*;
        match self {
            Easy => "easy",
            Normal => "normal",
            Hard => "hard",
        }
    }

    /// Upper-case name used in player-facing messages.
    pub const fn label(self) -> &'static str {
        use DifficultyTier::*;
        match self {
            Easy => "EASY",
            Normal => "NORMAL",
            Hard => "HARD",
        }
    }
}

impl Default for DifficultyTier {
    fn default() -> Self {
        Self::Easy
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DifficultyTier {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.key().eq_ignore_ascii_case(s.trim()))
            .ok_or(GameError::UnknownTier)
    }
}

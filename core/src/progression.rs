use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// What the player still has to do before a tier opens up.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockRequirement {
    pub target: DifficultyTier,
    pub rounds: u32,
    pub prerequisite: DifficultyTier,
}

impl UnlockRequirement {
    pub const fn is_satisfied(&self) -> bool {
        self.rounds == 0
    }
}

impl fmt::Display for UnlockRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "You need to complete {} round{} of {} mode to unlock {} mode.",
            self.rounds,
            if self.rounds > 1 { "s" } else { "" },
            self.prerequisite,
            self.target,
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WinOutcome {
    /// The win was at a lower tier than the highest unlocked one.
    NotCounted,
    Counted { wins: u32 },
    Promoted { to: DifficultyTier },
    CampaignComplete,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    highest_unlocked: DifficultyTier,
    consecutive_wins: u32,
}

impl Progression {
    pub const fn new() -> Self {
        Self {
            highest_unlocked: DifficultyTier::Easy,
            consecutive_wins: 0,
        }
    }

    pub fn highest_unlocked(&self) -> DifficultyTier {
        self.highest_unlocked
    }

    pub fn consecutive_wins(&self) -> u32 {
        self.consecutive_wins
    }

    pub fn is_unlocked(&self, tier: DifficultyTier) -> bool {
        tier <= self.highest_unlocked
    }

    /// Only single-step unlocks exist, so a locked tier always names the tier right below it.
    pub fn required_rounds_to_unlock(&self, target: DifficultyTier) -> UnlockRequirement {
        match target.previous() {
            Some(prerequisite) if !self.is_unlocked(target) => UnlockRequirement {
                target,
                rounds: 1,
                prerequisite,
            },
            _ => UnlockRequirement {
                target,
                rounds: 0,
                prerequisite: self.highest_unlocked,
            },
        }
    }

    pub fn record_win(&mut self, played: DifficultyTier) -> WinOutcome {
        if played != self.highest_unlocked {
            log::debug!(
                "win at {} does not count towards {}",
                played,
                self.highest_unlocked
            );
            return WinOutcome::NotCounted;
        }

        self.consecutive_wins += 1;
        if self.consecutive_wins < played.params().rounds_to_promote {
            return WinOutcome::Counted {
                wins: self.consecutive_wins,
            };
        }

        match played.next() {
            Some(next) => {
                log::debug!("promoted from {} to {}", played, next);
                self.highest_unlocked = next;
                self.consecutive_wins = 0;
                WinOutcome::Promoted { to: next }
            }
            None => WinOutcome::CampaignComplete,
        }
    }

    pub fn record_loss(&mut self) {
        log::trace!(
            "loss recorded, still at {} with {} wins",
            self.highest_unlocked,
            self.consecutive_wins
        );
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

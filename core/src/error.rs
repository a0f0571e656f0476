use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Random range must contain at least one value")]
    EmptyRange,
    #[error("Round has no cells")]
    EmptyRound,
    #[error("Target color is not among the round cells")]
    TargetNotInRound,
    #[error("Unknown difficulty tier")]
    UnknownTier,
}

pub type Result<T> = core::result::Result<T, GameError>;

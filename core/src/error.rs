use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Seed must not be empty")]
    EmptySeed,
    #[error("Mine density must be a finite value in [0, 1)")]
    InvalidDensity,
    #[error("Session mine density must be between 0.01 and 0.5")]
    DensityOutOfRange,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Rules need a non-zero reveal budget and retry limit")]
    InvalidRules,
    #[error("Not enough coins for this upgrade")]
    InsufficientCoins,
    #[error("Upgrade is already at its maximum level")]
    MaxLevelReached,
    #[error("Replay position is past the last recorded move")]
    ReplayOutOfRange,
}

pub type Result<T> = core::result::Result<T, GameError>;

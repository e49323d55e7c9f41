//! Errors raised by the game core

use thiserror::Error;

/// Errors raised by the game core
///
/// None of these happen during normal play. Death is a modeled outcome
/// ([`StepOutcome::Died`](super::StepOutcome::Died)), not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Configuration rejected at construction
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Empty half-open range passed to a random source
    #[error("Invalid range: [{min}, {max}) is empty")]
    InvalidRange { min: i32, max: i32 },

    /// Uniform choice requested from an empty option set
    #[error("Cannot choose from an empty set of options")]
    EmptyOptions,

    /// The clock was started twice
    #[error("Clock is already running")]
    AlreadyRunning,

    /// No free cell left for a new target
    #[error("Board is full, no free cell for a target")]
    BoardFull,
}

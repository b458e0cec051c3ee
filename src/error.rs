//! Error types

use thiserror::Error;

use crate::sim::GamePhase;

/// Rejected input to the score formula
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ScoreError {
    #[error("{arg} is not a number")]
    NotANumber { arg: &'static str },
    #[error("{arg} must not be negative (got {value})")]
    Negative { arg: &'static str, value: f64 },
    #[error("{arg} must be a whole number (got {value})")]
    Fractional { arg: &'static str, value: f64 },
    #[error("{arg} exceeds the largest exactly representable count (got {value})")]
    TooLarge { arg: &'static str, value: f64 },
}

/// Session control trigger fired from a phase that does not accept it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("cannot start a session while {0:?}")]
    CannotStart(GamePhase),
    #[error("cannot restart a session while {0:?}; restart is only valid after game over")]
    CannotRestart(GamePhase),
    #[error("cannot pause or resume while {0:?}")]
    CannotPause(GamePhase),
}

/// Invalid balance configuration
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{name} range is invalid: min {min} > max {max}")]
    InvalidRange { name: &'static str, min: f32, max: f32 },
    #[error("{name} must be positive (got {value})")]
    NotPositive { name: &'static str, value: f32 },
    #[error("supply probability must be within [0, 1] (got {0})")]
    Probability(f32),
}

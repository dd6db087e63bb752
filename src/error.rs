//! Error types for the game
//!
//! Only configuration and task wiring can fail; the round loop itself
//! has no recoverable errors. Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Game-level errors
#[derive(Debug, Error)]
pub enum GameError {
    /// Fewer than two players were configured
    #[error("at least 2 players are required, got {0}")]
    NotEnoughPlayers(usize),

    /// More players than the game supports
    #[error("at most {max} players are supported, got {got}")]
    TooManyPlayers { got: usize, max: usize },

    /// Music duration range is inverted
    #[error("invalid music range: min {min}ms is greater than max {max}ms")]
    InvalidMusicRange { min: u64, max: u64 },

    /// Config file could not be parsed
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    /// Config file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A player or coordinator task panicked or was cancelled
    #[error("task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Reasons the coordinator ignores an attempt report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReportRejected {
    /// Report belongs to a round other than the current one
    #[error("report for round {got} during round {current}")]
    StaleRound { got: u32, current: u32 },

    /// Player is not on the roster
    #[error("unknown player")]
    UnknownPlayer,

    /// Player was already eliminated
    #[error("player already eliminated")]
    NotActive,

    /// Player already reported this round
    #[error("player already attempted this round")]
    Duplicate,
}

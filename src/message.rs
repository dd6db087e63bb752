//! Message definitions
//!
//! `AttemptReport` flows from players to the coordinator. `GameEvent` flows
//! from the coordinator to whoever narrates the game; it renders as
//! human-readable text through `Display` and as JSON through Serde's
//! tagged enum.

use serde::Serialize;

use crate::types::{ChairNumber, PlayerId, Round};

/// Result of one player's race for a chair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Claimed the given chair
    Seated(ChairNumber),
    /// No chair left
    Eliminated,
}

/// Player → Coordinator report, sent once per round per active player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptReport {
    pub player: PlayerId,
    pub round: Round,
    pub outcome: AttemptOutcome,
}

/// Coordinator → narrator event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// Music started for a round
    RoundStarted {
        round: Round,
        players: usize,
        chairs: usize,
    },
    /// Music stopped, the race is on
    MusicStopped { round: Round },
    /// A player sat down
    ChairClaimed {
        round: Round,
        chair: ChairNumber,
        player: PlayerId,
    },
    /// A player found no chair
    Eliminated { round: Round, player: PlayerId },
    /// Game over with a single survivor
    Winner { player: PlayerId },
    /// Game over with nobody left
    NoWinner,
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::RoundStarted {
                round,
                players,
                chairs,
            } => write!(
                f,
                "Round {}: {} players, {} chairs. The music is playing...",
                round, players, chairs
            ),
            GameEvent::MusicStopped { .. } => {
                write!(f, "> The music stopped! Players are racing for a chair...")
            }
            GameEvent::ChairClaimed { chair, player, .. } => {
                write!(f, "[Chair {}]: taken by {}", chair, player)
            }
            GameEvent::Eliminated { player, .. } => {
                write!(f, "Player {} found no chair and is eliminated!", player)
            }
            GameEvent::Winner { player } => write!(f, "Winner: player {}! Congratulations!", player),
            GameEvent::NoWinner => write!(f, "Nobody is left standing. No winner."),
        }
    }
}

//! Game configuration
//!
//! Player count and round timing. Loaded from a JSON file with camelCase
//! keys (`players`, `musicMin`, `musicMax`, `settleMs`, `seed`); any
//! missing key falls back to its default.

use std::path::Path;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use crate::error::GameError;

/// Default number of players
pub const DEFAULT_PLAYERS: usize = 4;

/// Largest supported player count. Each player gets its own task.
pub const MAX_PLAYERS: usize = 1024;

/// Configuration for one game.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct GameConfig {
    /// Total players at game start. Must be in `2..=MAX_PLAYERS`.
    pub players: usize,

    /// Shortest time the music plays before stopping, in milliseconds.
    pub music_min: u64,

    /// Longest time the music plays before stopping, in milliseconds.
    pub music_max: u64,

    /// Minimum time players get to race for chairs, in milliseconds.
    pub settle_ms: u64,

    /// Seed for music durations. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: DEFAULT_PLAYERS,
            music_min: 1000,
            music_max: 3000,
            settle_ms: 1000,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a config for a specific player count with default timing.
    pub fn with_players(players: usize) -> Self {
        Self {
            players,
            ..Default::default()
        }
    }

    /// Parse a config from JSON text and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, GameError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()
    }

    /// Read a JSON config file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject configurations that cannot produce a meaningful game.
    pub fn validate(self) -> Result<Self, GameError> {
        if self.players < 2 {
            return Err(GameError::NotEnoughPlayers(self.players));
        }
        if self.players > MAX_PLAYERS {
            return Err(GameError::TooManyPlayers {
                got: self.players,
                max: MAX_PLAYERS,
            });
        }
        if self.music_min > self.music_max {
            return Err(GameError::InvalidMusicRange {
                min: self.music_min,
                max: self.music_max,
            });
        }
        Ok(self)
    }

    /// Chairs available in round 1.
    pub fn initial_chairs(&self) -> usize {
        self.players.saturating_sub(1)
    }

    pub fn settle_duration(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// Random source for music durations.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Draw one music duration uniformly from `[music_min, music_max]`.
    pub fn music_duration(&self, rng: &mut impl Rng) -> Duration {
        Duration::from_millis(rng.gen_range(self.music_min..=self.music_max))
    }
}

//! Basic type definitions for the game
//!
//! Provides newtype wrappers for type safety:
//! - `PlayerId`: stable 1-based player identity, displayed as `P<n>`
//! - `ChairNumber`: 1-based chair number assigned when a chair is claimed

use serde::Serialize;

/// Round number (rounds are numbered from 1)
pub type Round = u32;

/// Unique player identifier (newtype pattern)
///
/// Players are numbered 1..=N at game start and keep their id for the
/// whole game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Chair number within a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ChairNumber(pub usize);

impl std::fmt::Display for ChairNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_display() {
        assert_eq!(PlayerId(3).to_string(), "P3");
    }

    #[test]
    fn test_player_id_ordering() {
        let mut ids = vec![PlayerId(4), PlayerId(1), PlayerId(2)];
        ids.sort();
        assert_eq!(ids, vec![PlayerId(1), PlayerId(2), PlayerId(4)]);
    }

    #[test]
    fn test_ids_serialize_transparent() {
        assert_eq!(serde_json::to_string(&PlayerId(2)).unwrap(), "2");
        assert_eq!(serde_json::to_string(&ChairNumber(1)).unwrap(), "1");
    }
}

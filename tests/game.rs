//! Integration tests for full games.
//!
//! Most tests use `start_paused = true` so music and settle sleeps
//! auto-advance the clock and a whole game resolves instantly. The
//! parallel test runs real games on a multi-thread runtime so players
//! race on separate workers.

use std::collections::HashSet;
use std::time::Duration;

use musical_chairs::{Game, GameConfig, GameError, GameEvent, GameOutcome, PlayerId};
use tokio::sync::mpsc;

// =========================================================================
// Helpers
// =========================================================================

async fn play(config: GameConfig) -> (GameOutcome, Vec<GameEvent>) {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let outcome = Game::new(config).unwrap().play(tx).await.unwrap();

    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    (outcome, events)
}

fn seeded(players: usize, seed: u64) -> GameConfig {
    GameConfig {
        players,
        seed: Some(seed),
        ..Default::default()
    }
}

fn assert_consistent(outcome: &GameOutcome, players: usize) {
    assert_eq!(outcome.rounds.len(), players - 1);
    assert_eq!(outcome.eliminations(), players - 1);

    let winner = outcome.winner.expect("a winner");
    assert!((1..=players as u32).contains(&winner.0));

    let active: Vec<_> = outcome.players.iter().filter(|p| p.active).collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, winner);
}

// =========================================================================
// Scenarios
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_four_player_game() {
    let (outcome, _) = play(seeded(4, 1)).await;
    assert_consistent(&outcome, 4);

    let shape: Vec<_> = outcome
        .rounds
        .iter()
        .map(|r| (r.round, r.contenders, r.chairs, r.seated.len(), r.eliminated.len()))
        .collect();
    assert_eq!(shape, vec![(1, 4, 3, 3, 1), (2, 3, 2, 2, 1), (3, 2, 1, 1, 1)]);
}

#[tokio::test(start_paused = true)]
async fn test_two_player_game() {
    let (outcome, events) = play(seeded(2, 2)).await;
    assert_consistent(&outcome, 2);
    assert_eq!(outcome.rounds[0].chairs, 1);

    let rounds_started = events
        .iter()
        .filter(|e| matches!(e, GameEvent::RoundStarted { .. }))
        .count();
    assert_eq!(rounds_started, 1);
}

#[tokio::test(start_paused = true)]
async fn test_many_seeds_converge_to_one_winner() {
    for seed in 0..10 {
        let players = 2 + (seed as usize % 6);
        let (outcome, _) = play(seeded(players, seed)).await;
        assert_consistent(&outcome, players);
    }
}

#[tokio::test(start_paused = true)]
async fn test_unseeded_game() {
    let (outcome, _) = play(GameConfig::with_players(5)).await;
    assert_consistent(&outcome, 5);
}

#[tokio::test(start_paused = true)]
async fn test_zero_length_timing() {
    let config = GameConfig {
        players: 6,
        music_min: 0,
        music_max: 0,
        settle_ms: 0,
        seed: Some(3),
    };
    let (outcome, _) = play(config).await;
    assert_consistent(&outcome, 6);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_games_converge() {
    for seed in 0..60 {
        let players = 2 + (seed as usize % 12);
        let config = GameConfig {
            players,
            music_min: 0,
            music_max: 1,
            settle_ms: 0,
            seed: Some(seed),
        };
        let (outcome, _) = tokio::time::timeout(Duration::from_secs(10), play(config))
            .await
            .unwrap_or_else(|_| panic!("game with {} players (seed {}) hung", players, seed));
        assert_consistent(&outcome, players);
    }
}

// =========================================================================
// Per-round invariants
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_each_player_eliminated_at_most_once() {
    let (outcome, _) = play(seeded(6, 11)).await;

    let mut out = HashSet::new();
    for round in &outcome.rounds {
        for player in &round.eliminated {
            assert!(out.insert(*player), "{} eliminated twice", player);
        }
        for (_, player) in &round.seated {
            assert!(!out.contains(player), "{} seated after elimination", player);
        }
    }
    assert_eq!(out.len(), 5);
    assert!(!out.contains(&outcome.winner.unwrap()));
}

#[tokio::test(start_paused = true)]
async fn test_chairs_are_unique_and_contiguous() {
    let (outcome, _) = play(seeded(5, 4)).await;

    for round in &outcome.rounds {
        let mut chairs: Vec<_> = round.seated.iter().map(|(c, _)| c.0).collect();
        chairs.sort_unstable();
        let expected: Vec<_> = (1..=round.chairs).collect();
        assert_eq!(chairs, expected, "round {}", round.round);

        let players: HashSet<_> = round.seated.iter().map(|(_, p)| *p).collect();
        assert_eq!(players.len(), round.seated.len());
    }
}

#[tokio::test(start_paused = true)]
async fn test_chairs_shrink_by_one_each_round() {
    let (outcome, _) = play(seeded(7, 5)).await;
    for round in &outcome.rounds {
        assert_eq!(round.chairs, round.contenders - 1);
    }
    for pair in outcome.rounds.windows(2) {
        assert_eq!(pair[1].contenders, pair[0].contenders - 1);
    }
}

#[tokio::test(start_paused = true)]
async fn test_every_player_attempts_once_per_round() {
    let (outcome, _) = play(seeded(4, 6)).await;
    for round in &outcome.rounds {
        let mut seen: HashSet<PlayerId> = HashSet::new();
        let attempts = round
            .seated
            .iter()
            .map(|(_, p)| *p)
            .chain(round.eliminated.iter().copied());
        for player in attempts {
            assert!(seen.insert(player), "{} attempted twice", player);
        }
        assert_eq!(seen.len(), round.contenders);
    }
}

// =========================================================================
// Narration
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_event_order_per_round() {
    let (outcome, events) = play(seeded(3, 8)).await;

    let mut expected_round = 1;
    let mut iter = events.iter().peekable();
    while let Some(GameEvent::RoundStarted { round, players, chairs }) = iter.next() {
        assert_eq!(*round, expected_round);
        assert_eq!(*chairs, players - 1);
        assert_eq!(iter.next(), Some(&GameEvent::MusicStopped { round: *round }));

        let mut claims = 0;
        let mut eliminations = 0;
        while let Some(event) = iter.peek() {
            match event {
                GameEvent::ChairClaimed { round: r, .. } if r == round => claims += 1,
                GameEvent::Eliminated { round: r, .. } if r == round => eliminations += 1,
                _ => break,
            }
            iter.next();
        }
        assert_eq!(claims, *chairs);
        assert_eq!(eliminations, 1);
        expected_round += 1;

        if let Some(GameEvent::Winner { player }) = iter.peek() {
            assert_eq!(Some(*player), outcome.winner);
            iter.next();
            break;
        }
    }

    assert_eq!(expected_round, 3);
    assert!(iter.next().is_none());
    assert_eq!(
        events.last(),
        Some(&GameEvent::Winner {
            player: outcome.winner.unwrap()
        })
    );
}

// =========================================================================
// Configuration
// =========================================================================

#[test]
fn test_rejects_degenerate_configs() {
    assert!(matches!(
        Game::new(GameConfig::with_players(0)),
        Err(GameError::NotEnoughPlayers(0))
    ));
    assert!(matches!(
        Game::new(GameConfig::with_players(1)),
        Err(GameError::NotEnoughPlayers(1))
    ));
    assert!(matches!(
        Game::new(GameConfig {
            music_min: 10,
            music_max: 1,
            ..Default::default()
        }),
        Err(GameError::InvalidMusicRange { .. })
    ));
}

#[test]
fn test_rejects_oversized_player_count() {
    assert!(matches!(
        Game::new(GameConfig::with_players(usize::MAX)),
        Err(GameError::TooManyPlayers { .. })
    ));
    assert!(matches!(
        GameConfig::from_json_str(r#"{"players": 4294967297}"#),
        Err(GameError::TooManyPlayers { .. })
    ));
}

#[test]
fn test_load_missing_file() {
    let err = GameConfig::load("/nonexistent/musical_chairs.json").unwrap_err();
    assert!(matches!(err, GameError::Io(_)));
}

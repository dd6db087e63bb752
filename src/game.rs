//! Game wiring
//!
//! Creates the shared pool and round signal, spawns one task per player
//! plus the coordinator, and collects everything once the game is over.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, info, warn};

use crate::config::{GameConfig, MAX_PLAYERS};
use crate::coordinator::{CoordinatorResult, RoundCoordinator, RoundSummary};
use crate::error::GameError;
use crate::message::GameEvent;
use crate::player::Player;
use crate::pool::ResourcePool;
use crate::signal::RoundSignal;
use crate::types::PlayerId;

/// Everything known once the game ended
#[derive(Debug, Clone)]
pub struct GameOutcome {
    pub winner: Option<PlayerId>,
    pub rounds: Vec<RoundSummary>,
    /// Final player records, ordered by id
    pub players: Vec<Player>,
}

impl GameOutcome {
    /// Total eliminations across all rounds
    pub fn eliminations(&self) -> usize {
        self.rounds.iter().map(|r| r.eliminated.len()).sum()
    }
}

/// A configured, not yet started game
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
}

impl Game {
    /// Validate the config and prepare a game.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Ok(Self {
            config: config.validate()?,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Play the game to the end, narrating through `events`.
    pub async fn play(
        self,
        events: mpsc::UnboundedSender<GameEvent>,
    ) -> Result<GameOutcome, GameError> {
        let players = self.config.players;
        let pool = Arc::new(ResourcePool::new(self.config.initial_chairs()));
        let signal = RoundSignal::new();
        let (report_tx, report_rx) = mpsc::channel(players);

        let last_id = u32::try_from(players).map_err(|_| GameError::TooManyPlayers {
            got: players,
            max: MAX_PLAYERS,
        })?;
        let ids: Vec<PlayerId> = (1..=last_id).map(PlayerId).collect();

        // Players subscribe before the coordinator can raise the signal.
        let mut tasks = JoinSet::new();
        for &id in &ids {
            tasks.spawn(Player::new(id).run(
                Arc::clone(&pool),
                signal.subscribe(),
                report_tx.clone(),
            ));
        }
        drop(report_tx);
        debug!("Spawned {} player tasks", tasks.len());

        let coordinator =
            RoundCoordinator::new(self.config, ids, pool, signal, report_rx, events);
        let (result, finished) = supervise(tokio::spawn(coordinator.run()), tasks).await?;
        info!("All {} player tasks finished", finished.len());

        Ok(GameOutcome {
            winner: result.winner,
            rounds: result.rounds,
            players: finished,
        })
    }
}

/// Wait for the coordinator and every player task.
///
/// A player task that fails ends the game at once: the coordinator would
/// otherwise wait forever for that player's report.
async fn supervise(
    mut coordinator: JoinHandle<CoordinatorResult>,
    mut players: JoinSet<Player>,
) -> Result<(CoordinatorResult, Vec<Player>), GameError> {
    let mut finished = Vec::with_capacity(players.len());

    let result = loop {
        tokio::select! {
            result = &mut coordinator => break result?,
            Some(joined) = players.join_next() => match joined {
                Ok(player) => finished.push(player),
                Err(e) => {
                    warn!("Player task failed, stopping the game: {}", e);
                    coordinator.abort();
                    players.abort_all();
                    return Err(e.into());
                }
            },
        }
    };

    while let Some(joined) = players.join_next().await {
        finished.push(joined?);
    }
    finished.sort_by_key(|p| p.id);

    Ok((result, finished))
}

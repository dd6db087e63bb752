//! Player actor
//!
//! One task per player. A player waits for the music to stop, makes a
//! single non-blocking grab for a chair, reports the result to the
//! coordinator, and either waits for the next round or leaves the game.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::message::{AttemptOutcome, AttemptReport};
use crate::pool::ResourcePool;
use crate::signal::RoundListener;
use crate::types::{PlayerId, Round};

/// Player record
///
/// Owned by the player's own task and handed back when the task ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Stable identity
    pub id: PlayerId,
    /// `true` until eliminated, then permanently `false`
    pub active: bool,
    /// Last round this player raced in
    pub last_attempt: Option<Round>,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            active: true,
            last_attempt: None,
        }
    }

    /// Whether this player already raced in `round`
    pub fn has_attempted(&self, round: Round) -> bool {
        self.last_attempt == Some(round)
    }

    /// Race for one chair in `round`.
    ///
    /// Returns `None` without touching the pool if the player is out or
    /// already raced this round.
    pub fn attempt(&mut self, round: Round, pool: &ResourcePool) -> Option<AttemptOutcome> {
        if !self.active || self.has_attempted(round) {
            return None;
        }
        self.last_attempt = Some(round);

        match pool.try_acquire() {
            Some(chair) => {
                debug!("{} claimed chair {} in round {}", self.id, chair, round);
                Some(AttemptOutcome::Seated(chair))
            }
            None => {
                self.active = false;
                info!("{} eliminated in round {}", self.id, round);
                Some(AttemptOutcome::Eliminated)
            }
        }
    }

    /// Run the player loop until eliminated or the game ends.
    pub async fn run(
        mut self,
        pool: Arc<ResourcePool>,
        mut signal: RoundListener,
        reports: mpsc::Sender<AttemptReport>,
    ) -> Self {
        debug!("{} joined the game", self.id);

        while self.active {
            let last_round = self.last_attempt.unwrap_or(0);
            let Some(round) = signal.wait_for_stop(last_round).await else {
                debug!("{} saw the game end", self.id);
                break;
            };

            let Some(outcome) = self.attempt(round, &pool) else {
                continue;
            };

            let report = AttemptReport {
                player: self.id,
                round,
                outcome,
            };
            if reports.send(report).await.is_err() {
                debug!("Coordinator closed, {} leaving", self.id);
                break;
            }

            if !self.active {
                tokio::task::yield_now().await;
            }
        }

        self
    }
}

//! RoundCoordinator actor implementation
//!
//! Drives the game round by round: lets the music play for a random
//! time, stops it, waits until every active player has reported its
//! attempt, then shrinks the pool by one chair and starts the next round.
//! The roster of who is still in lives here and is only changed through
//! reports received over the mpsc channel.

use std::collections::HashMap;
use std::sync::Arc;

use rand::rngs::StdRng;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::error::ReportRejected;
use crate::message::{AttemptOutcome, AttemptReport, GameEvent};
use crate::pool::ResourcePool;
use crate::signal::RoundSignal;
use crate::types::{ChairNumber, PlayerId, Round};

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Coordinator lifecycle
///
/// ```text
/// WaitingToStop → MusicStopped → Settling → Reconfiguring ─┬→ WaitingToStop
///                                                           └→ GameOver
/// ```
///
/// A roster that starts with fewer than two players goes straight from
/// `WaitingToStop` to `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Music playing for a random duration
    WaitingToStop,
    /// Signal raised, players woken
    MusicStopped,
    /// Collecting attempt reports
    Settling,
    /// Shrinking the pool and resetting per-round state
    Reconfiguring,
    /// Terminal
    GameOver,
}

impl Phase {
    /// Returns `true` if moving to `target` is a legal transition.
    pub fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::WaitingToStop, Self::MusicStopped)
                | (Self::MusicStopped, Self::Settling)
                | (Self::Settling, Self::Reconfiguring)
                | (Self::Reconfiguring, Self::WaitingToStop)
                | (Self::Reconfiguring, Self::GameOver)
                | (Self::WaitingToStop, Self::GameOver)
        )
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WaitingToStop => write!(f, "WaitingToStop"),
            Self::MusicStopped => write!(f, "MusicStopped"),
            Self::Settling => write!(f, "Settling"),
            Self::Reconfiguring => write!(f, "Reconfiguring"),
            Self::GameOver => write!(f, "GameOver"),
        }
    }
}

// ---------------------------------------------------------------------------
// RoundState
// ---------------------------------------------------------------------------

/// Coordinator's view of one player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterEntry {
    pub active: bool,
    pub attempted: bool,
}

/// Round number plus the roster, owned by the coordinator
#[derive(Debug, Clone)]
pub struct RoundState {
    round: Round,
    roster: HashMap<PlayerId, RosterEntry>,
}

impl RoundState {
    /// Start at round 1 with every player active.
    pub fn new(players: impl IntoIterator<Item = PlayerId>) -> Self {
        let roster = players
            .into_iter()
            .map(|id| {
                (
                    id,
                    RosterEntry {
                        active: true,
                        attempted: false,
                    },
                )
            })
            .collect();
        Self { round: 1, roster }
    }

    pub fn round(&self) -> Round {
        self.round
    }

    pub fn active_count(&self) -> usize {
        self.roster.values().filter(|e| e.active).count()
    }

    /// Active players that have not reported this round
    pub fn pending(&self) -> usize {
        self.roster
            .values()
            .filter(|e| e.active && !e.attempted)
            .count()
    }

    pub fn entry(&self, id: PlayerId) -> Option<RosterEntry> {
        self.roster.get(&id).copied()
    }

    /// The sole active player, if exactly one remains
    pub fn winner(&self) -> Option<PlayerId> {
        let mut active = self.roster.iter().filter(|(_, e)| e.active);
        match (active.next(), active.next()) {
            (Some((id, _)), None) => Some(*id),
            _ => None,
        }
    }

    /// Apply one attempt report.
    pub fn record(&mut self, report: AttemptReport) -> Result<(), ReportRejected> {
        if report.round != self.round {
            return Err(ReportRejected::StaleRound {
                got: report.round,
                current: self.round,
            });
        }
        let entry = self
            .roster
            .get_mut(&report.player)
            .ok_or(ReportRejected::UnknownPlayer)?;
        if !entry.active {
            return Err(ReportRejected::NotActive);
        }
        if entry.attempted {
            return Err(ReportRejected::Duplicate);
        }

        entry.attempted = true;
        if report.outcome == AttemptOutcome::Eliminated {
            entry.active = false;
        }
        Ok(())
    }

    /// Clear every attempt flag and advance the round number.
    pub fn next_round(&mut self) {
        for entry in self.roster.values_mut() {
            entry.attempted = false;
        }
        self.round += 1;
    }
}

// ---------------------------------------------------------------------------
// Round results
// ---------------------------------------------------------------------------

/// What happened in one round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    pub round: Round,
    /// Active players when the music stopped
    pub contenders: usize,
    /// Chairs in the pool when the music stopped
    pub chairs: usize,
    /// Claims in the order the coordinator received them
    pub seated: Vec<(ChairNumber, PlayerId)>,
    pub eliminated: Vec<PlayerId>,
}

/// Final result of the round loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorResult {
    pub winner: Option<PlayerId>,
    pub rounds: Vec<RoundSummary>,
}

// ---------------------------------------------------------------------------
// Coordinator
// ---------------------------------------------------------------------------

/// The round-driving actor
pub struct RoundCoordinator {
    config: GameConfig,
    state: RoundState,
    phase: Phase,
    pool: Arc<ResourcePool>,
    signal: RoundSignal,
    /// Attempt reports from player tasks
    reports: mpsc::Receiver<AttemptReport>,
    /// Narration sink
    events: mpsc::UnboundedSender<GameEvent>,
    rng: StdRng,
}

impl RoundCoordinator {
    pub fn new(
        config: GameConfig,
        players: impl IntoIterator<Item = PlayerId>,
        pool: Arc<ResourcePool>,
        signal: RoundSignal,
        reports: mpsc::Receiver<AttemptReport>,
        events: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        let rng = config.rng();
        Self {
            config,
            state: RoundState::new(players),
            phase: Phase::WaitingToStop,
            pool,
            signal,
            reports,
            events,
            rng,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Run rounds until at most one player is left.
    ///
    /// Dropping the coordinator at the end closes the round signal, which
    /// releases any player still waiting for music to stop.
    pub async fn run(mut self) -> CoordinatorResult {
        info!("Game started with {} players", self.state.active_count());
        let mut rounds = Vec::new();

        let winner = loop {
            if let Some(result) = self.final_result() {
                break result;
            }

            let round = self.state.round();
            let contenders = self.state.active_count();
            let chairs = self.pool.available();

            self.signal.start_music(round);
            self.emit(GameEvent::RoundStarted {
                round,
                players: contenders,
                chairs,
            });
            let music = self.config.music_duration(&mut self.rng);
            debug!("Round {}: music plays for {:?}", round, music);
            tokio::time::sleep(music).await;

            self.enter(Phase::MusicStopped);
            self.signal.stop_music(round);
            self.emit(GameEvent::MusicStopped { round });

            self.enter(Phase::Settling);
            let settle = tokio::time::sleep(self.config.settle_duration());
            let (_, summary) = tokio::join!(settle, self.collect_attempts(round, contenders, chairs));
            rounds.push(summary);

            self.enter(Phase::Reconfiguring);
            self.reconfigure();
        };

        self.enter(Phase::GameOver);
        match winner {
            Some(player) => {
                info!("Game over after {} rounds, winner {}", rounds.len(), player);
                self.emit(GameEvent::Winner { player });
            }
            None => {
                warn!("Game over after {} rounds with no winner", rounds.len());
                self.emit(GameEvent::NoWinner);
            }
        }

        CoordinatorResult { winner, rounds }
    }

    /// `Some` once the game is decided: the winner, or `None` if nobody is left.
    fn final_result(&self) -> Option<Option<PlayerId>> {
        match self.state.active_count() {
            0 => Some(None),
            1 => Some(self.state.winner()),
            _ => None,
        }
    }

    /// Wait for one report from every active player.
    async fn collect_attempts(
        &mut self,
        round: Round,
        contenders: usize,
        chairs: usize,
    ) -> RoundSummary {
        let mut summary = RoundSummary {
            round,
            contenders,
            chairs,
            seated: Vec::with_capacity(chairs),
            eliminated: Vec::new(),
        };

        while self.state.pending() > 0 {
            let Some(report) = self.reports.recv().await else {
                warn!(
                    "All players gone with {} reports outstanding in round {}",
                    self.state.pending(),
                    round
                );
                break;
            };

            if let Err(e) = self.state.record(report) {
                warn!("Ignoring report from {}: {}", report.player, e);
                continue;
            }

            match report.outcome {
                AttemptOutcome::Seated(chair) => {
                    summary.seated.push((chair, report.player));
                    self.emit(GameEvent::ChairClaimed {
                        round,
                        chair,
                        player: report.player,
                    });
                }
                AttemptOutcome::Eliminated => {
                    summary.eliminated.push(report.player);
                    self.emit(GameEvent::Eliminated {
                        round,
                        player: report.player,
                    });
                }
            }
        }

        summary
    }

    /// Reset the pool and per-round flags for the next round.
    fn reconfigure(&mut self) {
        // Unblock anything still holding out for a chair from the round just played.
        self.pool
            .release_extra(self.config.players.saturating_sub(1));

        let active = self.state.active_count();
        if active > 1 {
            self.pool.drain_and_set(active - 1);
            self.state.next_round();
            self.enter(Phase::WaitingToStop);
        }
    }

    fn enter(&mut self, phase: Phase) {
        debug_assert!(
            self.phase.can_transition_to(phase),
            "illegal transition {} -> {}",
            self.phase,
            phase
        );
        debug!("Coordinator {} -> {}", self.phase, phase);
        self.phase = phase;
    }

    fn emit(&self, event: GameEvent) {
        let _ = self.events.send(event);
    }
}

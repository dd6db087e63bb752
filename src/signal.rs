//! Round signal
//!
//! Broadcast "the music stopped" to every player at once. Built on a
//! `watch` channel: every send wakes all listeners, and each value
//! carries the round number so a listener can tell a fresh stop from one
//! it already handled.

use tokio::sync::watch;

use crate::types::Round;

/// Current value of the round signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalState {
    /// Round this value belongs to (0 before the first round)
    pub round: Round,
    /// `true` once the music stopped for `round`
    pub music_stopped: bool,
}

/// Coordinator side of the round signal
#[derive(Debug)]
pub struct RoundSignal {
    sender: watch::Sender<SignalState>,
}

/// Player side of the round signal
#[derive(Debug, Clone)]
pub struct RoundListener {
    receiver: watch::Receiver<SignalState>,
}

impl RoundSignal {
    /// Create the signal with the music playing and no round started.
    pub fn new() -> Self {
        let (sender, _) = watch::channel(SignalState {
            round: 0,
            music_stopped: false,
        });
        Self { sender }
    }

    /// Attach a new listener.
    pub fn subscribe(&self) -> RoundListener {
        RoundListener {
            receiver: self.sender.subscribe(),
        }
    }

    /// Clear the signal: music plays for `round`.
    pub fn start_music(&self, round: Round) {
        self.sender.send_replace(SignalState {
            round,
            music_stopped: false,
        });
    }

    /// Set the signal for `round` and wake every listener.
    pub fn stop_music(&self, round: Round) {
        self.sender.send_replace(SignalState {
            round,
            music_stopped: true,
        });
    }

    /// Snapshot of the current value.
    pub fn current(&self) -> SignalState {
        *self.sender.borrow()
    }
}

impl Default for RoundSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundListener {
    /// Wait until the music stops for a round later than `last_round`.
    ///
    /// Returns the round number, or `None` once the coordinator dropped
    /// the signal (game over).
    pub async fn wait_for_stop(&mut self, last_round: Round) -> Option<Round> {
        let state = self
            .receiver
            .wait_for(|s| s.music_stopped && s.round > last_round)
            .await
            .ok()?;
        Some(state.round)
    }
}

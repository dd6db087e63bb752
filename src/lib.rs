//! Musical Chairs Library
//!
//! A small coordination engine that plays musical chairs with tokio
//! tasks: every round the music stops, all players race for one fewer
//! chair than there are players, and whoever misses out is eliminated.
//!
//! # Features
//! - Counting chair pool with non-blocking claims
//! - Round signal broadcast to every player at once
//! - Explicit completion barrier before the pool shrinks
//! - Narration as a stream of `GameEvent`s
//!
//! # Architecture
//! Uses the Actor pattern:
//! - `RoundCoordinator` owns the roster and drives the rounds
//! - Each `Player` runs in its own task and reports attempts over `mpsc`
//! - The `ResourcePool` and `RoundSignal` are the only shared state
//!
//! # Example
//! ```ignore
//! use tokio::sync::mpsc;
//! use musical_chairs::{Game, GameConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (tx, mut rx) = mpsc::unbounded_channel();
//!     tokio::spawn(async move {
//!         while let Some(event) = rx.recv().await {
//!             println!("{}", event);
//!         }
//!     });
//!
//!     let outcome = Game::new(GameConfig::default()).unwrap().play(tx).await.unwrap();
//!     println!("{:?}", outcome.winner);
//! }
//! ```

pub mod config;
pub mod coordinator;
pub mod error;
pub mod game;
pub mod message;
pub mod player;
pub mod pool;
pub mod signal;
pub mod types;

// Re-export main types for convenience
pub use config::GameConfig;
pub use coordinator::{Phase, RoundCoordinator, RoundState, RoundSummary};
pub use error::{GameError, ReportRejected};
pub use game::{Game, GameOutcome};
pub use message::{AttemptOutcome, AttemptReport, GameEvent};
pub use player::Player;
pub use pool::ResourcePool;
pub use signal::{RoundListener, RoundSignal};
pub use types::{ChairNumber, PlayerId, Round};

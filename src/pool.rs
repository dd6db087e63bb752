//! Chair pool
//!
//! A counting semaphore holding the chairs that can still be claimed in
//! the current round. Claims never wait: a player either gets a chair
//! immediately or is out.

use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Semaphore;
use tracing::debug;

use crate::types::ChairNumber;

/// Shared pool of claimable chairs
#[derive(Debug)]
pub struct ResourcePool {
    chairs: Semaphore,
    /// Chairs claimed since the last `drain_and_set`
    claimed: AtomicUsize,
}

impl ResourcePool {
    /// Create a pool with `chairs` claimable units.
    pub fn new(chairs: usize) -> Self {
        Self {
            chairs: Semaphore::new(chairs),
            claimed: AtomicUsize::new(0),
        }
    }

    /// Claim one chair without waiting.
    ///
    /// Returns the chair number on success. Numbers are 1-based and
    /// contiguous within a round.
    pub fn try_acquire(&self) -> Option<ChairNumber> {
        let permit = self.chairs.try_acquire().ok()?;
        permit.forget();
        let chair = self.claimed.fetch_add(1, Ordering::AcqRel) + 1;
        Some(ChairNumber(chair))
    }

    /// Drop every remaining unit, then grant exactly `chairs` new ones.
    ///
    /// Only the coordinator calls this, between rounds, once every
    /// active player has reported its attempt.
    pub fn drain_and_set(&self, chairs: usize) {
        let mut drained = 0;
        loop {
            let available = self.chairs.available_permits();
            if available == 0 {
                break;
            }
            drained += self.chairs.forget_permits(available);
        }
        self.claimed.store(0, Ordering::Release);
        self.chairs.add_permits(chairs);
        debug!("Pool reset: drained {}, now {} chairs", drained, chairs);
    }

    /// Grant `count` extra units on top of the current ones.
    pub fn release_extra(&self, count: usize) {
        self.chairs.add_permits(count);
    }

    /// Units currently claimable.
    pub fn available(&self) -> usize {
        self.chairs.available_permits()
    }
}

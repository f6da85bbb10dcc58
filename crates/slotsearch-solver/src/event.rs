//! Round lifecycle listeners.
//!
//! Listeners are called synchronously by the engine, in registration order,
//! after the round's checkpoint has been written.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::scope::SearchState;
use crate::statistics::RoundStatistics;
use crate::termination::TerminationReason;

/// Receives notifications at round boundaries.
pub trait RoundListener: Send + Sync + Debug {
    /// Called after every completed round.
    fn on_round_end(&self, state: &SearchState, round: &RoundStatistics);

    /// Called once when the search stops.
    fn on_search_end(&self, _state: &SearchState, _reason: TerminationReason) {}
}

/// Shared listener list.
pub type Listeners = Vec<Arc<dyn RoundListener>>;

/// A listener that counts events (for testing).
#[derive(Debug, Default)]
pub struct CountingRoundListener {
    rounds: AtomicU32,
    ends: AtomicU32,
}

impl CountingRoundListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn round_count(&self) -> u32 {
        self.rounds.load(Ordering::SeqCst)
    }

    pub fn end_count(&self) -> u32 {
        self.ends.load(Ordering::SeqCst)
    }
}

impl RoundListener for CountingRoundListener {
    fn on_round_end(&self, _state: &SearchState, _round: &RoundStatistics) {
        self.rounds.fetch_add(1, Ordering::SeqCst);
    }

    fn on_search_end(&self, _state: &SearchState, _reason: TerminationReason) {
        self.ends.fetch_add(1, Ordering::SeqCst);
    }
}

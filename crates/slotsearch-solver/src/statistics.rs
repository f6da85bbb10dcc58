//! Search statistics collection.
//!
//! Tracks per-round counts and timings for a search run.

use std::time::Duration;

/// Statistics for a single round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundStatistics {
    /// Round number (1-based: the round producing paths of this length).
    pub round: u32,
    /// Frontier entries expanded.
    pub expanded: u64,
    /// Moves generated and applied.
    pub moves_generated: u64,
    /// Inventories discovered for the first time.
    pub new_states: u64,
    /// Shapes resolved in this round.
    pub resolved: u64,
    /// Shapes still feasible and unresolved after this round.
    pub remaining_feasible: u64,
    /// Whether the round stopped expanding because nothing was left to resolve.
    pub stopped_early: bool,
    /// Wall time spent in this round.
    pub duration: Duration,
}

impl RoundStatistics {
    /// Moves applied per second.
    pub fn moves_per_second(&self) -> u64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            (self.moves_generated as f64 / secs) as u64
        } else {
            0
        }
    }
}

/// Statistics for a complete search run.
#[derive(Debug, Clone, Default)]
pub struct SearchStatistics {
    /// Rounds run by this engine invocation, in order.
    pub rounds: Vec<RoundStatistics>,
}

impl SearchStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, round: RoundStatistics) {
        self.rounds.push(round);
    }

    /// Number of rounds run.
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    pub fn total_moves(&self) -> u64 {
        self.rounds.iter().map(|r| r.moves_generated).sum()
    }

    pub fn total_new_states(&self) -> u64 {
        self.rounds.iter().map(|r| r.new_states).sum()
    }

    pub fn total_resolved(&self) -> u64 {
        self.rounds.iter().map(|r| r.resolved).sum()
    }

    pub fn total_duration(&self) -> Duration {
        self.rounds.iter().map(|r| r.duration).sum()
    }
}

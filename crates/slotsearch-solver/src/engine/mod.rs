//! Round-by-round breadth-first search engine.

mod expansion;

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::checkpoint::CheckpointStore;
use crate::error::SearchResult;
use crate::event::{Listeners, RoundListener};
use crate::heuristic::MoveGenerator;
use crate::scope::{resolved_shapes, FrontierEntry, SearchState};
use crate::statistics::{RoundStatistics, SearchStatistics};
use crate::termination::{DefaultTermination, Termination, TerminationReason};

pub use expansion::Expansion;

/// Frontier entries expanded together before their successors are merged.
const BATCH_SIZE: usize = 1024;

/// Result of [`SearchEngine::run`].
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub reason: TerminationReason,
    pub statistics: SearchStatistics,
}

/// Advances a [`SearchState`] one round at a time until a termination fires.
///
/// Successors of each frontier batch may be computed in parallel, but they
/// are merged into the visited set and the tables serially in frontier order,
/// then move order. The first inventory to reach a shape therefore wins
/// regardless of thread count.
///
/// # Examples
///
/// ```
/// use slotsearch_core::{Inventory, OccupancyMode, Shape};
/// use slotsearch_solver::engine::SearchEngine;
/// use slotsearch_solver::scope::SearchState;
/// use slotsearch_solver::termination::{default_termination, TerminationReason};
///
/// let mut state = SearchState::fresh(Inventory::new(vec![2, 0], 0), 2, OccupancyMode::Exact).unwrap();
/// let mut engine = SearchEngine::new(default_termination(20));
/// let outcome = engine.run(&mut state).unwrap();
///
/// assert_eq!(outcome.reason, TerminationReason::FeasibilityExhausted);
/// assert_eq!(state.table().distance(Shape::new(2, 0)), Some(2));
/// ```
#[derive(Debug)]
pub struct SearchEngine<T = DefaultTermination> {
    termination: T,
    expansion: Expansion,
    checkpoint: Option<CheckpointStore>,
    listeners: Listeners,
}

impl<T: Termination> SearchEngine<T> {
    /// Creates a serial engine without checkpointing.
    pub fn new(termination: T) -> Self {
        Self {
            termination,
            expansion: Expansion::Serial,
            checkpoint: None,
            listeners: Vec::new(),
        }
    }

    pub fn with_expansion(mut self, expansion: Expansion) -> Self {
        self.expansion = expansion;
        self
    }

    /// Writes a checkpoint to `store` after every round.
    pub fn with_checkpoint(mut self, store: CheckpointStore) -> Self {
        self.checkpoint = Some(store);
        self
    }

    pub fn add_listener(&mut self, listener: Arc<dyn RoundListener>) {
        self.listeners.push(listener);
    }

    pub fn with_listener(mut self, listener: Arc<dyn RoundListener>) -> Self {
        self.add_listener(listener);
        self
    }

    pub fn termination(&self) -> &T {
        &self.termination
    }

    pub fn expansion(&self) -> &Expansion {
        &self.expansion
    }

    pub fn checkpoint(&self) -> Option<&CheckpointStore> {
        self.checkpoint.as_ref()
    }

    /// Runs rounds until a termination fires.
    ///
    /// Termination is checked before every round, so a state that is already
    /// finished (for example a resumed complete checkpoint) runs no rounds.
    pub fn run(&mut self, state: &mut SearchState) -> SearchResult<SearchOutcome> {
        let started = Instant::now();
        let instance = *state.instance();

        info!(
            event = "search_start",
            slot_count = instance.slot_count(),
            capacity = instance.capacity(),
            total = instance.total(),
            occupancy = %state.mode(),
            round = state.round(),
            feasible = state.feasible().len(),
            expansion = %self.expansion,
        );

        let mut statistics = SearchStatistics::new();
        let reason = loop {
            if let Some(reason) = self.termination.check(state) {
                break reason;
            }

            let round = self.step(state);
            info!(
                event = "round_end",
                round = round.round,
                expanded = round.expanded,
                moves = round.moves_generated,
                new_states = round.new_states,
                resolved = round.resolved,
                remaining = round.remaining_feasible,
                stopped_early = round.stopped_early,
                duration_ms = round.duration.as_millis() as u64,
                speed = round.moves_per_second(),
            );

            if let Some(store) = &self.checkpoint {
                let saved = Instant::now();
                store.save(state)?;
                info!(
                    event = "checkpoint_saved",
                    round = state.round(),
                    dir = %store.dir().display(),
                    duration_ms = saved.elapsed().as_millis() as u64,
                );
            }

            for listener in &self.listeners {
                listener.on_round_end(state, &round);
            }
            statistics.record(round);
        };

        for listener in &self.listeners {
            listener.on_search_end(state, reason);
        }

        info!(
            event = "search_end",
            reason = %reason,
            rounds = state.round(),
            resolved = state.table().resolved_count(),
            unresolved = state.feasible().len(),
            explored = state.explored_count(),
            duration_ms = started.elapsed().as_millis() as u64,
        );

        Ok(SearchOutcome { reason, statistics })
    }

    /// Runs exactly one round, ignoring termination.
    ///
    /// Expands every entry of the latest frontier, pushes the newly reached
    /// inventories as the next round and increments the round counter.
    /// Once no feasible shape remains unresolved, the remaining entries are
    /// skipped and the round is left partial; an entry already being
    /// expanded is always finished.
    pub fn step(&self, state: &mut SearchState) -> RoundStatistics {
        let started = Instant::now();
        let generator = MoveGenerator::new(state.instance.capacity());
        let mode = state.mode;
        let round_number = state.round + 1;

        let SearchState {
            instance,
            table,
            feasible,
            history,
            visited,
            ..
        } = state;

        let mut stats = RoundStatistics {
            round: round_number,
            ..Default::default()
        };
        let mut next: Vec<FrontierEntry> = Vec::new();

        if let Some(current) = history.last() {
            'batches: for batch in current.chunks(BATCH_SIZE) {
                if feasible.is_empty() {
                    stats.stopped_early = true;
                    break;
                }
                let expanded = self
                    .expansion
                    .map(batch, |entry| generator.successors(&entry.inventory));

                for (entry, successors) in batch.iter().zip(expanded) {
                    if feasible.is_empty() {
                        stats.stopped_early = true;
                        break 'batches;
                    }
                    stats.expanded += 1;
                    stats.moves_generated += successors.len() as u64;

                    for successor in successors {
                        if !visited.insert(successor.signature) {
                            continue;
                        }
                        stats.new_states += 1;
                        let path = entry.extended_path(successor.mv);

                        for shape in resolved_shapes(mode, &successor.inventory) {
                            if table.resolve(shape, path.clone()) {
                                feasible.remove(instance.index_of(shape));
                                stats.resolved += 1;
                            }
                        }
                        next.push(FrontierEntry::new(successor.inventory, path));
                    }
                }
            }
        }

        if stats.stopped_early {
            debug!(
                event = "round_stopped_early",
                round = round_number,
                frontier = next.len(),
            );
        }

        history.push(next);
        state.round = round_number;
        stats.remaining_feasible = state.feasible.len() as u64;
        stats.duration = started.elapsed();
        stats
    }
}

#[cfg(test)]
mod tests;

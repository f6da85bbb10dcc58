//! Test utilities for slotsearch-solver
//!
//! Provides common test fixtures used across the crate's test modules.
//! Re-exports fixtures from slotsearch-test and adds solver-specific helpers.

use slotsearch_core::OccupancyMode;

use crate::engine::{SearchEngine, SearchOutcome};
use crate::scope::SearchState;
use crate::termination::default_termination;

pub use slotsearch_test::{
    at_most_distances, brute_force_distances, small_instance, split_instance, tiny_instance,
    Fixture,
};

/// Round-0 state for a fixture.
pub fn state_for(fixture: &Fixture, mode: OccupancyMode) -> SearchState {
    SearchState::fresh(fixture.start.clone(), fixture.capacity, mode).unwrap()
}

/// Round-0 state for the two-slot, capacity-2 fixture in exact mode.
pub fn tiny_state() -> SearchState {
    state_for(&tiny_instance(), OccupancyMode::Exact)
}

/// Runs a serial engine with the default termination until it stops.
pub fn run_serial(state: &mut SearchState, round_limit: u32) -> SearchOutcome {
    SearchEngine::new(default_termination(round_limit))
        .run(state)
        .unwrap()
}

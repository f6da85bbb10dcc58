//! Search entry point that hides the builder wiring.

use slotsearch_config::SearchConfig;
use slotsearch_solver::{SearchBuilder, SearchOutcome, SearchResult, SearchState};

/// Runs the configured search, resuming from the checkpoint when one exists.
///
/// Returns the final state together with the termination reason and
/// per-round statistics. Progress is checkpointed after every round.
pub fn run_search(config: &SearchConfig) -> SearchResult<(SearchState, SearchOutcome)> {
    #[cfg(feature = "console")]
    slotsearch_console::init();

    let mut state = if SearchBuilder::store(config).is_resumable() {
        SearchBuilder::resume_state(config)?
    } else {
        SearchBuilder::reset(config)?
    };
    let mut engine = SearchBuilder::engine(config)?;
    let outcome = engine.run(&mut state)?;
    Ok((state, outcome))
}

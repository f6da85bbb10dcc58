//! Wiring between configuration types and the search engine.

use slotsearch_config::SearchConfig;
use tracing::info;

use crate::checkpoint::CheckpointStore;
use crate::engine::{Expansion, SearchEngine};
use crate::error::SearchResult;
use crate::scope::SearchState;
use crate::termination::{default_termination, DefaultTermination};

/// Builds engines, states and checkpoint stores from a [`SearchConfig`].
pub struct SearchBuilder;

impl SearchBuilder {
    /// Builds the configured engine, checkpointing into the configured directory.
    pub fn engine(config: &SearchConfig) -> SearchResult<SearchEngine<DefaultTermination>> {
        config.validate()?;
        let expansion = Expansion::from_thread_count(&config.move_thread_count)?;
        Ok(SearchEngine::new(default_termination(config.termination.round_limit))
            .with_expansion(expansion)
            .with_checkpoint(Self::store(config)))
    }

    /// The checkpoint store for the configured directory and mode.
    pub fn store(config: &SearchConfig) -> CheckpointStore {
        CheckpointStore::new(config.checkpoint.directory.clone(), config.checkpoint.mode)
    }

    /// A round-0 state for the configured start inventory.
    pub fn fresh_state(config: &SearchConfig) -> SearchResult<SearchState> {
        let start = config.start_inventory()?;
        Ok(SearchState::fresh(
            start,
            config.instance.capacity,
            config.instance.occupancy,
        )?)
    }

    /// Loads the state saved in the configured checkpoint directory.
    ///
    /// The checkpoint must have been computed for the configured instance
    /// and occupancy mode.
    pub fn resume_state(config: &SearchConfig) -> SearchResult<SearchState> {
        let instance = config.instance()?;
        let state = Self::store(config).load(&instance, config.instance.occupancy)?;
        info!(
            event = "checkpoint_loaded",
            round = state.round(),
            resolved = state.table().resolved_count(),
            explored = state.explored_count(),
        );
        Ok(state)
    }

    /// Overwrites the configured checkpoint with a fresh round-0 state.
    pub fn reset(config: &SearchConfig) -> SearchResult<SearchState> {
        config.validate()?;
        let state = Self::fresh_state(config)?;
        let store = Self::store(config);
        store.save(&state)?;
        info!(
            event = "checkpoint_reset",
            dir = %store.dir().display(),
        );
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotsearch_config::MoveThreadCount;
    use slotsearch_core::Shape;

    fn config(dir: &std::path::Path) -> SearchConfig {
        SearchConfig::new()
            .with_inventory(2, 2)
            .with_checkpoint_dir(dir)
            .with_move_thread_count(MoveThreadCount::None)
    }

    #[test]
    fn test_reset_then_resume() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());

        let fresh = SearchBuilder::reset(&config).unwrap();
        let resumed = SearchBuilder::resume_state(&config).unwrap();
        assert_eq!(resumed.round(), 0);
        assert_eq!(resumed.table(), fresh.table());
        assert_eq!(resumed.history(), fresh.history());
    }

    #[test]
    fn test_engine_runs_and_checkpoints() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());

        let mut engine = SearchBuilder::engine(&config).unwrap();
        let mut state = SearchBuilder::fresh_state(&config).unwrap();
        engine.run(&mut state).unwrap();

        let resumed = SearchBuilder::resume_state(&config).unwrap();
        assert_eq!(resumed.round(), state.round());
        assert_eq!(resumed.table().distance(Shape::new(2, 0)), Some(2));
    }

    #[test]
    fn test_resume_without_checkpoint_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir.path().join("nothing"));
        assert!(SearchBuilder::resume_state(&config).is_err());
    }

    #[test]
    fn test_engine_rejects_invalid_config() {
        let config = SearchConfig::new().with_round_limit(0);
        assert!(SearchBuilder::engine(&config).is_err());
    }
}

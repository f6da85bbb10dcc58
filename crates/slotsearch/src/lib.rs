//! slotsearch - Minimal move counts between inventory shapes
//!
//! Breadth-first search over inventory states, recording for every
//! (occupied slots, cursor quantity) shape the fewest clicks and drags that
//! reach it from a start inventory, plus one witness move sequence.
//!
//! # Example
//!
//! ```rust
//! use slotsearch::prelude::*;
//!
//! let start = Inventory::new(vec![2, 0], 0);
//! let mut state = SearchState::fresh(start, 2, OccupancyMode::Exact).unwrap();
//! let mut engine = SearchEngine::new(default_termination(10));
//! let outcome = engine.run(&mut state).unwrap();
//!
//! assert_eq!(outcome.reason, TerminationReason::FeasibilityExhausted);
//! assert_eq!(state.table().distance(Shape::new(2, 0)), Some(2));
//! ```

// State model
pub use slotsearch_core::{
    Instance, Inventory, Move, OccupancyMode, Quantity, Shape, Signature, SlotSearchError,
};

// Configuration
pub use slotsearch_config::{
    CheckpointMode, ConfigError, MoveThreadCount, SearchConfig,
};

// Search engine
pub use slotsearch_solver::{
    default_termination, verify_witnesses, CheckpointStore, DistanceTable, Expansion,
    RoundListener, RoundStatistics, SearchBuilder, SearchEngine, SearchError, SearchOutcome,
    SearchResult, SearchState, SearchStatistics, Termination, TerminationReason,
};

#[cfg(feature = "console")]
pub use slotsearch_console::{render_heatmap, render_table};

mod search;
pub use search::run_search;

pub mod prelude {
    pub use super::{Instance, Inventory, Move, OccupancyMode, Shape};
    pub use super::{SearchConfig, SearchEngine, SearchState, TerminationReason};
    pub use super::{default_termination, run_search, SearchBuilder};
}

//! slotsearch search engine
//!
//! This crate provides the breadth-first search over inventory states:
//! - Reduced move generation (heuristic module)
//! - Distance/witness tables and the feasibility set
//! - Search state and frontier history
//! - Termination conditions
//! - Round-by-round engine with optional parallel expansion
//! - Checkpoint persistence and resume
//! - Witness replay and verification
//! - Configuration wiring (builder module)

pub mod builder;
pub mod checkpoint;
pub mod engine;
pub mod error;
pub mod event;
pub mod heuristic;
pub mod scope;
pub mod statistics;
pub mod table;
pub mod termination;
pub mod witness;

#[cfg(test)]
mod test_utils;

pub use builder::SearchBuilder;
pub use checkpoint::{CheckpointStore, CheckpointTables, Manifest};
pub use engine::{Expansion, SearchEngine, SearchOutcome};
pub use error::{CheckpointError, SearchError, SearchResult};
pub use event::{CountingRoundListener, RoundListener};
pub use heuristic::{MoveGenerator, MoveList, Successor};
pub use scope::{FrontierEntry, Round, SearchState};
pub use statistics::{RoundStatistics, SearchStatistics};
pub use table::{DistanceTable, FeasibilitySet};
pub use termination::{
    default_termination, DefaultTermination, FeasibilityExhaustedTermination,
    FrontierExhaustedTermination, OrTermination, RoundLimitTermination, Termination,
    TerminationReason,
};
pub use witness::{replay, verify_witnesses, WitnessMismatch};

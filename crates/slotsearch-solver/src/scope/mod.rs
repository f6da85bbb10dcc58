//! State owned by one search run.
//!
//! - [`SearchState`]: round counter, tables, frontier history, visited set
//! - [`FrontierEntry`]: an inventory discovered in some round and the path to it

mod frontier;
mod state;

pub use frontier::{FrontierEntry, Round};
pub(crate) use state::resolved_shapes;
pub use state::SearchState;

//! Distance/witness table and the set of shapes still worth searching for.
//!
//! - [`DistanceTable`]: per shape, the minimal move count and a witness path
//! - [`FeasibilitySet`]: shapes that are structurally possible and unresolved

mod distance;
mod feasibility;

pub use distance::DistanceTable;
pub use feasibility::FeasibilitySet;

//! Shapes that are still structurally reachable and unresolved.

use std::collections::BTreeSet;

use slotsearch_core::{Instance, OccupancyMode, Shape};

use super::DistanceTable;

/// Table indices of unresolved shapes that some inventory could still reach.
///
/// Shrinks monotonically; the search stops once it is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeasibilitySet {
    remaining: BTreeSet<usize>,
}

impl FeasibilitySet {
    /// Derives the set from the instance geometry and the resolved entries of `table`.
    pub fn new(instance: &Instance, mode: OccupancyMode, table: &DistanceTable) -> Self {
        let remaining = (0..instance.table_len())
            .filter(|&idx| {
                table.distance_at(idx).is_none()
                    && instance.is_possible(instance.shape_at(idx), mode)
            })
            .collect();
        Self { remaining }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.remaining.contains(&index)
    }

    /// Removes `index`, returning whether it was present.
    pub fn remove(&mut self, index: usize) -> bool {
        self.remaining.remove(&index)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    /// Remaining shapes in table order.
    pub fn shapes<'a>(&'a self, instance: &'a Instance) -> impl Iterator<Item = Shape> + 'a {
        self.remaining.iter().map(move |&idx| instance.shape_at(idx))
    }
}

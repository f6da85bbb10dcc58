//! Search state for one run.

use std::collections::HashSet;

use slotsearch_core::{Instance, Inventory, OccupancyMode, Quantity, Shape, Signature};

use super::{FrontierEntry, Round};
use crate::table::{DistanceTable, FeasibilitySet};

/// Everything one search run owns: the round counter, the distance/witness
/// table, the feasibility set, every round's frontier and the visited set.
///
/// Constructed fresh from a start inventory or rebuilt from a checkpoint,
/// then advanced one round at a time by the engine.
#[derive(Debug, Clone)]
pub struct SearchState {
    pub(crate) instance: Instance,
    pub(crate) mode: OccupancyMode,
    pub(crate) start: Inventory,
    pub(crate) round: u32,
    pub(crate) table: DistanceTable,
    pub(crate) feasible: FeasibilitySet,
    pub(crate) history: Vec<Round>,
    pub(crate) visited: HashSet<Signature>,
}

impl SearchState {
    /// Creates the round-0 state for `start`.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotsearch_core::{Inventory, OccupancyMode, Shape};
    /// use slotsearch_solver::scope::SearchState;
    ///
    /// let state = SearchState::fresh(Inventory::new(vec![2, 0], 0), 2, OccupancyMode::Exact).unwrap();
    /// assert_eq!(state.round(), 0);
    /// assert_eq!(state.table().distance(Shape::new(1, 0)), Some(0));
    /// assert_eq!(state.feasible().len(), 3);
    /// ```
    pub fn fresh(
        start: Inventory,
        capacity: Quantity,
        mode: OccupancyMode,
    ) -> slotsearch_core::Result<Self> {
        let instance = Instance::for_start(&start, capacity)?;
        let mut table = DistanceTable::new(instance);
        for shape in resolved_shapes(mode, &start) {
            table.resolve(shape, Vec::new());
        }
        let feasible = FeasibilitySet::new(&instance, mode, &table);
        let mut visited = HashSet::new();
        visited.insert(start.signature());
        Ok(Self {
            instance,
            mode,
            history: vec![vec![FrontierEntry::root(start.clone())]],
            start,
            round: 0,
            table,
            feasible,
            visited,
        })
    }

    /// Reassembles a state from persisted parts, checking they agree.
    ///
    /// The feasibility set is not persisted; it is derived from the instance
    /// and the resolved entries of `table`.
    pub fn from_parts(
        mode: OccupancyMode,
        start: Inventory,
        round: u32,
        table: DistanceTable,
        history: Vec<Round>,
        visited: HashSet<Signature>,
    ) -> Result<Self, String> {
        let instance = *table.instance();
        if !instance.admits(&start) {
            return Err(format!("start inventory {start} does not fit {instance}"));
        }
        if table.distance(start.shape()) != Some(0) {
            return Err(format!(
                "start shape {} is not resolved at distance 0",
                start.shape()
            ));
        }
        if history.len() != round as usize + 1 {
            return Err(format!(
                "frontier history has {} rounds but round counter is {round}",
                history.len()
            ));
        }
        if history[0] != [FrontierEntry::root(start.clone())] {
            return Err("round 0 is not the start inventory".into());
        }
        for (depth, entries) in history.iter().enumerate() {
            for entry in entries {
                if entry.depth() != depth {
                    return Err(format!(
                        "entry {} in round {depth} has a path of {} moves",
                        entry.inventory,
                        entry.depth()
                    ));
                }
                if !instance.admits(&entry.inventory) {
                    return Err(format!(
                        "entry {} in round {depth} does not fit {instance}",
                        entry.inventory
                    ));
                }
                if !visited.contains(&entry.inventory.signature()) {
                    return Err(format!(
                        "entry {} in round {depth} is missing from the visited set",
                        entry.inventory
                    ));
                }
            }
        }
        if let Some(sig) = visited
            .iter()
            .find(|sig| !sig.is_sorted() || sig.total() != instance.total())
        {
            return Err(format!("visited signature {sig:?} does not fit {instance}"));
        }
        if let Some((shape, d, _)) = table.resolved().find(|&(_, d, _)| d > round) {
            return Err(format!(
                "shape {shape} resolved at distance {d} beyond round {round}"
            ));
        }

        let feasible = FeasibilitySet::new(&instance, mode, &table);
        Ok(Self {
            instance,
            mode,
            start,
            round,
            table,
            feasible,
            history,
            visited,
        })
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    pub fn mode(&self) -> OccupancyMode {
        self.mode
    }

    pub fn start(&self) -> &Inventory {
        &self.start
    }

    /// Number of completed rounds.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn table(&self) -> &DistanceTable {
        &self.table
    }

    pub fn feasible(&self) -> &FeasibilitySet {
        &self.feasible
    }

    /// Every round's frontier, round 0 first.
    pub fn history(&self) -> &[Round] {
        &self.history
    }

    /// The most recent round's frontier.
    pub fn frontier(&self) -> &[FrontierEntry] {
        self.history.last().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn visited(&self) -> &HashSet<Signature> {
        &self.visited
    }

    /// Total number of inventories discovered across all rounds.
    pub fn explored_count(&self) -> usize {
        self.history.iter().map(Vec::len).sum()
    }

    /// Shapes a newly discovered inventory resolves under this run's occupancy mode.
    pub fn shapes_resolved_by<'a>(
        &self,
        inventory: &'a Inventory,
    ) -> impl Iterator<Item = Shape> + 'a {
        resolved_shapes(self.mode, inventory)
    }
}

/// Shapes resolved by `inventory`: its own shape, plus (in at-most mode)
/// every larger occupied count its empty slots could stand in for.
pub(crate) fn resolved_shapes(
    mode: OccupancyMode,
    inventory: &Inventory,
) -> impl Iterator<Item = Shape> + '_ {
    let occupied = inventory.occupied_count();
    let slack = match mode {
        OccupancyMode::Exact => 0,
        OccupancyMode::AtMost => inventory.slot_count() - occupied,
    };
    (0..=slack).map(move |extra| Shape::new(occupied + extra, inventory.cursor()))
}

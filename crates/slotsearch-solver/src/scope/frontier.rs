//! Frontier entries.

use serde::{Deserialize, Serialize};
use slotsearch_core::{Inventory, Move};

/// An inventory reached for the first time, with the moves that reached it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontierEntry {
    pub inventory: Inventory,
    pub path: Vec<Move>,
}

impl FrontierEntry {
    pub fn new(inventory: Inventory, path: Vec<Move>) -> Self {
        Self { inventory, path }
    }

    /// The round-0 entry: the start inventory with an empty path.
    pub fn root(inventory: Inventory) -> Self {
        Self::new(inventory, Vec::new())
    }

    /// Number of moves from the start.
    #[inline]
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Extends this entry's path by one move.
    pub fn extended_path(&self, mv: Move) -> Vec<Move> {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(mv);
        path
    }
}

/// All entries discovered in one round, in discovery order.
pub type Round = Vec<FrontierEntry>;

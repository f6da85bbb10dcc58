//! Start inventories used across the test suites.

use slotsearch_core::{Instance, Inventory, Quantity};

/// A start inventory and the capacity it is searched under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    pub start: Inventory,
    pub capacity: Quantity,
}

impl Fixture {
    pub fn new(slots: Vec<Quantity>, cursor: Quantity, capacity: Quantity) -> Self {
        Self {
            start: Inventory::new(slots, cursor),
            capacity,
        }
    }

    /// The instance this fixture defines.
    ///
    /// # Panics
    ///
    /// Panics if the fixture is not a valid start inventory.
    pub fn instance(&self) -> Instance {
        Instance::for_start(&self.start, self.capacity).expect("fixture must be valid")
    }
}

/// Two slots, capacity 2, one full slot.
///
/// Known answer: `(1,0)` at 0, `(1,1)` and `(0,2)` at 1, `(2,0)` at 2.
pub fn tiny_instance() -> Fixture {
    Fixture::new(vec![2, 0], 0, 2)
}

/// Three slots, capacity 4, one full slot.
pub fn small_instance() -> Fixture {
    Fixture::new(vec![4, 0, 0], 0, 4)
}

/// Three slots, capacity 4, part of the stack already on the cursor.
pub fn split_instance() -> Fixture {
    Fixture::new(vec![3, 0, 0], 1, 4)
}

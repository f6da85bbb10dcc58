//! Fixed parameters of one search run and the shape coordinate space.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotSearchError};
use crate::inventory::{Inventory, Quantity};

/// Shape coordinate: number of occupied slots and the cursor amount.
///
/// Distances are tracked per shape, not per inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Shape {
    occupied: usize,
    cursor: Quantity,
}

impl Shape {
    pub fn new(occupied: usize, cursor: Quantity) -> Self {
        Self { occupied, cursor }
    }

    #[inline]
    pub fn occupied(&self) -> usize {
        self.occupied
    }

    #[inline]
    pub fn cursor(&self) -> Quantity {
        self.cursor
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.occupied, self.cursor)
    }
}

/// How a discovered inventory resolves shape coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccupancyMode {
    /// An inventory resolves exactly its own shape.
    #[default]
    Exact,

    /// An inventory with `b` occupied and `e` empty slots resolves every
    /// shape `(b + i, cursor)` for `i` in `0..=e`.
    AtMost,
}

impl fmt::Display for OccupancyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OccupancyMode::Exact => write!(f, "exact"),
            OccupancyMode::AtMost => write!(f, "at_most"),
        }
    }
}

/// Slot count, stack capacity and conserved item total of one run.
///
/// Also defines the dense table layout: index `cursor + (capacity + 1) * occupied`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instance {
    slot_count: usize,
    capacity: Quantity,
    total: u32,
}

impl Instance {
    /// Creates an instance, rejecting degenerate parameters.
    pub fn new(slot_count: usize, capacity: Quantity, total: u32) -> Result<Self> {
        Self::check_dimensions(slot_count, capacity)?;
        if total == 0 {
            return Err(SlotSearchError::Config(
                "start inventory must hold at least one item".into(),
            ));
        }
        // Dimensions are checked, so `slot_count + 1` fits; the product may not.
        let max_total = (slot_count as u64 + 1).checked_mul(u64::from(capacity));
        if max_total.is_some_and(|max| u64::from(total) > max) {
            return Err(SlotSearchError::Config(format!(
                "total of {total} items exceeds what {slot_count} slots and the cursor can hold"
            )));
        }
        Ok(Self {
            slot_count,
            capacity,
            total,
        })
    }

    /// Checks that a `slot_count` by `capacity` table can be addressed.
    pub fn check_dimensions(slot_count: usize, capacity: Quantity) -> Result<()> {
        if slot_count == 0 {
            return Err(SlotSearchError::Config("slot count must be at least 1".into()));
        }
        if capacity == 0 {
            return Err(SlotSearchError::Config("capacity must be at least 1".into()));
        }
        let table_len = slot_count
            .checked_add(1)
            .and_then(|rows| rows.checked_mul(usize::from(capacity) + 1));
        if table_len.is_none() {
            return Err(SlotSearchError::Config(format!(
                "slot count {slot_count} is too large for capacity {capacity}"
            )));
        }
        Ok(())
    }

    /// Derives the instance from a start inventory.
    ///
    /// Every slot and the cursor must lie within `[0, capacity]`.
    pub fn for_start(start: &Inventory, capacity: Quantity) -> Result<Self> {
        if let Some(q) = start.slots().iter().find(|&&q| q > capacity) {
            return Err(SlotSearchError::Config(format!(
                "start slot quantity {q} exceeds capacity {capacity}"
            )));
        }
        if start.cursor() > capacity {
            return Err(SlotSearchError::Config(format!(
                "start cursor {} exceeds capacity {capacity}",
                start.cursor()
            )));
        }
        Self::new(start.slot_count(), capacity, start.total())
    }

    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    #[inline]
    pub fn capacity(&self) -> Quantity {
        self.capacity
    }

    #[inline]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Number of cursor values per table row.
    #[inline]
    pub fn columns(&self) -> usize {
        usize::from(self.capacity) + 1
    }

    /// Number of occupied-count values (table rows).
    #[inline]
    pub fn rows(&self) -> usize {
        self.slot_count + 1
    }

    /// Length of the dense distance/witness tables.
    #[inline]
    pub fn table_len(&self) -> usize {
        self.rows() * self.columns()
    }

    /// Linear table index of a shape.
    #[inline]
    pub fn index_of(&self, shape: Shape) -> usize {
        debug_assert!(shape.occupied <= self.slot_count && shape.cursor <= self.capacity);
        usize::from(shape.cursor) + self.columns() * shape.occupied
    }

    /// Shape stored at a linear table index.
    #[inline]
    pub fn shape_at(&self, index: usize) -> Shape {
        Shape::new(index / self.columns(), (index % self.columns()) as Quantity)
    }

    /// All shapes in table order.
    pub fn shapes(&self) -> impl Iterator<Item = Shape> + '_ {
        (0..self.table_len()).map(move |i| self.shape_at(i))
    }

    /// Whether any inventory of this instance could resolve `shape`.
    ///
    /// Every occupied slot holds at least one item and at most `capacity`,
    /// and with nothing in the slots the cursor holds every item.
    pub fn is_possible(&self, shape: Shape, mode: OccupancyMode) -> bool {
        // occupied * capacity < table_len <= usize::MAX, so u64 cannot overflow.
        let occupied = shape.occupied as u64;
        let cursor = u64::from(shape.cursor);
        let total = u64::from(self.total);
        if cursor > total || (occupied == 0 && cursor != total) {
            return false;
        }
        if occupied * u64::from(self.capacity) + cursor < total {
            return false;
        }
        match mode {
            OccupancyMode::Exact => occupied + cursor <= total,
            OccupancyMode::AtMost => true,
        }
    }

    /// Whether `inventory` is a valid configuration of this instance.
    pub fn admits(&self, inventory: &Inventory) -> bool {
        inventory.slot_count() == self.slot_count
            && inventory.cursor() <= self.capacity
            && inventory.slots().iter().all(|&q| q <= self.capacity)
            && inventory.total() == self.total
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} slots, capacity {}, {} items",
            self.slot_count, self.capacity, self.total
        )
    }
}

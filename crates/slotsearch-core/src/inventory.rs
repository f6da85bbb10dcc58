//! Inventory state and its canonical signature.
//!
//! An [`Inventory`] keeps slot identity so moves can address individual
//! slots. A [`Signature`] forgets it: two inventories whose slot quantities
//! are permutations of each other (with the same cursor) share a signature.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::instance::Shape;

/// Number of items held by a slot or by the cursor.
pub type Quantity = u16;

/// Slot quantities, stored inline for small inventories.
pub type SlotVec = SmallVec<[Quantity; 16]>;

/// A full configuration: ordered slot quantities plus the cursor amount.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Inventory {
    slots: SlotVec,
    cursor: Quantity,
}

impl Inventory {
    /// Creates an inventory from slot quantities and a cursor amount.
    pub fn new(slots: impl Into<SlotVec>, cursor: Quantity) -> Self {
        Self {
            slots: slots.into(),
            cursor,
        }
    }

    /// Creates an inventory of `slot_count` slots with the first one full.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotsearch_core::Inventory;
    ///
    /// let inv = Inventory::with_full_slot(3, 64);
    /// assert_eq!(inv.slots(), &[64, 0, 0]);
    /// assert_eq!(inv.cursor(), 0);
    /// ```
    pub fn with_full_slot(slot_count: usize, capacity: Quantity) -> Self {
        let mut slots = SlotVec::from_elem(0, slot_count);
        if let Some(first) = slots.first_mut() {
            *first = capacity;
        }
        Self { slots, cursor: 0 }
    }

    #[inline]
    pub fn slots(&self) -> &[Quantity] {
        &self.slots
    }

    #[inline]
    pub fn cursor(&self) -> Quantity {
        self.cursor
    }

    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Total items across all slots and the cursor.
    pub fn total(&self) -> u32 {
        self.slots.iter().map(|&q| u32::from(q)).sum::<u32>() + u32::from(self.cursor)
    }

    /// Number of non-empty slots.
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|&&q| q != 0).count()
    }

    /// Number of empty slots.
    pub fn empty_count(&self) -> usize {
        self.slots.iter().filter(|&&q| q == 0).count()
    }

    /// Index of the first empty slot.
    pub fn first_empty(&self) -> Option<usize> {
        self.slots.iter().position(|&q| q == 0)
    }

    /// Index of the first slot holding exactly `capacity` items.
    pub fn first_full(&self, capacity: Quantity) -> Option<usize> {
        self.slots.iter().position(|&q| q == capacity)
    }

    /// Indices of empty slots, lowest first.
    pub fn empty_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, &q)| q == 0)
            .map(|(i, _)| i)
    }

    /// Returns the shape coordinate `(occupied, cursor)` of this inventory.
    pub fn shape(&self) -> Shape {
        Shape::new(self.occupied_count(), self.cursor)
    }

    /// Returns the permutation-invariant signature of this inventory.
    pub fn signature(&self) -> Signature {
        let mut slots = self.slots.clone();
        slots.sort_unstable();
        Signature {
            slots,
            cursor: self.cursor,
        }
    }

    /// Drops empty slots from the end until at most `max_slots` remain.
    ///
    /// Non-empty slots are never removed, so the result can still hold more
    /// than `max_slots` slots when too many of them are occupied.
    pub fn trim_empty_to(&mut self, max_slots: usize) {
        while self.slots.len() > max_slots {
            match self.slots.iter().rposition(|&q| q == 0) {
                Some(idx) => {
                    self.slots.remove(idx);
                }
                None => break,
            }
        }
    }

    pub(crate) fn slots_mut(&mut self) -> &mut SlotVec {
        &mut self.slots
    }

    pub(crate) fn set_cursor(&mut self, cursor: Quantity) {
        self.cursor = cursor;
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, q) in self.slots.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{q}")?;
        }
        write!(f, "] cursor={}", self.cursor)
    }
}

/// Sorted slot quantities paired with the cursor amount.
///
/// Used purely as a set key; moves are always applied to an [`Inventory`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Signature {
    slots: SlotVec,
    cursor: Quantity,
}

impl Signature {
    #[inline]
    pub fn slots(&self) -> &[Quantity] {
        &self.slots
    }

    #[inline]
    pub fn cursor(&self) -> Quantity {
        self.cursor
    }

    /// Total items represented by this signature.
    pub fn total(&self) -> u32 {
        self.slots.iter().map(|&q| u32::from(q)).sum::<u32>() + u32::from(self.cursor)
    }

    /// Whether the slot quantities are in non-decreasing order.
    pub fn is_sorted(&self) -> bool {
        self.slots.windows(2).all(|w| w[0] <= w[1])
    }
}

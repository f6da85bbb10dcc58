//! Transfer operations and their effect on an inventory.
//!
//! Four operations exist, mirroring single clicks and click-drags:
//!
//! | move            | cursor non-empty                          | cursor empty                     |
//! |-----------------|-------------------------------------------|----------------------------------|
//! | `ClickOut(i)`   | one item into slot `i` (no-op when full)  | take `ceil(q/2)`, leave `floor`  |
//! | `ClickIn(i)`    | fill slot `i` toward capacity             | take the whole slot              |
//! | `DragOne(n)`    | one item into each of `n` empty slots     | no-op                            |
//! | `DragEven(n)`   | split the cursor over `n` empty slots     | no-op                            |
//!
//! Drag counts are clamped to `min(n, empty slots, cursor)`; empty slots are
//! selected lowest index first.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::inventory::{Inventory, Quantity};

/// A single transfer operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Move {
    /// Single-unit transfer onto a slot, or split a slot onto an empty cursor.
    ClickOut(usize),
    /// Bulk transfer onto a slot, or pick up a whole slot with an empty cursor.
    ClickIn(usize),
    /// Drop one unit into each of up to `n` empty slots.
    DragOne(usize),
    /// Spread the cursor evenly over up to `n` empty slots.
    DragEven(usize),
}

impl Move {
    /// Applies this move, returning the successor inventory.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotsearch_core::{Inventory, Move};
    ///
    /// let start = Inventory::new(vec![64, 0, 0], 0);
    /// let next = Move::ClickOut(0).apply(&start, 64);
    /// assert_eq!(next.slots(), &[32, 0, 0]);
    /// assert_eq!(next.cursor(), 32);
    /// ```
    pub fn apply(&self, inventory: &Inventory, capacity: Quantity) -> Inventory {
        match *self {
            Move::ClickOut(slot) => click_out(inventory, slot, capacity),
            Move::ClickIn(slot) => click_in(inventory, slot, capacity),
            Move::DragOne(count) => drag_one(inventory, count),
            Move::DragEven(count) => drag_even(inventory, count),
        }
    }

    /// Whether this move names a slot `inventory` actually has.
    ///
    /// [`apply`](Self::apply) panics on a click past the last slot; drags
    /// are always applicable.
    pub fn is_applicable(&self, inventory: &Inventory) -> bool {
        match *self {
            Move::ClickOut(slot) | Move::ClickIn(slot) => slot < inventory.slot_count(),
            Move::DragOne(_) | Move::DragEven(_) => true,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::ClickOut(slot) => write!(f, "click_out[{slot}]"),
            Move::ClickIn(slot) => write!(f, "click_in[{slot}]"),
            Move::DragOne(count) => write!(f, "drag_one({count})"),
            Move::DragEven(count) => write!(f, "drag_even({count})"),
        }
    }
}

fn click_out(inventory: &Inventory, slot: usize, capacity: Quantity) -> Inventory {
    let mut next = inventory.clone();
    let cursor = inventory.cursor();
    let held = inventory.slots()[slot];
    if cursor > 0 {
        if held < capacity {
            next.slots_mut()[slot] = held + 1;
            next.set_cursor(cursor - 1);
        }
    } else {
        next.slots_mut()[slot] = held / 2;
        next.set_cursor(held - held / 2);
    }
    next
}

fn click_in(inventory: &Inventory, slot: usize, capacity: Quantity) -> Inventory {
    let mut next = inventory.clone();
    let cursor = inventory.cursor();
    let held = inventory.slots()[slot];
    if cursor > 0 {
        let delta = (capacity - held).min(cursor);
        next.slots_mut()[slot] = held + delta;
        next.set_cursor(cursor - delta);
    } else {
        next.slots_mut()[slot] = 0;
        next.set_cursor(held);
    }
    next
}

// Number of empty slots a drag over `count` slots actually touches.
fn drag_width(inventory: &Inventory, count: usize) -> usize {
    count
        .min(inventory.empty_count())
        .min(usize::from(inventory.cursor()))
}

fn drag_one(inventory: &Inventory, count: usize) -> Inventory {
    let width = drag_width(inventory, count);
    let targets: Vec<usize> = inventory.empty_indices().take(width).collect();
    let mut next = inventory.clone();
    for idx in targets {
        next.slots_mut()[idx] = 1;
    }
    next.set_cursor(inventory.cursor() - width as Quantity);
    next
}

fn drag_even(inventory: &Inventory, count: usize) -> Inventory {
    let width = drag_width(inventory, count);
    if width == 0 {
        return inventory.clone();
    }
    let cursor = usize::from(inventory.cursor());
    let (quotient, remainder) = (cursor / width, cursor % width);
    let targets: Vec<usize> = inventory.empty_indices().take(width).collect();
    let mut next = inventory.clone();
    for (i, idx) in targets.into_iter().enumerate() {
        let extra = usize::from(i < remainder);
        next.slots_mut()[idx] = (quotient + extra) as Quantity;
    }
    next.set_cursor(0);
    next
}

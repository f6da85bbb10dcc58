//! Brute-force reference search.
//!
//! Explores raw inventories (no canonical signatures) with every move on
//! every slot and every drag width, so it shares none of the engine's
//! reductions.

use std::collections::{BTreeMap, HashSet, VecDeque};

use slotsearch_core::{Inventory, Move, Quantity, Shape};

/// Every move applicable to `inventory`, unreduced.
pub fn all_moves(inventory: &Inventory) -> Vec<Move> {
    let n = inventory.slot_count();
    let mut moves = Vec::with_capacity(4 * n);
    for slot in 0..n {
        moves.push(Move::ClickOut(slot));
        moves.push(Move::ClickIn(slot));
    }
    for width in 1..=n {
        moves.push(Move::DragOne(width));
        moves.push(Move::DragEven(width));
    }
    moves
}

/// Minimal move count to reach each exact shape from `start`, exploring at
/// most `max_depth` moves deep.
pub fn brute_force_distances(
    start: &Inventory,
    capacity: Quantity,
    max_depth: u32,
) -> BTreeMap<Shape, u32> {
    let mut distances = BTreeMap::new();
    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();

    seen.insert(start.clone());
    queue.push_back((start.clone(), 0u32));

    while let Some((inventory, depth)) = queue.pop_front() {
        distances.entry(inventory.shape()).or_insert(depth);
        if depth == max_depth {
            continue;
        }
        for mv in all_moves(&inventory) {
            let next = mv.apply(&inventory, capacity);
            if seen.insert(next.clone()) {
                queue.push_back((next, depth + 1));
            }
        }
    }
    distances
}

/// Derives at-most distances from exact ones: a shape `(o, c)` costs the
/// cheapest exact shape `(o', c)` with `o' <= o`.
pub fn at_most_distances(exact: &BTreeMap<Shape, u32>, slot_count: usize) -> BTreeMap<Shape, u32> {
    let mut result = BTreeMap::new();
    for (&shape, &d) in exact {
        for occupied in shape.occupied()..=slot_count {
            let target = Shape::new(occupied, shape.cursor());
            let entry = result.entry(target).or_insert(d);
            if d < *entry {
                *entry = d;
            }
        }
    }
    result
}

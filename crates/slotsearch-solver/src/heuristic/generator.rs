//! Reduced move generation for one inventory.

use smallvec::SmallVec;
use slotsearch_core::{Inventory, Move, Quantity, Signature};

/// Moves generated for a single inventory.
pub type MoveList = SmallVec<[Move; 32]>;

/// A generated move together with the inventory it produces.
#[derive(Debug, Clone)]
pub struct Successor {
    pub mv: Move,
    pub inventory: Inventory,
    pub signature: Signature,
}

/// Generates the moves worth trying from an inventory.
///
/// Generation order is fixed and forms the tie-break between moves that
/// resolve the same shape in the same round:
///
/// 1. for each distinct quantity among partially filled slots (first
///    occurrence): `ClickOut`, `ClickIn`;
/// 2. with a non-empty cursor and an empty slot: `ClickOut`, `ClickIn` on the
///    first empty slot, then `DragOne(k)`, `DragEven(k)` for every
///    `k` in `1..=min(empty, cursor)`;
/// 3. with an empty cursor and a full slot: `ClickOut`, `ClickIn` on the
///    first full slot.
///
/// # Examples
///
/// ```
/// use slotsearch_core::{Inventory, Move};
/// use slotsearch_solver::heuristic::MoveGenerator;
///
/// let generator = MoveGenerator::new(2);
/// let moves = generator.generate(&Inventory::new(vec![2, 0], 0));
/// assert_eq!(moves.as_slice(), &[Move::ClickOut(0), Move::ClickIn(0)]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MoveGenerator {
    capacity: Quantity,
}

impl MoveGenerator {
    pub fn new(capacity: Quantity) -> Self {
        Self { capacity }
    }

    pub fn capacity(&self) -> Quantity {
        self.capacity
    }

    /// Returns the reduced move list for `inventory`.
    pub fn generate(&self, inventory: &Inventory) -> MoveList {
        let mut moves = MoveList::new();
        let mut seen: SmallVec<[Quantity; 16]> = SmallVec::new();

        for (idx, &held) in inventory.slots().iter().enumerate() {
            if held == 0 || held == self.capacity || seen.contains(&held) {
                continue;
            }
            seen.push(held);
            moves.push(Move::ClickOut(idx));
            moves.push(Move::ClickIn(idx));
        }

        let cursor = inventory.cursor();
        if cursor > 0 {
            if let Some(first_empty) = inventory.first_empty() {
                moves.push(Move::ClickOut(first_empty));
                moves.push(Move::ClickIn(first_empty));
                let widest = inventory.empty_count().min(usize::from(cursor));
                for k in 1..=widest {
                    moves.push(Move::DragOne(k));
                    moves.push(Move::DragEven(k));
                }
            }
        } else if let Some(first_full) = inventory.first_full(self.capacity) {
            moves.push(Move::ClickOut(first_full));
            moves.push(Move::ClickIn(first_full));
        }

        moves
    }

    /// Applies every generated move, yielding successors in generation order.
    pub fn successors(&self, inventory: &Inventory) -> Vec<Successor> {
        self.generate(inventory)
            .into_iter()
            .map(|mv| {
                let next = mv.apply(inventory, self.capacity);
                let signature = next.signature();
                Successor {
                    mv,
                    inventory: next,
                    signature,
                }
            })
            .collect()
    }
}

//! Tests for move generation.

use std::collections::HashSet;

use slotsearch_core::{Inventory, Move, Quantity, Signature};

use super::*;

fn inv(slots: &[Quantity], cursor: Quantity) -> Inventory {
    Inventory::new(slots.to_vec(), cursor)
}

// Signatures reachable by trying every click on every slot and every drag width.
fn all_successor_signatures(inventory: &Inventory, capacity: Quantity) -> HashSet<Signature> {
    let n = inventory.slot_count();
    let mut moves = Vec::new();
    for i in 0..n {
        moves.push(Move::ClickOut(i));
        moves.push(Move::ClickIn(i));
    }
    for k in 1..=n {
        moves.push(Move::DragOne(k));
        moves.push(Move::DragEven(k));
    }
    moves
        .into_iter()
        .map(|mv| mv.apply(inventory, capacity).signature())
        .filter(|sig| *sig != inventory.signature())
        .collect()
}

#[test]
fn test_full_slot_with_empty_cursor() {
    let generator = MoveGenerator::new(4);
    let moves = generator.generate(&inv(&[4, 0, 0], 0));
    assert_eq!(moves.as_slice(), &[Move::ClickOut(0), Move::ClickIn(0)]);
}

#[test]
fn test_one_representative_per_quantity() {
    let generator = MoveGenerator::new(8);
    let moves = generator.generate(&inv(&[3, 5, 3, 8, 5], 0));
    assert_eq!(
        moves.as_slice(),
        &[
            Move::ClickOut(0),
            Move::ClickIn(0),
            Move::ClickOut(1),
            Move::ClickIn(1),
            Move::ClickOut(3),
            Move::ClickIn(3),
        ]
    );
}

#[test]
fn test_cursor_with_empty_slots_adds_drags() {
    let generator = MoveGenerator::new(8);
    let moves = generator.generate(&inv(&[2, 0, 0, 0], 2));
    assert_eq!(
        moves.as_slice(),
        &[
            Move::ClickOut(0),
            Move::ClickIn(0),
            Move::ClickOut(1),
            Move::ClickIn(1),
            Move::DragOne(1),
            Move::DragEven(1),
            Move::DragOne(2),
            Move::DragEven(2),
        ]
    );
}

#[test]
fn test_full_slots_skipped_with_cursor() {
    let generator = MoveGenerator::new(4);
    let moves = generator.generate(&inv(&[4, 4], 2));
    assert!(moves.is_empty());
}

#[test]
fn test_no_degenerate_moves() {
    let generator = MoveGenerator::new(4);
    let samples = [
        inv(&[4, 0, 0], 0),
        inv(&[2, 1, 0], 1),
        inv(&[4, 3, 0], 1),
        inv(&[1, 1, 1], 1),
        inv(&[0, 0, 0], 4),
    ];
    for sample in &samples {
        for successor in generator.successors(sample) {
            assert_ne!(
                successor.inventory, *sample,
                "{} is a no-op on {}",
                successor.mv, sample
            );
        }
    }
}

#[test]
fn test_drag_width_never_exceeds_preconditions() {
    let generator = MoveGenerator::new(8);
    let sample = inv(&[5, 0, 0, 0, 0], 3);
    for mv in generator.generate(&sample) {
        if let Move::DragOne(k) | Move::DragEven(k) = mv {
            assert!(k <= sample.empty_count());
            assert!(k <= usize::from(sample.cursor()));
        }
    }
}

#[test]
fn test_covers_every_distinct_successor() {
    let capacity = 4;
    let generator = MoveGenerator::new(capacity);
    let samples = [
        inv(&[4, 0, 0], 0),
        inv(&[2, 0, 0], 2),
        inv(&[1, 1, 0], 2),
        inv(&[2, 1, 1], 0),
        inv(&[3, 0, 1], 0),
        inv(&[0, 0, 0], 4),
        inv(&[1, 0, 2], 1),
    ];
    for sample in &samples {
        let expected = all_successor_signatures(sample, capacity);
        let generated: HashSet<Signature> = generator
            .successors(sample)
            .into_iter()
            .map(|s| s.signature)
            .collect();
        assert_eq!(generated, expected, "successors of {sample}");
    }
}

//! Move generation.
//!
//! The search never enumerates every click on every slot. Slots holding the
//! same quantity are interchangeable once inventories are compared by
//! [`Signature`](slotsearch_core::Signature), so [`MoveGenerator`] emits moves
//! for one representative slot per distinct quantity, plus the drags that
//! change how many slots become occupied.

mod generator;

pub use generator::{MoveGenerator, MoveList, Successor};

#[cfg(test)]
mod tests;

//! slotsearch Core - State model and transfer rules
//!
//! This crate provides the fundamental abstractions for slotsearch:
//! - [`Inventory`]: slot quantities plus the cursor (the working state)
//! - [`Signature`]: the permutation-invariant key used for deduplication
//! - [`Move`]: the four click/drag operations and their exact effect
//! - [`Instance`] and [`Shape`]: the fixed parameters of one run and the
//!   coordinate space of the distance table

pub mod error;
pub mod instance;
pub mod inventory;
pub mod moves;

pub use error::{Result, SlotSearchError};
pub use instance::{Instance, OccupancyMode, Shape};
pub use inventory::{Inventory, Quantity, Signature, SlotVec};
pub use moves::Move;

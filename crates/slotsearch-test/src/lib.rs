//! Shared test fixtures for slotsearch crates.
//!
//! This crate provides start inventories and an independent reference search.
//! It depends only on `slotsearch-core` to avoid circular dependencies.
//!
//! - [`fixtures`] - small start inventories with known answers
//! - [`oracle`] - brute-force breadth-first search over raw inventories
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! slotsearch-test = { workspace = true }
//! ```
//!
//! Then compare against the oracle:
//!
//! ```
//! use slotsearch_core::Shape;
//! use slotsearch_test::{brute_force_distances, tiny_instance};
//!
//! let fixture = tiny_instance();
//! let distances = brute_force_distances(&fixture.start, fixture.capacity, 8);
//! assert_eq!(distances[&Shape::new(2, 0)], 2);
//! ```

pub mod fixtures;
pub mod oracle;

pub use fixtures::{small_instance, split_instance, tiny_instance, Fixture};
pub use oracle::{at_most_distances, brute_force_distances};

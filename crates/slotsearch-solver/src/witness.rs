//! Witness replay and verification.

use std::fmt;

use slotsearch_core::{Instance, Inventory, Move, OccupancyMode, Shape};

use crate::table::DistanceTable;

/// A witness that does not lead where its table entry says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WitnessMismatch {
    pub shape: Shape,
    pub distance: u32,
    pub reason: String,
}

impl fmt::Display for WitnessMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "shape {} (distance {}): {}",
            self.shape, self.distance, self.reason
        )
    }
}

/// Re-applies `path` to `start`.
///
/// Fails if a click names a slot the inventory doesn't have.
///
/// # Examples
///
/// ```
/// use slotsearch_core::{Instance, Inventory, Move, Shape};
/// use slotsearch_solver::witness::replay;
///
/// let start = Inventory::new(vec![2, 0], 0);
/// let instance = Instance::for_start(&start, 2).unwrap();
/// let end = replay(&instance, &start, &[Move::ClickOut(0), Move::ClickOut(1)]).unwrap();
/// assert_eq!(end.shape(), Shape::new(2, 0));
/// ```
pub fn replay(instance: &Instance, start: &Inventory, path: &[Move]) -> Result<Inventory, String> {
    let mut current = start.clone();
    for (step, mv) in path.iter().enumerate() {
        if !mv.is_applicable(&current) {
            return Err(format!("move {} ({mv}) names a missing slot", step + 1));
        }
        current = mv.apply(&current, instance.capacity());
    }
    Ok(current)
}

/// Replays every resolved witness in `table` and reports the ones that
/// don't reach their shape in exactly their recorded distance.
///
/// In at-most mode a witness may end with fewer occupied slots than its
/// shape, since empty slots stand in for the rest.
pub fn verify_witnesses(
    table: &DistanceTable,
    start: &Inventory,
    mode: OccupancyMode,
) -> Vec<WitnessMismatch> {
    let instance = table.instance();
    let mut mismatches = Vec::new();

    for (shape, distance, path) in table.resolved() {
        let mismatch = |reason: String| WitnessMismatch {
            shape,
            distance,
            reason,
        };
        if path.len() != distance as usize {
            mismatches.push(mismatch(format!("witness has {} moves", path.len())));
            continue;
        }
        let end = match replay(instance, start, path) {
            Ok(end) => end,
            Err(reason) => {
                mismatches.push(mismatch(reason));
                continue;
            }
        };
        let reached = end.shape();
        let matches = match mode {
            OccupancyMode::Exact => reached == shape,
            OccupancyMode::AtMost => {
                reached.cursor() == shape.cursor() && reached.occupied() <= shape.occupied()
            }
        };
        if !matches {
            mismatches.push(mismatch(format!("witness reaches {reached} ({end})")));
        }
    }
    mismatches
}

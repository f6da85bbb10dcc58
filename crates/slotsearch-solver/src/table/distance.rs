//! Dense per-shape table of minimal move counts and witness paths.

use slotsearch_core::{Instance, Move, Shape};

/// Minimal distance and witness path per shape coordinate.
///
/// Stored densely in table order (`cursor + (capacity + 1) * occupied`).
/// Entries are write-once: [`resolve`](Self::resolve) never overwrites a
/// resolved shape, so the first resolution in breadth-first order stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceTable {
    instance: Instance,
    distances: Vec<Option<u32>>,
    witnesses: Vec<Vec<Move>>,
}

impl DistanceTable {
    /// Creates a table with every shape unresolved.
    pub fn new(instance: Instance) -> Self {
        let len = instance.table_len();
        Self {
            instance,
            distances: vec![None; len],
            witnesses: vec![Vec::new(); len],
        }
    }

    /// Creates a table with `start` resolved at distance 0.
    pub fn seeded(instance: Instance, start: Shape) -> Self {
        let mut table = Self::new(instance);
        table.resolve(start, Vec::new());
        table
    }

    /// Rebuilds a table from its persisted form.
    ///
    /// `sentinel` marks unresolved entries. Fails when lengths disagree with
    /// the instance, when a witness length differs from its distance, or when
    /// an unresolved entry carries a witness.
    pub fn from_encoded(
        instance: Instance,
        distances: Vec<u32>,
        witnesses: Vec<Vec<Move>>,
        sentinel: u32,
    ) -> Result<Self, String> {
        let len = instance.table_len();
        if distances.len() != len {
            return Err(format!(
                "distance table has {} entries, expected {len}",
                distances.len()
            ));
        }
        if witnesses.len() != len {
            return Err(format!(
                "witness table has {} entries, expected {len}",
                witnesses.len()
            ));
        }

        let mut decoded = Vec::with_capacity(len);
        for (idx, (&d, w)) in distances.iter().zip(&witnesses).enumerate() {
            let shape = instance.shape_at(idx);
            if d == sentinel {
                if !w.is_empty() {
                    return Err(format!("unresolved shape {shape} has a witness"));
                }
                decoded.push(None);
            } else if d > sentinel {
                return Err(format!("distance {d} at {shape} exceeds sentinel {sentinel}"));
            } else if w.len() != d as usize {
                return Err(format!(
                    "witness at {shape} has {} moves but distance is {d}",
                    w.len()
                ));
            } else {
                decoded.push(Some(d));
            }
        }

        Ok(Self {
            instance,
            distances: decoded,
            witnesses,
        })
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Minimal distance of `shape`, if resolved.
    pub fn distance(&self, shape: Shape) -> Option<u32> {
        self.distances[self.instance.index_of(shape)]
    }

    /// Witness path of `shape`, if resolved.
    pub fn witness(&self, shape: Shape) -> Option<&[Move]> {
        let idx = self.instance.index_of(shape);
        self.distances[idx].map(|_| self.witnesses[idx].as_slice())
    }

    #[inline]
    pub fn distance_at(&self, index: usize) -> Option<u32> {
        self.distances[index]
    }

    #[inline]
    pub fn witness_at(&self, index: usize) -> &[Move] {
        &self.witnesses[index]
    }

    pub fn is_resolved(&self, shape: Shape) -> bool {
        self.distance(shape).is_some()
    }

    /// Records `path` as the witness for `shape`.
    ///
    /// Returns `false` (leaving the table untouched) if `shape` is already resolved.
    pub fn resolve(&mut self, shape: Shape, path: Vec<Move>) -> bool {
        let idx = self.instance.index_of(shape);
        if self.distances[idx].is_some() {
            return false;
        }
        self.distances[idx] = Some(path.len() as u32);
        self.witnesses[idx] = path;
        true
    }

    pub fn resolved_count(&self) -> usize {
        self.distances.iter().filter(|d| d.is_some()).count()
    }

    /// Largest resolved distance.
    pub fn max_distance(&self) -> Option<u32> {
        self.distances.iter().flatten().copied().max()
    }

    /// Value written for unresolved entries.
    ///
    /// One more than the larger of the capacity and the largest resolved
    /// distance, so it can never be mistaken for a real distance.
    pub fn sentinel(&self) -> u32 {
        let capacity = u32::from(self.instance.capacity());
        capacity.max(self.max_distance().unwrap_or(0)) + 1
    }

    /// Distances in table order with unresolved entries set to `sentinel`.
    pub fn encoded_distances(&self, sentinel: u32) -> Vec<u32> {
        self.distances
            .iter()
            .map(|d| d.unwrap_or(sentinel))
            .collect()
    }

    /// Witness paths in table order (empty for unresolved entries).
    pub fn witnesses(&self) -> &[Vec<Move>] {
        &self.witnesses
    }

    /// Resolved entries in table order.
    pub fn resolved(&self) -> impl Iterator<Item = (Shape, u32, &[Move])> + '_ {
        self.distances
            .iter()
            .enumerate()
            .filter_map(move |(idx, d)| {
                d.map(|d| (self.instance.shape_at(idx), d, self.witnesses[idx].as_slice()))
            })
    }
}

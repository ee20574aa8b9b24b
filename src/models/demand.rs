//! Pending demand: undelivered package counts per destination.

use std::collections::BTreeMap;

use super::Package;

/// Remaining delivery count per destination node.
///
/// Destinations iterate in ascending node id. [`take`](Self::take) and
/// [`restore`](Self::restore) are exact inverses, which is what the
/// backtracking search relies on.
///
/// # Examples
///
/// ```
/// use hub_routing::models::{Package, PendingDemand};
///
/// let packages = [Package::new(0, 0, 3), Package::new(1, 0, 3), Package::new(2, 0, 1)];
/// let mut demand = PendingDemand::from_packages(&packages);
/// assert_eq!(demand.total(), 3);
/// assert_eq!(demand.count(3), 2);
///
/// demand.take(1);
/// assert_eq!(demand.destinations().collect::<Vec<_>>(), vec![3]);
/// demand.restore(1);
/// assert_eq!(demand.count(1), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingDemand {
    counts: BTreeMap<usize, usize>,
    total: usize,
}

impl PendingDemand {
    /// Creates an empty demand map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts packages per destination node.
    pub fn from_packages(packages: &[Package]) -> Self {
        let mut demand = Self::new();
        for p in packages {
            demand.restore(p.destination());
        }
        demand
    }

    /// Removes one pending delivery to `node`.
    ///
    /// Returns `false` (and changes nothing) if `node` has no pending demand.
    pub fn take(&mut self, node: usize) -> bool {
        match self.counts.get_mut(&node) {
            Some(count) => {
                *count -= 1;
                if *count == 0 {
                    self.counts.remove(&node);
                }
                self.total -= 1;
                true
            }
            None => false,
        }
    }

    /// Adds one pending delivery to `node`.
    pub fn restore(&mut self, node: usize) {
        *self.counts.entry(node).or_insert(0) += 1;
        self.total += 1;
    }

    /// Pending deliveries to `node`.
    pub fn count(&self, node: usize) -> usize {
        self.counts.get(&node).copied().unwrap_or(0)
    }

    /// Destinations with pending demand, ascending.
    pub fn destinations(&self) -> impl Iterator<Item = usize> + '_ {
        self.counts.keys().copied()
    }

    /// Number of distinct destinations with pending demand.
    pub fn num_destinations(&self) -> usize {
        self.counts.len()
    }

    /// Total pending deliveries across all destinations.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Returns `true` when everything has been delivered.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

//! Problem instance.

use crate::distance::{shortest_paths, DistanceMatrix};
use crate::error::{Error, Result};

use super::{Hub, Node, Package, PendingDemand};

/// A read-only hub-routing instance.
///
/// Construction validates the preconditions the search depends on and runs
/// the shortest-path preprocessing exactly once; the resulting distance
/// matrix is never modified afterwards.
///
/// # Examples
///
/// ```
/// use hub_routing::distance::DistanceMatrix;
/// use hub_routing::models::{Hub, Node, Package, Problem};
///
/// // 0 - 1 - 2 with unit weights
/// let nodes = vec![Node::new(0, 0, 0), Node::new(1, 1, 0), Node::new(2, 2, 0)];
/// let edges = DistanceMatrix::from_edges(3, &[(0, 1, 1.0), (1, 2, 1.0)]);
/// let problem = Problem::new(
///     nodes,
///     vec![Hub::new(1, 10.0)],
///     vec![Package::new(0, 0, 2)],
///     1,
///     0,
///     edges,
/// )
/// .unwrap();
///
/// assert_eq!(problem.distance(0, 2), 2.0);
/// assert_eq!(problem.total_packages(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Problem {
    nodes: Vec<Node>,
    hubs: Vec<Hub>,
    packages: Vec<Package>,
    capacity: usize,
    depot: usize,
    distances: DistanceMatrix,
    demand: PendingDemand,
}

impl Problem {
    /// Builds a problem from loaded data and a raw edge-weight matrix.
    ///
    /// `edge_weights` holds direct edge weights with `0.0` meaning "no edge";
    /// it is converted into shortest-path distances here.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidCapacity`] if `capacity <= 0`
    /// - [`Error::NodeOutOfRange`] if the depot, a hub, or a package
    ///   destination is not a valid matrix index
    /// - [`Error::InvalidWeight`] for negative or non-finite edge weights
    /// - [`Error::InvalidActivationCost`] for negative or non-finite hub costs
    pub fn new(
        nodes: Vec<Node>,
        hubs: Vec<Hub>,
        packages: Vec<Package>,
        capacity: i64,
        depot: usize,
        mut edge_weights: DistanceMatrix,
    ) -> Result<Self> {
        if capacity <= 0 {
            return Err(Error::InvalidCapacity(capacity));
        }
        let size = edge_weights.size();
        check_index("depot", depot, size)?;
        for hub in &hubs {
            check_index("hub", hub.node_id(), size)?;
            let cost = hub.activation_cost();
            if !cost.is_finite() || cost < 0.0 {
                return Err(Error::InvalidActivationCost {
                    node: hub.node_id(),
                    cost,
                });
            }
        }
        for package in &packages {
            check_index("package destination", package.destination(), size)?;
        }
        for from in 0..size {
            for to in 0..size {
                let weight = edge_weights.get(from, to);
                if !weight.is_finite() || weight < 0.0 {
                    return Err(Error::InvalidWeight { from, to, weight });
                }
            }
        }

        shortest_paths(&mut edge_weights);
        let demand = PendingDemand::from_packages(&packages);

        Ok(Self {
            nodes,
            hubs,
            packages,
            capacity: capacity as usize,
            depot,
            distances: edge_weights,
            demand,
        })
    }

    /// Loaded nodes.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Candidate hubs, in input order.
    pub fn hubs(&self) -> &[Hub] {
        &self.hubs
    }

    /// Packages to deliver.
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// Truck capacity (packages per trip), always positive.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Depot node id.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Shortest-path distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Shortest-path distance between two nodes (`f64::INFINITY` if unreachable).
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// Package count per destination, as derived at construction.
    pub fn demand(&self) -> &PendingDemand {
        &self.demand
    }

    /// Total number of packages.
    pub fn total_packages(&self) -> usize {
        self.packages.len()
    }

    /// Number of nodes covered by the distance matrix.
    pub fn num_nodes(&self) -> usize {
        self.distances.size()
    }
}

fn check_index(kind: &'static str, id: usize, size: usize) -> Result<()> {
    if id >= size {
        return Err(Error::NodeOutOfRange { kind, id, size });
    }
    Ok(())
}

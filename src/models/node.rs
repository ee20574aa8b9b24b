//! Node, hub, and package types.

use serde::{Deserialize, Serialize};

/// A location in the road network.
///
/// # Examples
///
/// ```
/// use hub_routing::models::Node;
///
/// let a = Node::new(0, 0, 0);
/// let b = Node::new(1, 3, 4);
/// assert_eq!(b.id(), 1);
/// assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    id: usize,
    x: i64,
    y: i64,
}

impl Node {
    /// Creates a node at the given planar coordinates.
    pub fn new(id: usize, x: i64, y: i64) -> Self {
        Self { id, x, y }
    }

    /// Node ID (index into the distance matrix).
    pub fn id(&self) -> usize {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> i64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> i64 {
        self.y
    }

    /// Euclidean distance to another node.
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A candidate recharge point that can be activated for a fixed cost.
///
/// Whether a hub is active is decided per search branch, not stored here.
///
/// ```
/// use hub_routing::models::Hub;
///
/// let hub = Hub::new(3, 250.0);
/// assert_eq!(hub.node_id(), 3);
/// assert_eq!(hub.activation_cost(), 250.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hub {
    node_id: usize,
    activation_cost: f64,
}

impl Hub {
    /// Creates a hub located at `node_id`.
    pub fn new(node_id: usize, activation_cost: f64) -> Self {
        Self {
            node_id,
            activation_cost,
        }
    }

    /// Node where the hub is located.
    pub fn node_id(&self) -> usize {
        self.node_id
    }

    /// Fixed cost paid once if the hub is activated.
    pub fn activation_cost(&self) -> f64 {
        self.activation_cost
    }
}

/// A package to deliver.
///
/// Only the destination matters for routing; the origin is the depot by
/// convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    id: usize,
    origin: usize,
    destination: usize,
}

impl Package {
    /// Creates a package travelling from `origin` to `destination`.
    pub fn new(id: usize, origin: usize, destination: usize) -> Self {
        Self {
            id,
            origin,
            destination,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn origin(&self) -> usize {
        self.origin
    }

    pub fn destination(&self) -> usize {
        self.destination
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_new() {
        let n = Node::new(4, 10, -20);
        assert_eq!(n.id(), 4);
        assert_eq!(n.x(), 10);
        assert_eq!(n.y(), -20);
    }

    #[test]
    fn test_node_distance_symmetric() {
        let a = Node::new(0, 1, 2);
        let b = Node::new(1, 4, 6);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
        assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-10);
    }

    #[test]
    fn test_package_fields() {
        let p = Package::new(7, 0, 5);
        assert_eq!(p.id(), 7);
        assert_eq!(p.origin(), 0);
        assert_eq!(p.destination(), 5);
    }

    #[test]
    fn test_hub_serde() {
        let hub = Hub::new(2, 120.5);
        let json = serde_json::to_string(&hub).expect("serialize");
        let back: Hub = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, hub);
    }
}

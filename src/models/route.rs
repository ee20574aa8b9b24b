//! Route type.

use serde::{Deserialize, Serialize};

/// One vehicle trip between two recharge-point visits.
///
/// Holds the visited node ids in order (first and last are recharge points
/// once the route is closed), the cumulative distance, and how many packages
/// were delivered along the way. Consecutive stops at the same node are
/// recorded once.
///
/// # Examples
///
/// ```
/// use hub_routing::models::Route;
///
/// let mut route = Route::new(0);
/// route.deliver(1, 5.0);
/// route.deliver(1, 0.0);
/// route.travel(0, 5.0);
/// assert_eq!(route.nodes(), &[0, 1, 0]);
/// assert_eq!(route.delivered(), 2);
/// assert_eq!(route.distance(), 10.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    nodes: Vec<usize>,
    distance: f64,
    delivered: usize,
}

/// Saved state of a [`Route`] for exact rollback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteMark {
    len: usize,
    distance: f64,
    delivered: usize,
}

impl Route {
    /// Starts an empty route at `start`.
    pub fn new(start: usize) -> Self {
        Self {
            nodes: vec![start],
            distance: 0.0,
            delivered: 0,
        }
    }

    /// Moves to `node` over a leg of length `leg` without delivering.
    pub fn travel(&mut self, node: usize, leg: f64) {
        if self.end() != node {
            self.nodes.push(node);
        }
        self.distance += leg;
    }

    /// Moves to `node` over a leg of length `leg` and delivers one package there.
    pub fn deliver(&mut self, node: usize, leg: f64) {
        self.travel(node, leg);
        self.delivered += 1;
    }

    /// Captures the current state for a later [`rollback`](Self::rollback).
    pub fn checkpoint(&self) -> RouteMark {
        RouteMark {
            len: self.nodes.len(),
            distance: self.distance,
            delivered: self.delivered,
        }
    }

    /// Restores the state captured by `mark`.
    pub fn rollback(&mut self, mark: RouteMark) {
        self.nodes.truncate(mark.len);
        self.distance = mark.distance;
        self.delivered = mark.delivered;
    }

    /// Visited node ids in order.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// First node of the route.
    pub fn start(&self) -> usize {
        self.nodes[0]
    }

    /// Last node reached so far.
    pub fn end(&self) -> usize {
        self.nodes[self.nodes.len() - 1]
    }

    /// Cumulative distance travelled.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Packages delivered on this route.
    pub fn delivered(&self) -> usize {
        self.delivered
    }
}

//! Solution type.

use serde::Serialize;

use super::{Hub, Route};

/// A complete delivery plan: which hubs are activated and the trips driven.
///
/// Cost figures are always derived from the hubs and routes, never stored,
/// so `total_cost() == distance_cost() + activation_cost()` holds exactly.
///
/// # Examples
///
/// ```
/// use hub_routing::models::{Hub, Route, Solution};
///
/// let mut trip = Route::new(0);
/// trip.deliver(2, 2.0);
/// trip.travel(1, 1.0);
///
/// let sol = Solution::new(vec![Hub::new(1, 0.5)], vec![trip]);
/// assert_eq!(sol.distance_cost(), 3.0);
/// assert_eq!(sol.activation_cost(), 0.5);
/// assert_eq!(sol.total_cost(), 3.5);
/// assert_eq!(sol.packages_delivered(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    active_hubs: Vec<Hub>,
    routes: Vec<Route>,
}

impl Solution {
    /// Creates a solution from the activated hubs and the ordered trips.
    pub fn new(active_hubs: Vec<Hub>, routes: Vec<Route>) -> Self {
        Self {
            active_hubs,
            routes,
        }
    }

    /// Activated hubs, in problem order.
    pub fn active_hubs(&self) -> &[Hub] {
        &self.active_hubs
    }

    /// Node ids of the activated hubs.
    pub fn active_hub_ids(&self) -> Vec<usize> {
        self.active_hubs.iter().map(|h| h.node_id()).collect()
    }

    /// Trips in driving order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Number of trips.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Sum of route distances.
    pub fn distance_cost(&self) -> f64 {
        self.routes.iter().map(|r| r.distance()).sum()
    }

    /// Sum of the activated hubs' costs.
    pub fn activation_cost(&self) -> f64 {
        self.active_hubs.iter().map(|h| h.activation_cost()).sum()
    }

    /// Distance cost plus activation cost.
    pub fn total_cost(&self) -> f64 {
        self.distance_cost() + self.activation_cost()
    }

    /// Packages delivered across all routes.
    pub fn packages_delivered(&self) -> usize {
        self.routes.iter().map(|r| r.delivered()).sum()
    }

    /// Concatenates all routes into one path.
    ///
    /// Consecutive routes share a recharge point (one ends where the next
    /// starts), so each subsequent route contributes its nodes after the
    /// first.
    ///
    /// ```
    /// use hub_routing::models::{Route, Solution};
    ///
    /// let mut a = Route::new(0);
    /// a.deliver(4, 1.0);
    /// a.travel(0, 1.0);
    /// let mut b = Route::new(0);
    /// b.deliver(5, 2.0);
    /// b.travel(0, 2.0);
    ///
    /// let sol = Solution::new(vec![], vec![a, b]);
    /// assert_eq!(sol.merged_path(), vec![0, 4, 0, 5, 0]);
    /// ```
    pub fn merged_path(&self) -> Vec<usize> {
        let mut path = Vec::new();
        for (i, route) in self.routes.iter().enumerate() {
            let skip = if i == 0 { 0 } else { 1 };
            path.extend(route.nodes().iter().skip(skip).copied());
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(nodes: &[usize], leg: f64) -> Route {
        let mut r = Route::new(nodes[0]);
        for &n in &nodes[1..nodes.len() - 1] {
            r.deliver(n, leg);
        }
        r.travel(nodes[nodes.len() - 1], leg);
        r
    }

    #[test]
    fn test_solution_empty() {
        let sol = Solution::new(vec![], vec![]);
        assert_eq!(sol.num_routes(), 0);
        assert_eq!(sol.distance_cost(), 0.0);
        assert_eq!(sol.activation_cost(), 0.0);
        assert_eq!(sol.total_cost(), 0.0);
        assert_eq!(sol.packages_delivered(), 0);
        assert!(sol.merged_path().is_empty());
    }

    #[test]
    fn test_solution_costs() {
        let sol = Solution::new(
            vec![Hub::new(1, 100.0), Hub::new(3, 50.0)],
            vec![trip(&[0, 2, 1], 3.0), trip(&[1, 4, 5, 3], 2.0)],
        );
        assert_eq!(sol.num_routes(), 2);
        assert!((sol.distance_cost() - 12.0).abs() < 1e-10);
        assert_eq!(sol.activation_cost(), 150.0);
        assert_eq!(sol.total_cost(), sol.distance_cost() + sol.activation_cost());
        assert_eq!(sol.packages_delivered(), 3);
        assert_eq!(sol.active_hub_ids(), vec![1, 3]);
    }

    #[test]
    fn test_merged_path_shares_boundaries() {
        let sol = Solution::new(
            vec![Hub::new(1, 0.0)],
            vec![trip(&[0, 2, 1], 1.0), trip(&[1, 4, 0], 1.0)],
        );
        assert_eq!(sol.merged_path(), vec![0, 2, 1, 4, 0]);
    }

    #[test]
    fn test_solution_serializes() {
        let sol = Solution::new(vec![Hub::new(1, 2.0)], vec![trip(&[0, 2, 0], 1.0)]);
        let json = serde_json::to_value(&sol).expect("serialize");
        assert_eq!(json["routes"][0]["nodes"], serde_json::json!([0, 2, 0]));
        assert_eq!(json["active_hubs"][0]["node_id"], 1);
    }
}

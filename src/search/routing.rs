//! Capacitated routing search for a fixed set of recharge points.
//!
//! # Algorithm
//!
//! Depth-first branch-and-bound. From the current node the vehicle either
//! delivers one package to one of the `K` nearest pending destinations, or
//! (when it has used some capacity) refills at a recharge point, which
//! closes the current trip. Refilling at the point the truck stands on
//! costs nothing. When nothing is pending, the vehicle returns to its
//! nearest recharge point and the plan is complete.
//!
//! At every step two bounds cut the tree:
//!
//! - **global**: distance so far plus the subset's activation cost already
//!   reaches the best total cost found for any hub subset;
//! - **local**: distance so far already reaches the best plan found for
//!   this recharge-point set.
//!
//! All search state lives in one `SearchContext` that is mutated in place
//! and restored by exact inverse operations on the way back up, so a
//! branching decision costs O(1) state work rather than a copy.

use log::debug;

use crate::models::{PendingDemand, Problem, Route};

use super::bound::GlobalBound;
use super::config::SearchConfig;

/// Minimum-distance set of trips delivering every package.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingPlan {
    /// Total distance driven.
    pub distance: f64,
    /// Trips in driving order.
    pub routes: Vec<Route>,
}

/// Routing search over one recharge-point set.
///
/// # Examples
///
/// ```
/// use hub_routing::distance::DistanceMatrix;
/// use hub_routing::models::{Package, Problem};
/// use hub_routing::search::{GlobalBound, RoutingSearch, SearchConfig};
///
/// // Depot 0, node 1 at distance 5, two packages to node 1, capacity 2
/// let edges = DistanceMatrix::from_edges(2, &[(0, 1, 5.0)]);
/// let packages = vec![Package::new(0, 0, 1), Package::new(1, 0, 1)];
/// let problem = Problem::new(vec![], vec![], packages, 2, 0, edges).unwrap();
///
/// let config = SearchConfig::default();
/// let search = RoutingSearch::new(&problem, &[0], &config);
/// let plan = search.run(0.0, &GlobalBound::unbounded()).unwrap();
///
/// assert_eq!(plan.distance, 10.0);
/// assert_eq!(plan.routes[0].nodes(), &[0, 1, 0]);
/// ```
pub struct RoutingSearch<'a> {
    problem: &'a Problem,
    recharge_points: Vec<usize>,
    config: &'a SearchConfig,
}

/// Mutable state threaded through the recursion.
struct SearchContext {
    node: usize,
    capacity: usize,
    pending: PendingDemand,
    route: Route,
    closed: Vec<Route>,
    closed_distance: f64,
    best_distance: f64,
    best_routes: Option<Vec<Route>>,
    expansions: u64,
}

impl SearchContext {
    /// Distance driven so far, including the open trip.
    fn travelled(&self) -> f64 {
        self.closed_distance + self.route.distance()
    }
}

impl<'a> RoutingSearch<'a> {
    /// Creates a search where the depot and every id in `recharge_points`
    /// refill the truck.
    pub fn new(problem: &'a Problem, recharge_points: &[usize], config: &'a SearchConfig) -> Self {
        let mut points = recharge_points.to_vec();
        points.push(problem.depot());
        points.sort_unstable();
        points.dedup();
        Self {
            problem,
            recharge_points: points,
            config,
        }
    }

    /// Sorted, de-duplicated recharge points (depot included).
    pub fn recharge_points(&self) -> &[usize] {
        &self.recharge_points
    }

    /// Runs the search starting at the depot with a full truck.
    ///
    /// `activation_cost` is the cost of the hubs behind this recharge-point
    /// set, used with `bound` for global pruning. Returns `None` if no plan
    /// beats `bound` or some destination cannot be reached.
    pub fn run(&self, activation_cost: f64, bound: &GlobalBound) -> Option<RoutingPlan> {
        let depot = self.problem.depot();
        let mut ctx = SearchContext {
            node: depot,
            capacity: self.problem.capacity(),
            pending: self.problem.demand().clone(),
            route: Route::new(depot),
            closed: Vec::new(),
            closed_distance: 0.0,
            best_distance: f64::INFINITY,
            best_routes: None,
            expansions: 0,
        };

        self.explore(&mut ctx, activation_cost, bound);

        debug!(
            "recharge points {:?}: {} expansions, best distance {}",
            self.recharge_points, ctx.expansions, ctx.best_distance
        );
        ctx.best_routes.map(|routes| RoutingPlan {
            distance: ctx.best_distance,
            routes,
        })
    }

    fn explore(&self, ctx: &mut SearchContext, activation_cost: f64, bound: &GlobalBound) {
        ctx.expansions += 1;
        let travelled = ctx.travelled();

        if self.config.pruning() {
            if travelled + activation_cost >= bound.get() {
                return;
            }
            if travelled >= ctx.best_distance {
                return;
            }
        }

        if ctx.pending.is_empty() {
            self.finish(ctx, activation_cost, bound);
            return;
        }

        if ctx.capacity > 0 {
            self.deliver(ctx, activation_cost, bound);
        }
        if ctx.capacity < self.problem.capacity() {
            self.recharge(ctx, activation_cost, bound);
        }
    }

    /// Closes the plan by returning to the nearest recharge point.
    fn finish(&self, ctx: &mut SearchContext, activation_cost: f64, bound: &GlobalBound) {
        let Some(home) = self
            .problem
            .distances()
            .nearest(ctx.node, &self.recharge_points)
        else {
            return;
        };
        let leg = self.problem.distance(ctx.node, home);
        let total = ctx.travelled() + leg;
        if total >= ctx.best_distance {
            return;
        }
        if self.config.pruning() && total + activation_cost >= bound.get() {
            return;
        }

        let mark = ctx.route.checkpoint();
        ctx.route.travel(home, leg);

        let mut routes = ctx.closed.clone();
        if ctx.route.delivered() > 0 {
            routes.push(ctx.route.clone());
        }
        ctx.best_distance = routes.iter().map(Route::distance).sum();
        ctx.best_routes = Some(routes);

        ctx.route.rollback(mark);
    }

    fn deliver(&self, ctx: &mut SearchContext, activation_cost: f64, bound: &GlobalBound) {
        let from = ctx.node;
        for target in self.candidates(ctx) {
            let leg = self.problem.distance(from, target);
            let mark = ctx.route.checkpoint();

            ctx.route.deliver(target, leg);
            ctx.pending.take(target);
            ctx.capacity -= 1;
            ctx.node = target;

            self.explore(ctx, activation_cost, bound);

            ctx.node = from;
            ctx.capacity += 1;
            ctx.pending.restore(target);
            ctx.route.rollback(mark);
        }
    }

    fn recharge(&self, ctx: &mut SearchContext, activation_cost: f64, bound: &GlobalBound) {
        let from = ctx.node;
        let capacity = ctx.capacity;
        let closed_distance = ctx.closed_distance;

        // Standing on a recharge point refills in place with a zero-length leg.
        for &point in &self.recharge_points {
            let leg = self.problem.distance(from, point);
            if !leg.is_finite() {
                continue;
            }

            let mark = ctx.route.checkpoint();
            ctx.route.travel(point, leg);
            ctx.closed_distance += ctx.route.distance();
            let finished = std::mem::replace(&mut ctx.route, Route::new(point));
            ctx.closed.push(finished);
            ctx.capacity = self.problem.capacity();
            ctx.node = point;

            self.explore(ctx, activation_cost, bound);

            ctx.node = from;
            ctx.capacity = capacity;
            if let Some(previous) = ctx.closed.pop() {
                ctx.route = previous;
            }
            ctx.route.rollback(mark);
            ctx.closed_distance = closed_distance;
        }
    }

    /// Reachable pending destinations nearest to the current node, ordered
    /// by (distance, node id), truncated to the candidate limit.
    fn candidates(&self, ctx: &SearchContext) -> Vec<usize> {
        let from = ctx.node;
        let mut candidates: Vec<(f64, usize)> = ctx
            .pending
            .destinations()
            .map(|d| (self.problem.distance(from, d), d))
            .filter(|(dist, _)| dist.is_finite())
            .collect();
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        if let Some(k) = self.config.candidate_limit() {
            candidates.truncate(k);
        }
        candidates.into_iter().map(|(_, d)| d).collect()
    }
}

//! Solution evaluator that checks a plan against its problem.

use crate::models::{Problem, Solution};

/// A type of defect found in a solution.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationType {
    /// A route delivers more packages than the truck carries.
    CapacityExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Packages delivered on the route.
        delivered: usize,
        /// Truck capacity.
        capacity: usize,
    },
    /// A route starts or ends somewhere the truck cannot refill.
    NotAtRechargePoint {
        /// Route index in the solution.
        route_index: usize,
        /// Offending node.
        node: usize,
    },
    /// A route's recorded distance disagrees with the distance matrix.
    DistanceMismatch {
        /// Route index in the solution.
        route_index: usize,
        /// Distance stored on the route.
        recorded: f64,
        /// Sum of the matrix distances of the route's legs.
        expected: f64,
    },
    /// Consecutive routes do not share their boundary recharge point.
    Discontinuous {
        /// Index of the route that does not start where the previous ended.
        route_index: usize,
    },
    /// Delivered package count differs from the number of packages.
    DemandMismatch {
        /// Packages delivered across all routes.
        delivered: usize,
        /// Packages in the problem.
        expected: usize,
    },
}

/// A defect in a solution.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// Checks solutions for capacity, recharge-point, distance, and demand
/// consistency.
///
/// # Examples
///
/// ```
/// use hub_routing::distance::DistanceMatrix;
/// use hub_routing::evaluation::SolutionEvaluator;
/// use hub_routing::models::{Package, Problem, Route, Solution};
///
/// let edges = DistanceMatrix::from_edges(2, &[(0, 1, 5.0)]);
/// let problem = Problem::new(vec![], vec![], vec![Package::new(0, 0, 1)], 1, 0, edges).unwrap();
///
/// let mut trip = Route::new(0);
/// trip.deliver(1, 5.0);
/// trip.travel(0, 5.0);
/// let solution = Solution::new(vec![], vec![trip]);
///
/// assert!(SolutionEvaluator::new(&problem).evaluate(&solution).is_empty());
/// ```
pub struct SolutionEvaluator<'a> {
    problem: &'a Problem,
}

const DISTANCE_TOLERANCE: f64 = 1e-6;

impl<'a> SolutionEvaluator<'a> {
    /// Creates an evaluator for solutions of `problem`.
    pub fn new(problem: &'a Problem) -> Self {
        Self { problem }
    }

    /// Returns every violation found in `solution` (empty if valid).
    pub fn evaluate(&self, solution: &Solution) -> Vec<Violation> {
        let mut violations = Vec::new();
        let mut recharge_points = solution.active_hub_ids();
        recharge_points.push(self.problem.depot());

        for (idx, route) in solution.routes().iter().enumerate() {
            if route.delivered() > self.problem.capacity() {
                violations.push(Violation::new(ViolationType::CapacityExceeded {
                    route_index: idx,
                    delivered: route.delivered(),
                    capacity: self.problem.capacity(),
                }));
            }

            for node in [route.start(), route.end()] {
                if !recharge_points.contains(&node) {
                    violations.push(Violation::new(ViolationType::NotAtRechargePoint {
                        route_index: idx,
                        node,
                    }));
                }
            }

            if idx > 0 && solution.routes()[idx - 1].end() != route.start() {
                violations.push(Violation::new(ViolationType::Discontinuous { route_index: idx }));
            }

            let expected: f64 = route
                .nodes()
                .windows(2)
                .map(|leg| self.problem.distance(leg[0], leg[1]))
                .sum();
            if !((route.distance() - expected).abs() <= DISTANCE_TOLERANCE) {
                violations.push(Violation::new(ViolationType::DistanceMismatch {
                    route_index: idx,
                    recorded: route.distance(),
                    expected,
                }));
            }
        }

        if let Some(first) = solution.routes().first() {
            if first.start() != self.problem.depot() {
                violations.push(Violation::new(ViolationType::NotAtRechargePoint {
                    route_index: 0,
                    node: first.start(),
                }));
            }
        }

        let delivered = solution.packages_delivered();
        if delivered != self.problem.total_packages() {
            violations.push(Violation::new(ViolationType::DemandMismatch {
                delivered,
                expected: self.problem.total_packages(),
            }));
        }

        violations
    }
}

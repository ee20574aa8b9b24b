//! Hub-subset enumeration.
//!
//! # Algorithm
//!
//! Every subset of the `H` candidate hubs is encoded as a bit mask and
//! visited once. The empty subset (depot only) is evaluated first to seed
//! the global bound. Each later subset is skipped outright when its
//! activation cost alone already reaches the best total cost; otherwise the
//! routing search runs for `depot ∪ active hubs` and a strictly cheaper
//! result replaces the incumbent.
//!
//! # Complexity
//!
//! O(2^H) routing searches in the worst case; `H` is expected to be small.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Instant;

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::models::{Hub, Problem, Solution};

use super::bound::BestSolution;
use super::config::SearchConfig;
use super::routing::RoutingSearch;

/// Largest hub count whose subsets can be enumerated with a `u64` mask.
pub const MAX_HUBS: usize = 63;

/// Counters describing one hub search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSummary {
    /// Subsets whose routing search was run.
    pub evaluated: usize,
    /// Subsets skipped because their activation cost alone was too high.
    pub skipped: usize,
    /// Evaluated subsets that produced no plan (infeasible or bounded out).
    pub unsolved: usize,
    /// Total cost of every committed improvement, in commit order.
    pub improvements: Vec<f64>,
    /// `true` if the deadline stopped the enumeration early.
    pub timed_out: bool,
}

/// Best solution found plus search statistics.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Cheapest plan, or `None` if no subset can deliver every package.
    pub best: Option<Solution>,
    pub summary: SearchSummary,
}

#[derive(Debug, Default)]
struct Counters {
    evaluated: AtomicUsize,
    skipped: AtomicUsize,
    unsolved: AtomicUsize,
    timed_out: AtomicBool,
}

/// Searches hub activations and routes for the minimum total cost.
///
/// # Examples
///
/// ```
/// use hub_routing::distance::DistanceMatrix;
/// use hub_routing::models::{Hub, Package, Problem};
/// use hub_routing::search::{HubSearch, SearchConfig};
///
/// // 0 - 1 - 2 with unit weights, free hub at 1, one package to 2
/// let edges = DistanceMatrix::from_edges(3, &[(0, 1, 1.0), (1, 2, 1.0)]);
/// let problem = Problem::new(
///     vec![],
///     vec![Hub::new(1, 0.0)],
///     vec![Package::new(0, 0, 2)],
///     1,
///     0,
///     edges,
/// )
/// .unwrap();
///
/// let outcome = HubSearch::new(&problem, SearchConfig::default()).unwrap().run();
/// let best = outcome.best.unwrap();
/// assert_eq!(best.active_hub_ids(), vec![1]);
/// assert_eq!(best.total_cost(), 3.0);
/// ```
pub struct HubSearch<'a> {
    problem: &'a Problem,
    config: SearchConfig,
}

impl<'a> HubSearch<'a> {
    /// Creates a hub search.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidConfig`] if the configuration is unusable
    /// - [`Error::TooManyHubs`] if the problem has more than [`MAX_HUBS`] hubs
    pub fn new(problem: &'a Problem, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        let count = problem.hubs().len();
        if count > MAX_HUBS {
            return Err(Error::TooManyHubs {
                count,
                max: MAX_HUBS,
            });
        }
        Ok(Self { problem, config })
    }

    /// Number of hub subsets (2^H).
    pub fn num_subsets(&self) -> u64 {
        1u64 << self.problem.hubs().len()
    }

    /// Hubs whose bit is set in `mask`, in problem order.
    pub fn active_hubs(&self, mask: u64) -> Vec<Hub> {
        self.problem
            .hubs()
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1u64 << i) != 0)
            .map(|(_, hub)| *hub)
            .collect()
    }

    /// Sum of activation costs of the hubs in `mask`.
    pub fn activation_cost(&self, mask: u64) -> f64 {
        self.active_hubs(mask)
            .iter()
            .map(|h| h.activation_cost())
            .sum()
    }

    /// Enumerates every hub subset and returns the cheapest plan found.
    pub fn run(&self) -> SearchOutcome {
        let started = Instant::now();
        let best = BestSolution::new();
        let counters = Counters::default();

        self.evaluate(0, 0.0, &best, &counters);

        let masks = 1..self.num_subsets();
        if self.config.parallel() {
            masks.into_par_iter().for_each(|mask| {
                self.visit(mask, started, &best, &counters);
            });
        } else {
            for mask in masks {
                if !self.visit(mask, started, &best, &counters) {
                    break;
                }
            }
        }

        let (solution, improvements) = best.into_parts();
        let summary = SearchSummary {
            evaluated: counters.evaluated.into_inner(),
            skipped: counters.skipped.into_inner(),
            unsolved: counters.unsolved.into_inner(),
            improvements,
            timed_out: counters.timed_out.into_inner(),
        };
        info!(
            "hub search finished in {:.3}s: {} subsets evaluated, {} skipped, {} unsolved",
            started.elapsed().as_secs_f64(),
            summary.evaluated,
            summary.skipped,
            summary.unsolved
        );

        SearchOutcome {
            best: solution,
            summary,
        }
    }

    /// Handles one non-empty subset. Returns `false` once the deadline passed.
    fn visit(&self, mask: u64, started: Instant, best: &BestSolution, counters: &Counters) -> bool {
        if let Some(deadline) = self.config.deadline() {
            if started.elapsed() >= deadline {
                if !counters.timed_out.swap(true, Ordering::Relaxed) {
                    warn!("deadline of {:?} reached, stopping hub enumeration", deadline);
                }
                return false;
            }
        }

        let activation = self.activation_cost(mask);
        if activation >= best.bound().get() {
            counters.skipped.fetch_add(1, Ordering::Relaxed);
            debug!("subset {:#b} skipped: activation cost {:.2}", mask, activation);
            return true;
        }

        self.evaluate(mask, activation, best, counters);
        true
    }

    fn evaluate(&self, mask: u64, activation: f64, best: &BestSolution, counters: &Counters) {
        counters.evaluated.fetch_add(1, Ordering::Relaxed);

        let hubs = self.active_hubs(mask);
        let points: Vec<usize> = hubs.iter().map(|h| h.node_id()).collect();
        let search = RoutingSearch::new(self.problem, &points, &self.config);

        match search.run(activation, best.bound()) {
            Some(plan) => {
                debug!(
                    "subset {:#b}: distance {:.2} + hubs {:.2}",
                    mask, plan.distance, activation
                );
                best.offer(Solution::new(hubs, plan.routes));
            }
            None => {
                counters.unsolved.fetch_add(1, Ordering::Relaxed);
                debug!("subset {:#b}: no plan", mask);
            }
        }
    }
}

/// Convenience wrapper returning only the best solution.
///
/// `Ok(None)` means no hub subset can deliver every package.
pub fn solve(problem: &Problem, config: &SearchConfig) -> Result<Option<Solution>> {
    Ok(HubSearch::new(problem, config.clone())?.run().best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::evaluation::SolutionEvaluator;
    use crate::generator::{generate, GeneratorConfig};
    use crate::models::Package;
    use std::time::Duration;

    fn line_problem(hub_cost: f64) -> Problem {
        let edges = DistanceMatrix::from_edges(3, &[(0, 1, 1.0), (1, 2, 1.0)]);
        Problem::new(
            vec![],
            vec![Hub::new(1, hub_cost)],
            vec![Package::new(0, 0, 2)],
            1,
            0,
            edges,
        )
        .expect("valid")
    }

    #[test]
    fn test_free_hub_is_activated() {
        let p = line_problem(0.0);
        let outcome = HubSearch::new(&p, SearchConfig::default()).expect("ok").run();
        let best = outcome.best.expect("solvable");
        assert_eq!(best.active_hub_ids(), vec![1]);
        assert_eq!(best.distance_cost(), 3.0);
        assert_eq!(best.activation_cost(), 0.0);
        assert_eq!(best.routes()[0].nodes(), &[0, 2, 1]);
        assert_eq!(outcome.summary.evaluated, 2);
        assert_eq!(outcome.summary.improvements, vec![4.0, 3.0]);
    }

    #[test]
    fn test_expensive_hub_is_skipped() {
        let p = line_problem(100.0);
        let outcome = HubSearch::new(&p, SearchConfig::default()).expect("ok").run();
        let best = outcome.best.expect("solvable");
        assert!(best.active_hubs().is_empty());
        assert_eq!(best.total_cost(), 4.0);
        assert_eq!(outcome.summary.skipped, 1);
        assert_eq!(outcome.summary.evaluated, 1);
    }

    #[test]
    fn test_hub_that_saves_less_than_it_costs() {
        let p = line_problem(1.0);
        let best = solve(&p, &SearchConfig::default()).expect("ok").expect("solvable");
        // Saving 1.0 of distance for 1.0 of activation is not a strict improvement
        assert!(best.active_hubs().is_empty());
        assert_eq!(best.total_cost(), 4.0);
    }

    #[test]
    fn test_disconnected_destination_has_no_solution() {
        let edges = DistanceMatrix::from_edges(4, &[(0, 1, 1.0), (1, 2, 1.0)]);
        let p = Problem::new(
            vec![],
            vec![Hub::new(1, 0.0), Hub::new(2, 0.0)],
            vec![Package::new(0, 0, 2), Package::new(1, 0, 3)],
            2,
            0,
            edges,
        )
        .expect("valid");
        let outcome = HubSearch::new(&p, SearchConfig::default()).expect("ok").run();
        assert!(outcome.best.is_none());
        assert_eq!(outcome.summary.evaluated, 4);
        assert_eq!(outcome.summary.unsolved, 4);
        assert!(outcome.summary.improvements.is_empty());
    }

    #[test]
    fn test_zero_packages() {
        let edges = DistanceMatrix::from_edges(2, &[(0, 1, 1.0)]);
        let p = Problem::new(vec![], vec![Hub::new(1, 0.0)], vec![], 4, 0, edges).expect("valid");
        let outcome = HubSearch::new(&p, SearchConfig::default()).expect("ok").run();
        let best = outcome.best.expect("trivial");
        assert_eq!(best.num_routes(), 0);
        assert_eq!(best.total_cost(), 0.0);
        assert!(best.active_hubs().is_empty());
        assert_eq!(outcome.summary.skipped, 1);
    }

    #[test]
    fn test_no_hubs() {
        let edges = DistanceMatrix::from_edges(2, &[(0, 1, 5.0)]);
        let p = Problem::new(
            vec![],
            vec![],
            vec![Package::new(0, 0, 1), Package::new(1, 0, 1)],
            2,
            0,
            edges,
        )
        .expect("valid");
        let search = HubSearch::new(&p, SearchConfig::default()).expect("ok");
        assert_eq!(search.num_subsets(), 1);
        let best = search.run().best.expect("solvable");
        assert_eq!(best.total_cost(), 10.0);
        assert_eq!(best.merged_path(), vec![0, 1, 0]);
    }

    #[test]
    fn test_packages_for_the_depot_refill_in_place() {
        let edges = DistanceMatrix::from_edges(2, &[(0, 1, 5.0)]);
        let p = Problem::new(
            vec![],
            vec![],
            vec![Package::new(0, 0, 0), Package::new(1, 0, 0)],
            1,
            0,
            edges,
        )
        .expect("valid");
        let best = solve(&p, &SearchConfig::default())
            .expect("ok")
            .expect("every destination is reachable");
        assert_eq!(best.total_cost(), 0.0);
        assert_eq!(best.num_routes(), 2);
        assert_eq!(best.packages_delivered(), 2);
        assert_eq!(best.merged_path(), vec![0]);
        assert!(SolutionEvaluator::new(&p).evaluate(&best).is_empty());
    }

    #[test]
    fn test_packages_for_a_hub_refill_at_that_hub() {
        let edges = DistanceMatrix::from_edges(2, &[(0, 1, 5.0)]);
        let p = Problem::new(
            vec![],
            vec![Hub::new(1, 0.0)],
            vec![Package::new(0, 0, 1), Package::new(1, 0, 1)],
            1,
            0,
            edges,
        )
        .expect("valid");
        let outcome = HubSearch::new(&p, SearchConfig::default()).expect("ok").run();
        let best = outcome.best.expect("solvable");
        // depot only: two round trips of 10; with the hub: 0 -> 1, refill, deliver
        assert_eq!(outcome.summary.improvements, vec![20.0, 5.0]);
        assert_eq!(best.active_hub_ids(), vec![1]);
        assert_eq!(best.total_cost(), 5.0);
        assert_eq!(best.routes()[0].nodes(), &[0, 1]);
        assert_eq!(best.routes()[1].nodes(), &[1]);
        assert_eq!(best.merged_path(), vec![0, 1]);
        assert!(SolutionEvaluator::new(&p).evaluate(&best).is_empty());
    }

    #[test]
    fn test_active_hubs_from_mask() {
        let edges = DistanceMatrix::from_edges(4, &[(0, 1, 1.0)]);
        let hubs = vec![Hub::new(1, 10.0), Hub::new(2, 20.0), Hub::new(3, 40.0)];
        let p = Problem::new(vec![], hubs, vec![], 1, 0, edges).expect("valid");
        let search = HubSearch::new(&p, SearchConfig::default()).expect("ok");
        assert_eq!(search.num_subsets(), 8);
        assert_eq!(search.active_hubs(0b101).len(), 2);
        assert_eq!(search.activation_cost(0b101), 50.0);
        assert_eq!(search.activation_cost(0), 0.0);
    }

    #[test]
    fn test_too_many_hubs() {
        let edges = DistanceMatrix::from_edges(2, &[(0, 1, 1.0)]);
        let hubs = vec![Hub::new(1, 0.0); MAX_HUBS + 1];
        let p = Problem::new(vec![], hubs, vec![], 1, 0, edges).expect("valid");
        let err = HubSearch::new(&p, SearchConfig::default()).err().expect("rejected");
        assert!(matches!(err, Error::TooManyHubs { count: 64, max: 63 }));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let p = line_problem(0.0);
        let config = SearchConfig::default().with_candidate_limit(0);
        assert!(matches!(
            HubSearch::new(&p, config),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_deadline_keeps_seed_solution() {
        let p = line_problem(0.0);
        let config = SearchConfig::default().with_deadline(Duration::ZERO);
        let outcome = HubSearch::new(&p, config).expect("ok").run();
        assert!(outcome.summary.timed_out);
        assert_eq!(outcome.summary.evaluated, 1);
        assert_eq!(outcome.best.expect("seeded").total_cost(), 4.0);
    }

    fn generated(seed: u64) -> Problem {
        let config = GeneratorConfig::default()
            .with_nodes(9)
            .with_hubs(3)
            .with_packages(5)
            .with_capacity(2)
            .with_seed(seed);
        generate(&config).expect("valid config").into_problem().expect("valid problem")
    }

    #[test]
    fn test_generated_solutions_are_valid() {
        for seed in [1, 7, 42] {
            let p = generated(seed);
            let outcome = HubSearch::new(&p, SearchConfig::default()).expect("ok").run();
            let best = outcome.best.expect("generated instances are connected");
            let violations = SolutionEvaluator::new(&p).evaluate(&best);
            assert!(violations.is_empty(), "seed {seed}: {violations:?}");
            assert_eq!(best.packages_delivered(), p.total_packages());
            assert_eq!(best.total_cost(), best.distance_cost() + best.activation_cost());
            assert!(outcome
                .summary
                .improvements
                .windows(2)
                .all(|w| w[1] < w[0]));
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        for seed in [3, 11] {
            let p = generated(seed);
            let sequential = solve(&p, &SearchConfig::default()).expect("ok").expect("solvable");
            let parallel = solve(&p, &SearchConfig::default().with_parallel(true))
                .expect("ok")
                .expect("solvable");
            assert!((sequential.total_cost() - parallel.total_cost()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_pruning_does_not_change_best_cost() {
        let p = generated(5);
        let pruned = solve(&p, &SearchConfig::exhaustive()).expect("ok").expect("solvable");
        let unpruned = solve(&p, &SearchConfig::exhaustive().with_pruning(false))
            .expect("ok")
            .expect("solvable");
        assert!((pruned.total_cost() - unpruned.total_cost()).abs() < 1e-9);
    }
}

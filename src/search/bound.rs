//! Shared best-known solution and its cost bound.

use std::sync::atomic::{AtomicU64, Ordering};

use log::info;
use parking_lot::Mutex;

use crate::models::Solution;

/// Best known total cost across all hub subsets.
///
/// Stored as the bit pattern of an `f64` so routing workers can read it
/// without locking at every recursive step. The value only ever decreases.
#[derive(Debug)]
pub struct GlobalBound {
    bits: AtomicU64,
}

impl GlobalBound {
    /// A bound that prunes nothing.
    pub fn unbounded() -> Self {
        Self::new(f64::INFINITY)
    }

    pub fn new(value: f64) -> Self {
        Self {
            bits: AtomicU64::new(value.to_bits()),
        }
    }

    /// Current bound.
    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }

    /// Lowers the bound to `value` if that is an improvement.
    pub fn tighten(&self, value: f64) {
        let _ = self
            .bits
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                (value < f64::from_bits(current)).then_some(value.to_bits())
            });
    }
}

impl Default for GlobalBound {
    fn default() -> Self {
        Self::unbounded()
    }
}

#[derive(Debug, Default)]
struct Incumbent {
    solution: Option<Solution>,
    improvements: Vec<f64>,
}

/// The single shared "best solution so far".
///
/// Proposals are compared again after the lock is taken, so a worse solution
/// computed concurrently can never replace a better one.
#[derive(Debug, Default)]
pub struct BestSolution {
    bound: GlobalBound,
    incumbent: Mutex<Incumbent>,
}

impl BestSolution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound used for pruning, equal to the incumbent's total cost.
    pub fn bound(&self) -> &GlobalBound {
        &self.bound
    }

    /// Replaces the incumbent if `candidate` is strictly cheaper.
    ///
    /// Returns `true` if the candidate was committed.
    pub fn offer(&self, candidate: Solution) -> bool {
        let total = candidate.total_cost();
        if total >= self.bound.get() {
            return false;
        }

        let mut incumbent = self.incumbent.lock();
        let current = incumbent
            .solution
            .as_ref()
            .map_or(f64::INFINITY, Solution::total_cost);
        if total >= current {
            return false;
        }

        info!(
            "new best: {:.2} (distance {:.2} + hubs {:.2}) hubs {:?}",
            total,
            candidate.distance_cost(),
            candidate.activation_cost(),
            candidate.active_hub_ids()
        );
        incumbent.solution = Some(candidate);
        incumbent.improvements.push(total);
        self.bound.tighten(total);
        true
    }

    /// Consumes the tracker, returning the best solution and the sequence of
    /// committed total costs.
    pub fn into_parts(self) -> (Option<Solution>, Vec<f64>) {
        let incumbent = self.incumbent.into_inner();
        (incumbent.solution, incumbent.improvements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Hub, Route};

    fn solution_costing(cost: f64) -> Solution {
        let mut r = Route::new(0);
        r.deliver(1, cost / 2.0);
        r.travel(0, cost / 2.0);
        Solution::new(vec![], vec![r])
    }

    #[test]
    fn test_bound_only_decreases() {
        let b = GlobalBound::unbounded();
        assert!(b.get().is_infinite());
        b.tighten(10.0);
        assert_eq!(b.get(), 10.0);
        b.tighten(12.0);
        assert_eq!(b.get(), 10.0);
        b.tighten(3.5);
        assert_eq!(b.get(), 3.5);
    }

    #[test]
    fn test_offer_keeps_cheapest() {
        let best = BestSolution::new();
        assert!(best.offer(solution_costing(20.0)));
        assert!(!best.offer(solution_costing(25.0)));
        assert!(!best.offer(solution_costing(20.0)));
        assert!(best.offer(solution_costing(8.0)));
        assert_eq!(best.bound().get(), 8.0);

        let (sol, improvements) = best.into_parts();
        assert_eq!(sol.expect("has best").total_cost(), 8.0);
        assert_eq!(improvements, vec![20.0, 8.0]);
    }

    #[test]
    fn test_offer_counts_activation_cost() {
        let best = BestSolution::new();
        assert!(best.offer(solution_costing(10.0)));
        let with_hub = Solution::new(vec![Hub::new(2, 5.0)], solution_costing(6.0).routes().to_vec());
        assert!(!best.offer(with_hub));
    }

    #[test]
    fn test_concurrent_offers_keep_minimum() {
        use rayon::prelude::*;

        let best = BestSolution::new();
        (1..200u32)
            .into_par_iter()
            .for_each(|c| {
                best.offer(solution_costing(c as f64));
            });
        let (sol, improvements) = best.into_parts();
        assert_eq!(sol.expect("has best").total_cost(), 1.0);
        assert!(improvements.windows(2).all(|w| w[1] < w[0]));
    }
}

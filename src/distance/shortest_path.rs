//! All-pairs shortest paths over a raw edge-weight matrix.
//!
//! # Algorithm
//!
//! Floyd–Warshall. The raw matrix uses `0.0` for "no direct edge", so
//! every off-diagonal zero is first replaced by `f64::INFINITY` and the
//! diagonal is forced to zero. Then, for every intermediate node `k` (outer
//! loop) and every pair `(i, j)`:
//!
//! ```text
//! d[i][j] = min(d[i][j], d[i][k] + d[k][j])
//! ```
//!
//! # Complexity
//!
//! O(n³) time, in place.
//!
//! # Reference
//!
//! Floyd, R.W. (1962). "Algorithm 97: Shortest path",
//! *Communications of the ACM* 5(6), 345.

use super::DistanceMatrix;

/// Converts a raw edge-weight matrix into shortest-path distances, in place.
///
/// Entries still infinite afterwards denote unreachable pairs. Running it a
/// second time on an already processed matrix leaves it unchanged.
///
/// # Examples
///
/// ```
/// use hub_routing::distance::{shortest_paths, DistanceMatrix};
///
/// // 0 - 1 - 2 with unit weights, 3 isolated
/// let mut dm = DistanceMatrix::from_edges(4, &[(0, 1, 1.0), (1, 2, 1.0)]);
/// shortest_paths(&mut dm);
/// assert_eq!(dm.get(0, 2), 2.0);
/// assert_eq!(dm.get(2, 0), 2.0);
/// assert!(dm.get(0, 3).is_infinite());
/// ```
pub fn shortest_paths(dist: &mut DistanceMatrix) {
    let n = dist.size();

    for i in 0..n {
        for j in 0..n {
            if i == j {
                dist.set(i, j, 0.0);
            } else if dist.get(i, j) == 0.0 {
                dist.set(i, j, f64::INFINITY);
            }
        }
    }

    for k in 0..n {
        for i in 0..n {
            let d_ik = dist.get(i, k);
            if d_ik.is_infinite() {
                continue;
            }
            for j in 0..n {
                let through_k = d_ik + dist.get(k, j);
                if through_k < dist.get(i, j) {
                    dist.set(i, j, through_k);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn line_graph() -> DistanceMatrix {
        DistanceMatrix::from_edges(3, &[(0, 1, 1.0), (1, 2, 1.0)])
    }

    #[test]
    fn test_line_graph() {
        let mut dm = line_graph();
        shortest_paths(&mut dm);
        assert_eq!(dm.get(0, 1), 1.0);
        assert_eq!(dm.get(0, 2), 2.0);
        assert_eq!(dm.get(1, 1), 0.0);
    }

    #[test]
    fn test_shortcut_through_intermediate() {
        // Direct 0-2 edge is longer than going through 1
        let mut dm = DistanceMatrix::from_edges(3, &[(0, 1, 2.0), (1, 2, 3.0), (0, 2, 10.0)]);
        shortest_paths(&mut dm);
        assert_eq!(dm.get(0, 2), 5.0);
        assert_eq!(dm.get(2, 0), 5.0);
    }

    #[test]
    fn test_disconnected_stays_infinite() {
        let mut dm = DistanceMatrix::from_edges(4, &[(0, 1, 1.0), (2, 3, 1.0)]);
        shortest_paths(&mut dm);
        assert!(dm.get(0, 2).is_infinite());
        assert!(dm.get(3, 1).is_infinite());
        assert!(!dm.is_reachable(1, 2));
        assert_eq!(dm.get(2, 3), 1.0);
    }

    #[test]
    fn test_diagonal_forced_to_zero() {
        let mut dm = DistanceMatrix::new(2);
        dm.set(0, 0, 4.0);
        dm.set(0, 1, 3.0);
        dm.set(1, 0, 3.0);
        shortest_paths(&mut dm);
        assert_eq!(dm.get(0, 0), 0.0);
        assert_eq!(dm.get(0, 1), 3.0);
    }

    #[test]
    fn test_idempotent() {
        let mut dm = DistanceMatrix::from_edges(
            5,
            &[(0, 1, 4.0), (1, 2, 1.0), (2, 3, 2.5), (0, 3, 9.0)],
        );
        shortest_paths(&mut dm);
        let once = dm.clone();
        shortest_paths(&mut dm);
        assert_eq!(dm, once);
    }

    fn arb_edges() -> impl Strategy<Value = (usize, Vec<(usize, usize, f64)>)> {
        (2usize..8).prop_flat_map(|n| {
            let edge = (0..n, 0..n, 1u32..100).prop_map(|(u, v, w)| (u, v, w as f64));
            (Just(n), proptest::collection::vec(edge, 0..(n * 2)))
        })
    }

    proptest! {
        #[test]
        fn prop_triangle_inequality((n, edges) in arb_edges()) {
            let mut dm = DistanceMatrix::from_edges(n, &edges);
            shortest_paths(&mut dm);
            for i in 0..n {
                for j in 0..n {
                    for k in 0..n {
                        prop_assert!(dm.get(i, j) <= dm.get(i, k) + dm.get(k, j));
                    }
                }
            }
        }

        #[test]
        fn prop_symmetry_preserved((n, edges) in arb_edges()) {
            let mut dm = DistanceMatrix::from_edges(n, &edges);
            shortest_paths(&mut dm);
            for i in 0..n {
                for j in 0..n {
                    prop_assert_eq!(dm.get(i, j), dm.get(j, i));
                }
            }
        }

        #[test]
        fn prop_second_pass_changes_nothing((n, edges) in arb_edges()) {
            let mut dm = DistanceMatrix::from_edges(n, &edges);
            shortest_paths(&mut dm);
            let once = dm.clone();
            shortest_paths(&mut dm);
            prop_assert_eq!(dm, once);
        }
    }
}

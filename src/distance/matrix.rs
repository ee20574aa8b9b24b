//! Dense distance matrix.

use crate::models::Node;

/// A dense n×n distance matrix stored in row-major order.
///
/// Before preprocessing the entries are raw edge weights where an
/// off-diagonal `0.0` means "no direct edge". After
/// [`shortest_paths`](super::shortest_paths) every entry is a shortest-path
/// distance, with `f64::INFINITY` marking unreachable pairs.
///
/// # Examples
///
/// ```
/// use hub_routing::models::Node;
/// use hub_routing::distance::DistanceMatrix;
///
/// let nodes = vec![Node::new(0, 0, 0), Node::new(1, 3, 4), Node::new(2, 6, 8)];
/// let dm = DistanceMatrix::from_nodes(&nodes);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes a complete Euclidean distance matrix from node coordinates.
    ///
    /// Nodes are indexed by their position in the slice.
    pub fn from_nodes(nodes: &[Node]) -> Self {
        let n = nodes.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = nodes[i].distance_to(&nodes[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Builds a raw, symmetric edge-weight matrix from an undirected edge list.
    ///
    /// Pairs without an edge stay at `0.0`. Edges with an endpoint outside
    /// `0..size` are ignored.
    ///
    /// ```
    /// use hub_routing::distance::DistanceMatrix;
    ///
    /// let dm = DistanceMatrix::from_edges(3, &[(0, 1, 2.5), (1, 2, 1.0), (2, 7, 9.0)]);
    /// assert_eq!(dm.get(1, 0), 2.5);
    /// assert_eq!(dm.get(0, 2), 0.0);
    /// ```
    pub fn from_edges(size: usize, edges: &[(usize, usize, f64)]) -> Self {
        let mut dm = Self::new(size);
        for &(u, v, w) in edges {
            if u < size && v < size {
                dm.set(u, v, w);
                dm.set(v, u, w);
            }
        }
        dm
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if `to` can be reached from `from`.
    pub fn is_reachable(&self, from: usize, to: usize) -> bool {
        self.get(from, to).is_finite()
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    ///
    /// Two infinite entries compare as equal.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                let (a, b) = (self.get(i, j), self.get(j, i));
                if a == b {
                    continue;
                }
                if (a - b).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns the candidate nearest to `from`, ignoring unreachable ones.
    ///
    /// Ties go to the lowest node id regardless of the order of
    /// `candidates`. Returns `None` if no candidate is reachable.
    pub fn nearest(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        candidates
            .iter()
            .copied()
            .filter(|&c| self.is_reachable(from, c))
            .min_by(|&a, &b| {
                self.get(from, a)
                    .total_cmp(&self.get(from, b))
                    .then(a.cmp(&b))
            })
    }
}

//! Distance matrices and all-pairs shortest-path preprocessing.

mod matrix;
mod shortest_path;

pub use matrix::DistanceMatrix;
pub use shortest_path::shortest_paths;

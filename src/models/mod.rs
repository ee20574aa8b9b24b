//! Domain model types for hub-based delivery routing.
//!
//! Provides the core abstractions: nodes, candidate hubs with activation
//! costs, packages aggregated into pending demand, routes as ordered trips
//! between recharge points, and the problem and solution aggregates.

mod demand;
mod node;
mod problem;
mod route;
mod solution;

pub use demand::PendingDemand;
pub use node::{Hub, Node, Package};
pub use problem::Problem;
pub use route::{Route, RouteMark};
pub use solution::Solution;

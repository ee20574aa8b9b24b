//! Exact search over hub activations and delivery routes.
//!
//! - [`HubSearch`] — enumerates hub subsets, seeding with the empty one
//! - [`RoutingSearch`] — branch-and-bound routing for one recharge-point set
//! - [`GlobalBound`] / [`BestSolution`] — incumbent shared across subsets and threads
//! - [`SearchConfig`] — candidate limit, pruning, parallelism and deadline

mod bound;
mod config;
mod hubs;
mod routing;

pub use bound::{BestSolution, GlobalBound};
pub use config::{SearchConfig, DEFAULT_CANDIDATE_LIMIT};
pub use hubs::{solve, HubSearch, SearchOutcome, SearchSummary, MAX_HUBS};
pub use routing::{RoutingPlan, RoutingSearch};

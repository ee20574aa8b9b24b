//! # hub-routing
//!
//! Exact solver for a single-vehicle capacitated delivery problem with
//! optional recharge hubs. Every subset of candidate hubs is tried; for
//! each one a branch-and-bound search finds the shortest set of trips that
//! delivers every package, and the subset with the lowest distance plus
//! activation cost wins.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Node, Hub, Package, Route, Solution, Problem)
//! - [`distance`] — Distance matrix and all-pairs shortest paths
//! - [`search`] — Hub-subset enumeration and capacitated routing search
//! - [`evaluation`] — Independent validation of finished solutions
//! - [`io`] — Problem file reader and report writer
//! - [`generator`] — Random connected instance generator
//! - [`error`] — Crate error type

pub mod distance;
pub mod error;
pub mod evaluation;
pub mod generator;
pub mod io;
pub mod models;
pub mod search;

pub use error::{Error, Result};

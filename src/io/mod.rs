//! Problem file reading and solution report writing.
//!
//! - [`parse_problem`] / [`read_problem`] — sectioned text format to [`Problem`](crate::models::Problem)
//! - [`render_report`] / [`write_report`] — plain-text report
//! - [`render_json`] — JSON report with derived cost figures

mod reader;
mod writer;

pub use reader::{parse_problem, read_problem};
pub use writer::{render_json, render_report, write_report};

pub(crate) use reader::{
    HEADER_CONFIG, HEADER_EDGES, HEADER_HUBS, HEADER_NODES, HEADER_PACKAGES, KEY_CAPACITY,
    KEY_DEPOT, KEY_HUBS, KEY_NODES, KEY_PACKAGES,
};

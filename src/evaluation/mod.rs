//! Solution validation.

mod evaluator;

pub use evaluator::{SolutionEvaluator, Violation, ViolationType};

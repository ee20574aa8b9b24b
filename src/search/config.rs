//! Search configuration.

use std::time::Duration;

use crate::error::{Error, Result};

/// Default number of nearest pending destinations branched on per step.
pub const DEFAULT_CANDIDATE_LIMIT: usize = 5;

/// Tuning knobs for the hub and routing search.
///
/// The candidate limit trades optimality for speed: with a limit of `K`,
/// each delivery step only branches on the `K` nearest pending
/// destinations. Use [`SearchConfig::exhaustive`] to branch on all of them.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use hub_routing::search::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_candidate_limit(3)
///     .with_parallel(true)
///     .with_deadline(Duration::from_secs(30));
/// assert_eq!(config.candidate_limit(), Some(3));
/// assert!(config.parallel());
///
/// assert_eq!(SearchConfig::exhaustive().candidate_limit(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    candidate_limit: Option<usize>,
    pruning: bool,
    parallel: bool,
    deadline: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            candidate_limit: Some(DEFAULT_CANDIDATE_LIMIT),
            pruning: true,
            parallel: false,
            deadline: None,
        }
    }
}

impl SearchConfig {
    /// Default configuration without the nearest-candidate restriction.
    pub fn exhaustive() -> Self {
        Self {
            candidate_limit: None,
            ..Self::default()
        }
    }

    /// Branches on at most `k` nearest pending destinations per step.
    pub fn with_candidate_limit(mut self, k: usize) -> Self {
        self.candidate_limit = Some(k);
        self
    }

    /// Enables or disables the global and local distance bounds.
    ///
    /// Disabling them never changes the result of an exhaustive search, only
    /// its running time.
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    /// Evaluates hub subsets on the rayon thread pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Stops starting new hub subsets once `deadline` has elapsed.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn candidate_limit(&self) -> Option<usize> {
        self.candidate_limit
    }

    pub fn pruning(&self) -> bool {
        self.pruning
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Rejects settings under which no delivery could ever be made.
    pub fn validate(&self) -> Result<()> {
        if self.candidate_limit == Some(0) {
            return Err(Error::invalid_config("candidate limit must be at least 1"));
        }
        Ok(())
    }
}

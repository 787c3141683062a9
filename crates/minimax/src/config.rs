//! Minimax configuration parameters.
//!
//! The search is always exhaustive; configuration only changes how the work
//! is scheduled, never the result.

/// Minimax configuration parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MinimaxConfig {
    /// Evaluate the root's actions concurrently on the rayon thread pool.
    /// Values are collected in action order before the best one is chosen,
    /// so the result matches a sequential search.
    pub parallel_root: bool,
}

impl MinimaxConfig {
    /// Single-threaded search.
    pub fn sequential() -> Self {
        Self {
            parallel_root: false,
        }
    }

    /// Root actions evaluated in parallel.
    pub fn parallel() -> Self {
        Self {
            parallel_root: true,
        }
    }
}

//! Search configuration.

/// Configuration parameters for the backtracking search.
///
/// # Examples
///
/// ```
/// use u_roster::solver::SearchConfig;
///
/// let config = SearchConfig::default().with_node_limit(10_000);
/// assert_eq!(config.node_limit, 10_000);
/// ```
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum number of branch nodes to explore before giving up with
    /// [`crate::solver::SearchStatus::NodeLimit`].
    pub node_limit: usize,
    /// Explore the two branches of the first decision on separate threads.
    ///
    /// Requires the `parallel` cargo feature; without it the flag is
    /// ignored and the search runs sequentially. Parallel runs report a
    /// valid solution but do not promise the same solution as the
    /// sequential engine.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            node_limit: 1_000_000,
            parallel: false,
        }
    }
}

impl SearchConfig {
    /// Sets the branch-node budget.
    pub fn with_node_limit(mut self, limit: usize) -> Self {
        self.node_limit = limit;
        self
    }

    /// Enables or disables the parallel root split.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.node_limit, 1_000_000);
        assert!(!config.parallel);
    }

    #[test]
    fn test_config_builder() {
        let config = SearchConfig::default()
            .with_node_limit(42)
            .with_parallel(true);
        assert_eq!(config.node_limit, 42);
        assert!(config.parallel);
    }
}

//! Search configuration parameters.

/// Configuration for a Monte Carlo tree search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Number of selection/expansion/simulation/backpropagation cycles per
    /// search. The budget is an iteration count, not wall-clock time.
    pub iterations: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iterations: 500_000,
        }
    }
}

impl SearchConfig {
    /// Create a small-budget config for fast tests.
    pub fn for_testing() -> Self {
        Self { iterations: 200 }
    }

    /// Builder pattern: set the iteration budget.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }
}

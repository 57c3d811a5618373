//! Benchmark parameter types.

use std::fmt;

/// Parameters for a realization benchmark run.
#[derive(Clone, Debug)]
pub struct RealizeBenchParams {
    /// Number of taxa in the generated metric.
    pub taxa: usize,
}

impl fmt::Display for RealizeBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "taxa={}", self.taxa)
    }
}

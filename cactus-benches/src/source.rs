//! Synthetic tree metrics for benchmarking.
//!
//! [`TreeMetricSource`] samples a random weighted tree whose leaves are the
//! taxa and exposes the induced leaf-to-leaf path lengths. Such metrics are
//! realized exactly, so every run exercises auxiliary insertion, shadow
//! merging and pruning on a known answer.

use std::collections::VecDeque;

use cactus_core::{DataSource, DataSourceError, DistanceMatrix, MatrixError};
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Largest integral edge weight sampled for the hidden tree.
const MAX_EDGE_WEIGHT: u32 = 9;

/// Errors that may occur during synthetic metric generation.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum SyntheticError {
    /// Fewer than two taxa were requested.
    #[error("a tree metric needs at least two taxa (got {taxa})")]
    TooFewTaxa {
        /// The requested taxon count.
        taxa: usize,
    },
}

/// Configuration for synthetic tree generation.
#[derive(Clone, Debug)]
pub struct TreeMetricConfig {
    /// Number of taxa (tree leaves).
    pub taxa: usize,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// A [`DataSource`] holding the leaf metric of a random weighted tree.
///
/// # Examples
///
/// ```
/// use cactus_benches::source::{TreeMetricConfig, TreeMetricSource};
/// use cactus_core::DataSource;
///
/// let config = TreeMetricConfig { taxa: 6, seed: 42 };
/// let source = TreeMetricSource::generate(&config).expect("valid config");
/// assert_eq!(source.len(), 6);
/// assert_eq!(source.distance(2, 2).expect("in range"), 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct TreeMetricSource {
    taxa: usize,
    distances: Vec<f64>,
}

impl TreeMetricSource {
    /// Samples a tree and computes its leaf metric.
    ///
    /// Internal vertices form a random recursive tree; every taxon then hangs
    /// off a random internal vertex. Weights are integers so that path sums
    /// are exact.
    ///
    /// # Errors
    ///
    /// Returns [`SyntheticError::TooFewTaxa`] if `taxa` is below two.
    pub fn generate(config: &TreeMetricConfig) -> Result<Self, SyntheticError> {
        let taxa = config.taxa;
        if taxa < 2 {
            return Err(SyntheticError::TooFewTaxa { taxa });
        }
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let internal = (taxa / 2).max(1);
        let mut adjacency = vec![Vec::new(); internal + taxa];
        let mut connect = |from: usize, to: usize, rng: &mut SmallRng| {
            let weight = f64::from(rng.gen_range(1..=MAX_EDGE_WEIGHT));
            adjacency[from].push((to, weight));
            adjacency[to].push((from, weight));
        };
        for vertex in 1..internal {
            let parent = rng.gen_range(0..vertex);
            connect(parent, vertex, &mut rng);
        }
        for leaf in 0..taxa {
            let parent = rng.gen_range(0..internal);
            connect(parent, internal + leaf, &mut rng);
        }

        let mut distances = Vec::with_capacity(taxa * taxa);
        for leaf in 0..taxa {
            let reach = path_lengths(&adjacency, internal + leaf);
            distances.extend_from_slice(&reach[internal..]);
        }
        Ok(Self { taxa, distances })
    }

    /// Copies the metric into a validated [`DistanceMatrix`].
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError`] if the generated rows fail validation.
    pub fn to_matrix(&self) -> Result<DistanceMatrix, MatrixError> {
        DistanceMatrix::try_from_rows(
            self.distances
                .chunks(self.taxa)
                .map(<[f64]>::to_vec)
                .collect(),
        )
    }
}

/// Path length from `source` to every vertex of a tree.
fn path_lengths(adjacency: &[Vec<(usize, f64)>], source: usize) -> Vec<f64> {
    let mut lengths = vec![f64::INFINITY; adjacency.len()];
    lengths[source] = 0.0;
    let mut queue = VecDeque::from([source]);
    while let Some(vertex) = queue.pop_front() {
        for &(next, weight) in &adjacency[vertex] {
            if lengths[next].is_infinite() {
                lengths[next] = lengths[vertex] + weight;
                queue.push_back(next);
            }
        }
    }
    lengths
}

impl DataSource for TreeMetricSource {
    fn len(&self) -> usize {
        self.taxa
    }

    fn name(&self) -> &str {
        "tree-metric"
    }

    fn distance(&self, i: usize, j: usize) -> Result<f64, DataSourceError> {
        if i >= self.taxa {
            return Err(DataSourceError::OutOfBounds { index: i });
        }
        if j >= self.taxa {
            return Err(DataSourceError::OutOfBounds { index: j });
        }
        self.distances
            .get(i * self.taxa + j)
            .copied()
            .ok_or(DataSourceError::OutOfBounds { index: i })
    }
}

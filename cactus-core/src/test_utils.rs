//! Shared test utilities for `cactus-core`.

use cactus_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::{
    datasource::DataSource, error::DataSourceError, graph::WeightedGraph, matrix::DistanceMatrix,
};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROGTEST_CASES` and
/// `CACTUS_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Builds a matrix from literal rows, panicking on invalid fixtures.
pub(crate) fn matrix(rows: &[&[f64]]) -> DistanceMatrix {
    let rows = rows.iter().map(|row| row.to_vec()).collect::<Vec<_>>();
    DistanceMatrix::try_from_rows(rows).expect("fixture matrix must be valid")
}

/// Scenario A: a four-taxon tree metric with two internal vertices.
pub(crate) fn tree_metric() -> DistanceMatrix {
    matrix(&[
        &[0.0, 5.0, 7.0, 7.0],
        &[5.0, 0.0, 8.0, 8.0],
        &[7.0, 8.0, 0.0, 6.0],
        &[7.0, 8.0, 6.0, 0.0],
    ])
}

/// Scenario B: four equidistant points, realized by a star.
pub(crate) fn uniform_metric() -> DistanceMatrix {
    matrix(&[
        &[0.0, 2.0, 2.0, 2.0],
        &[2.0, 0.0, 2.0, 2.0],
        &[2.0, 2.0, 0.0, 2.0],
        &[2.0, 2.0, 2.0, 0.0],
    ])
}

/// Shortest-path metric of `graph` computed with Floyd-Warshall.
///
/// Kept independent of [`crate::verify`] so the two can check each other.
pub(crate) fn floyd_warshall(graph: &WeightedGraph) -> Vec<Vec<f64>> {
    let n = graph.vertex_count();
    let mut dist = vec![vec![f64::INFINITY; n]; n];
    for (index, row) in dist.iter_mut().enumerate() {
        row[index] = 0.0;
    }
    for (edge, weight) in graph.edges() {
        let (u, v) = (edge.u(), edge.v());
        dist[u][v] = dist[u][v].min(weight);
        dist[v][u] = dist[u][v];
    }
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                let via = dist[i][k] + dist[k][j];
                if via < dist[i][j] {
                    dist[i][j] = via;
                }
            }
        }
    }
    dist
}

/// [`DataSource`] implementation that records distance invocations for tests.
#[derive(Clone)]
pub(crate) struct CountingSource {
    data: Vec<f64>,
    calls: Arc<AtomicUsize>,
}

impl CountingSource {
    /// Creates a counting source over points on a line.
    #[must_use]
    pub(crate) fn new(data: Vec<f64>, calls: Arc<AtomicUsize>) -> Self {
        Self { data, calls }
    }

    /// Returns the backing distance counter for assertions.
    #[must_use]
    pub(crate) fn calls(&self) -> &Arc<AtomicUsize> {
        &self.calls
    }
}

impl DataSource for CountingSource {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn name(&self) -> &str {
        "counting"
    }

    fn distance(&self, left: usize, right: usize) -> Result<f64, DataSourceError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let a = self
            .data
            .get(left)
            .ok_or(DataSourceError::OutOfBounds { index: left })?;
        let b = self
            .data
            .get(right)
            .ok_or(DataSourceError::OutOfBounds { index: right })?;
        Ok((a - b).abs())
    }
}

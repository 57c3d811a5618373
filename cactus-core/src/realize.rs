//! Final realization: complete graph on a matrix, then triangle pruning.

use crate::{DistanceMatrix, Tolerances, UEdge, WeightedGraph};

/// Number of decimal places kept in realized edge weights.
pub const WEIGHT_DECIMALS: i32 = 5;

/// Rounds `weight` to [`WEIGHT_DECIMALS`] decimal places.
///
/// # Examples
/// ```
/// use cactus_core::realize::round_weight;
///
/// assert_eq!(round_weight(1.234_567), 1.234_57);
/// assert_eq!(round_weight(2.0), 2.0);
/// ```
#[must_use]
pub fn round_weight(weight: f64) -> f64 {
    let scale = 10_f64.powi(WEIGHT_DECIMALS);
    (weight * scale).round() / scale
}

/// Builds the complete graph on `matrix`, one edge per unordered pair,
/// weighted by the rounded distance.
#[must_use]
pub fn build_complete(matrix: &DistanceMatrix) -> WeightedGraph {
    let mut graph = WeightedGraph::new(matrix.dimension());
    for i in matrix.vertices() {
        for j in (i + 1)..matrix.dimension() {
            // Endpoints are distinct and in range by construction.
            let _ = graph.put_edge(i, j, round_weight(matrix.get(i, j)));
        }
    }
    graph
}

/// Returns `true` when some third vertex `k` offers a two-hop path `i-k-j`
/// no longer than `D[i][j]`.
pub(crate) fn is_dominated(
    matrix: &DistanceMatrix,
    candidates: impl IntoIterator<Item = usize>,
    edge: UEdge,
    tolerances: &Tolerances,
) -> bool {
    let (i, j) = (edge.u(), edge.v());
    let direct = matrix.get(i, j);
    candidates.into_iter().any(|k| {
        if k == i || k == j {
            return false;
        }
        let left = matrix.get(i, k);
        let right = matrix.get(k, j);
        left > 0.0 && right > 0.0 && tolerances.dominates(left, right, direct)
    })
}

/// Removes every edge of `graph` dominated by a two-hop path in `matrix`,
/// returning the number of edges removed.
///
/// Domination is decided for all edges before any removal, so the result does
/// not depend on edge order. Runs in `O(n^3)`.
pub fn prune_redundant_edges(
    matrix: &DistanceMatrix,
    graph: &mut WeightedGraph,
    tolerances: &Tolerances,
) -> usize {
    let redundant = graph
        .edges()
        .map(|(edge, _)| edge)
        .filter(|edge| is_dominated(matrix, matrix.vertices(), *edge, tolerances))
        .collect::<Vec<_>>();
    for edge in &redundant {
        graph.remove_edge(edge.u(), edge.v());
    }
    redundant.len()
}

//! Local compactification: dominance graphs and vertex finalisation.

use std::collections::BTreeSet;

use crate::{
    DistanceMatrix, Tolerances, UEdge, WeightedGraph, error::GraphError, realize::is_dominated,
};

/// Output of [`build_graph_piece`].
#[derive(Clone, Debug, PartialEq)]
pub struct GraphPiece {
    /// Edges incident to vertices finalised this round.
    pub piece: WeightedGraph,
    /// The dominance graph with every edge touching a compacted vertex removed.
    pub dominance: WeightedGraph,
    /// The processed subset `active ∪ auxiliary`.
    pub processed: BTreeSet<usize>,
    /// Size of the compacted set before this round, for stall detection.
    pub compacted_before: usize,
}

/// Whether the caller should keep working on the current subset.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PostBuild {
    /// Residual dominance edges still need processing.
    Continue,
    /// Nothing is left to do for this subset.
    Stop,
}

/// Builds the dominance graph over `processed` and finalises every vertex of
/// degree at most two.
///
/// An edge `(x, y)` survives unless some `z` in the subset gives a non-zero
/// two-hop path `x-z-y` no longer than `D[x,y]`.
pub fn dominance_graph(
    matrix: &DistanceMatrix,
    processed: &BTreeSet<usize>,
    tolerances: &Tolerances,
) -> WeightedGraph {
    let mut dominance = WeightedGraph::new(matrix.dimension());
    for &x in processed {
        for &y in processed.range(x + 1..) {
            let Ok(edge) = UEdge::new(x, y) else {
                continue;
            };
            if !is_dominated(matrix, processed.iter().copied(), edge, tolerances) {
                // Both endpoints index rows of `matrix`.
                let _ = dominance.put_edge(x, y, matrix.get(x, y));
            }
        }
    }
    dominance
}

/// Computes the dominance graph over `active ∪ auxiliary`, moves the edges of
/// low-degree vertices into a graph piece, and records those vertices in
/// `compacted`.
pub fn build_graph_piece(
    matrix: &DistanceMatrix,
    active: &BTreeSet<usize>,
    auxiliary: &BTreeSet<usize>,
    compacted: &mut BTreeSet<usize>,
    tolerances: &Tolerances,
) -> GraphPiece {
    let processed = active.union(auxiliary).copied().collect::<BTreeSet<_>>();
    let compacted_before = compacted.len();
    let mut dominance = dominance_graph(matrix, &processed, tolerances);

    let mut piece = WeightedGraph::new(matrix.dimension());
    for &vertex in &processed {
        let neighbors = dominance.neighbors(vertex);
        if neighbors.len() > 2 {
            continue;
        }
        compacted.insert(vertex);
        for neighbor in neighbors {
            if let Some(weight) = dominance.weight(vertex, neighbor) {
                let _ = piece.put_edge(vertex, neighbor, weight);
            }
        }
    }

    dominance.retain_edges(|edge, _| !compacted.contains(&edge.u()) && !compacted.contains(&edge.v()));

    GraphPiece {
        piece,
        dominance,
        processed,
        compacted_before,
    }
}

/// Detects a stalled round and resolves it.
///
/// When `compacted` did not grow, every remaining dominance edge between
/// uncompacted vertices is accepted into `scaffold` as-is and the whole subset
/// is finalised. Returns [`PostBuild::Stop`] when the subset was already fully
/// compacted.
///
/// # Errors
/// Returns [`GraphError`] when `scaffold` cannot hold a dominance edge.
pub fn handle_post_build(
    processed: &BTreeSet<usize>,
    compacted: &mut BTreeSet<usize>,
    compacted_before: usize,
    dominance: &mut WeightedGraph,
    scaffold: &mut WeightedGraph,
) -> Result<PostBuild, GraphError> {
    if compacted.len() != compacted_before {
        return Ok(PostBuild::Continue);
    }
    let remaining = processed
        .difference(compacted)
        .copied()
        .collect::<BTreeSet<_>>();
    if remaining.is_empty() {
        return Ok(PostBuild::Stop);
    }

    compacted.extend(processed.iter().copied());
    let internal = dominance
        .edges()
        .filter(|(edge, _)| remaining.contains(&edge.u()) && remaining.contains(&edge.v()))
        .collect::<Vec<_>>();
    for (edge, weight) in internal {
        scaffold.put_edge(edge.u(), edge.v(), weight)?;
        dominance.remove_edge(edge.u(), edge.v());
    }
    Ok(PostBuild::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{matrix, uniform_metric};

    fn set(values: &[usize]) -> BTreeSet<usize> {
        values.iter().copied().collect()
    }

    fn edge_list(graph: &WeightedGraph) -> Vec<(usize, usize)> {
        graph.edges().map(|(edge, _)| (edge.u(), edge.v())).collect()
    }

    #[test]
    fn dominance_graph_keeps_only_tight_edges() {
        let path = matrix(&[&[0.0, 1.0, 3.0], &[1.0, 0.0, 2.0], &[3.0, 2.0, 0.0]]);
        let dominance = dominance_graph(&path, &set(&[0, 1, 2]), &Tolerances::default());
        assert_eq!(edge_list(&dominance), [(0, 1), (1, 2)]);
    }

    #[test]
    fn low_degree_vertices_are_finalised() {
        let path = matrix(&[&[0.0, 1.0, 3.0], &[1.0, 0.0, 2.0], &[3.0, 2.0, 0.0]]);
        let mut compacted = BTreeSet::new();
        let piece = build_graph_piece(
            &path,
            &set(&[0, 1, 2]),
            &BTreeSet::new(),
            &mut compacted,
            &Tolerances::default(),
        );
        assert_eq!(compacted, set(&[0, 1, 2]));
        assert_eq!(piece.compacted_before, 0);
        assert_eq!(edge_list(&piece.piece), [(0, 1), (1, 2)]);
        assert_eq!(piece.dominance.edge_count(), 0);
    }

    #[test]
    fn high_degree_vertices_stay_open() {
        // Four equidistant points: every vertex has dominance degree three.
        let mut compacted = BTreeSet::new();
        let piece = build_graph_piece(
            &uniform_metric(),
            &set(&[0, 1, 2, 3]),
            &BTreeSet::new(),
            &mut compacted,
            &Tolerances::default(),
        );
        assert!(compacted.is_empty());
        assert_eq!(piece.piece.edge_count(), 0);
        assert_eq!(piece.dominance.edge_count(), 6);
    }

    #[test]
    fn stalled_round_moves_residual_edges_to_scaffold() {
        let mut compacted = BTreeSet::new();
        let mut piece = build_graph_piece(
            &uniform_metric(),
            &set(&[0, 1, 2, 3]),
            &BTreeSet::new(),
            &mut compacted,
            &Tolerances::default(),
        );
        let mut scaffold = WeightedGraph::new(4);
        let outcome = handle_post_build(
            &piece.processed,
            &mut compacted,
            piece.compacted_before,
            &mut piece.dominance,
            &mut scaffold,
        )
        .expect("scaffold holds every vertex");
        assert_eq!(outcome, PostBuild::Continue);
        assert_eq!(compacted, set(&[0, 1, 2, 3]));
        assert_eq!(scaffold.edge_count(), 6);
        assert_eq!(piece.dominance.edge_count(), 0);
    }

    #[test]
    fn fully_compacted_subset_stops() {
        let mut compacted = set(&[0, 1, 2]);
        let mut dominance = WeightedGraph::new(3);
        let mut scaffold = WeightedGraph::new(3);
        let outcome = handle_post_build(
            &set(&[0, 1, 2]),
            &mut compacted,
            3,
            &mut dominance,
            &mut scaffold,
        )
        .expect("nothing to move");
        assert_eq!(outcome, PostBuild::Stop);
    }

    #[test]
    fn growing_round_continues_untouched() {
        let mut compacted = set(&[0]);
        let mut dominance = WeightedGraph::new(3);
        let mut scaffold = WeightedGraph::new(3);
        let outcome = handle_post_build(
            &set(&[0, 1, 2]),
            &mut compacted,
            0,
            &mut dominance,
            &mut scaffold,
        )
        .expect("nothing to move");
        assert_eq!(outcome, PostBuild::Continue);
        assert_eq!(compacted, set(&[0]));
    }
}

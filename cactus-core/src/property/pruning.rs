//! Properties of the complete-graph and pruning phase, and of shadow merging.

use std::cmp::Ordering;

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{
    DistanceMatrix, Tolerances,
    extend::{Shadow, find_shadows, reindex},
    realize::{build_complete, prune_redundant_edges, round_weight},
};

/// Every unordered pair appears once, weighted by its rounded distance.
pub(super) fn run_completeness_property(matrix: &DistanceMatrix) -> TestCaseResult {
    let n = matrix.dimension();
    let graph = build_complete(matrix);
    if graph.edge_count() != n * (n - 1) / 2 {
        return Err(TestCaseError::fail(format!(
            "expected {} edges on {n} vertices, found {}",
            n * (n - 1) / 2,
            graph.edge_count()
        )));
    }
    for (edge, weight) in graph.edges() {
        let expected = round_weight(matrix.get(edge.u(), edge.v()));
        if weight != expected {
            return Err(TestCaseError::fail(format!(
                "edge {edge:?} has weight {weight}, expected {expected}"
            )));
        }
    }
    Ok(())
}

/// No surviving edge has a non-degenerate two-hop detour, and a second
/// pruning pass is a no-op.
pub(super) fn run_pruning_property(matrix: &DistanceMatrix) -> TestCaseResult {
    let tolerances = Tolerances::default();
    let mut graph = build_complete(matrix);
    prune_redundant_edges(matrix, &mut graph, &tolerances);

    for (edge, _) in graph.edges() {
        let (i, j) = (edge.u(), edge.v());
        let detour = matrix.vertices().find(|&k| {
            let (left, right) = (matrix.get(i, k), matrix.get(k, j));
            k != i
                && k != j
                && left > 0.0
                && right > 0.0
                && left + right <= matrix.get(i, j) + tolerances.epsilon()
        });
        if let Some(k) = detour {
            return Err(TestCaseError::fail(format!(
                "edge ({i}, {j}) survived although {k} dominates it"
            )));
        }
    }

    let snapshot = graph.clone();
    let removed = prune_redundant_edges(matrix, &mut graph, &tolerances);
    if removed != 0 || graph != snapshot {
        return Err(TestCaseError::fail(format!(
            "second pruning pass removed {removed} edges"
        )));
    }
    Ok(())
}

/// Duplicating row `original` at position `copy` is detected as exactly one
/// shadow, and shrinking restores the input.
pub(super) fn run_shadow_property(
    matrix: &DistanceMatrix,
    original: usize,
    copy: usize,
) -> TestCaseResult {
    let rows = matrix.to_rows();
    let source = |index: usize| match index.cmp(&copy) {
        Ordering::Less => index,
        Ordering::Equal => original,
        Ordering::Greater => index - 1,
    };
    let size = matrix.dimension() + 1;
    let grown = (0..size)
        .map(|row| {
            (0..size)
                .map(|column| rows[source(row)][source(column)])
                .collect()
        })
        .collect();
    let grown = DistanceMatrix::try_from_rows(grown)
        .map_err(|err| TestCaseError::fail(format!("duplicated matrix rejected: {err}")))?;

    let shadows = find_shadows(&grown, &Tolerances::default());
    let expected = [Shadow {
        vertex: copy,
        original,
    }];
    if shadows != expected {
        return Err(TestCaseError::fail(format!(
            "expected {expected:?}, found {shadows:?}"
        )));
    }
    if grown.without(&[copy]) != *matrix {
        return Err(TestCaseError::fail("shrinking did not restore the input"));
    }
    for vertex in 0..size {
        let shifted = reindex(vertex, &[copy]);
        let expected = if vertex < copy { vertex } else { vertex - 1 };
        if shifted != expected {
            return Err(TestCaseError::fail(format!(
                "vertex {vertex} reindexed to {shifted}, expected {expected}"
            )));
        }
    }
    Ok(())
}

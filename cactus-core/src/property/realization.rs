//! End-to-end realization properties on tree metrics.

use std::collections::BTreeSet;

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{
    CactusRealizer, DistanceMatrix, Tolerances,
    extend::{insert_auxiliaries, slack_and_pair},
    test_utils::floyd_warshall,
    verify::{max_realization_error, shortest_path_distances},
};

use super::strategies::TaxaTree;

fn realizer() -> CactusRealizer {
    CactusRealizer::default()
}

/// A metric already realized by a tree on the taxa needs no auxiliary vertex
/// and realizes as that tree.
pub(super) fn run_taxa_tree_property(fixture: &TaxaTree) -> TestCaseResult {
    let taxa = fixture.matrix.vertices().collect::<BTreeSet<_>>();
    for &vertex in &taxa {
        if fixture.tree.degree(vertex) < 2 {
            continue;
        }
        let slack = slack_and_pair(&taxa, vertex, &fixture.matrix).slack;
        if slack != 0.0 {
            return Err(TestCaseError::fail(format!(
                "inner vertex {vertex} has slack {slack}"
            )));
        }
    }

    let mut auxiliary = BTreeSet::new();
    let _ = insert_auxiliaries(
        fixture.matrix.clone(),
        &taxa,
        &mut auxiliary,
        &Tolerances::default(),
    );
    if !auxiliary.is_empty() {
        return Err(TestCaseError::fail(format!(
            "inserted auxiliary vertices {auxiliary:?}"
        )));
    }

    let realization = realizer()
        .realize_matrix(fixture.matrix.clone())
        .map_err(|err| TestCaseError::fail(format!("realization failed: {err}")))?;
    if realization.graph() != &fixture.tree {
        return Err(TestCaseError::fail(format!(
            "realized {:?}, expected {:?}",
            realization.graph(),
            fixture.tree
        )));
    }
    if realization.taxon_vertices() != taxa.iter().copied().collect::<Vec<_>>() {
        return Err(TestCaseError::fail("taxa were remapped"));
    }
    Ok(())
}

/// Leaf metrics of trees are reproduced exactly, and Dijkstra agrees with
/// Floyd-Warshall on the realized graph.
pub(super) fn run_leaf_metric_property(matrix: &DistanceMatrix) -> TestCaseResult {
    let realization = realizer()
        .realize_matrix(matrix.clone())
        .map_err(|err| TestCaseError::fail(format!("realization failed: {err}")))?;

    let error = max_realization_error(matrix, &realization);
    if error > 1e-9 {
        return Err(TestCaseError::fail(format!(
            "realization deviates from the input by {error}"
        )));
    }

    let graph = realization.graph();
    let all_pairs = floyd_warshall(graph);
    for (source, expected) in all_pairs.iter().enumerate() {
        let single = shortest_path_distances(graph, source)
            .map_err(|err| TestCaseError::fail(format!("dijkstra failed: {err}")))?;
        if &single != expected {
            return Err(TestCaseError::fail(format!(
                "dijkstra from {source} gave {single:?}, expected {expected:?}"
            )));
        }
    }
    Ok(())
}

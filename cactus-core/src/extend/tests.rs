//! Tests for the extension driver.

use super::*;
use crate::test_utils::{matrix, tree_metric, uniform_metric};
use rstest::{fixture, rstest};

#[fixture]
fn budget() -> RoundBudget {
    RoundBudget::default()
}

fn edge_list(graph: &WeightedGraph) -> Vec<(usize, usize, f64)> {
    graph
        .edges()
        .map(|(edge, weight)| (edge.u(), edge.v(), weight))
        .collect()
}

fn limit(value: usize) -> NonZeroUsize {
    NonZeroUsize::new(value).expect("non-zero limit")
}

#[test]
fn budget_allows_exactly_its_limit() {
    let mut budget = RoundBudget::new(limit(2));
    budget.spend().expect("first round");
    budget.spend().expect("second round");
    let err = budget.spend().expect_err("third round exceeds the limit");
    assert!(matches!(err, CactusError::RoundLimitExceeded { limit } if limit.get() == 2));
    assert_eq!(budget.used(), 3);
}

#[test]
fn default_budget_uses_default_limit() {
    assert_eq!(RoundBudget::default().limit(), DEFAULT_MAX_ROUNDS);
    assert_eq!(DEFAULT_MAX_ROUNDS.get(), 100_000);
}

#[rstest]
fn three_taxa_pass_through_unchanged(mut budget: RoundBudget) {
    let triangle = matrix(&[&[0.0, 3.0, 4.0], &[3.0, 0.0, 5.0], &[4.0, 5.0, 0.0]]);
    let state = extend_once(
        ExtensionState::new(triangle.clone()),
        (0..3).collect(),
        &Tolerances::default(),
        &mut budget,
    )
    .expect("pass succeeds");

    assert_eq!(state.matrix, triangle);
    assert_eq!(state.existing, BTreeSet::from([0, 1, 2]));
    assert!(state.compacted.is_empty());
    assert_eq!(state.scaffold, WeightedGraph::complete_unweighted(3));
    assert_eq!(budget.used(), 0);
}

#[rstest]
fn tree_metric_extends_with_both_internal_vertices(mut budget: RoundBudget) {
    let state = calculate_extended_matrix(tree_metric(), &Tolerances::default(), &mut budget)
        .expect("extension settles");

    assert_eq!(state.matrix.dimension(), 6);
    assert_eq!(state.matrix.row(4), [2.0, 3.0, 5.0, 5.0, 0.0, 2.0]);
    assert_eq!(state.matrix.row(5), [4.0, 5.0, 3.0, 3.0, 2.0, 0.0]);
    assert_eq!(state.taxa, [0, 1, 2, 3]);
    assert_eq!(state.existing, (0..6).collect::<BTreeSet<_>>());
    assert_eq!(state.compacted, (0..6).collect::<BTreeSet<_>>());
    assert_eq!(
        edge_list(&state.scaffold),
        [(0, 4, 2.0), (1, 4, 3.0), (2, 5, 3.0), (3, 5, 3.0), (4, 5, 2.0)]
    );
}

#[rstest]
fn uniform_metric_extends_with_a_centre(mut budget: RoundBudget) {
    let state = calculate_extended_matrix(uniform_metric(), &Tolerances::default(), &mut budget)
        .expect("extension settles");

    assert_eq!(state.matrix.dimension(), 5);
    assert_eq!(state.matrix.row(4), [1.0, 1.0, 1.0, 1.0, 0.0]);
    assert!(state.unseen().is_empty());
}

#[rstest]
fn duplicate_taxa_collapse_onto_one_vertex(mut budget: RoundBudget) {
    let duplicated = matrix(&[
        &[0.0, 0.0, 3.0, 4.0],
        &[0.0, 0.0, 3.0, 4.0],
        &[3.0, 3.0, 0.0, 5.0],
        &[4.0, 4.0, 5.0, 0.0],
    ]);
    let state = calculate_extended_matrix(duplicated, &Tolerances::default(), &mut budget)
        .expect("extension settles");

    assert_eq!(state.matrix.dimension(), 4);
    assert_eq!(state.taxa, [0, 0, 1, 2]);
    assert_eq!(state.matrix.row(3), [1.0, 2.0, 3.0, 0.0]);
    assert_eq!(
        edge_list(&state.scaffold),
        [(0, 3, 1.0), (1, 3, 2.0), (2, 3, 3.0)]
    );
}

#[test]
fn tight_budget_aborts_the_extension() {
    let mut budget = RoundBudget::new(limit(1));
    let err = calculate_extended_matrix(uniform_metric(), &Tolerances::default(), &mut budget)
        .expect_err("four neighbourhoods need more than one round");
    assert_eq!(err.code(), crate::error::CactusErrorCode::RoundLimitExceeded);
}

#[test]
fn unseen_lists_vertices_outside_existing() {
    let mut state = ExtensionState::new(uniform_metric());
    state.existing = BTreeSet::from([0, 2]);
    assert_eq!(state.unseen(), BTreeSet::from([1, 3]));
}

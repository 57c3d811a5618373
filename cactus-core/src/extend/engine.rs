//! Worklist-driven compactification over vertex neighbourhoods.

use std::collections::{BTreeSet, VecDeque};

use tracing::{debug, instrument, trace};

use super::{
    RoundBudget,
    auxiliary::insert_auxiliaries,
    compact::{PostBuild, build_graph_piece, handle_post_build},
};
use crate::{DistanceMatrix, Result, Tolerances, WeightedGraph};

/// Neighbourhoods selected for compaction and the graph left once their
/// internal edges are cleared.
#[derive(Clone, Debug, PartialEq)]
pub struct Neighborhoods {
    /// One closed neighbourhood `{x} ∪ N(x)` per vertex of degree ≥ 3, in
    /// ascending order of `x`.
    pub sets: Vec<BTreeSet<usize>>,
    /// Copy of the input graph without edges internal to any neighbourhood.
    pub pruned: WeightedGraph,
}

/// Selects the closed neighbourhood of every vertex in `vertices` with degree
/// at least three.
///
/// Degrees and neighbours are read from `graph`, which is never modified;
/// edges internal to each selected neighbourhood are cleared in a copy.
#[must_use]
pub fn prepare_neighborhoods(vertices: &BTreeSet<usize>, graph: &WeightedGraph) -> Neighborhoods {
    let mut pruned = graph.clone();
    let mut sets = Vec::new();
    for &vertex in vertices {
        let mut neighborhood = graph.neighbors(vertex);
        if neighborhood.len() < 3 {
            continue;
        }
        neighborhood.insert(vertex);
        pruned.retain_edges(|edge, _| {
            !(neighborhood.contains(&edge.u()) && neighborhood.contains(&edge.v()))
        });
        sets.push(neighborhood);
    }
    Neighborhoods { sets, pruned }
}

/// State threaded through [`compactify`].
#[derive(Clone, Debug, PartialEq)]
pub struct CompactionState {
    /// The distance matrix, grown by accepted auxiliary vertices.
    pub matrix: DistanceMatrix,
    /// Vertices whose local edges are final.
    pub compacted: BTreeSet<usize>,
    /// Accumulated finalised edges.
    pub scaffold: WeightedGraph,
}

/// Repeatedly compacts `initial` and the residual dominance components that
/// stay larger than an edge, until the worklist drains.
///
/// # Errors
/// Returns [`crate::CactusError::RoundLimitExceeded`] when `budget` runs out and
/// [`crate::CactusError::Graph`] if an edge cannot be placed in the scaffold.
#[instrument(
    name = "core.compactify",
    err,
    skip_all,
    fields(initial = initial.len(), vertices = state.matrix.dimension()),
)]
pub fn compactify(
    mut state: CompactionState,
    initial: BTreeSet<usize>,
    tolerances: &Tolerances,
    budget: &mut RoundBudget,
) -> Result<CompactionState> {
    let mut queue = VecDeque::from([initial]);
    while let Some(active) = queue.pop_front() {
        budget.spend()?;

        let mut auxiliary = BTreeSet::new();
        state.matrix = insert_auxiliaries(state.matrix, &active, &mut auxiliary, tolerances);

        let mut round = build_graph_piece(
            &state.matrix,
            &active,
            &auxiliary,
            &mut state.compacted,
            tolerances,
        );
        state.scaffold.ensure_vertex_count(state.matrix.dimension());
        state.scaffold.union_with(&round.piece)?;

        let outcome = handle_post_build(
            &round.processed,
            &mut state.compacted,
            round.compacted_before,
            &mut round.dominance,
            &mut state.scaffold,
        )?;
        if outcome == PostBuild::Stop {
            trace!(active = active.len(), "subset already compacted");
            continue;
        }

        let mut open = BTreeSet::new();
        for component in round.dominance.connected_components() {
            if !component.iter().all(|vertex| round.processed.contains(vertex)) {
                continue;
            }
            match component.as_slice() {
                [u, v] => {
                    if let Some(weight) = round.dominance.remove_edge(*u, *v) {
                        state.scaffold.put_edge(*u, *v, weight)?;
                    }
                }
                [_, _, _, ..] => {
                    open.extend(component.iter().copied());
                    queue.push_back(component.iter().copied().collect());
                }
                _ => {}
            }
        }
        for &vertex in &round.processed {
            if !open.contains(&vertex) && round.dominance.degree(vertex) <= 2 {
                state.compacted.insert(vertex);
            }
        }
        debug!(
            auxiliary = auxiliary.len(),
            queued = queue.len(),
            compacted = state.compacted.len(),
            "compaction round finished"
        );
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{tree_metric, uniform_metric};
    use std::num::NonZeroUsize;

    fn all(n: usize) -> BTreeSet<usize> {
        (0..n).collect()
    }

    fn budget(limit: usize) -> RoundBudget {
        RoundBudget::new(NonZeroUsize::new(limit).expect("non-zero limit"))
    }

    #[test]
    fn neighborhoods_need_degree_three() {
        let mut graph = WeightedGraph::new(6);
        for (u, v) in [(0, 1), (0, 2), (0, 3), (3, 4), (4, 5)] {
            graph.add_edge(u, v).expect("edge in range");
        }
        let prepared = prepare_neighborhoods(&all(6), &graph);
        assert_eq!(prepared.sets, vec![BTreeSet::from([0, 1, 2, 3])]);
        let remaining: Vec<_> = prepared
            .pruned
            .edges()
            .map(|(edge, _)| (edge.u(), edge.v()))
            .collect();
        assert_eq!(remaining, [(3, 4), (4, 5)]);
        assert_eq!(graph.edge_count(), 5, "input graph must stay untouched");
    }

    #[test]
    fn complete_graph_yields_one_neighborhood_per_vertex() {
        let prepared = prepare_neighborhoods(&all(4), &WeightedGraph::complete_unweighted(4));
        assert_eq!(prepared.sets.len(), 4);
        assert!(prepared.sets.iter().all(|set| set == &all(4)));
        assert_eq!(prepared.pruned.edge_count(), 0);
    }

    #[test]
    fn compactify_places_uniform_points_around_a_centre() {
        let state = CompactionState {
            matrix: uniform_metric(),
            compacted: BTreeSet::new(),
            scaffold: WeightedGraph::new(4),
        };
        let mut budget = budget(16);
        let state = compactify(state, all(4), &Tolerances::default(), &mut budget)
            .expect("compaction converges");

        assert_eq!(state.matrix.dimension(), 5);
        assert_eq!(state.compacted, all(5));
        let edges: Vec<_> = state
            .scaffold
            .edges()
            .map(|(edge, weight)| (edge.u(), edge.v(), weight))
            .collect();
        assert_eq!(
            edges,
            [(0, 4, 1.0), (1, 4, 1.0), (2, 4, 1.0), (3, 4, 1.0)]
        );
    }

    #[test]
    fn compactify_recovers_tree_edges() {
        let state = CompactionState {
            matrix: tree_metric(),
            compacted: BTreeSet::new(),
            scaffold: WeightedGraph::new(4),
        };
        let mut budget = budget(16);
        let state = compactify(state, all(4), &Tolerances::default(), &mut budget)
            .expect("compaction converges");
        let edges: Vec<_> = state
            .scaffold
            .edges()
            .map(|(edge, weight)| (edge.u(), edge.v(), weight))
            .collect();
        assert_eq!(
            edges,
            [(0, 4, 2.0), (1, 4, 3.0), (2, 5, 3.0), (3, 5, 3.0), (4, 5, 2.0)]
        );
    }

    #[test]
    fn compactify_respects_the_round_budget() {
        let state = CompactionState {
            matrix: uniform_metric(),
            compacted: BTreeSet::new(),
            scaffold: WeightedGraph::new(4),
        };
        let mut budget = budget(1);
        budget.spend().expect("first round fits");
        let err = compactify(state, all(4), &Tolerances::default(), &mut budget)
            .expect_err("budget is exhausted");
        assert!(matches!(
            err,
            crate::CactusError::RoundLimitExceeded { limit } if limit.get() == 1
        ));
    }
}

//! Seeded generators for distance-matrix fixtures.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{DistanceMatrix, WeightedGraph, test_utils::floyd_warshall};

/// Largest integer edge weight; integer weights keep path sums exact.
const MAX_WEIGHT: u32 = 9;

/// A tree whose vertices are exactly the taxa, with its shortest-path metric.
#[derive(Clone, Debug)]
pub(super) struct TaxaTree {
    pub(super) tree: WeightedGraph,
    pub(super) matrix: DistanceMatrix,
}

pub(super) fn taxa_tree_strategy() -> impl Strategy<Value = TaxaTree> {
    (2usize..=9, any::<u64>()).prop_map(|(taxa, seed)| {
        generate_taxa_tree(taxa, &mut SmallRng::seed_from_u64(seed))
    })
}

/// Leaf-to-leaf metric of a random tree with hidden internal vertices.
pub(super) fn leaf_metric_strategy() -> impl Strategy<Value = DistanceMatrix> {
    (3usize..=8, any::<u64>()).prop_map(|(leaves, seed)| {
        generate_leaf_metric(leaves, &mut SmallRng::seed_from_u64(seed))
    })
}

/// Shortest-path metric of a random complete graph.
pub(super) fn graph_metric_strategy() -> impl Strategy<Value = DistanceMatrix> {
    (2usize..=8, any::<u64>()).prop_map(|(points, seed)| {
        generate_graph_metric(points, &mut SmallRng::seed_from_u64(seed))
    })
}

fn random_tree(vertices: usize, rng: &mut SmallRng) -> WeightedGraph {
    let mut tree = WeightedGraph::new(vertices);
    for child in 1..vertices {
        let parent = rng.gen_range(0..child);
        let weight = f64::from(rng.gen_range(1..=MAX_WEIGHT));
        tree.put_edge(parent, child, weight)
            .expect("tree edges stay in range");
    }
    tree
}

fn metric_of(graph: &WeightedGraph, vertices: &[usize]) -> DistanceMatrix {
    let paths = floyd_warshall(graph);
    let rows = vertices
        .iter()
        .map(|&row| vertices.iter().map(|&column| paths[row][column]).collect())
        .collect();
    DistanceMatrix::try_from_rows(rows).expect("path metrics are valid matrices")
}

pub(super) fn generate_taxa_tree(taxa: usize, rng: &mut SmallRng) -> TaxaTree {
    let tree = random_tree(taxa, rng);
    let vertices = (0..taxa).collect::<Vec<_>>();
    let matrix = metric_of(&tree, &vertices);
    TaxaTree { tree, matrix }
}

pub(super) fn generate_leaf_metric(leaves: usize, rng: &mut SmallRng) -> DistanceMatrix {
    let tree = random_tree(2 * leaves, rng);
    let chosen = (0..tree.vertex_count())
        .filter(|&vertex| tree.degree(vertex) == 1)
        .take(leaves)
        .collect::<Vec<_>>();
    metric_of(&tree, &chosen)
}

pub(super) fn generate_graph_metric(points: usize, rng: &mut SmallRng) -> DistanceMatrix {
    let mut graph = WeightedGraph::new(points);
    for u in 0..points {
        for v in (u + 1)..points {
            let weight = f64::from(rng.gen_range(1..=6_u32));
            graph.put_edge(u, v, weight).expect("pair stays in range");
        }
    }
    metric_of(&graph, &(0..points).collect::<Vec<_>>())
}

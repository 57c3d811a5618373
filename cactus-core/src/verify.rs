//! Checks how faithfully a realization reproduces its input distances.

use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};

use crate::{DistanceMatrix, Realization, WeightedGraph, error::GraphError};

/// Vertex waiting in the Dijkstra frontier, ordered by tentative distance.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Frontier {
    distance: f64,
    vertex: usize,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then(self.vertex.cmp(&other.vertex))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Returns the shortest-path distance from `source` to every vertex of
/// `graph`; unreachable vertices get `f64::INFINITY`.
///
/// # Errors
/// Returns [`GraphError::VertexOutOfRange`] when `source` is not a vertex.
///
/// # Examples
/// ```
/// use cactus_core::{WeightedGraph, verify::shortest_path_distances};
///
/// let mut graph = WeightedGraph::new(3);
/// graph.put_edge(0, 1, 2.0)?;
/// graph.put_edge(1, 2, 0.5)?;
/// assert_eq!(shortest_path_distances(&graph, 0)?, vec![0.0, 2.0, 2.5]);
/// # Ok::<(), cactus_core::GraphError>(())
/// ```
pub fn shortest_path_distances(
    graph: &WeightedGraph,
    source: usize,
) -> Result<Vec<f64>, GraphError> {
    let vertex_count = graph.vertex_count();
    if source >= vertex_count {
        return Err(GraphError::VertexOutOfRange {
            vertex: source,
            vertex_count,
        });
    }

    let mut adjacency = vec![Vec::new(); vertex_count];
    for (edge, weight) in graph.edges() {
        adjacency[edge.u()].push((edge.v(), weight));
        adjacency[edge.v()].push((edge.u(), weight));
    }

    let mut distances = vec![f64::INFINITY; vertex_count];
    distances[source] = 0.0;
    let mut frontier = BinaryHeap::from([Reverse(Frontier {
        distance: 0.0,
        vertex: source,
    })]);
    while let Some(Reverse(Frontier { distance, vertex })) = frontier.pop() {
        if distance > distances[vertex] {
            continue;
        }
        for &(next, weight) in &adjacency[vertex] {
            let candidate = distance + weight;
            if candidate < distances[next] {
                distances[next] = candidate;
                frontier.push(Reverse(Frontier {
                    distance: candidate,
                    vertex: next,
                }));
            }
        }
    }
    Ok(distances)
}

/// Largest absolute difference between an input distance and the
/// shortest-path distance between the corresponding realized vertices.
///
/// Returns `f64::INFINITY` when two taxa are disconnected or a taxon maps
/// outside the graph.
#[must_use]
pub fn max_realization_error(matrix: &DistanceMatrix, realization: &Realization) -> f64 {
    let taxa = realization.taxon_vertices();
    let mut worst: f64 = 0.0;
    for (row, &source) in taxa.iter().enumerate() {
        let Ok(paths) = shortest_path_distances(realization.graph(), source) else {
            return f64::INFINITY;
        };
        for (column, &target) in taxa.iter().enumerate().skip(row + 1) {
            let Some(&realized) = paths.get(target) else {
                return f64::INFINITY;
            };
            worst = worst.max((realized - matrix.get(row, column)).abs());
        }
    }
    worst
}

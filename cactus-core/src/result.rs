//! Result types for realization runs.

use std::collections::BTreeSet;

use crate::WeightedGraph;

/// The output of [`crate::CactusRealizer::realize`].
///
/// Vertex identifiers in [`Realization::graph`] are rows of the final extended
/// matrix. Input taxa keep their order in [`Realization::taxon_vertices`], but
/// merged duplicates share a vertex and later taxa may shift down, so look
/// taxa up through that map rather than assuming taxon `i` is vertex `i`.
///
/// # Examples
/// ```
/// use cactus_core::{Realization, WeightedGraph};
///
/// let mut graph = WeightedGraph::new(3);
/// graph.put_edge(0, 2, 1.0)?;
/// graph.put_edge(1, 2, 1.0)?;
/// let realization = Realization::new(graph, vec![0, 1], 1);
/// assert_eq!(realization.auxiliary_count(), 1);
/// assert_eq!(realization.taxon_vertex(1), Some(1));
/// # Ok::<(), cactus_core::GraphError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Realization {
    graph: WeightedGraph,
    taxon_vertices: Vec<usize>,
    auxiliary_count: usize,
    pruned_edges: usize,
}

impl Realization {
    /// Bundles a realized graph with the vertex of every input taxon.
    ///
    /// Vertices not named in `taxon_vertices` are counted as auxiliary.
    #[must_use]
    pub fn new(graph: WeightedGraph, taxon_vertices: Vec<usize>, pruned_edges: usize) -> Self {
        let distinct = taxon_vertices.iter().collect::<BTreeSet<_>>().len();
        let auxiliary_count = graph.vertex_count().saturating_sub(distinct);
        Self {
            graph,
            taxon_vertices,
            auxiliary_count,
            pruned_edges,
        }
    }

    /// Returns the realized graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn graph(&self) -> &WeightedGraph { &self.graph }

    /// Consumes the result, returning the realized graph.
    #[must_use]
    pub fn into_graph(self) -> WeightedGraph {
        self.graph
    }

    /// Returns the graph vertex of every input taxon, in input order.
    #[must_use]
    #[rustfmt::skip]
    pub fn taxon_vertices(&self) -> &[usize] { &self.taxon_vertices }

    /// Returns the graph vertex of input taxon `taxon`.
    #[must_use]
    pub fn taxon_vertex(&self, taxon: usize) -> Option<usize> {
        self.taxon_vertices.get(taxon).copied()
    }

    /// Returns the number of vertices that represent no input taxon.
    #[must_use]
    #[rustfmt::skip]
    pub fn auxiliary_count(&self) -> usize { self.auxiliary_count }

    /// Returns the number of complete-graph edges removed by triangle pruning.
    #[must_use]
    #[rustfmt::skip]
    pub fn pruned_edges(&self) -> usize { self.pruned_edges }
}

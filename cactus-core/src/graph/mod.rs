//! Undirected weighted graphs over implicit vertices `0..n`.
//!
//! Storage is edge-centric: a sorted map from canonical [`UEdge`] keys to
//! weights. The vertex count is a separate capacity so isolated vertices are
//! representable, and edge listings come out in stable `(u, v)` order.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::error::GraphError;

/// An unordered vertex pair stored as `(min, max)`.
///
/// Ordering is lexicographic on `(u, v)`.
///
/// # Examples
/// ```
/// use cactus_core::UEdge;
///
/// assert_eq!(UEdge::new(3, 1)?, UEdge::new(1, 3)?);
/// assert!(UEdge::new(2, 2).is_err());
/// # Ok::<(), cactus_core::GraphError>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct UEdge {
    u: usize,
    v: usize,
}

impl UEdge {
    /// Canonicalises `(left, right)`.
    ///
    /// # Errors
    /// Returns [`GraphError::SelfLoop`] when `left == right`.
    pub fn new(left: usize, right: usize) -> Result<Self, GraphError> {
        match left.cmp(&right) {
            std::cmp::Ordering::Less => Ok(Self { u: left, v: right }),
            std::cmp::Ordering::Greater => Ok(Self { u: right, v: left }),
            std::cmp::Ordering::Equal => Err(GraphError::SelfLoop { vertex: left }),
        }
    }

    /// Returns the smaller endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub fn u(&self) -> usize { self.u }

    /// Returns the larger endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub fn v(&self) -> usize { self.v }

    /// Returns `true` when `vertex` is an endpoint.
    #[must_use]
    pub fn touches(&self, vertex: usize) -> bool {
        self.u == vertex || self.v == vertex
    }

    /// Returns the endpoint opposite `vertex`, if `vertex` is an endpoint.
    #[must_use]
    pub fn other(&self, vertex: usize) -> Option<usize> {
        if self.u == vertex {
            Some(self.v)
        } else if self.v == vertex {
            Some(self.u)
        } else {
            None
        }
    }
}

/// Weight used by [`WeightedGraph::add_edge`] when only topology matters.
pub const UNIT_WEIGHT: f64 = 1.0;

/// An undirected graph with `f64` edge weights.
///
/// # Examples
/// ```
/// use cactus_core::WeightedGraph;
///
/// let mut graph = WeightedGraph::new(3);
/// graph.put_edge(2, 0, 1.5)?;
/// graph.add_edge(0, 1)?;
/// assert_eq!(graph.degree(0), 2);
/// assert_eq!(graph.weight(0, 2), Some(1.5));
/// let listed: Vec<_> = graph.edges().map(|(e, _)| (e.u(), e.v())).collect();
/// assert_eq!(listed, [(0, 1), (0, 2)]);
/// # Ok::<(), cactus_core::GraphError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeightedGraph {
    vertex_count: usize,
    edges: BTreeMap<UEdge, f64>,
}

impl WeightedGraph {
    /// Creates an edgeless graph on `vertex_count` vertices.
    #[must_use]
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            edges: BTreeMap::new(),
        }
    }

    /// Creates the complete graph on `vertex_count` vertices with unit weights.
    #[must_use]
    pub fn complete_unweighted(vertex_count: usize) -> Self {
        let mut edges = BTreeMap::new();
        for u in 0..vertex_count {
            for v in (u + 1)..vertex_count {
                edges.insert(UEdge { u, v }, UNIT_WEIGHT);
            }
        }
        Self {
            vertex_count,
            edges,
        }
    }

    /// Returns the vertex capacity.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Raises the vertex capacity to at least `vertex_count`.
    pub fn ensure_vertex_count(&mut self, vertex_count: usize) {
        self.vertex_count = self.vertex_count.max(vertex_count);
    }

    /// Returns the number of stored edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Inserts or overwrites the edge `(i, j)` with `weight`.
    ///
    /// # Errors
    /// Returns [`GraphError::SelfLoop`] when `i == j` and
    /// [`GraphError::VertexOutOfRange`] when either endpoint is not below the
    /// vertex count.
    pub fn put_edge(&mut self, i: usize, j: usize, weight: f64) -> Result<(), GraphError> {
        let edge = self.checked_edge(i, j)?;
        self.edges.insert(edge, weight);
        Ok(())
    }

    /// Inserts the edge `(i, j)` with [`UNIT_WEIGHT`].
    ///
    /// # Errors
    /// As for [`WeightedGraph::put_edge`].
    pub fn add_edge(&mut self, i: usize, j: usize) -> Result<(), GraphError> {
        self.put_edge(i, j, UNIT_WEIGHT)
    }

    fn checked_edge(&self, i: usize, j: usize) -> Result<UEdge, GraphError> {
        let edge = UEdge::new(i, j)?;
        if edge.v >= self.vertex_count {
            return Err(GraphError::VertexOutOfRange {
                vertex: edge.v,
                vertex_count: self.vertex_count,
            });
        }
        Ok(edge)
    }

    /// Returns `true` when the edge `(i, j)` exists.
    #[must_use]
    pub fn has_edge(&self, i: usize, j: usize) -> bool {
        UEdge::new(i, j).is_ok_and(|edge| self.edges.contains_key(&edge))
    }

    /// Returns the weight of `(i, j)`, if present.
    #[must_use]
    pub fn weight(&self, i: usize, j: usize) -> Option<f64> {
        UEdge::new(i, j)
            .ok()
            .and_then(|edge| self.edges.get(&edge).copied())
    }

    /// Removes `(i, j)`, returning its weight if it existed.
    pub fn remove_edge(&mut self, i: usize, j: usize) -> Option<f64> {
        UEdge::new(i, j)
            .ok()
            .and_then(|edge| self.edges.remove(&edge))
    }

    /// Removes every edge matching `predicate`.
    pub fn retain_edges(&mut self, mut predicate: impl FnMut(UEdge, f64) -> bool) {
        self.edges.retain(|edge, weight| predicate(*edge, *weight));
    }

    /// Returns the neighbours of `vertex` in ascending order.
    ///
    /// Computed by scanning every edge.
    #[must_use]
    pub fn neighbors(&self, vertex: usize) -> BTreeSet<usize> {
        self.edges
            .keys()
            .filter_map(|edge| edge.other(vertex))
            .collect()
    }

    /// Returns the number of neighbours of `vertex`.
    #[must_use]
    pub fn degree(&self, vertex: usize) -> usize {
        self.edges.keys().filter(|edge| edge.touches(vertex)).count()
    }

    /// Iterates over edges in stable `(u, v)` order.
    pub fn edges(&self) -> impl Iterator<Item = (UEdge, f64)> + '_ {
        self.edges.iter().map(|(edge, weight)| (*edge, *weight))
    }

    /// Copies every edge of `other` into `self`, overwriting shared edges.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexOutOfRange`] when `other` references a
    /// vertex beyond this graph's capacity.
    pub fn union_with(&mut self, other: &Self) -> Result<(), GraphError> {
        for (edge, weight) in other.edges() {
            self.put_edge(edge.u, edge.v, weight)?;
        }
        Ok(())
    }

    /// Returns the connected components, each sorted ascending, ordered by
    /// their smallest vertex. Isolated vertices form singleton components.
    #[must_use]
    pub fn connected_components(&self) -> Vec<Vec<usize>> {
        let mut adjacency = vec![Vec::new(); self.vertex_count];
        for edge in self.edges.keys() {
            adjacency[edge.u].push(edge.v);
            adjacency[edge.v].push(edge.u);
        }

        let mut seen = vec![false; self.vertex_count];
        let mut components = Vec::new();
        for start in 0..self.vertex_count {
            if seen[start] {
                continue;
            }
            seen[start] = true;
            let mut component = Vec::new();
            let mut queue = VecDeque::from([start]);
            while let Some(vertex) = queue.pop_front() {
                component.push(vertex);
                for &next in &adjacency[vertex] {
                    if !seen[next] {
                        seen[next] = true;
                        queue.push_back(next);
                    }
                }
            }
            component.sort_unstable();
            components.push(component);
        }
        components
    }

    /// Returns a copy with the vertices in `removed` deleted and the remaining
    /// vertices renumbered densely in their original order.
    ///
    /// `removed` must be sorted ascending. Edges touching a removed vertex are
    /// dropped.
    #[must_use]
    pub fn without_vertices(&self, removed: &[usize]) -> Self {
        let mut mapping = vec![None; self.vertex_count];
        let mut next = 0;
        for (vertex, slot) in mapping.iter_mut().enumerate() {
            if removed.binary_search(&vertex).is_err() {
                *slot = Some(next);
                next += 1;
            }
        }
        let edges = self
            .edges
            .iter()
            .filter_map(|(edge, weight)| {
                let u = mapping[edge.u]?;
                let v = mapping[edge.v]?;
                Some((UEdge { u, v }, *weight))
            })
            .collect();
        Self {
            vertex_count: next,
            edges,
        }
    }
}

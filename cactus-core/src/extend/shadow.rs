//! Detection and removal of coincident ("shadow") vertices.

use std::collections::BTreeSet;

use crate::{DistanceMatrix, Tolerances};

/// A vertex that coincides with an earlier one.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Shadow {
    /// The duplicate vertex, removed on shrink.
    pub vertex: usize,
    /// The earlier vertex it duplicates.
    pub original: usize,
}

/// Finds every vertex `j` that has an earlier twin `i`: `D[i,j] ≈ 0` and rows
/// `i` and `j` agree in every column, both within `min_distance`.
///
/// Each vertex is matched to the first such `i`; results ascend by `vertex`.
#[must_use]
pub fn find_shadows(matrix: &DistanceMatrix, tolerances: &Tolerances) -> Vec<Shadow> {
    let mut shadows = Vec::new();
    for vertex in matrix.vertices() {
        let twin = (0..vertex).find(|&original| {
            tolerances.is_zero(matrix.get(original, vertex))
                && matrix
                    .row(original)
                    .iter()
                    .zip(matrix.row(vertex))
                    .all(|(left, right)| tolerances.is_zero(left - right))
        });
        if let Some(original) = twin {
            shadows.push(Shadow { vertex, original });
        }
    }
    shadows
}

/// Returns the removed vertex identifiers in ascending order.
#[must_use]
pub fn removed_vertices(shadows: &[Shadow]) -> Vec<usize> {
    shadows.iter().map(|shadow| shadow.vertex).collect()
}

/// Maps an identifier from before the shrink to after it by subtracting the
/// number of removed identifiers `<= vertex`.
///
/// `removed` must be sorted ascending.
#[must_use]
pub fn reindex(vertex: usize, removed: &[usize]) -> usize {
    vertex - removed.partition_point(|&gone| gone <= vertex)
}

/// Applies [`reindex`] to every member of `set`.
#[must_use]
pub fn reindex_set(set: &BTreeSet<usize>, removed: &[usize]) -> BTreeSet<usize> {
    set.iter().map(|&vertex| reindex(vertex, removed)).collect()
}

/// Follows shadows back to their surviving vertex and reindexes it.
///
/// Used to keep each original taxon pointing at the vertex that represents it.
#[must_use]
pub fn resolve(vertex: usize, shadows: &[Shadow]) -> usize {
    let removed = removed_vertices(shadows);
    let mut current = vertex;
    while let Some(shadow) = shadows.iter().find(|shadow| shadow.vertex == current) {
        current = shadow.original;
    }
    reindex(current, &removed)
}

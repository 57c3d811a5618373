//! Insertion of auxiliary vertices that absorb positive slack.

use std::collections::BTreeSet;

use tracing::debug;

use super::slack::slack_and_pair;
use crate::{DistanceMatrix, Tolerances};

/// Why a candidate auxiliary vertex was not inserted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Rejection {
    /// The candidate would coincide with one of its reference vertices.
    CoincidesWithReference(usize),
    /// The candidate would collapse onto another existing vertex.
    CollapsesOnto(usize),
}

/// Tries to insert one auxiliary vertex per member of `active`.
///
/// Members are visited in ascending order; each sees the matrix as grown by
/// the insertions accepted before it. Accepted vertex identifiers are added to
/// `auxiliary`. Returns the (possibly grown) matrix.
pub fn insert_auxiliaries(
    mut matrix: DistanceMatrix,
    active: &BTreeSet<usize>,
    auxiliary: &mut BTreeSet<usize>,
    tolerances: &Tolerances,
) -> DistanceMatrix {
    for &x in active {
        let result = slack_and_pair(active, x, &matrix);
        let Some((y, z)) = result.pair else {
            continue;
        };
        if result.slack <= 0.0 {
            continue;
        }
        match candidate_row(&matrix, x, y, z, result.slack, tolerances) {
            Ok(row) => {
                let vertex = matrix.push_vertex(&row);
                auxiliary.insert(vertex);
                debug!(vertex, x, y, z, slack = result.slack, "auxiliary vertex accepted");
            }
            Err(reason) => {
                debug!(x, y, z, slack = result.slack, ?reason, "auxiliary vertex rejected");
            }
        }
    }
    matrix
}

/// Distances from a new vertex placed `slack` away from `x` towards the
/// pair `(y, z)` to every current vertex.
fn candidate_row(
    matrix: &DistanceMatrix,
    x: usize,
    y: usize,
    z: usize,
    slack: f64,
    tolerances: &Tolerances,
) -> Result<Vec<f64>, Rejection> {
    let to_x = slack;
    let to_y = (matrix.get(y, x) - slack).max(0.0);
    let to_z = (matrix.get(z, x) - slack).max(0.0);
    if tolerances.is_zero(to_y) {
        return Err(Rejection::CoincidesWithReference(y));
    }
    if tolerances.is_zero(to_z) {
        return Err(Rejection::CoincidesWithReference(z));
    }

    let mut row = vec![0.0; matrix.dimension()];
    for vertex in matrix.vertices() {
        row[vertex] = if vertex == x {
            to_x
        } else if vertex == y {
            to_y
        } else if vertex == z {
            to_z
        } else {
            let distance = (matrix.get(vertex, x) - to_x)
                .max(matrix.get(vertex, y) - to_y)
                .max(matrix.get(vertex, z) - to_z)
                .max(0.0);
            if tolerances.is_zero(distance) {
                return Err(Rejection::CollapsesOnto(vertex));
            }
            distance
        };
    }
    Ok(row)
}

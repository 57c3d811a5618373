//! Slack of a vertex against its tightest reference pair.

use std::collections::BTreeSet;

use crate::DistanceMatrix;

/// Minimal slack of one vertex and the pair that attains it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlackResult {
    /// `max(s, 0)` for the minimising pair.
    pub slack: f64,
    /// The minimising pair `(y, z)` with `y < z`, or `None` when fewer than two
    /// reference vertices exist.
    pub pair: Option<(usize, usize)>,
}

/// Computes `s(x; y, z) = (D[x,y] + D[x,z] - D[y,z]) / 2` for every pair drawn
/// from `candidates \ {x}` and returns the smallest, truncated at zero.
///
/// Pairs are visited in ascending `(y, z)` order and the first minimum wins.
#[must_use]
pub fn slack_and_pair(
    candidates: &BTreeSet<usize>,
    x: usize,
    matrix: &DistanceMatrix,
) -> SlackResult {
    let others = candidates
        .iter()
        .copied()
        .filter(|&vertex| vertex != x)
        .collect::<Vec<_>>();

    let mut best: Option<(f64, usize, usize)> = None;
    for (position, &y) in others.iter().enumerate() {
        for &z in &others[position + 1..] {
            let slack = (matrix.get(x, y) + matrix.get(x, z) - matrix.get(y, z)) / 2.0;
            if best.is_none_or(|(current, _, _)| slack < current) {
                best = Some((slack, y, z));
            }
        }
    }

    match best {
        Some((slack, y, z)) => SlackResult {
            slack: slack.max(0.0),
            pair: Some((y, z)),
        },
        None => SlackResult {
            slack: 0.0,
            pair: None,
        },
    }
}

//! Extension of a distance matrix with auxiliary vertices.
//!
//! The driver repeatedly compacts vertex neighbourhoods of a scaffold graph,
//! growing the matrix wherever a vertex carries positive slack, and folds
//! coincident vertices back together after every pass. The result is an
//! extended matrix whose complete graph prunes down to the realization.

mod auxiliary;
mod compact;
mod engine;
mod shadow;
mod slack;

use std::{collections::BTreeSet, num::NonZeroUsize};

use tracing::{debug, instrument};

pub use self::{
    auxiliary::insert_auxiliaries,
    compact::{GraphPiece, PostBuild, build_graph_piece, dominance_graph, handle_post_build},
    engine::{CompactionState, Neighborhoods, compactify, prepare_neighborhoods},
    shadow::{Shadow, find_shadows, reindex, reindex_set, removed_vertices, resolve},
    slack::{SlackResult, slack_and_pair},
};
use crate::{CactusError, DistanceMatrix, Result, Tolerances, WeightedGraph};

/// Default cap on compaction rounds for one realization.
pub const DEFAULT_MAX_ROUNDS: NonZeroUsize = match NonZeroUsize::new(100_000) {
    Some(limit) => limit,
    None => NonZeroUsize::MIN,
};

/// Counts compaction rounds and extension passes against a fixed limit.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RoundBudget {
    limit: NonZeroUsize,
    used: usize,
}

impl Default for RoundBudget {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ROUNDS)
    }
}

impl RoundBudget {
    /// Creates an unspent budget.
    #[must_use]
    pub fn new(limit: NonZeroUsize) -> Self {
        Self { limit, used: 0 }
    }

    /// Records one round.
    ///
    /// # Errors
    /// Returns [`CactusError::RoundLimitExceeded`] once more than `limit`
    /// rounds have been recorded.
    pub fn spend(&mut self) -> Result<()> {
        self.used += 1;
        if self.used > self.limit.get() {
            return Err(CactusError::RoundLimitExceeded { limit: self.limit });
        }
        Ok(())
    }

    /// Returns the number of rounds recorded so far.
    #[must_use]
    #[rustfmt::skip]
    pub fn used(&self) -> usize { self.used }

    /// Returns the configured limit.
    #[must_use]
    #[rustfmt::skip]
    pub fn limit(&self) -> NonZeroUsize { self.limit }
}

/// Matrix, scaffold and vertex bookkeeping threaded through the extension
/// passes.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtensionState {
    /// The extended distance matrix.
    pub matrix: DistanceMatrix,
    /// Vertices processed by the most recent pass.
    pub active: BTreeSet<usize>,
    /// Every vertex that has been handed to a pass.
    pub existing: BTreeSet<usize>,
    /// Vertices whose local edges are final.
    pub compacted: BTreeSet<usize>,
    /// The working graph of finalised and not-yet-examined edges.
    pub scaffold: WeightedGraph,
    /// Current vertex of every input taxon, in input order.
    pub taxa: Vec<usize>,
}

impl ExtensionState {
    /// Starts from `matrix` with a complete unweighted scaffold over its
    /// vertices.
    #[must_use]
    pub fn new(matrix: DistanceMatrix) -> Self {
        let dimension = matrix.dimension();
        Self {
            matrix,
            active: BTreeSet::new(),
            existing: BTreeSet::new(),
            compacted: BTreeSet::new(),
            scaffold: WeightedGraph::complete_unweighted(dimension),
            taxa: (0..dimension).collect(),
        }
    }

    /// Returns the vertices never handed to a pass.
    #[must_use]
    pub fn unseen(&self) -> BTreeSet<usize> {
        self.matrix
            .vertices()
            .filter(|vertex| !self.existing.contains(vertex))
            .collect()
    }
}

/// Runs one extension pass over `vertices`.
///
/// Every vertex of degree at least three in the scaffold has its closed
/// neighbourhood compacted; coincident vertices are then merged and all
/// bookkeeping is reindexed to the shrunken matrix.
///
/// # Errors
/// Propagates [`compactify`] failures.
#[instrument(
    name = "core.extend_once",
    err,
    skip_all,
    fields(vertices = vertices.len(), dimension = state.matrix.dimension()),
)]
pub fn extend_once(
    state: ExtensionState,
    vertices: BTreeSet<usize>,
    tolerances: &Tolerances,
    budget: &mut RoundBudget,
) -> Result<ExtensionState> {
    let ExtensionState {
        matrix,
        mut existing,
        compacted,
        scaffold,
        taxa,
        ..
    } = state;
    existing.extend(vertices.iter().copied());

    let prepared = prepare_neighborhoods(&vertices, &scaffold);
    let mut compaction = CompactionState {
        matrix,
        compacted,
        scaffold: prepared.pruned,
    };
    for neighborhood in prepared.sets {
        compaction = compactify(compaction, neighborhood, tolerances, budget)?;
    }

    let shadows = find_shadows(&compaction.matrix, tolerances);
    if shadows.is_empty() {
        return Ok(ExtensionState {
            matrix: compaction.matrix,
            active: vertices,
            existing,
            compacted: compaction.compacted,
            scaffold: compaction.scaffold,
            taxa,
        });
    }

    let removed = removed_vertices(&shadows);
    debug!(?removed, "merging shadow vertices");
    Ok(ExtensionState {
        matrix: compaction.matrix.without(&removed),
        active: reindex_set(&vertices, &removed),
        existing: reindex_set(&existing, &removed),
        compacted: reindex_set(&compaction.compacted, &removed),
        scaffold: compaction.scaffold.without_vertices(&removed),
        taxa: taxa.iter().map(|&taxon| resolve(taxon, &shadows)).collect(),
    })
}

/// Extends `matrix` until no pass introduces a new vertex.
///
/// The taxa are processed first, then every current vertex once, then only the
/// vertices each pass adds.
///
/// # Errors
/// Returns [`CactusError::RoundLimitExceeded`] when `budget` runs out before
/// the extension settles.
pub fn calculate_extended_matrix(
    matrix: DistanceMatrix,
    tolerances: &Tolerances,
    budget: &mut RoundBudget,
) -> Result<ExtensionState> {
    let taxa = matrix.vertices().collect::<BTreeSet<_>>();
    let mut state = extend_once(ExtensionState::new(matrix), taxa, tolerances, budget)?;

    let everything = state.matrix.vertices().collect::<BTreeSet<_>>();
    state = extend_once(state, everything, tolerances, budget)?;

    loop {
        let unseen = state.unseen();
        if unseen.is_empty() {
            return Ok(state);
        }
        budget.spend()?;
        state = extend_once(state, unseen, tolerances, budget)?;
    }
}

#[cfg(test)]
mod tests;

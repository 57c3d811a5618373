//! Realization orchestration for the cactus library.
//!
//! Provides the [`CactusRealizer`] entry point: extend the input matrix with
//! auxiliary vertices, build the complete graph on the result and prune every
//! edge a two-hop path makes redundant.

use std::num::NonZeroUsize;

use tracing::{info, instrument};

use crate::{
    DataSource, DistanceMatrix, Result, Tolerances, WeightedGraph,
    extend::{DEFAULT_MAX_ROUNDS, RoundBudget, calculate_extended_matrix},
    realize::{build_complete, prune_redundant_edges},
    result::Realization,
};

/// Entry point for realizing distance matrices as weighted graphs.
///
/// # Examples
/// ```
/// use cactus_core::{CactusBuilder, DataSource, DataSourceError};
///
/// struct Line(Vec<f64>);
///
/// impl DataSource for Line {
///     fn len(&self) -> usize { self.0.len() }
///     fn name(&self) -> &str { "line" }
///     fn distance(&self, i: usize, j: usize) -> Result<f64, DataSourceError> {
///         let a = self.0.get(i).ok_or(DataSourceError::OutOfBounds { index: i })?;
///         let b = self.0.get(j).ok_or(DataSourceError::OutOfBounds { index: j })?;
///         Ok((a - b).abs())
///     }
/// }
///
/// let realizer = CactusBuilder::new().build()?;
/// let graph = realizer.run(&Line(vec![0.0, 1.0, 3.0]))?;
/// // Points on a line realize as a path.
/// assert_eq!(graph.edge_count(), 2);
/// assert_eq!(graph.weight(1, 2), Some(2.0));
/// # Ok::<(), cactus_core::CactusError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CactusRealizer {
    tolerances: Tolerances,
    max_rounds: NonZeroUsize,
}

impl Default for CactusRealizer {
    fn default() -> Self {
        Self::new(Tolerances::default(), DEFAULT_MAX_ROUNDS)
    }
}

impl CactusRealizer {
    pub(crate) fn new(tolerances: Tolerances, max_rounds: NonZeroUsize) -> Self {
        Self {
            tolerances,
            max_rounds,
        }
    }

    /// Returns the tolerances used for every distance comparison.
    #[must_use]
    #[rustfmt::skip]
    pub fn tolerances(&self) -> Tolerances { self.tolerances }

    /// Returns the maximum number of compaction rounds per run.
    #[must_use]
    #[rustfmt::skip]
    pub fn max_rounds(&self) -> NonZeroUsize { self.max_rounds }

    /// Realizes `source` and returns only the pruned graph.
    ///
    /// # Errors
    /// See [`CactusRealizer::realize`].
    pub fn run<D: DataSource + ?Sized>(&self, source: &D) -> Result<WeightedGraph> {
        self.realize(source).map(Realization::into_graph)
    }

    /// Realizes `source`, returning the graph with its taxon mapping.
    ///
    /// # Errors
    /// Returns [`crate::CactusError::Matrix`] when the source cannot be read
    /// or is not a valid distance matrix,
    /// [`crate::CactusError::RoundLimitExceeded`] when the extension does not
    /// settle within [`CactusRealizer::max_rounds`], and
    /// [`crate::CactusError::Graph`] if a graph invariant breaks.
    pub fn realize<D: DataSource + ?Sized>(&self, source: &D) -> Result<Realization> {
        let matrix = DistanceMatrix::try_from_source(source, &self.tolerances)?;
        self.realize_named(matrix, source.name())
    }

    /// Realizes an already validated matrix.
    ///
    /// # Errors
    /// Returns [`crate::CactusError::RoundLimitExceeded`] or
    /// [`crate::CactusError::Graph`] as for [`CactusRealizer::realize`].
    pub fn realize_matrix(&self, matrix: DistanceMatrix) -> Result<Realization> {
        self.realize_named(matrix, "matrix")
    }

    #[instrument(
        name = "core.realize",
        err,
        skip(self, matrix, data_source),
        fields(
            data_source = %data_source,
            taxa = matrix.dimension(),
            epsilon = self.tolerances.epsilon(),
            min_distance = self.tolerances.min_distance(),
            max_rounds = %self.max_rounds,
        ),
    )]
    fn realize_named(&self, matrix: DistanceMatrix, data_source: &str) -> Result<Realization> {
        let mut budget = RoundBudget::new(self.max_rounds);
        let extended = calculate_extended_matrix(matrix, &self.tolerances, &mut budget)?;

        let mut graph = build_complete(&extended.matrix);
        let pruned = prune_redundant_edges(&extended.matrix, &mut graph, &self.tolerances);
        let realization = Realization::new(graph, extended.taxa, pruned);
        info!(
            vertices = realization.graph().vertex_count(),
            edges = realization.graph().edge_count(),
            auxiliary = realization.auxiliary_count(),
            pruned,
            rounds = budget.used(),
            "realization completed"
        );
        Ok(realization)
    }
}

//! Data source abstractions feeding distance matrices into the realizer.

use crate::error::DataSourceError;

/// Abstraction over a collection of taxa that can yield pairwise distances.
///
/// # Examples
/// ```
/// use cactus_core::{DataSource, DataSourceError};
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
/// let src = Line(vec![1.0, 2.0, 4.0]);
/// assert_eq!(src.len(), 3);
/// assert_eq!(src.name(), "line");
/// assert_eq!(src.distance(0, 2)?, 3.0);
/// assert_eq!(src.row(1)?, [1.0, 0.0, 2.0]);
/// # Ok::<(), DataSourceError>(())
/// ```
pub trait DataSource {
    /// Returns number of taxa in the source.
    fn len(&self) -> usize;

    /// Returns whether the source contains no taxa.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a human-readable name.
    fn name(&self) -> &str;

    /// Returns the distance between two taxa.
    ///
    /// # Errors
    /// Implementations must return [`DataSourceError::OutOfBounds`] for
    /// invalid indices.
    fn distance(&self, i: usize, j: usize) -> Result<f64, DataSourceError>;

    /// Returns the distances from `index` to every taxon in order.
    ///
    /// The default implementation calls [`DataSource::distance`] repeatedly.
    ///
    /// # Errors
    /// Returns any [`DataSourceError`] surfaced by [`DataSource::distance`].
    fn row(&self, index: usize) -> Result<Vec<f64>, DataSourceError> {
        (0..self.len())
            .map(|column| self.distance(index, column))
            .collect()
    }
}

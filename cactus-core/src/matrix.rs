//! Square distance matrices with copy-on-write growth and shrink.
//!
//! Vertex identifiers are row indices and are **not** stable across
//! [`DistanceMatrix::without`]; callers that track vertex sets must reindex
//! them whenever rows are removed.

use std::ops::Range;

use crate::{
    DataSource, Tolerances,
    error::{CactusError, MatrixError},
    tolerance::DEFAULT_MIN_DISTANCE,
};

/// A symmetric, non-negative distance matrix with a zero diagonal.
///
/// # Examples
/// ```
/// use cactus_core::DistanceMatrix;
///
/// let matrix = DistanceMatrix::try_from_rows(vec![
///     vec![0.0, 3.0],
///     vec![3.0, 0.0],
/// ])?;
/// assert_eq!(matrix.dimension(), 2);
/// assert_eq!(matrix.get(1, 0), 3.0);
/// # Ok::<(), cactus_core::MatrixError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceMatrix {
    dimension: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Builds a matrix from explicit rows.
    ///
    /// Symmetry and the zero diagonal are checked against
    /// [`DEFAULT_MIN_DISTANCE`].
    ///
    /// # Errors
    /// Returns a [`MatrixError`] describing the first violated invariant.
    pub fn try_from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        let dimension = rows.len();
        if dimension == 0 {
            return Err(MatrixError::Empty);
        }
        let mut values = Vec::with_capacity(dimension * dimension);
        for (row, entries) in rows.into_iter().enumerate() {
            if entries.len() != dimension {
                return Err(MatrixError::NotSquare {
                    row,
                    expected: dimension,
                    actual: entries.len(),
                });
            }
            values.extend(entries);
        }
        let matrix = Self { dimension, values };
        matrix.validate(DEFAULT_MIN_DISTANCE)?;
        Ok(matrix)
    }

    /// Reads every pairwise distance from `source` and validates the result.
    ///
    /// # Errors
    /// Returns [`CactusError::Matrix`] naming the source when reading fails or
    /// the distances do not form a valid matrix.
    pub fn try_from_source<D: DataSource + ?Sized>(
        source: &D,
        tolerances: &Tolerances,
    ) -> Result<Self, CactusError> {
        let wrap = |error: MatrixError| CactusError::Matrix {
            data_source: source.name().into(),
            error,
        };
        let dimension = source.len();
        if dimension == 0 {
            return Err(wrap(MatrixError::Empty));
        }
        let mut values = Vec::with_capacity(dimension * dimension);
        for row in 0..dimension {
            let entries = source.row(row).map_err(|err| wrap(err.into()))?;
            if entries.len() != dimension {
                return Err(wrap(MatrixError::NotSquare {
                    row,
                    expected: dimension,
                    actual: entries.len(),
                }));
            }
            values.extend(entries);
        }
        let matrix = Self { dimension, values };
        matrix.validate(tolerances.min_distance()).map_err(wrap)?;
        Ok(matrix)
    }

    fn validate(&self, min_distance: f64) -> Result<(), MatrixError> {
        for row in self.vertices() {
            for column in self.vertices() {
                let value = self.get(row, column);
                if !value.is_finite() {
                    return Err(MatrixError::NonFinite { row, column });
                }
                if value < 0.0 {
                    return Err(MatrixError::Negative { row, column, value });
                }
                if row == column && value > min_distance {
                    return Err(MatrixError::NonZeroDiagonal { index: row, value });
                }
                if row < column && (value - self.get(column, row)).abs() > min_distance {
                    return Err(MatrixError::Asymmetric { row, column });
                }
            }
        }
        Ok(())
    }

    /// Returns the number of rows (and columns).
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the range of valid vertex identifiers.
    #[must_use]
    pub fn vertices(&self) -> Range<usize> {
        0..self.dimension
    }

    /// Returns `D[row][column]`.
    ///
    /// # Panics
    /// Panics when either index is out of range.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> f64 {
        assert!(
            row < self.dimension && column < self.dimension,
            "index ({row}, {column}) out of range for dimension {}",
            self.dimension,
        );
        self.values[row * self.dimension + column]
    }

    /// Returns row `index` as a slice.
    ///
    /// # Panics
    /// Panics when `index` is out of range.
    #[must_use]
    pub fn row(&self, index: usize) -> &[f64] {
        let start = index * self.dimension;
        &self.values[start..start + self.dimension]
    }

    /// Copies the matrix into nested rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.vertices().map(|row| self.row(row).to_vec()).collect()
    }

    /// Appends one vertex whose distances to the existing vertices are
    /// `distances`, returning the new vertex identifier.
    ///
    /// # Panics
    /// Panics when `distances` does not have one entry per existing vertex.
    pub(crate) fn push_vertex(&mut self, distances: &[f64]) -> usize {
        assert_eq!(distances.len(), self.dimension, "row length mismatch");
        let old = self.dimension;
        let dimension = old + 1;
        let mut values = Vec::with_capacity(dimension * dimension);
        for (row, distance) in distances.iter().enumerate() {
            values.extend_from_slice(self.row(row));
            values.push(*distance);
        }
        values.extend_from_slice(distances);
        values.push(0.0);
        self.dimension = dimension;
        self.values = values;
        old
    }

    /// Returns a copy without the rows and columns listed in `removed`.
    ///
    /// `removed` must be sorted ascending; retained vertices keep their
    /// relative order.
    #[must_use]
    pub fn without(&self, removed: &[usize]) -> Self {
        let kept = self
            .vertices()
            .filter(|vertex| removed.binary_search(vertex).is_err())
            .collect::<Vec<_>>();
        let mut values = Vec::with_capacity(kept.len() * kept.len());
        for &row in &kept {
            values.extend(kept.iter().map(|&column| self.get(row, column)));
        }
        Self {
            dimension: kept.len(),
            values,
        }
    }
}

//! Matrix provider implementation.
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use cactus_core::{DataSource, DataSourceError};

use crate::{errors::MatrixProviderError, parse::parse_matrix};

/// Distance matrix held in a contiguous row-major buffer.
///
/// Values are stored as read; symmetry and the zero diagonal are checked by
/// the core when the matrix is realized.
#[derive(Clone, Debug)]
pub struct MatrixProvider {
    name: String,
    dimension: usize,
    values: Vec<f64>,
    labels: Option<Vec<String>>,
}

impl MatrixProvider {
    /// Creates a provider from explicit rows.
    ///
    /// # Errors
    /// Returns [`MatrixProviderError::EmptyInput`] when `rows` is empty and
    /// [`MatrixProviderError::RowLength`] when a row does not have one entry
    /// per row.
    ///
    /// # Examples
    /// ```
    /// use cactus_core::DataSource;
    /// use cactus_providers_matrix::MatrixProvider;
    ///
    /// let provider = MatrixProvider::new("pair", vec![vec![0.0, 2.0], vec![2.0, 0.0]])?;
    /// assert_eq!(provider.len(), 2);
    /// assert_eq!(provider.distance(1, 0)?, 2.0);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(name: impl Into<String>, rows: Vec<Vec<f64>>) -> Result<Self, MatrixProviderError> {
        let dimension = rows.len();
        if dimension == 0 {
            return Err(MatrixProviderError::EmptyInput);
        }
        let mut values = Vec::with_capacity(dimension * dimension);
        for (row, entries) in rows.into_iter().enumerate() {
            if entries.len() != dimension {
                return Err(MatrixProviderError::RowLength {
                    row,
                    expected: dimension,
                    actual: entries.len(),
                });
            }
            values.extend(entries);
        }
        Ok(Self {
            name: name.into(),
            dimension,
            values,
            labels: None,
        })
    }

    /// Parses a matrix from a buffered reader.
    ///
    /// # Errors
    /// Returns a [`MatrixProviderError`] describing the first malformed line,
    /// or [`MatrixProviderError::Io`] if reading fails.
    ///
    /// # Examples
    /// ```
    /// use std::io::Cursor;
    /// use cactus_providers_matrix::MatrixProvider;
    ///
    /// let raw = "3\nA 0 1 2\nB 1 0 1\nC 2 1 0\n";
    /// let provider = MatrixProvider::try_from_reader("abc", Cursor::new(raw))?;
    /// assert_eq!(provider.dimension(), 3);
    /// assert_eq!(provider.label(2), Some("C"));
    /// # Ok::<(), cactus_providers_matrix::MatrixProviderError>(())
    /// ```
    pub fn try_from_reader<R: BufRead>(
        name: impl Into<String>,
        reader: R,
    ) -> Result<Self, MatrixProviderError> {
        let parsed = parse_matrix(reader)?;
        Ok(Self {
            name: name.into(),
            dimension: parsed.dimension,
            values: parsed.values,
            labels: parsed.labels,
        })
    }

    /// Opens `path` and parses its contents.
    ///
    /// # Errors
    /// Returns [`MatrixProviderError::Io`] if the file cannot be opened or
    /// read, otherwise as for [`MatrixProvider::try_from_reader`].
    pub fn try_from_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Self, MatrixProviderError> {
        let file = File::open(path)?;
        Self::try_from_reader(name, BufReader::new(file))
    }

    /// Returns the number of taxa.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the underlying row-major matrix.
    #[must_use]
    pub fn data(&self) -> &[f64] {
        &self.values
    }

    /// Returns the taxon labels when the input carried them.
    #[must_use]
    pub fn labels(&self) -> Option<&[String]> {
        self.labels.as_deref()
    }

    /// Returns the label of taxon `index`, if labels are present.
    #[must_use]
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels()?.get(index).map(String::as_str)
    }

    fn check(&self, index: usize) -> Result<usize, DataSourceError> {
        if index < self.dimension {
            Ok(index)
        } else {
            Err(DataSourceError::OutOfBounds { index })
        }
    }
}

impl DataSource for MatrixProvider {
    fn len(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn distance(&self, i: usize, j: usize) -> Result<f64, DataSourceError> {
        let row = self.check(i)?;
        let column = self.check(j)?;
        self.values
            .get(row * self.dimension + column)
            .copied()
            .ok_or(DataSourceError::OutOfBounds { index: i })
    }

    fn row(&self, index: usize) -> Result<Vec<f64>, DataSourceError> {
        let start = self.check(index)? * self.dimension;
        self.values
            .get(start..start + self.dimension)
            .map(<[f64]>::to_vec)
            .ok_or(DataSourceError::OutOfBounds { index })
    }
}

use thiserror::Error;

/// Failures raised while loading a distance matrix from text.
#[derive(Debug, Error)]
pub enum MatrixProviderError {
    /// The input held no rows once comments and blank lines were skipped.
    #[error("input contains no matrix data")]
    EmptyInput,
    /// The first line looked like a matrix row rather than a taxon count.
    #[error("first line must hold the number of taxa")]
    MissingDimension,
    /// The header could not be read as a positive taxon count.
    #[error("invalid taxon count `{raw}`")]
    InvalidDimension {
        /// Header text as written.
        raw: String,
    },
    /// A distance field was not a number.
    #[error("line {line}, field {column}: `{raw}` is not a number")]
    InvalidNumber {
        /// One-based line number.
        line: usize,
        /// One-based field position within the line.
        column: usize,
        /// Field text as written.
        raw: String,
    },
    /// A row did not carry one distance per taxon.
    #[error("row {row} has {actual} distances but expected {expected}")]
    RowLength {
        /// Zero-based matrix row.
        row: usize,
        /// Declared taxon count.
        expected: usize,
        /// Distances found on the row.
        actual: usize,
    },
    /// The input ended before every declared row was read.
    #[error("expected {expected} rows but found {actual}")]
    MissingRows {
        /// Declared taxon count.
        expected: usize,
        /// Rows read before the input ended.
        actual: usize,
    },
    /// Non-comment content followed the last matrix row.
    #[error("unexpected data after the matrix on line {line}")]
    TrailingData {
        /// One-based line number of the first extra line.
        line: usize,
    },
    /// Reading the input failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

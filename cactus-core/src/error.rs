//! Error types for the cactus core library.
//!
//! Defines the error enums exposed by the public API, their stable
//! machine-readable codes, and a convenient result alias.

use std::{fmt, num::NonZeroUsize, sync::Arc};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? $( ( $($tuple:tt)* ) )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? $( ( $($tuple)* ) )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced by [`crate::DataSource`] operations.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum DataSourceError {
    /// Requested index was outside the source's bounds.
    #[error("index {index} is out of bounds")]
    OutOfBounds {
        /// The requested row that exceeded the source bounds.
        index: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`DataSourceError`] variants.
    enum DataSourceErrorCode for DataSourceError {
        /// Requested index was outside the source's bounds.
        OutOfBounds => OutOfBounds { .. } => "DATA_SOURCE_OUT_OF_BOUNDS",
    }
}

/// Raised when an edge or vertex violates the [`crate::WeightedGraph`]
/// invariants.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// Both endpoints of an edge named the same vertex.
    #[error("self-loop on vertex {vertex} is not allowed")]
    SelfLoop {
        /// The repeated endpoint.
        vertex: usize,
    },
    /// An endpoint exceeded the graph's vertex capacity.
    #[error("vertex {vertex} is out of range for a graph with {vertex_count} vertices")]
    VertexOutOfRange {
        /// The offending endpoint.
        vertex: usize,
        /// Vertex capacity of the graph.
        vertex_count: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// Both endpoints of an edge named the same vertex.
        SelfLoop => SelfLoop { .. } => "GRAPH_SELF_LOOP",
        /// An endpoint exceeded the graph's vertex capacity.
        VertexOutOfRange => VertexOutOfRange { .. } => "GRAPH_VERTEX_OUT_OF_RANGE",
    }
}

/// Raised when a distance matrix fails validation.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum MatrixError {
    /// The matrix had no rows.
    #[error("distance matrix contains no rows")]
    Empty,
    /// A row had the wrong number of entries.
    #[error("row {row} has {actual} entries but {expected} were expected")]
    NotSquare {
        /// Offending row.
        row: usize,
        /// Expected number of entries.
        expected: usize,
        /// Number of entries found.
        actual: usize,
    },
    /// An entry was NaN or infinite.
    #[error("entry ({row}, {column}) is not finite")]
    NonFinite {
        /// Row of the entry.
        row: usize,
        /// Column of the entry.
        column: usize,
    },
    /// An entry was below zero.
    #[error("entry ({row}, {column}) is negative: {value}")]
    Negative {
        /// Row of the entry.
        row: usize,
        /// Column of the entry.
        column: usize,
        /// The negative value.
        value: f64,
    },
    /// A diagonal entry was not zero.
    #[error("diagonal entry {index} must be zero but is {value}")]
    NonZeroDiagonal {
        /// Diagonal index.
        index: usize,
        /// The non-zero value.
        value: f64,
    },
    /// `D[row][column]` differed from `D[column][row]`.
    #[error("entries ({row}, {column}) and ({column}, {row}) differ")]
    Asymmetric {
        /// Row of the upper entry.
        row: usize,
        /// Column of the upper entry.
        column: usize,
    },
    /// Reading a distance from the source failed.
    #[error(transparent)]
    DataSource(#[from] DataSourceError),
}

define_error_codes! {
    /// Stable codes describing [`MatrixError`] variants.
    enum MatrixErrorCode for MatrixError {
        /// The matrix had no rows.
        Empty => Empty => "MATRIX_EMPTY",
        /// A row had the wrong number of entries.
        NotSquare => NotSquare { .. } => "MATRIX_NOT_SQUARE",
        /// An entry was NaN or infinite.
        NonFinite => NonFinite { .. } => "MATRIX_NON_FINITE",
        /// An entry was below zero.
        Negative => Negative { .. } => "MATRIX_NEGATIVE",
        /// A diagonal entry was not zero.
        NonZeroDiagonal => NonZeroDiagonal { .. } => "MATRIX_NON_ZERO_DIAGONAL",
        /// The matrix was not symmetric.
        Asymmetric => Asymmetric { .. } => "MATRIX_ASYMMETRIC",
        /// Reading a distance from the source failed.
        DataSource => DataSource(..) => "MATRIX_DATA_SOURCE",
    }
}

/// Error type produced when configuring or running [`crate::CactusRealizer`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CactusError {
    /// A tolerance was negative or not finite.
    #[error("tolerance `{name}` must be finite and non-negative (got {value})")]
    InvalidTolerance {
        /// Name of the tolerance (`epsilon` or `min_distance`).
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The round limit was zero.
    #[error("max_rounds must be at least 1")]
    InvalidRoundLimit,
    /// The input matrix failed validation.
    #[error("data source `{data_source}` is not a valid distance matrix: {error}")]
    Matrix {
        /// Identifier of the offending data source.
        data_source: Arc<str>,
        /// Underlying validation failure.
        #[source]
        error: MatrixError,
    },
    /// A graph invariant was violated while assembling the result.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// Extension did not converge within the configured number of rounds.
    #[error("extension did not converge within {limit} rounds")]
    RoundLimitExceeded {
        /// The configured round limit.
        limit: NonZeroUsize,
    },
}

define_error_codes! {
    /// Stable codes describing [`CactusError`] variants.
    enum CactusErrorCode for CactusError {
        /// A tolerance was negative or not finite.
        InvalidTolerance => InvalidTolerance { .. } => "CACTUS_INVALID_TOLERANCE",
        /// The round limit was zero.
        InvalidRoundLimit => InvalidRoundLimit => "CACTUS_INVALID_ROUND_LIMIT",
        /// The input matrix failed validation.
        InvalidMatrix => Matrix { .. } => "CACTUS_INVALID_MATRIX",
        /// A graph invariant was violated.
        Graph => Graph(..) => "CACTUS_GRAPH",
        /// Extension did not converge within the configured number of rounds.
        RoundLimitExceeded => RoundLimitExceeded { .. } => "CACTUS_ROUND_LIMIT_EXCEEDED",
    }
}

impl CactusError {
    /// Retrieve the inner [`MatrixErrorCode`] when the error originated in
    /// matrix validation.
    #[must_use]
    pub const fn matrix_code(&self) -> Option<MatrixErrorCode> {
        match self {
            Self::Matrix { error, .. } => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, CactusError>;

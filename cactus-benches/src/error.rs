//! Benchmark setup error type.
//!
//! Lets setup functions propagate failures with `?` instead of panicking
//! inside Criterion closures.

use crate::source::SyntheticError;
use cactus_core::{CactusError, MatrixError};

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic metric generation failed.
    #[error("synthetic metric generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// The generated distances did not form a valid matrix.
    #[error("matrix construction failed: {0}")]
    Matrix(#[from] MatrixError),
    /// Configuring or running the realizer failed.
    #[error("realization failed: {0}")]
    Realize(#[from] CactusError),
}

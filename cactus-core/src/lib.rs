//! Cactus core library.
//!
//! Realizes a distance matrix as a sparse weighted graph whose shortest paths
//! reproduce the input distances, inserting auxiliary vertices where the
//! metric needs branch points that are not among the input taxa.
//!
//! ```
//! use cactus_core::{CactusBuilder, DistanceMatrix};
//!
//! let matrix = DistanceMatrix::try_from_rows(vec![
//!     vec![0.0, 2.0, 2.0, 2.0],
//!     vec![2.0, 0.0, 2.0, 2.0],
//!     vec![2.0, 2.0, 0.0, 2.0],
//!     vec![2.0, 2.0, 2.0, 0.0],
//! ])?;
//! let realization = CactusBuilder::new().build()?.realize_matrix(matrix)?;
//! assert_eq!(realization.auxiliary_count(), 1);
//! assert_eq!(realization.graph().edge_count(), 4);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod datasource;
mod error;
pub mod extend;
mod graph;
mod matrix;
pub mod realize;
mod realizer;
mod result;
mod tolerance;
pub mod verify;

#[cfg(test)]
mod property;
#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::CactusBuilder,
    datasource::DataSource,
    error::{
        CactusError, CactusErrorCode, DataSourceError, DataSourceErrorCode, GraphError,
        GraphErrorCode, MatrixError, MatrixErrorCode, Result,
    },
    graph::{UEdge, UNIT_WEIGHT, WeightedGraph},
    matrix::DistanceMatrix,
    realizer::CactusRealizer,
    result::Realization,
    tolerance::{DEFAULT_EPSILON, DEFAULT_MIN_DISTANCE, Tolerances},
};

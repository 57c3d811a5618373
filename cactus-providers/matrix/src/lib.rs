//! Distance-matrix provider for plain text, CSV and PHYLIP-style files.
//!
//! The provider parses a header line carrying the taxon count followed by one
//! row per taxon, optionally prefixed with a label, and exposes the result
//! through [`cactus_core::DataSource`].

mod errors;
mod parse;
mod provider;

pub use crate::errors::MatrixProviderError;
pub use crate::provider::MatrixProvider;

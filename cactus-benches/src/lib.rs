//! Benchmark support crate for cactus.
//!
//! Provides seeded synthetic tree metrics and parameter types used by the
//! Criterion benchmarks for full realization and triangle pruning.

pub mod error;
pub mod params;
pub mod source;

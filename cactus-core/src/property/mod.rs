//! Property-based tests for pruning, shadow merging and end-to-end
//! realization.
//!
//! Metrics are generated from seeded random trees and random weighted
//! graphs, so every failing case can be replayed from its seed.

mod pruning;
mod realization;
mod strategies;

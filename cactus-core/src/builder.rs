//! Builder utilities for configuring a [`CactusRealizer`].
//!
//! Validates tolerances and the round limit before any realization runs.

use std::num::NonZeroUsize;

use crate::{
    Result, Tolerances,
    error::CactusError,
    extend::DEFAULT_MAX_ROUNDS,
    realizer::CactusRealizer,
    tolerance::{DEFAULT_EPSILON, DEFAULT_MIN_DISTANCE},
};

/// Configures and constructs [`CactusRealizer`] instances.
///
/// # Examples
/// ```
/// use cactus_core::CactusBuilder;
///
/// let realizer = CactusBuilder::new()
///     .with_epsilon(1e-7)
///     .with_max_rounds(500)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(realizer.tolerances().epsilon(), 1e-7);
/// assert_eq!(realizer.max_rounds().get(), 500);
/// ```
#[derive(Debug, Clone)]
pub struct CactusBuilder {
    epsilon: f64,
    min_distance: f64,
    max_rounds: usize,
}

impl Default for CactusBuilder {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            min_distance: DEFAULT_MIN_DISTANCE,
            max_rounds: DEFAULT_MAX_ROUNDS.get(),
        }
    }
}

impl CactusBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use cactus_core::CactusBuilder;
    ///
    /// let builder = CactusBuilder::new();
    /// assert_eq!(builder.epsilon(), 1e-12);
    /// assert_eq!(builder.max_rounds(), 100_000);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the domination tolerance.
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Returns the configured domination tolerance.
    #[must_use]
    #[rustfmt::skip]
    pub fn epsilon(&self) -> f64 { self.epsilon }

    /// Overrides the distance below which two points coincide.
    ///
    /// # Examples
    /// ```
    /// use cactus_core::CactusBuilder;
    ///
    /// let builder = CactusBuilder::new().with_min_distance(1e-9);
    /// assert_eq!(builder.min_distance(), 1e-9);
    /// ```
    #[must_use]
    pub fn with_min_distance(mut self, min_distance: f64) -> Self {
        self.min_distance = min_distance;
        self
    }

    /// Returns the configured near-zero tolerance.
    #[must_use]
    #[rustfmt::skip]
    pub fn min_distance(&self) -> f64 { self.min_distance }

    /// Caps the number of compaction rounds a single run may spend.
    #[must_use]
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Returns the configured round limit.
    #[must_use]
    #[rustfmt::skip]
    pub fn max_rounds(&self) -> usize { self.max_rounds }

    /// Validates the configuration and constructs a [`CactusRealizer`].
    ///
    /// # Errors
    /// Returns [`CactusError::InvalidTolerance`] for a negative or non-finite
    /// tolerance and [`CactusError::InvalidRoundLimit`] for a zero round limit.
    ///
    /// # Examples
    /// ```
    /// use cactus_core::{CactusBuilder, CactusError};
    ///
    /// let err = CactusBuilder::new().with_max_rounds(0).build().unwrap_err();
    /// assert!(matches!(err, CactusError::InvalidRoundLimit));
    /// ```
    pub fn build(self) -> Result<CactusRealizer> {
        let tolerances = Tolerances::new(self.epsilon, self.min_distance)?;
        let max_rounds =
            NonZeroUsize::new(self.max_rounds).ok_or(CactusError::InvalidRoundLimit)?;
        Ok(CactusRealizer::new(tolerances, max_rounds))
    }
}

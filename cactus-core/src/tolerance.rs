//! Numeric tolerances threaded through every distance comparison.

use crate::{CactusError, Result};

/// Default tolerance for triangle-tightness (domination) tests.
pub const DEFAULT_EPSILON: f64 = 1e-12;

/// Default tolerance below which a distance counts as zero.
pub const DEFAULT_MIN_DISTANCE: f64 = 1e-12;

/// Tolerances for one realization run.
///
/// `epsilon` relaxes the domination test `D[i,k] + D[k,j] <= D[i,j] + epsilon`;
/// noisy real-world matrices typically need `1e-6` or `1e-7`. `min_distance`
/// decides when a distance is treated as zero, which drives shadow detection
/// and auxiliary-vertex rejection.
///
/// # Examples
/// ```
/// use cactus_core::Tolerances;
///
/// let tolerances = Tolerances::new(1e-6, 1e-9)?;
/// assert_eq!(tolerances.epsilon(), 1e-6);
/// assert!(Tolerances::new(-1.0, 0.0).is_err());
/// # Ok::<(), cactus_core::CactusError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    epsilon: f64,
    min_distance: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            min_distance: DEFAULT_MIN_DISTANCE,
        }
    }
}

impl Tolerances {
    /// Validates and bundles the two tolerances.
    ///
    /// # Errors
    /// Returns [`CactusError::InvalidTolerance`] when either value is negative
    /// or not finite.
    pub fn new(epsilon: f64, min_distance: f64) -> Result<Self> {
        validate("epsilon", epsilon)?;
        validate("min_distance", min_distance)?;
        Ok(Self {
            epsilon,
            min_distance,
        })
    }

    /// Returns the domination tolerance.
    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Returns the near-zero distance tolerance.
    #[must_use]
    pub fn min_distance(&self) -> f64 {
        self.min_distance
    }

    /// Returns `true` when `distance` is indistinguishable from zero.
    #[must_use]
    pub fn is_zero(&self, distance: f64) -> bool {
        distance.abs() <= self.min_distance
    }

    /// Returns `true` when the detour `left + right` is no longer than
    /// `direct`, within `epsilon`.
    #[must_use]
    pub(crate) fn dominates(&self, left: f64, right: f64, direct: f64) -> bool {
        left + right <= direct + self.epsilon
    }
}

fn validate(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CactusError::InvalidTolerance { name, value })
    }
}

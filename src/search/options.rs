//! Search configuration.

use crate::error::PolylabelError;
use num_traits::Float;

/// Tuning knobs for [`Polylabel`](super::Polylabel).
///
/// # Example
///
/// ```
/// use polylabel::PolylabelOptions;
///
/// let options = PolylabelOptions::default()
///     .with_precision(0.5)
///     .with_max_probes(10_000);
/// assert_eq!(options.precision, 0.5);
/// assert_eq!(options.max_probes, Some(10_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolylabelOptions<F> {
    /// Largest tolerated gap between the returned score and the best one.
    /// Must be finite and greater than zero. Defaults to 1.
    pub precision: F,
    /// Stop after this many cell evaluations even if the search has not
    /// converged. `None` (the default) runs to convergence.
    pub max_probes: Option<usize>,
}

impl<F: Float> PolylabelOptions<F> {
    /// Creates options with the given precision and no probe cap.
    pub fn new(precision: F) -> Self {
        Self {
            precision,
            max_probes: None,
        }
    }

    /// Sets the precision.
    pub fn with_precision(mut self, precision: F) -> Self {
        self.precision = precision;
        self
    }

    /// Caps the number of cell evaluations.
    pub fn with_max_probes(mut self, max_probes: usize) -> Self {
        self.max_probes = Some(max_probes);
        self
    }

    /// Checks that the precision is usable.
    pub fn validate(&self) -> Result<(), PolylabelError> {
        if self.precision.is_finite() && self.precision > F::zero() {
            Ok(())
        } else {
            Err(PolylabelError::InvalidPrecision)
        }
    }
}

impl<F: Float> Default for PolylabelOptions<F> {
    fn default() -> Self {
        Self::new(F::one())
    }
}

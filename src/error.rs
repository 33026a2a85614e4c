//! Error types for polygon validation and label search.

use thiserror::Error;

/// Errors that can occur when building a polygon or running a search.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolylabelError {
    /// The polygon has no rings at all.
    #[error("polygon has no rings")]
    EmptyPolygon,

    /// The outer ring has fewer than three points.
    #[error("outer ring has {count} points, at least 3 are required")]
    TooFewPoints {
        /// Index of the offending ring.
        ring: usize,
        /// Number of points the ring holds.
        count: usize,
    },

    /// A ring collapses to a single location.
    #[error("ring {ring} has fewer than 2 distinct points")]
    DegenerateRing {
        /// Index of the offending ring.
        ring: usize,
    },

    /// A coordinate is NaN or infinite.
    #[error("non-finite coordinate at ring {ring}, point {index}")]
    NonFiniteCoordinate {
        /// Index of the ring holding the point.
        ring: usize,
        /// Index of the point within the ring.
        index: usize,
    },

    /// Precision must be finite and strictly positive.
    #[error("precision must be finite and greater than zero")]
    InvalidPrecision,
}

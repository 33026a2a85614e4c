//! Scoring strategies for candidate points.
//!
//! The search maximizes a score derived from the signed distance. The default
//! [`Distance`] strategy scores a point by its distance alone; other strategies
//! trade some distance for other preferences, such as staying near the
//! centroid.

use crate::polygon::Polygon;
use crate::primitives::Point2;
use num_traits::Float;

/// A scoring strategy for candidate points.
///
/// Implementations must keep [`upper_bound`](Fitness::upper_bound) honest:
/// for every point `q` within `reach` of `center`, the score of `q` may not
/// exceed the bound, otherwise the search can prune the cell holding the true
/// optimum.
pub trait Fitness<F: Float> {
    /// Scores a point given its signed distance to the boundary.
    fn score(&self, point: Point2<F>, distance: F) -> F;

    /// Upper bound of the score anywhere within `reach` of `center`, given the
    /// signed distance of `center`.
    ///
    /// The default evaluates [`score`](Fitness::score) at `distance + reach`,
    /// which is valid when the score never decreases with distance and does not
    /// depend on the position.
    fn upper_bound(&self, center: Point2<F>, distance: F, reach: F) -> F {
        self.score(center, distance + reach)
    }
}

/// Scores a point by its signed distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Distance;

impl<F: Float> Fitness<F> for Distance {
    #[inline]
    fn score(&self, _point: Point2<F>, distance: F) -> F {
        distance
    }
}

/// Any `Fn(point, distance) -> score` closure is a strategy with the default
/// bound.
impl<F, T> Fitness<F> for T
where
    F: Float,
    T: Fn(Point2<F>, F) -> F,
{
    #[inline]
    fn score(&self, point: Point2<F>, distance: F) -> F {
        self(point, distance)
    }
}

/// Penalizes distance from a reference centroid.
///
/// Scores a point as `distance - weight * |point - centroid|`, so among points
/// of similar clearance the one closer to the centroid wins. `weight` should be
/// non-negative; a weight of zero is the same as [`Distance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CentroidBiased<F> {
    pub centroid: Point2<F>,
    pub weight: F,
}

impl<F: Float> CentroidBiased<F> {
    /// Creates the strategy around an explicit centroid.
    pub fn new(centroid: Point2<F>, weight: F) -> Self {
        Self { centroid, weight }
    }

    /// Creates the strategy around the outer ring's centroid, or its first
    /// vertex when the ring has zero area.
    pub fn for_polygon(polygon: &Polygon<F>, weight: F) -> Self {
        let centroid = polygon.centroid().unwrap_or(polygon.exterior()[0]);
        Self::new(centroid, weight)
    }
}

impl<F: Float> Fitness<F> for CentroidBiased<F> {
    fn score(&self, point: Point2<F>, distance: F) -> F {
        distance - self.weight * point.distance(self.centroid)
    }

    fn upper_bound(&self, center: Point2<F>, distance: F, reach: F) -> F {
        // Distance grows by at most `reach`, while the offset to the centroid
        // shrinks by at most `reach`.
        let nearest = (center.distance(self.centroid) - reach).max(F::zero());
        distance + reach - self.weight * nearest
    }
}

//! 2D line segment type.
//!
//! Polygon edges are stored as segments; the edge index and the distance
//! queries both work on them.

use super::{Point2, Vec2};
use num_traits::Float;

/// A 2D line segment defined by two endpoints.
///
/// Generic over floating-point types (`f32` or `f64`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2<F> {
    pub start: Point2<F>,
    pub end: Point2<F>,
}

impl<F: Float> Segment2<F> {
    /// Creates a new segment from two points.
    #[inline]
    pub fn new(start: Point2<F>, end: Point2<F>) -> Self {
        Self { start, end }
    }

    /// Returns the direction vector from start to end.
    #[inline]
    pub fn direction(self) -> Vec2<F> {
        self.end - self.start
    }

    /// Computes the closest point on the segment to the given point.
    ///
    /// The projection parameter is clamped to [0, 1], so the result lies on the
    /// segment rather than on its supporting line. A degenerate segment
    /// (`start == end`) returns `start`.
    pub fn closest_point(self, p: Point2<F>) -> Point2<F> {
        let d = self.direction();

        if d.x == F::zero() && d.y == F::zero() {
            return self.start;
        }

        let t = (p - self.start).dot(d) / d.magnitude_squared();

        if t > F::one() {
            self.end
        } else if t > F::zero() {
            self.start + d * t
        } else {
            self.start
        }
    }

    /// Computes the squared distance from a point to this segment.
    #[inline]
    pub fn distance_squared_to_point(self, p: Point2<F>) -> F {
        p.distance_squared(self.closest_point(p))
    }

    /// Returns `true` if a ray cast from `p` in the +x direction crosses this
    /// segment.
    ///
    /// Uses the half-open rule on y (an endpoint exactly at `p.y` counts on the
    /// upper side only), so summing crossings over a closed ring gives the
    /// even-odd inside test without double-counting shared vertices.
    #[inline]
    pub fn crosses_ray(self, p: Point2<F>) -> bool {
        let a = self.start;
        let b = self.end;
        (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x
    }
}

//! Signed distance from a point to a polygon boundary.
//!
//! Unlike the usual SDF convention, distances here are positive inside the
//! polygon and negative outside, which is what a "farthest interior point"
//! search wants to maximize.

use crate::polygon::Polygon;
use crate::primitives::{Point2, Segment2};
use num_traits::Float;

/// Nearest-edge distance and inside test for a query point.
///
/// This is the only view of the polygon the cell search needs per probe, so
/// the brute-force scan on [`Polygon`] can be swapped for an indexed structure
/// such as [`EdgeIndex`](super::EdgeIndex) without touching the search.
pub trait BoundaryQuery<F: Float> {
    /// Returns the minimum squared distance from `p` to any edge of any ring.
    fn distance_squared(&self, p: Point2<F>) -> F;

    /// Returns `true` if `p` is inside under the even-odd rule applied across
    /// all rings combined, so points inside a hole count as outside.
    fn contains(&self, p: Point2<F>) -> bool;

    /// Returns the signed distance from `p` to the boundary.
    ///
    /// - Positive: inside
    /// - Zero: exactly on an edge
    /// - Negative: outside (including inside a hole)
    fn signed_distance(&self, p: Point2<F>) -> F {
        apply_sign(self.distance_squared(p), self.contains(p))
    }
}

impl<F: Float> BoundaryQuery<F> for Polygon<F> {
    fn distance_squared(&self, p: Point2<F>) -> F {
        self.edges()
            .fold(F::infinity(), |min, edge| min.min(edge.distance_squared_to_point(p)))
    }

    fn contains(&self, p: Point2<F>) -> bool {
        self.edges()
            .fold(false, |inside, edge| inside != edge.crosses_ray(p))
    }

    fn signed_distance(&self, p: Point2<F>) -> F {
        signed_distance(p, self)
    }
}

/// Turns a squared edge distance and an inside flag into a signed distance.
///
/// A zero squared distance stays exactly zero regardless of the flag.
#[inline]
pub(crate) fn apply_sign<F: Float>(min_dist_sq: F, inside: bool) -> F {
    if min_dist_sq == F::zero() {
        return F::zero();
    }

    let dist = min_dist_sq.sqrt();
    if inside {
        dist
    } else {
        -dist
    }
}

/// Signed distance from `p` to the boundary of `polygon`, in one pass over
/// every edge.
///
/// Positive inside, negative outside or inside a hole, exactly zero on an edge.
///
/// # Example
///
/// ```
/// use polylabel::distance::signed_distance;
/// use polylabel::polygon::Polygon;
/// use polylabel::Point2;
///
/// let square = Polygon::from_coords(vec![vec![[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]]])
///     .unwrap();
///
/// assert_eq!(signed_distance(Point2::new(1.0, 2.0), &square), 1.0);
/// assert_eq!(signed_distance(Point2::new(6.0, 2.0), &square), -2.0);
/// assert_eq!(signed_distance(Point2::new(4.0, 2.0), &square), 0.0);
/// ```
pub fn signed_distance<F: Float>(p: Point2<F>, polygon: &Polygon<F>) -> F {
    let mut inside = false;
    let mut min_dist_sq = F::infinity();

    for edge in polygon.edges() {
        if edge.crosses_ray(p) {
            inside = !inside;
        }
        min_dist_sq = min_dist_sq.min(edge.distance_squared_to_point(p));
    }

    apply_sign(min_dist_sq, inside)
}

/// Squared distance from `p` to the segment `a`-`b`.
///
/// The projection is clamped to the segment, and a degenerate segment
/// (`a == b`) degrades to point-to-point distance.
#[inline]
pub fn point_segment_distance_squared<F: Float>(p: Point2<F>, a: Point2<F>, b: Point2<F>) -> F {
    Segment2::new(a, b).distance_squared_to_point(p)
}

/// Picks the centroid seed for the cell search.
///
/// Uses the area-weighted centroid of the outer ring, falling back to the
/// first vertex of the outer ring when the ring has zero area or when the
/// centroid lies strictly outside the polygon.
pub fn centroid_seed<F, Q>(polygon: &Polygon<F>, query: &Q) -> Point2<F>
where
    F: Float,
    Q: BoundaryQuery<F> + ?Sized,
{
    let first = polygon.exterior()[0];

    match polygon.centroid() {
        Some(c) if query.signed_distance(c) >= F::zero() => c,
        _ => first,
    }
}

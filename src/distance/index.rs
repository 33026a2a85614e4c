//! Edge index for faster boundary queries on large polygons.

use super::sdf::BoundaryQuery;
use crate::bounds::Aabb2;
use crate::polygon::Polygon;
use crate::primitives::{Point2, Segment2};
use crate::spatial::Bvh;
use num_traits::Float;

/// Default number of edges stored per BVH leaf.
pub const DEFAULT_LEAF_SIZE: usize = 8;

/// A bounding volume hierarchy over every edge of a polygon.
///
/// Answers the same [`BoundaryQuery`] as [`Polygon`] with identical results,
/// but visits only the edges near the query point instead of all of them.
/// Building costs O(n log n); it pays off once a search runs many probes
/// against a ring with hundreds of vertices or more.
///
/// # Example
///
/// ```
/// use polylabel::distance::{BoundaryQuery, EdgeIndex};
/// use polylabel::polygon::Polygon;
/// use polylabel::Point2;
///
/// let square = Polygon::from_coords(vec![vec![[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]]])
///     .unwrap();
/// let index = EdgeIndex::new(&square);
///
/// assert_eq!(index.signed_distance(Point2::new(1.0, 2.0)), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct EdgeIndex<F> {
    edges: Vec<Segment2<F>>,
    bvh: Bvh<F>,
    bounds: Aabb2<F>,
}

impl<F: Float> EdgeIndex<F> {
    /// Builds an index with [`DEFAULT_LEAF_SIZE`] edges per leaf.
    pub fn new(polygon: &Polygon<F>) -> Self {
        Self::with_leaf_size(polygon, DEFAULT_LEAF_SIZE)
    }

    /// Builds an index with at most `max_leaf_size` edges per leaf.
    pub fn with_leaf_size(polygon: &Polygon<F>, max_leaf_size: usize) -> Self {
        let edges: Vec<Segment2<F>> = polygon.edges().collect();
        let bvh = Bvh::build(&edges, max_leaf_size);
        // Validated polygons always have edges, so the tree has a root.
        let bounds = bvh
            .bounds()
            .unwrap_or_else(|| Aabb2::from_point(polygon.exterior()[0]));

        Self { edges, bvh, bounds }
    }

    /// Returns the number of indexed edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if no edges are indexed.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl<F: Float> BoundaryQuery<F> for EdgeIndex<F> {
    fn distance_squared(&self, p: Point2<F>) -> F {
        self.bvh
            .nearest(&self.edges, p)
            .map_or(F::infinity(), |(_, dist_sq)| dist_sq)
    }

    fn contains(&self, p: Point2<F>) -> bool {
        // Only edges whose box meets the ray from p to the right edge of the
        // polygon's extent can cross it. The intersection x of the crossing
        // test can round past an edge's right end, hence the slack.
        let two = F::one() + F::one();
        let eight = two * two * two;
        let magnitude = p.x.abs() + self.bounds.min.x.abs() + self.bounds.max.x.abs();
        let slack = magnitude * F::epsilon() * eight;
        let ray = Aabb2::new(
            Point2::new(p.x - slack, p.y),
            Point2::new(self.bounds.max.x, p.y),
        );
        let mut inside = false;
        self.bvh.for_each_intersecting(&self.edges, ray, |i| {
            if self.edges[i].crosses_ray(p) {
                inside = !inside;
            }
            true
        });
        inside
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::signed_distance;

    fn comb() -> Polygon<f64> {
        // A comb with many teeth and a hole in the spine
        let mut ring = vec![Point2::new(0.0, 0.0)];
        for i in 0..20 {
            let x = i as f64 * 2.0;
            ring.push(Point2::new(x, 10.0));
            ring.push(Point2::new(x + 1.0, 10.0));
            ring.push(Point2::new(x + 1.0, 3.0));
            ring.push(Point2::new(x + 2.0, 3.0));
        }
        ring.push(Point2::new(40.0, 0.0));
        let hole = vec![
            Point2::new(5.0, 1.0),
            Point2::new(5.0, 2.0),
            Point2::new(30.0, 2.0),
            Point2::new(30.0, 1.0),
        ];
        Polygon::new(vec![ring, hole]).unwrap()
    }

    #[test]
    fn test_edge_index_len() {
        let poly = comb();
        let index = EdgeIndex::new(&poly);
        assert_eq!(index.len(), poly.num_edges());
        assert!(!index.is_empty());
    }

    #[test]
    fn test_edge_index_matches_brute_force() {
        let poly = comb();
        for leaf in [1, 2, DEFAULT_LEAF_SIZE, 64] {
            let index = EdgeIndex::with_leaf_size(&poly, leaf);
            for i in 0..45 {
                for j in -2..14 {
                    let p = Point2::new(i as f64 * 0.93 - 1.0, j as f64 * 0.87);
                    assert_eq!(
                        index.signed_distance(p),
                        signed_distance(p, &poly),
                        "mismatch at {:?} with leaf size {}",
                        p,
                        leaf
                    );
                }
            }
        }
    }

    #[test]
    fn test_edge_index_point_right_of_polygon() {
        let poly = comb();
        let index = EdgeIndex::new(&poly);
        let p = Point2::new(50.0, 1.5);
        assert!(!index.contains(p));
        assert_eq!(index.signed_distance(p), -10.0);
    }

    fn step_ulps(x: f64, k: i64) -> f64 {
        f64::from_bits((x.to_bits() as i64 + k) as u64)
    }

    #[test]
    fn test_edge_index_near_steep_edge_far_from_origin() {
        // Left edge leans right by 3e-4 over a height of 1000, at x around 1e9
        let x0 = 1.0e9 + 0.1;
        let poly = Polygon::from_coords(vec![vec![
            [x0, 0.0],
            [x0 + 3.0e-4, 1000.0],
            [x0 + 5000.0, 1000.0],
            [x0 + 5000.0, 0.0],
        ]])
        .unwrap();
        let index = EdgeIndex::new(&poly);

        for y in [1.0e-9, 0.5, 333.3, 999.9999999] {
            let edge_x = x0 + 3.0e-4 * y / 1000.0;
            let mut seen = (false, false);
            for k in -40..=40 {
                let p = Point2::new(step_ulps(edge_x, k), y);
                let inside = poly.contains(p);
                assert_eq!(index.contains(p), inside, "at {:?}", p);
                assert_eq!(index.signed_distance(p), signed_distance(p, &poly));
                if inside {
                    seen.1 = true;
                } else {
                    seen.0 = true;
                }
            }
            // The sample straddles the edge
            assert_eq!(seen, (true, true), "at y = {}", y);
        }

        // Level with both ends of the steep edge
        for p in [Point2::new(x0, 0.0), Point2::new(x0 + 3.0e-4, 1000.0)] {
            for k in -3..=3 {
                let q = Point2::new(step_ulps(p.x, k), p.y);
                assert_eq!(index.contains(q), poly.contains(q), "at {:?}", q);
            }
        }
    }

    #[test]
    fn test_edge_index_hole_counts_as_outside() {
        let poly = comb();
        let index = EdgeIndex::new(&poly);
        assert!(!index.contains(Point2::new(10.0, 1.5)));
        assert!(index.contains(Point2::new(10.0, 0.5)));
    }
}

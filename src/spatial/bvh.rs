//! Bounding Volume Hierarchy for spatial queries.
//!
//! A BVH is a tree structure where each node contains an axis-aligned bounding
//! box (AABB) that encloses all primitives in its subtree. The polygon edge
//! index uses it for nearest-edge distance and ray-crossing queries.

use crate::bounds::Aabb2;
use crate::primitives::{Point2, Segment2};
use num_traits::Float;

/// A trait for objects that can be bounded and stored in a BVH.
pub trait Bounded<F: Float> {
    /// Returns the axis-aligned bounding box of this object.
    fn bounds(&self) -> Aabb2<F>;

    /// Returns the centroid of this object (used for partitioning).
    fn centroid(&self) -> Point2<F> {
        self.bounds().center()
    }

    /// Returns the squared distance from `p` to this object.
    ///
    /// Must never be smaller than the squared distance from `p` to
    /// [`bounds`](Bounded::bounds), otherwise nearest queries prune too early.
    fn distance_squared_to(&self, p: Point2<F>) -> F;
}

impl<F: Float> Bounded<F> for Segment2<F> {
    fn bounds(&self) -> Aabb2<F> {
        Aabb2::from_corners(self.start, self.end)
    }

    fn distance_squared_to(&self, p: Point2<F>) -> F {
        self.distance_squared_to_point(p)
    }
}

/// A node in the BVH tree.
#[derive(Debug, Clone)]
pub enum BvhNode<F> {
    /// A leaf node containing indices into the primitive array.
    Leaf {
        /// Bounding box of all primitives in this leaf.
        bounds: Aabb2<F>,
        /// Starting index in the primitive index array.
        first: usize,
        /// Number of primitives in this leaf.
        count: usize,
    },
    /// An internal node with two children.
    Internal {
        /// Bounding box of all primitives in this subtree.
        bounds: Aabb2<F>,
        /// Index of the left child node.
        left: usize,
        /// Index of the right child node.
        right: usize,
    },
}

impl<F: Float> BvhNode<F> {
    /// Returns the bounding box of this node.
    pub fn bounds(&self) -> Aabb2<F> {
        match self {
            BvhNode::Leaf { bounds, .. } => *bounds,
            BvhNode::Internal { bounds, .. } => *bounds,
        }
    }
}

/// A Bounding Volume Hierarchy for efficient spatial queries.
///
/// The BVH stores references to primitives by index, allowing the original
/// data to remain in place while enabling fast spatial queries.
///
/// # Example
///
/// ```
/// use polylabel::spatial::Bvh;
/// use polylabel::{Point2, Segment2};
///
/// let edges: Vec<Segment2<f64>> = vec![
///     Segment2::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)),
///     Segment2::new(Point2::new(5.0, 5.0), Point2::new(6.0, 5.0)),
/// ];
///
/// let bvh = Bvh::build(&edges, 1);
/// let (idx, dist_sq) = bvh.nearest(&edges, Point2::new(5.5, 7.0)).unwrap();
/// assert_eq!(idx, 1);
/// assert_eq!(dist_sq, 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct Bvh<F> {
    /// The tree nodes.
    nodes: Vec<BvhNode<F>>,
    /// Indices into the original primitive array, reordered for the BVH.
    indices: Vec<usize>,
    /// Index of the root node.
    root: usize,
}

impl<F: Float> Bvh<F> {
    /// Builds a BVH from a slice of bounded primitives.
    ///
    /// # Arguments
    ///
    /// * `primitives` - The primitives to index
    /// * `max_leaf_size` - Maximum number of primitives per leaf node
    ///
    /// # Returns
    ///
    /// A new BVH, or an empty BVH if primitives is empty.
    pub fn build<T: Bounded<F>>(primitives: &[T], max_leaf_size: usize) -> Self {
        let n = primitives.len();

        if n == 0 {
            return Self {
                nodes: vec![],
                indices: vec![],
                root: 0,
            };
        }

        let max_leaf_size = max_leaf_size.max(1);
        let mut indices: Vec<usize> = (0..n).collect();
        let mut nodes = Vec::with_capacity(2 * n);

        let root = build_recursive(primitives, &mut indices, 0, n, max_leaf_size, &mut nodes);

        Self {
            nodes,
            indices,
            root,
        }
    }

    /// Returns true if the BVH is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of primitives in the BVH.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns the bounding box of the entire BVH.
    pub fn bounds(&self) -> Option<Aabb2<F>> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(self.nodes[self.root].bounds())
        }
    }

    /// Finds the nearest primitive to a query point.
    ///
    /// Distances come from [`Bounded::distance_squared_to`]. Returns the index
    /// of the nearest primitive and the squared distance, or None if the BVH is
    /// empty.
    pub fn nearest<T: Bounded<F>>(&self, primitives: &[T], point: Point2<F>) -> Option<(usize, F)> {
        if self.nodes.is_empty() {
            return None;
        }

        let mut best_idx = 0;
        let mut best_dist_sq = F::infinity();

        self.nearest_recursive(
            primitives,
            self.root,
            point,
            &mut best_idx,
            &mut best_dist_sq,
        );

        if best_dist_sq.is_infinite() {
            None
        } else {
            Some((best_idx, best_dist_sq))
        }
    }

    fn nearest_recursive<T: Bounded<F>>(
        &self,
        primitives: &[T],
        node_idx: usize,
        point: Point2<F>,
        best_idx: &mut usize,
        best_dist_sq: &mut F,
    ) {
        let node = &self.nodes[node_idx];

        // Early exit if this node can't possibly contain a closer primitive
        let node_dist_sq = node.bounds().distance_squared_to_point(point);
        if node_dist_sq >= *best_dist_sq {
            return;
        }

        match node {
            BvhNode::Leaf { first, count, .. } => {
                for i in *first..(*first + *count) {
                    let prim_idx = self.indices[i];
                    let dist_sq = primitives[prim_idx].distance_squared_to(point);
                    if dist_sq < *best_dist_sq {
                        *best_dist_sq = dist_sq;
                        *best_idx = prim_idx;
                    }
                }
            }
            BvhNode::Internal { left, right, .. } => {
                // Visit closer child first for better pruning
                let left_dist = self.nodes[*left].bounds().distance_squared_to_point(point);
                let right_dist = self.nodes[*right].bounds().distance_squared_to_point(point);

                if left_dist < right_dist {
                    self.nearest_recursive(primitives, *left, point, best_idx, best_dist_sq);
                    self.nearest_recursive(primitives, *right, point, best_idx, best_dist_sq);
                } else {
                    self.nearest_recursive(primitives, *right, point, best_idx, best_dist_sq);
                    self.nearest_recursive(primitives, *left, point, best_idx, best_dist_sq);
                }
            }
        }
    }

    /// Calls a function for each primitive whose bounds intersect the query AABB.
    ///
    /// The callback receives the primitive index. If it returns `false`, the
    /// traversal stops early.
    pub fn for_each_intersecting<T: Bounded<F>, C>(
        &self,
        primitives: &[T],
        query: Aabb2<F>,
        mut callback: C,
    ) where
        C: FnMut(usize) -> bool,
    {
        if !self.nodes.is_empty() {
            self.for_each_intersecting_recursive(primitives, self.root, query, &mut callback);
        }
    }

    fn for_each_intersecting_recursive<T: Bounded<F>, C>(
        &self,
        primitives: &[T],
        node_idx: usize,
        query: Aabb2<F>,
        callback: &mut C,
    ) -> bool
    where
        C: FnMut(usize) -> bool,
    {
        let node = &self.nodes[node_idx];

        if !node.bounds().intersects(query) {
            return true; // Continue
        }

        match node {
            BvhNode::Leaf { first, count, .. } => {
                for i in *first..(*first + *count) {
                    let prim_idx = self.indices[i];
                    if primitives[prim_idx].bounds().intersects(query) && !callback(prim_idx) {
                        return false; // Stop
                    }
                }
                true
            }
            BvhNode::Internal { left, right, .. } => {
                if !self.for_each_intersecting_recursive(primitives, *left, query, callback) {
                    return false;
                }
                self.for_each_intersecting_recursive(primitives, *right, query, callback)
            }
        }
    }
}

/// Recursively builds the BVH tree.
fn build_recursive<F: Float, T: Bounded<F>>(
    primitives: &[T],
    indices: &mut [usize],
    start: usize,
    end: usize,
    max_leaf_size: usize,
    nodes: &mut Vec<BvhNode<F>>,
) -> usize {
    let count = end - start;

    let bounds = compute_bounds(primitives, &indices[start..end]);

    if count <= max_leaf_size {
        let node_idx = nodes.len();
        nodes.push(BvhNode::Leaf {
            bounds,
            first: start,
            count,
        });
        return node_idx;
    }

    let (split_axis, split_pos) = find_split(primitives, &indices[start..end], bounds);

    let mid = partition(primitives, &mut indices[start..end], split_axis, split_pos);
    let mid = start + mid;

    // Handle degenerate cases where partition fails
    let mid = if mid == start || mid == end {
        start + count / 2
    } else {
        mid
    };

    // Reserve space for this internal node
    let node_idx = nodes.len();
    nodes.push(BvhNode::Internal {
        bounds,
        left: 0,  // Placeholder
        right: 0, // Placeholder
    });

    let left = build_recursive(primitives, indices, start, mid, max_leaf_size, nodes);
    let right = build_recursive(primitives, indices, mid, end, max_leaf_size, nodes);

    nodes[node_idx] = BvhNode::Internal {
        bounds,
        left,
        right,
    };

    node_idx
}

/// Computes the bounding box of a set of primitives.
fn compute_bounds<F: Float, T: Bounded<F>>(primitives: &[T], indices: &[usize]) -> Aabb2<F> {
    let first_bounds = primitives[indices[0]].bounds();
    indices[1..].iter().fold(first_bounds, |acc, &idx| {
        acc.union(primitives[idx].bounds())
    })
}

/// Picks the axis with the largest extent and splits at the median centroid.
fn find_split<F: Float, T: Bounded<F>>(
    primitives: &[T],
    indices: &[usize],
    bounds: Aabb2<F>,
) -> (usize, F) {
    let axis = if bounds.width() > bounds.height() { 0 } else { 1 };

    let mut centroids: Vec<F> = indices
        .iter()
        .map(|&idx| {
            let c = primitives[idx].centroid();
            if axis == 0 {
                c.x
            } else {
                c.y
            }
        })
        .collect();

    centroids.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mid = centroids.len() / 2;
    let split_pos = centroids[mid];

    (axis, split_pos)
}

/// Partitions indices around a split position.
/// Returns the number of elements in the left partition.
fn partition<F: Float, T: Bounded<F>>(
    primitives: &[T],
    indices: &mut [usize],
    axis: usize,
    split_pos: F,
) -> usize {
    let mut left = 0;
    let mut right = indices.len();

    while left < right {
        let c = primitives[indices[left]].centroid();
        let pos = if axis == 0 { c.x } else { c.y };

        if pos < split_pos {
            left += 1;
        } else {
            right -= 1;
            indices.swap(left, right);
        }
    }

    left
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment2<f64> {
        Segment2::new(Point2::new(x1, y1), Point2::new(x2, y2))
    }

    /// Closed staircase ring of unit steps, 2 * `steps` edges.
    fn staircase(steps: usize) -> Vec<Segment2<f64>> {
        let mut ring = Vec::new();
        for i in 0..steps {
            let v = i as f64;
            ring.push(Point2::new(v, v));
            ring.push(Point2::new(v + 1.0, v));
        }
        (0..ring.len())
            .map(|i| Segment2::new(ring[i], ring[(i + 1) % ring.len()]))
            .collect()
    }

    #[test]
    fn test_bvh_empty() {
        let edges: Vec<Segment2<f64>> = vec![];
        let bvh = Bvh::build(&edges, 1);
        assert!(bvh.is_empty());
        assert_eq!(bvh.len(), 0);
        assert!(bvh.bounds().is_none());
        assert!(bvh.nearest(&edges, Point2::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_bvh_build() {
        let edges = vec![
            seg(0.0, 0.0, 1.0, 1.0),
            seg(1.0, 1.0, 5.0, -2.0),
            seg(5.0, -2.0, 6.0, 6.0),
            seg(6.0, 6.0, 0.0, 0.0),
        ];

        let bvh = Bvh::build(&edges, 1);
        assert_eq!(bvh.len(), 4);

        let bounds = bvh.bounds().unwrap();
        assert_eq!(bounds.min, Point2::new(0.0, -2.0));
        assert_eq!(bounds.max, Point2::new(6.0, 6.0));
    }

    #[test]
    fn test_bvh_zero_leaf_size() {
        let edges = staircase(50);
        let bvh = Bvh::build(&edges, 0);
        assert_eq!(bvh.len(), 100);
    }

    #[test]
    fn test_bvh_nearest_segment_uses_exact_distance() {
        // The long segment's centroid is far away, but its body is close
        let edges = vec![seg(-100.0, 0.0, 100.0, 0.0), seg(3.0, 3.0, 4.0, 4.0)];
        let bvh = Bvh::build(&edges, 1);

        let (idx, dist_sq) = bvh.nearest(&edges, Point2::new(50.0, 1.0)).unwrap();
        assert_eq!(idx, 0);
        assert_eq!(dist_sq, 1.0);
    }

    #[test]
    fn test_bvh_nearest_matches_brute_force() {
        let edges = staircase(40);

        for leaf in [1, 4, 16] {
            let bvh = Bvh::build(&edges, leaf);
            for q in [
                Point2::new(3.3, 4.7),
                Point2::new(-2.0, 11.0),
                Point2::new(39.5, 0.25),
                Point2::new(20.0, 20.0),
            ] {
                let expected = edges
                    .iter()
                    .map(|e| e.distance_squared_to_point(q))
                    .fold(f64::INFINITY, f64::min);
                let (idx, dist_sq) = bvh.nearest(&edges, q).unwrap();
                assert_eq!(dist_sq, expected);
                assert_eq!(edges[idx].distance_squared_to_point(q), expected);
            }
        }
    }

    #[test]
    fn test_bvh_for_each_visits_overlapping_edges() {
        let edges = staircase(10);
        let bvh = Bvh::build(&edges, 2);

        // Horizontal ray at y = 4.5 from x = 0 to the right
        let ray = Aabb2::new(Point2::new(0.0, 4.5), Point2::new(20.0, 4.5));
        let mut hits = Vec::new();
        bvh.for_each_intersecting(&edges, ray, |i| {
            hits.push(i);
            true
        });
        hits.sort_unstable();

        let expected: Vec<usize> = (0..edges.len())
            .filter(|&i| edges[i].bounds().intersects(ray))
            .collect();
        assert_eq!(hits, expected);
        // The riser from (5, 4) to (5, 5) and the closing edge
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_bvh_for_each_early_exit() {
        let edges = staircase(10);
        let bvh = Bvh::build(&edges, 1);

        let query = Aabb2::new(Point2::new(-1.0, -1.0), Point2::new(20.0, 20.0));
        let mut count = 0;
        bvh.for_each_intersecting(&edges, query, |_| {
            count += 1;
            count < 2 // Stop after 2
        });

        assert_eq!(count, 2);
    }

    #[test]
    fn test_bvh_f32() {
        let edges: Vec<Segment2<f32>> = vec![
            Segment2::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)),
            Segment2::new(Point2::new(1.0, 0.0), Point2::new(1.0, 1.0)),
            Segment2::new(Point2::new(2.0, 2.0), Point2::new(3.0, 2.0)),
        ];

        let bvh = Bvh::build(&edges, 1);
        assert_eq!(bvh.len(), 3);

        let (idx, _) = bvh.nearest(&edges, Point2::new(2.4, 2.2)).unwrap();
        assert_eq!(idx, 2);
    }
}

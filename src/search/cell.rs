//! Square search cells and their frontier ordering.

use super::fitness::Fitness;
use crate::distance::BoundaryQuery;
use crate::primitives::Point2;
use num_traits::{Float, FloatConst};
use std::cmp::Ordering;

/// A square region of the plane examined by the search.
///
/// `max` bounds the score of every point within the cell: no point inside can
/// be farther from its center than `half * √2`, and the signed distance changes
/// by at most that much between the two points.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cell<F> {
    pub center: Point2<F>,
    /// Half the side length.
    pub half: F,
    /// Signed distance from the center to the boundary.
    pub distance: F,
    /// Fitness of the center.
    pub score: F,
    /// Upper bound of the fitness anywhere in the cell.
    pub max: F,
    /// Insertion order, used to break ties on `max`.
    pub seq: usize,
}

impl<F: Float + FloatConst> Cell<F> {
    pub fn new<Q, W>(center: Point2<F>, half: F, seq: usize, query: &Q, fitness: &W) -> Self
    where
        Q: BoundaryQuery<F> + ?Sized,
        W: Fitness<F> + ?Sized,
    {
        let distance = query.signed_distance(center);
        let reach = half * F::SQRT_2();
        Self {
            center,
            half,
            distance,
            score: fitness.score(center, distance),
            max: fitness.upper_bound(center, distance, reach),
            seq,
        }
    }
}

impl<F: Float> PartialEq for Cell<F> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<F: Float> Eq for Cell<F> {}

impl<F: Float> PartialOrd for Cell<F> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<F: Float> Ord for Cell<F> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Greatest potential first; among equals, the earlier cell first.
        self.max
            .partial_cmp(&other.max)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

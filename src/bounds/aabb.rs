//! Axis-aligned bounding box.
//!
//! Used for the outer-ring extent that seeds the cell grid and for the
//! nodes of the edge index.

use crate::primitives::Point2;
use num_traits::Float;

/// A 2D axis-aligned bounding box with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb2<F> {
    pub min: Point2<F>,
    pub max: Point2<F>,
}

impl<F: Float> Aabb2<F> {
    /// Creates a box from its corners. Does not check that `min <= max`; a
    /// box with `min.x > max.x` intersects nothing.
    #[inline]
    pub fn new(min: Point2<F>, max: Point2<F>) -> Self {
        Self { min, max }
    }

    /// Creates the box spanned by two points in any order, such as the ends
    /// of an edge.
    #[inline]
    pub fn from_corners(a: Point2<F>, b: Point2<F>) -> Self {
        Self {
            min: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    #[inline]
    pub fn from_point(p: Point2<F>) -> Self {
        Self { min: p, max: p }
    }

    #[inline]
    pub fn width(self) -> F {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> F {
        self.max.y - self.min.y
    }

    /// Side length of the first generation of search cells.
    #[inline]
    pub fn min_extent(self) -> F {
        self.width().min(self.height())
    }

    /// Returns `min + extent / 2` on each axis.
    #[inline]
    pub fn center(self) -> Point2<F> {
        let two = F::one() + F::one();
        Point2::new(
            self.min.x + self.width() / two,
            self.min.y + self.height() / two,
        )
    }

    #[inline]
    pub fn expand_to_include(self, p: Point2<F>) -> Self {
        Self {
            min: Point2::new(self.min.x.min(p.x), self.min.y.min(p.y)),
            max: Point2::new(self.max.x.max(p.x), self.max.y.max(p.y)),
        }
    }

    /// Smallest box holding both.
    #[inline]
    pub fn union(self, other: Self) -> Self {
        self.expand_to_include(other.min).expand_to_include(other.max)
    }

    /// Returns `true` if the boxes overlap or touch.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// Squared distance from `p` to the nearest point of the box, zero inside.
    ///
    /// Never exceeds the squared distance from `p` to anything the box holds,
    /// which is what lets the edge index prune whole subtrees.
    pub fn distance_squared_to_point(self, p: Point2<F>) -> F {
        let gap = |v: F, lo: F, hi: F| {
            if v < lo {
                lo - v
            } else if v > hi {
                v - hi
            } else {
                F::zero()
            }
        };
        let dx = gap(p.x, self.min.x, self.max.x);
        let dy = gap(p.y, self.min.y, self.max.y);
        dx * dx + dy * dy
    }
}

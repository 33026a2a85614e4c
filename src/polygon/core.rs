//! Core polygon type and basic ring measurements.

use crate::bounds::Aabb2;
use crate::error::PolylabelError;
use crate::primitives::{Point2, Segment2};
use num_traits::Float;

/// A polygon made of an outer ring and zero or more holes.
///
/// Ring 0 is the outer boundary, rings 1..n are holes. Every ring is implicitly
/// closed (the last vertex connects to the first); repeating the first vertex
/// at the end is allowed. Winding order does not matter for any query in this
/// crate.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<F> {
    rings: Vec<Vec<Point2<F>>>,
}

impl<F: Float> Polygon<F> {
    /// Creates a polygon from its rings, validating them.
    ///
    /// # Errors
    ///
    /// - [`PolylabelError::EmptyPolygon`] if `rings` is empty
    /// - [`PolylabelError::NonFiniteCoordinate`] if any coordinate is NaN or infinite
    /// - [`PolylabelError::TooFewPoints`] if the outer ring has fewer than 3 points
    /// - [`PolylabelError::DegenerateRing`] if any ring has fewer than 2 distinct points
    pub fn new(rings: Vec<Vec<Point2<F>>>) -> Result<Self, PolylabelError> {
        validate_rings(&rings)?;
        Ok(Self { rings })
    }

    /// Creates a polygon without holes.
    pub fn from_exterior(exterior: Vec<Point2<F>>) -> Result<Self, PolylabelError> {
        Self::new(vec![exterior])
    }

    /// Creates a polygon from nested coordinate pairs, the layout GeoJSON uses
    /// for polygon coordinates.
    ///
    /// ```
    /// use polylabel::polygon::Polygon;
    ///
    /// let square = Polygon::from_coords(vec![vec![
    ///     [0.0, 0.0],
    ///     [4.0, 0.0],
    ///     [4.0, 4.0],
    ///     [0.0, 4.0],
    ///     [0.0, 0.0],
    /// ]])
    /// .unwrap();
    /// assert_eq!(square.exterior().len(), 5);
    /// ```
    pub fn from_coords<I, R>(rings: I) -> Result<Self, PolylabelError>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = [F; 2]>,
    {
        let rings = rings
            .into_iter()
            .map(|ring| ring.into_iter().map(Point2::from).collect())
            .collect();
        Self::new(rings)
    }

    /// Returns the outer ring.
    #[inline]
    pub fn exterior(&self) -> &[Point2<F>] {
        &self.rings[0]
    }

    /// Returns the hole rings.
    #[inline]
    pub fn interiors(&self) -> &[Vec<Point2<F>>] {
        &self.rings[1..]
    }

    /// Returns every ring, outer ring first.
    #[inline]
    pub fn rings(&self) -> &[Vec<Point2<F>>] {
        &self.rings
    }

    /// Returns the total number of edges over all rings.
    pub fn num_edges(&self) -> usize {
        self.rings.iter().map(Vec::len).sum()
    }

    /// Iterates over every edge of every ring, including the closing edges.
    ///
    /// Each edge runs from a vertex back to its predecessor, so the first edge
    /// of a ring joins vertex 0 to the last vertex.
    pub fn edges(&self) -> impl Iterator<Item = Segment2<F>> + '_ {
        self.rings.iter().flat_map(|ring| ring_edges(ring))
    }

    /// Returns the signed area of the outer ring.
    ///
    /// Positive for CCW winding, negative for CW winding.
    pub fn signed_area(&self) -> F {
        polygon_signed_area(self.exterior())
    }

    /// Returns the area of the outer ring minus the area of the holes.
    pub fn area(&self) -> F {
        let holes = self
            .interiors()
            .iter()
            .fold(F::zero(), |acc, ring| acc + polygon_area(ring));
        polygon_area(self.exterior()) - holes
    }

    /// Returns the area-weighted centroid of the outer ring.
    ///
    /// Returns `None` when the ring has exactly zero area.
    pub fn centroid(&self) -> Option<Point2<F>> {
        polygon_centroid(self.exterior())
    }

    /// Returns the bounding box of the outer ring.
    pub fn bounding_box(&self) -> Aabb2<F> {
        let exterior = self.exterior();
        exterior[1..]
            .iter()
            .fold(Aabb2::from_point(exterior[0]), |aabb, &p| {
                aabb.expand_to_include(p)
            })
    }
}

/// Iterates over the edges of a single closed ring.
pub(crate) fn ring_edges<F: Float>(ring: &[Point2<F>]) -> impl Iterator<Item = Segment2<F>> + '_ {
    let n = ring.len();
    (0..n).map(move |i| {
        let j = if i == 0 { n - 1 } else { i - 1 };
        Segment2::new(ring[i], ring[j])
    })
}

fn validate_rings<F: Float>(rings: &[Vec<Point2<F>>]) -> Result<(), PolylabelError> {
    if rings.is_empty() {
        return Err(PolylabelError::EmptyPolygon);
    }

    for (ring, points) in rings.iter().enumerate() {
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(PolylabelError::NonFiniteCoordinate { ring, index });
        }

        if ring == 0 && points.len() < 3 {
            return Err(PolylabelError::TooFewPoints {
                ring,
                count: points.len(),
            });
        }

        let distinct = match points.first() {
            Some(first) => points.iter().any(|p| p != first),
            None => false,
        };
        if !distinct {
            return Err(PolylabelError::DegenerateRing { ring });
        }
    }

    Ok(())
}

/// Computes the signed area of a ring using the shoelace formula.
///
/// Positive for CCW winding, negative for CW winding.
pub fn polygon_signed_area<F: Float>(vertices: &[Point2<F>]) -> F {
    if vertices.len() < 3 {
        return F::zero();
    }

    let mut area = F::zero();
    let n = vertices.len();

    for i in 0..n {
        let j = (i + 1) % n;
        area = area + vertices[i].x * vertices[j].y;
        area = area - vertices[j].x * vertices[i].y;
    }

    area / (F::one() + F::one())
}

/// Computes the absolute area of a ring.
pub fn polygon_area<F: Float>(vertices: &[Point2<F>]) -> F {
    polygon_signed_area(vertices).abs()
}

/// Computes the area-weighted centroid of a ring.
///
/// Returns `None` if the accumulated shoelace area is exactly zero, which
/// covers collinear rings and rings with fewer than three distinct points.
pub fn polygon_centroid<F: Float>(vertices: &[Point2<F>]) -> Option<Point2<F>> {
    let three = F::one() + F::one() + F::one();

    let mut area = F::zero();
    let mut x = F::zero();
    let mut y = F::zero();

    for edge in ring_edges(vertices) {
        let a = edge.start;
        let b = edge.end;
        let f = a.x * b.y - b.x * a.y;
        x = x + (a.x + b.x) * f;
        y = y + (a.y + b.y) * f;
        area = area + f * three;
    }

    if area == F::zero() {
        return None;
    }

    Some(Point2::new(x / area, y / area))
}

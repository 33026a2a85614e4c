//! polylabel - Pole of inaccessibility search
//!
//! Finds the point inside a polygon that lies farthest from its outline, holes
//! included, to within a chosen precision. Unlike a centroid, the result never
//! falls outside a concave shape or inside a hole, which makes it a good anchor
//! for labels and markers.

pub mod bounds;
pub mod distance;
pub mod error;
pub mod polygon;
pub mod primitives;
pub mod search;
pub mod spatial;

pub use bounds::Aabb2;
pub use error::PolylabelError;
pub use polygon::Polygon;
pub use primitives::{Point2, Segment2, Vec2};
pub use search::{
    polylabel, CentroidBiased, Distance, Fitness, PoleOfInaccessibility, Polylabel,
    PolylabelOptions, Progress, ProgressLog, ProgressSink,
};

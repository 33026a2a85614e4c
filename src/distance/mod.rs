//! Signed point-to-polygon distance and the boundary query seam.

mod index;
mod sdf;

pub use index::{EdgeIndex, DEFAULT_LEAF_SIZE};
pub use sdf::{
    centroid_seed, point_segment_distance_squared, signed_distance, BoundaryQuery,
};

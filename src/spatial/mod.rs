//! Spatial data structures and queries.
//!
//! - [`Bvh`] - A bounding volume hierarchy for bounded objects such as
//!   polygon edges

mod bvh;

pub use bvh::{Bounded, Bvh, BvhNode};

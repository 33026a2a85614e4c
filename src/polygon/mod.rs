//! Polygon model: an outer ring plus optional holes.
//!
//! This module provides:
//! - Validated construction from rings or nested coordinate arrays
//! - Area and centroid calculation
//! - Edge iteration across all rings
//!
//! # Example
//!
//! ```
//! use polylabel::polygon::Polygon;
//! use polylabel::Point2;
//!
//! let square = Polygon::from_exterior(vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(2.0, 0.0),
//!     Point2::new(2.0, 2.0),
//!     Point2::new(0.0, 2.0),
//! ])
//! .unwrap();
//!
//! assert_eq!(square.area(), 4.0);
//! assert_eq!(square.centroid(), Some(Point2::new(1.0, 1.0)));
//! ```

mod core;

pub use self::core::{polygon_area, polygon_centroid, polygon_signed_area, Polygon};

//! Adaptive cell search for the pole of inaccessibility.
//!
//! The search covers the outer ring's bounding box with square cells and
//! keeps them in a priority queue ordered by the best score any point inside
//! could reach. It repeatedly splits the most promising cell into four,
//! discarding cells that cannot beat the best point found so far by more than
//! the precision, until the queue holds nothing that can.
//!
//! # Example
//!
//! ```
//! use polylabel::polygon::Polygon;
//! use polylabel::{Polylabel, PolylabelOptions};
//!
//! // A square with a square hole off to one side
//! let polygon = Polygon::from_coords(vec![
//!     vec![[0.0, 0.0], [20.0, 0.0], [20.0, 20.0], [0.0, 20.0]],
//!     vec![[2.0, 2.0], [2.0, 18.0], [8.0, 18.0], [8.0, 2.0]],
//! ])
//! .unwrap();
//!
//! let pole = Polylabel::new(PolylabelOptions::new(0.01))
//!     .find(&polygon)
//!     .unwrap();
//!
//! // Best clearance lies in the wide strip right of the hole
//! assert!(pole.point.x > 8.0);
//! assert!(pole.distance > 5.9);
//! ```

mod cell;
mod engine;
mod fitness;
mod options;
mod progress;

pub use engine::{polylabel, PoleOfInaccessibility, Polylabel};
pub use fitness::{CentroidBiased, Distance, Fitness};
pub use options::PolylabelOptions;
pub use progress::{Progress, ProgressLog, ProgressSink};

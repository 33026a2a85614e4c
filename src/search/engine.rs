//! Best-first branch-and-bound search over square cells.

use super::cell::Cell;
use super::fitness::{Distance, Fitness};
use super::options::PolylabelOptions;
use super::progress::{Progress, ProgressSink};
use crate::distance::{centroid_seed, BoundaryQuery, EdgeIndex};
use crate::error::PolylabelError;
use crate::polygon::Polygon;
use crate::primitives::Point2;
use num_traits::{Float, FloatConst};
use std::collections::BinaryHeap;
use tracing::{debug, trace, warn};

/// The point found by a search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoleOfInaccessibility<F> {
    /// Location of the best point.
    pub point: Point2<F>,
    /// Signed distance from `point` to the nearest edge.
    pub distance: F,
    /// Fitness of `point`; equals `distance` under the default strategy.
    pub score: F,
    /// Number of cells evaluated, the two seed guesses included.
    pub probes: usize,
    /// `false` if the probe cap stopped the search before it converged.
    pub converged: bool,
}

/// Finds the pole of inaccessibility of `polygon` to within `precision`.
///
/// Shorthand for a default [`Polylabel`] with the given precision and a
/// brute-force boundary scan.
///
/// # Example
///
/// ```
/// use polylabel::polygon::Polygon;
/// use polylabel::{polylabel, Point2};
///
/// let square = Polygon::from_coords(vec![vec![[0.0, 0.0], [8.0, 0.0], [8.0, 8.0], [0.0, 8.0]]])
///     .unwrap();
///
/// let pole = polylabel(&square, 0.1).unwrap();
/// assert_eq!(pole.point, Point2::new(4.0, 4.0));
/// assert_eq!(pole.distance, 4.0);
/// ```
pub fn polylabel<F: Float + FloatConst>(
    polygon: &Polygon<F>,
    precision: F,
) -> Result<PoleOfInaccessibility<F>, PolylabelError> {
    Polylabel::new(PolylabelOptions::new(precision)).find(polygon)
}

/// A configured pole-of-inaccessibility search.
///
/// The searcher holds no per-search state, so one instance can serve any
/// number of polygons, from any number of threads.
#[derive(Debug, Clone)]
pub struct Polylabel<F, W = Distance> {
    options: PolylabelOptions<F>,
    fitness: W,
}

impl<F: Float + FloatConst> Polylabel<F, Distance> {
    /// Creates a searcher scoring points by distance alone.
    pub fn new(options: PolylabelOptions<F>) -> Self {
        Self {
            options,
            fitness: Distance,
        }
    }
}

impl<F: Float + FloatConst> Default for Polylabel<F, Distance> {
    fn default() -> Self {
        Self::new(PolylabelOptions::default())
    }
}

impl<F, W> Polylabel<F, W>
where
    F: Float + FloatConst,
    W: Fitness<F>,
{
    /// Replaces the scoring strategy.
    pub fn with_fitness<W2: Fitness<F>>(self, fitness: W2) -> Polylabel<F, W2> {
        Polylabel {
            options: self.options,
            fitness,
        }
    }

    /// Returns the options in use.
    pub fn options(&self) -> &PolylabelOptions<F> {
        &self.options
    }

    /// Searches `polygon`, scanning every edge for each probe.
    pub fn find(&self, polygon: &Polygon<F>) -> Result<PoleOfInaccessibility<F>, PolylabelError> {
        self.find_with(polygon, polygon, &mut ())
    }

    /// Searches `polygon` through an [`EdgeIndex`] built for this call.
    ///
    /// Returns the same result as [`find`](Self::find).
    pub fn find_indexed(
        &self,
        polygon: &Polygon<F>,
    ) -> Result<PoleOfInaccessibility<F>, PolylabelError> {
        let index = EdgeIndex::new(polygon);
        self.find_with(polygon, &index, &mut ())
    }

    /// Searches `polygon`, answering distance queries through `query` and
    /// reporting progress to `sink`.
    ///
    /// `query` must describe the same boundary as `polygon`; the polygon itself
    /// only supplies the outer ring's extent and centroid.
    ///
    /// # Errors
    ///
    /// Returns [`PolylabelError::InvalidPrecision`] if the configured precision
    /// is not finite and positive.
    pub fn find_with<Q, S>(
        &self,
        polygon: &Polygon<F>,
        query: &Q,
        sink: &mut S,
    ) -> Result<PoleOfInaccessibility<F>, PolylabelError>
    where
        Q: BoundaryQuery<F> + ?Sized,
        S: ProgressSink<F> + ?Sized,
    {
        self.options.validate()?;
        let precision = self.options.precision;
        let two = F::one() + F::one();

        let bbox = polygon.bounding_box();
        let cell_size = bbox.min_extent();

        if cell_size <= precision {
            debug!("polygon is no wider than the precision, returning its corner");
            return Ok(PoleOfInaccessibility {
                point: bbox.min,
                distance: F::zero(),
                score: self.fitness.score(bbox.min, F::zero()),
                probes: 0,
                converged: true,
            });
        }

        let centroid = centroid_seed(polygon, query);
        let centroid_cell = Cell::new(centroid, F::zero(), 0, query, &self.fitness);
        let bbox_cell = Cell::new(bbox.center(), F::zero(), 1, query, &self.fitness);
        let best = if bbox_cell.score > centroid_cell.score {
            bbox_cell
        } else {
            centroid_cell
        };

        let mut search = Search {
            query,
            fitness: &self.fitness,
            sink,
            precision,
            queue: BinaryHeap::new(),
            best,
            probes: 2,
        };
        search.report_improvement();

        // Cover the bounding box with the first generation of cells
        let h = cell_size / two;
        let mut x = bbox.min.x;
        while x < bbox.max.x {
            let mut y = bbox.min.y;
            while y < bbox.max.y {
                search.probe(Point2::new(x + h, y + h), h);
                y = y + cell_size;
            }
            x = x + cell_size;
        }

        let converged = search.run(self.options.max_probes);
        Ok(search.finish(converged))
    }
}

/// Mutable state of one search call.
struct Search<'a, F, Q: ?Sized, W, S: ?Sized> {
    query: &'a Q,
    fitness: &'a W,
    sink: &'a mut S,
    precision: F,
    queue: BinaryHeap<Cell<F>>,
    best: Cell<F>,
    probes: usize,
}

impl<F, Q, W, S> Search<'_, F, Q, W, S>
where
    F: Float + FloatConst,
    Q: BoundaryQuery<F> + ?Sized,
    W: Fitness<F>,
    S: ProgressSink<F> + ?Sized,
{
    /// Evaluates a cell, queues it if it could still beat the best by more
    /// than the precision, and takes it as the new best if its center scores
    /// higher.
    fn probe(&mut self, center: Point2<F>, half: F) {
        let cell = Cell::new(center, half, self.probes, self.query, self.fitness);
        self.probes += 1;

        if cell.max > self.best.score + self.precision {
            self.queue.push(cell);
        }

        if cell.score > self.best.score {
            self.best = cell;
            self.report_improvement();
        }
    }

    /// Drains the frontier. Returns `false` if the probe cap cut it short.
    fn run(&mut self, max_probes: Option<usize>) -> bool {
        let two = F::one() + F::one();

        while let Some(cell) = self.queue.pop() {
            // Cells pop in order of potential, so once one cannot improve
            // on the best by more than the precision, none can.
            if cell.max - self.best.score <= self.precision {
                return true;
            }

            if let Some(limit) = max_probes {
                if self.probes >= limit {
                    warn!(
                        probes = self.probes,
                        limit,
                        remaining = self.queue.len() + 1,
                        "probe limit reached before convergence"
                    );
                    return false;
                }
            }

            let h = cell.half / two;
            let c = cell.center;
            trace!(
                x = c.x.to_f64(),
                y = c.y.to_f64(),
                half = h.to_f64(),
                queued = self.queue.len(),
                "splitting cell"
            );
            self.probe(Point2::new(c.x - h, c.y - h), h);
            self.probe(Point2::new(c.x + h, c.y - h), h);
            self.probe(Point2::new(c.x - h, c.y + h), h);
            self.probe(Point2::new(c.x + h, c.y + h), h);
        }

        true
    }

    fn progress(&self) -> Progress<F> {
        Progress {
            probes: self.probes,
            best_distance: self.best.distance,
            best_score: self.best.score,
        }
    }

    fn report_improvement(&mut self) {
        let progress = self.progress();
        debug!(
            probes = progress.probes,
            distance = progress.best_distance.to_f64(),
            "found better cell"
        );
        self.sink.improved(progress);
    }

    fn finish(self, converged: bool) -> PoleOfInaccessibility<F> {
        let progress = self.progress();
        debug!(
            probes = progress.probes,
            distance = progress.best_distance.to_f64(),
            converged,
            "search finished"
        );
        self.sink.finished(progress);

        PoleOfInaccessibility {
            point: self.best.center,
            distance: self.best.distance,
            score: self.best.score,
            probes: self.probes,
            converged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::fitness::CentroidBiased;
    use crate::search::progress::ProgressLog;
    use approx::assert_relative_eq;

    fn polygon(coords: &[[f64; 2]]) -> Polygon<f64> {
        Polygon::from_coords(vec![coords.to_vec()]).unwrap()
    }

    fn rectangle(w: f64, h: f64) -> Polygon<f64> {
        polygon(&[[0.0, 0.0], [w, 0.0], [w, h], [0.0, h]])
    }

    /// Regular polygon approximating a circle of radius `r` around `(cx, cy)`.
    fn circle(cx: f64, cy: f64, r: f64, n: usize) -> Polygon<f64> {
        let ring = (0..n)
            .map(|i| {
                let a = i as f64 * std::f64::consts::TAU / n as f64;
                Point2::new(cx + r * a.cos(), cy + r * a.sin())
            })
            .collect();
        Polygon::from_exterior(ring).unwrap()
    }

    #[test]
    fn test_square_returns_exact_center() {
        let pole = polylabel(&rectangle(10.0, 10.0), 1.0).unwrap();
        assert_eq!(pole.point, Point2::new(5.0, 5.0));
        assert_eq!(pole.distance, 5.0);
        assert_eq!(pole.score, 5.0);
        assert!(pole.converged);
    }

    #[test]
    fn test_rectangle_within_precision() {
        let precision = 0.01;
        let pole = polylabel(&rectangle(12.0, 4.0), precision).unwrap();
        assert!(pole.distance >= 2.0 - precision);
        assert!(pole.distance <= 2.0);
        assert_relative_eq!(pole.point.y, 2.0, epsilon = precision);
    }

    #[test]
    fn test_circle_center() {
        let r = 50.0;
        let poly = circle(20.0, -30.0, r, 256);
        let inscribed = r * (std::f64::consts::PI / 256.0).cos();

        for precision in [5.0, 1.0, 0.1] {
            let pole = polylabel(&poly, precision).unwrap();
            assert!(pole.distance <= inscribed + 1e-9);
            assert!(pole.distance >= inscribed - precision);
            // Clearance drops by at least cos(pi/n) per unit moved off center
            assert!(pole.point.distance(Point2::new(20.0, -30.0)) <= precision * 1.01);
        }
    }

    #[test]
    fn test_degenerate_collinear() {
        let poly = polygon(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [0.0, 0.0]]);
        let pole = polylabel(&poly, 1.0).unwrap();
        assert_eq!(pole.point, Point2::new(0.0, 0.0));
        assert_eq!(pole.distance, 0.0);
        assert_eq!(pole.probes, 0);
    }

    #[test]
    fn test_smaller_than_precision() {
        let poly = polygon(&[[3.0, 4.0], [3.5, 4.0], [3.5, 4.5], [3.0, 4.5]]);
        let pole = polylabel(&poly, 1.0).unwrap();
        assert_eq!(pole.point, Point2::new(3.0, 4.0));
        assert_eq!(pole.distance, 0.0);
    }

    #[test]
    fn test_invalid_precision() {
        let poly = rectangle(4.0, 4.0);
        for precision in [0.0, -0.5, f64::NAN] {
            assert_eq!(
                polylabel(&poly, precision),
                Err(PolylabelError::InvalidPrecision)
            );
        }
    }

    #[test]
    fn test_idempotent() {
        let poly = polygon(&[
            [0.0, 0.0],
            [14.0, 1.0],
            [11.0, 6.0],
            [17.0, 13.0],
            [4.0, 11.0],
            [6.0, 5.0],
        ]);
        let a = polylabel(&poly, 0.05).unwrap();
        let b = polylabel(&poly, 0.05).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_containment() {
        let poly = polygon(&[
            [0.0, 0.0],
            [10.0, 0.0],
            [10.0, 1.0],
            [1.0, 1.0],
            [1.0, 10.0],
            [0.0, 10.0],
        ]);
        // Largest circle touches both outer edges and the inner corner (1, 1)
        let best = 2.0 - std::f64::consts::SQRT_2;
        let pole = polylabel(&poly, 0.01).unwrap();
        assert!(pole.distance > 0.0);
        assert!(pole.distance <= best + 1e-9);
        assert!(pole.distance >= best - 0.01);
    }

    #[test]
    fn test_progress_is_monotonic() {
        let poly = circle(0.0, 0.0, 100.0, 64);
        let mut log = ProgressLog::new();
        let pole = Polylabel::new(PolylabelOptions::new(0.01))
            .find_with(&poly, &poly, &mut log)
            .unwrap();

        assert!(!log.improvements.is_empty());
        for pair in log.improvements.windows(2) {
            assert!(pair[1].best_distance > pair[0].best_distance);
            assert!(pair[1].probes > pair[0].probes);
        }

        let finished = log.finished.unwrap();
        assert_eq!(finished.probes, pole.probes);
        assert_eq!(finished.best_distance, pole.distance);
        assert_eq!(log.improvements.last().unwrap().best_distance, pole.distance);
    }

    #[test]
    fn test_degenerate_reports_no_progress() {
        let poly = polygon(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]]);
        let mut log = ProgressLog::new();
        Polylabel::new(PolylabelOptions::new(1.0))
            .find_with(&poly, &poly, &mut log)
            .unwrap();
        assert!(log.improvements.is_empty());
        assert!(log.finished.is_none());
    }

    #[test]
    fn test_probe_cap() {
        let poly = circle(0.0, 0.0, 100.0, 64);
        let options = PolylabelOptions::new(1e-6).with_max_probes(50);
        let pole = Polylabel::new(options).find(&poly).unwrap();

        assert!(!pole.converged);
        assert!(pole.probes >= 50);
        assert!(pole.probes < 50 + 4);
        assert!(pole.distance > 0.0);
    }

    #[test]
    fn test_generous_probe_cap_converges() {
        let poly = circle(0.0, 0.0, 100.0, 64);
        let uncapped = polylabel(&poly, 0.5).unwrap();
        let capped = Polylabel::new(PolylabelOptions::new(0.5).with_max_probes(1_000_000))
            .find(&poly)
            .unwrap();
        assert_eq!(capped, uncapped);
    }

    #[test]
    fn test_closure_fitness_identity_matches_default() {
        let poly = polygon(&[[0.0, 0.0], [20.0, 0.0], [20.0, 5.0], [8.0, 9.0], [0.0, 5.0]]);
        let default = polylabel(&poly, 0.1).unwrap();
        let closure = Polylabel::new(PolylabelOptions::new(0.1))
            .with_fitness(|_p: Point2<f64>, d: f64| d)
            .find(&poly)
            .unwrap();
        assert_eq!(closure, default);
    }

    #[test]
    fn test_centroid_biased_pulls_towards_centroid() {
        // Long rectangle: every point on the mid line has the same clearance
        let poly = rectangle(40.0, 4.0);
        let target = Point2::new(30.0, 2.0);
        let fitness = CentroidBiased::new(target, 0.1);

        let pole = Polylabel::new(PolylabelOptions::new(0.01))
            .with_fitness(fitness)
            .find(&poly)
            .unwrap();

        assert!(pole.point.distance(target) < 0.5);
        assert!(pole.distance > 1.9);
        assert_relative_eq!(
            pole.score,
            pole.distance - 0.1 * pole.point.distance(target),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_find_indexed_matches_find() {
        let poly = circle(5.0, 5.0, 30.0, 200);
        let searcher = Polylabel::new(PolylabelOptions::new(0.01));
        assert_eq!(searcher.find_indexed(&poly), searcher.find(&poly));
    }

    #[test]
    fn test_f32() {
        let poly: Polygon<f32> = Polygon::from_coords(vec![vec![
            [0.0, 0.0],
            [6.0, 0.0],
            [6.0, 6.0],
            [0.0, 6.0],
        ]])
        .unwrap();
        let pole = polylabel(&poly, 0.1_f32).unwrap();
        assert_eq!(pole.point, Point2::new(3.0, 3.0));
        assert_eq!(pole.distance, 3.0);
    }
}

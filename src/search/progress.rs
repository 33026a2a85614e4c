//! Observational hooks for the search.

/// Snapshot of the search at the moment an event fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress<F> {
    /// Number of cells evaluated so far, the two seed guesses included.
    pub probes: usize,
    /// Signed distance of the best point found so far.
    pub best_distance: F,
    /// Score of the best point found so far.
    pub best_score: F,
}

/// Receives progress events from a search.
///
/// Sinks observe only; nothing they do changes the result.
pub trait ProgressSink<F> {
    /// Called whenever the best point improves, starting with the initial seed.
    fn improved(&mut self, _progress: Progress<F>) {}

    /// Called once when the cell search ends.
    fn finished(&mut self, _progress: Progress<F>) {}
}

/// Ignores every event.
impl<F> ProgressSink<F> for () {}

/// Records every event in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressLog<F> {
    pub improvements: Vec<Progress<F>>,
    pub finished: Option<Progress<F>>,
}

impl<F> ProgressLog<F> {
    pub fn new() -> Self {
        Self {
            improvements: Vec::new(),
            finished: None,
        }
    }
}

impl<F> Default for ProgressLog<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> ProgressSink<F> for ProgressLog<F> {
    fn improved(&mut self, progress: Progress<F>) {
        self.improvements.push(progress);
    }

    fn finished(&mut self, progress: Progress<F>) {
        self.finished = Some(progress);
    }
}

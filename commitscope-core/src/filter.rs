//! Filter pipeline.
//!
//! Three independent predicates over the commit sequence, always composed in
//! the same order: time cutoff, then viewport window, then spatial brush.
//! The window is taken from the *time-filtered* sequence, so the two are not
//! interchangeable. Every stage is a pure function that preserves order.

use std::sync::Arc;

use time::OffsetDateTime;

use crate::selection::FilterState;
use crate::types::{BrushRect, Commit, Point};

/// Maps a commit to rendering-layer coordinates for brush hit-testing.
///
/// `fit` is called once per recomputation with the active subset before any
/// point is projected, so scales may follow the visible data.
pub trait Projector {
    fn fit(&mut self, _active: &[Arc<Commit>]) {}

    fn project(&self, commit: &Commit) -> Point;
}

impl<F> Projector for F
where
    F: Fn(&Commit) -> Point,
{
    fn project(&self, commit: &Commit) -> Point {
        self(commit)
    }
}

/// Time on the x axis, hour-of-day on the y axis (midnight at the bottom).
///
/// The x domain is refitted to the active subset on every recomputation. Screen
/// y grows downwards, so `bottom > top`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeOfDayProjection {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    domain: Option<(i128, i128)>,
}

impl TimeOfDayProjection {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
            domain: None,
        }
    }

    /// Current x domain as unix nanoseconds, if fitted to a non-empty subset.
    pub fn domain(&self) -> Option<(i128, i128)> {
        self.domain
    }
}

impl Projector for TimeOfDayProjection {
    fn fit(&mut self, active: &[Arc<Commit>]) {
        let nanos = active.iter().map(|c| c.timestamp().unix_timestamp_nanos());
        self.domain = nanos.fold(None, |acc, t| match acc {
            None => Some((t, t)),
            Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
        });
    }

    fn project(&self, commit: &Commit) -> Point {
        let t = commit.timestamp().unix_timestamp_nanos();
        let x = match self.domain {
            Some((lo, hi)) if hi > lo => {
                self.left + (t - lo) as f64 / (hi - lo) as f64 * (self.right - self.left)
            }
            _ => (self.left + self.right) / 2.0,
        };
        let y = self.bottom - commit.hour_fraction() / 24.0 * (self.bottom - self.top);
        Point::new(x, y)
    }
}

/// Linear map of `progress` (clamped to `0..=100`) onto the timestamp range of
/// `commits`, which must be sorted ascending. `None` when `commits` is empty.
pub fn cutoff_for_progress(commits: &[Arc<Commit>], progress: u8) -> Option<OffsetDateTime> {
    let first = commits.first()?.timestamp();
    let last = commits.last()?.timestamp();
    let lo = first.unix_timestamp_nanos();
    let hi = last.unix_timestamp_nanos();
    let p = i128::from(progress.min(100));
    let cutoff = lo + (hi - lo) * p / 100;
    OffsetDateTime::from_unix_timestamp_nanos(cutoff)
        .ok()
        .or(Some(last))
}

/// Keeps commits with `timestamp <= cutoff`; no cutoff keeps everything.
pub fn filter_time(commits: &[Arc<Commit>], cutoff: Option<OffsetDateTime>) -> Vec<Arc<Commit>> {
    match cutoff {
        Some(cutoff) => commits
            .iter()
            .filter(|c| c.timestamp() <= cutoff)
            .cloned()
            .collect(),
        None => commits.to_vec(),
    }
}

/// Clamps a window start into `[0, max(0, len - window)]`.
pub fn clamp_viewport_start(start: usize, len: usize, window: usize) -> usize {
    start.min(len.saturating_sub(window))
}

/// Keeps indices `[start, start + window)` after clamping `start`.
pub fn filter_viewport(commits: &[Arc<Commit>], start: usize, window: usize) -> Vec<Arc<Commit>> {
    let start = clamp_viewport_start(start, commits.len(), window);
    let end = start.saturating_add(window).min(commits.len());
    commits[start..end].to_vec()
}

/// Keeps commits whose projected point lies inside `rect` (edges inclusive).
pub fn filter_brush(
    commits: &[Arc<Commit>],
    rect: &BrushRect,
    projector: &dyn Projector,
) -> Vec<Arc<Commit>> {
    commits
        .iter()
        .filter(|c| rect.contains(projector.project(c)))
        .cloned()
        .collect()
}

/// Output of every pipeline stage for one recomputation.
#[derive(Debug, Clone, PartialEq)]
pub struct Stages {
    pub time_filtered: Vec<Arc<Commit>>,
    /// Viewport start after clamping against `time_filtered`.
    pub viewport_start: usize,
    /// Window length the viewport was cut with, never zero.
    pub window_size: usize,
    pub active: Vec<Arc<Commit>>,
    /// Empty whenever no brush is drawn.
    pub selected: Vec<Arc<Commit>>,
}

/// The fixed-order composition of the three predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterPipeline {
    pub window_size: usize,
}

impl FilterPipeline {
    pub fn new(window_size: usize) -> Self {
        Self {
            window_size: window_size.max(1),
        }
    }

    /// Runs time cutoff → viewport → (projector fit) → brush.
    pub fn run(
        &self,
        commits: &[Arc<Commit>],
        state: &FilterState,
        projector: &mut dyn Projector,
    ) -> Stages {
        let time_filtered = filter_time(commits, state.time_cutoff);
        let viewport_start =
            clamp_viewport_start(state.viewport_start, time_filtered.len(), self.window_size);
        let active = filter_viewport(&time_filtered, viewport_start, self.window_size);

        projector.fit(&active);
        let selected = match &state.brush {
            Some(rect) => filter_brush(&active, rect, projector),
            None => Vec::new(),
        };

        Stages {
            time_filtered,
            viewport_start,
            window_size: self.window_size,
            active,
            selected,
        }
    }
}

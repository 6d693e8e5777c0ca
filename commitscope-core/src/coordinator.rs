//! View coordinator.
//!
//! Owns the selection state and is the only writer of it. Every input event
//! triggers one total recomputation: the filter pipeline runs over the
//! immutable commit sequence, every projection is derived from that single
//! result, and the finished [`Snapshot`] is handed to each attached render
//! target. Views never see a partially updated snapshot, and no two views can
//! be fed from different states.

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::aggregate::Dataset;
use crate::config::ViewConfig;
use crate::filter::{FilterPipeline, Projector, Stages};
use crate::narrative::{narrative, NarrativeEntry};
use crate::projection::{
    file_groups, language_breakdown, selection_count_text, total_lines_of_code, FileGroup,
    LanguageBreakdown, SizeScale,
};
use crate::selection::{FilterState, ScrollOffset, SelectionState};
use crate::types::{Commit, Point};

/// The views a rendering layer may subscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ViewKind {
    Scatterplot,
    FileUnits,
    Narrative,
    LanguageBreakdown,
    SelectionCount,
    Summary,
}

/// A declared view had no render target when an update was dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no render target attached for the {view:?} view")]
pub struct MissingCollaborator {
    pub view: ViewKind,
}

/// Receives every new snapshot for one view.
pub trait RenderTarget {
    fn render(&mut self, snapshot: &Snapshot);
}

impl<F> RenderTarget for F
where
    F: FnMut(&Snapshot),
{
    fn render(&mut self, snapshot: &Snapshot) {
        self(snapshot)
    }
}

/// User input the coordinator understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Scroll(ScrollOffset),
    /// Relative scroll by a number of items.
    ScrollBy(isize),
    /// Slider progress, `0..=100`.
    Slider(u8),
    BrushStart(Point),
    BrushMove(Point),
    BrushEnd(Point),
    /// Press and release without a drag; clears the brush.
    Click(Point),
    ClearBrush,
}

/// One active commit as the scatterplot needs it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    pub ordinal: usize,
    pub position: Point,
    pub radius: f64,
    pub daytime: bool,
    pub selected: bool,
}

/// Everything the views need, derived from one state of the filters.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub generation: u64,
    pub filter: FilterState,
    pub window_size: usize,
    pub time_filtered_len: usize,
    pub active: Vec<Arc<Commit>>,
    pub selected: Vec<Arc<Commit>>,
    pub points: Vec<ScatterPoint>,
    pub active_lines: usize,
    pub selected_lines: usize,
    pub file_groups: Vec<FileGroup>,
    pub language_breakdown: LanguageBreakdown,
    pub selection_text: String,
    pub narrative: Vec<NarrativeEntry>,
    selected_mask: Vec<bool>,
}

impl Snapshot {
    /// Derives every projection from one pipeline result. `projector` must be
    /// the one the pipeline fitted.
    pub fn compute(
        generation: u64,
        filter: &FilterState,
        stages: Stages,
        projector: &dyn Projector,
        config: &ViewConfig,
        dataset_len: usize,
    ) -> Self {
        let Stages {
            time_filtered,
            viewport_start,
            window_size,
            active,
            selected,
        } = stages;

        let mut selected_mask = vec![false; dataset_len];
        for commit in &selected {
            if let Some(slot) = selected_mask.get_mut(commit.ordinal()) {
                *slot = true;
            }
        }

        let sizes = SizeScale::fit(&active, (config.min_radius, config.max_radius));
        let points = active
            .iter()
            .map(|c| ScatterPoint {
                ordinal: c.ordinal(),
                position: projector.project(c),
                radius: sizes.radius(c.total_lines()),
                daytime: c.is_daytime(),
                selected: selected_mask.get(c.ordinal()).copied().unwrap_or(false),
            })
            .collect();

        Self {
            generation,
            filter: FilterState {
                viewport_start,
                ..filter.clone()
            },
            window_size,
            time_filtered_len: time_filtered.len(),
            points,
            active_lines: total_lines_of_code(&active),
            selected_lines: total_lines_of_code(&selected),
            file_groups: file_groups(&active),
            language_breakdown: language_breakdown(&selected),
            selection_text: selection_count_text(selected.len()),
            narrative: narrative(&active, config.commit_url_base.as_deref()),
            active,
            selected,
            selected_mask,
        }
    }

    pub fn is_selected(&self, commit: &Commit) -> bool {
        self.selected_mask
            .get(commit.ordinal())
            .copied()
            .unwrap_or(false)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// The active commit whose projected point is nearest to `at`, if any lies
    /// within `radius`.
    pub fn commit_at(&self, at: Point, radius: f64) -> Option<&Arc<Commit>> {
        self.points
            .iter()
            .zip(&self.active)
            .map(|(p, c)| (p.position.distance(at), c))
            .filter(|(d, _)| *d <= radius)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, c)| c)
    }
}

/// Outcome of one dispatch to the render targets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub generation: u64,
    pub rendered: Vec<ViewKind>,
    pub missing: Vec<MissingCollaborator>,
}

/// Single owner of the filter state and fan-out point for every view.
pub struct ViewCoordinator {
    dataset: Arc<Dataset>,
    config: ViewConfig,
    pipeline: FilterPipeline,
    state: SelectionState,
    projector: Box<dyn Projector>,
    targets: BTreeMap<ViewKind, Option<Box<dyn RenderTarget>>>,
    snapshot: Arc<Snapshot>,
}

impl ViewCoordinator {
    /// Builds the coordinator in its initial state (no brush, full time
    /// range, viewport at 0) and computes the first snapshot.
    pub fn new(
        dataset: Arc<Dataset>,
        config: ViewConfig,
        mut projector: Box<dyn Projector>,
    ) -> Self {
        let pipeline = FilterPipeline::new(config.window_size);
        let state = SelectionState::new();
        let snapshot = build_snapshot(0, &dataset, &config, pipeline, &state, &mut *projector);
        Self {
            dataset,
            config,
            pipeline,
            state,
            projector,
            targets: BTreeMap::new(),
            snapshot: Arc::new(snapshot),
        }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn filter(&self) -> &FilterState {
        self.state.filter()
    }

    pub fn is_brushing(&self) -> bool {
        self.state.is_brushing()
    }

    pub fn snapshot(&self) -> &Arc<Snapshot> {
        &self.snapshot
    }

    /// Marks `view` as expected without attaching a target yet.
    pub fn declare(&mut self, view: ViewKind) {
        self.targets.entry(view).or_insert(None);
    }

    pub fn attach(&mut self, view: ViewKind, target: impl RenderTarget + 'static) {
        self.targets.insert(view, Some(Box::new(target)));
    }

    /// Removes the target but keeps `view` declared, so later updates report
    /// it as missing.
    pub fn detach(&mut self, view: ViewKind) -> Option<Box<dyn RenderTarget>> {
        self.targets.get_mut(&view).and_then(Option::take)
    }

    /// Replaces the projection (e.g. after the chart area was resized) and
    /// recomputes.
    pub fn set_projector(&mut self, projector: Box<dyn Projector>) -> RenderReport {
        self.projector = projector;
        self.refresh()
    }

    /// Applies one input event, recomputes and notifies every view.
    pub fn handle(&mut self, event: InputEvent) -> RenderReport {
        let window = self.pipeline.window_size;
        let filtered_len = self.snapshot.time_filtered_len;
        match event {
            InputEvent::Scroll(offset) => {
                self.state
                    .scroll(offset, self.config.item_height, filtered_len, window)
            }
            InputEvent::ScrollBy(delta) => self.state.scroll_by(delta, filtered_len, window),
            InputEvent::Slider(progress) => {
                self.state
                    .set_progress(progress, self.dataset.commits(), window);
            }
            InputEvent::BrushStart(at) => self.state.brush_start(at),
            InputEvent::BrushMove(to) => self.state.brush_move(to),
            InputEvent::BrushEnd(at) => self.state.brush_end(at),
            InputEvent::Click(at) => {
                self.state.brush_start(at);
                self.state.brush_end(at);
            }
            InputEvent::ClearBrush => self.state.clear_brush(),
        }
        self.refresh()
    }

    /// Recomputes the snapshot from the current state and notifies targets.
    pub fn refresh(&mut self) -> RenderReport {
        let generation = self.snapshot.generation + 1;
        self.snapshot = Arc::new(self.recompute(generation));
        self.notify()
    }

    fn recompute(&mut self, generation: u64) -> Snapshot {
        build_snapshot(
            generation,
            &self.dataset,
            &self.config,
            self.pipeline,
            &self.state,
            &mut *self.projector,
        )
    }

    fn notify(&mut self) -> RenderReport {
        let snapshot = Arc::clone(&self.snapshot);
        let mut report = RenderReport {
            generation: snapshot.generation,
            ..RenderReport::default()
        };
        for (view, target) in self.targets.iter_mut() {
            match target {
                Some(target) => {
                    target.render(&snapshot);
                    report.rendered.push(*view);
                }
                None => {
                    warn!(?view, "render target missing; skipping view update");
                    report.missing.push(MissingCollaborator { view: *view });
                }
            }
        }
        report
    }
}

fn build_snapshot(
    generation: u64,
    dataset: &Dataset,
    config: &ViewConfig,
    pipeline: FilterPipeline,
    state: &SelectionState,
    projector: &mut dyn Projector,
) -> Snapshot {
    let filter = state.filter();
    let stages = pipeline.run(dataset.commits(), filter, projector);
    let snapshot = Snapshot::compute(generation, filter, stages, projector, config, dataset.len());
    debug!(
        generation,
        time_filtered = snapshot.time_filtered_len,
        active = snapshot.active.len(),
        selected = snapshot.selected.len(),
        "recomputed snapshot"
    );
    snapshot
}

//! Central application state for commitscope.
//!
//! Owns the load phase, the view coordinator once the log is loaded, panel
//! focus, and the geometry cached from the previous frame for mouse
//! hit-testing. The coordinator's render targets copy each new snapshot into
//! [`Panels`]; the `ui` module only ever reads from there.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

use commitscope_core::narrative::NarrativeEntry;
use commitscope_core::projection::{FileGroup, LanguageShare};
use commitscope_core::{
    BrushRect, Commit, Dataset, InputEvent, LoadError, Point, ScatterPoint, ScrollOffset,
    Snapshot, TimeOfDayProjection, ViewConfig, ViewCoordinator, ViewKind,
};
use ratatui::layout::{Position, Rect};
use tracing::{debug, error, info};

/// Hover radius around the mouse, in chart cells.
const HOVER_RADIUS: f64 = 1.0;

/// Offset from a cell's corner to its centre. Chart points live on cell
/// centres so every plotted commit can be reached by the mouse.
pub const CELL_CENTRE: f64 = 0.5;

/// Which keybinding set is active.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// Full-screen help overlay is shown above all panels.
    HelpOverlay,
}

/// Which panel currently has keyboard focus.
///
/// Cycle order: `Chart` → `Narrative` → `Files` → `Chart`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// Time-of-day scatterplot; receives the brush.
    Chart,
    /// Scroll narrative; j/k move the commit window.
    #[default]
    Narrative,
    /// Unit view of files; j/k scroll the panel itself.
    Files,
}

impl PanelFocus {
    pub fn prev(self) -> Self {
        match self {
            PanelFocus::Chart => PanelFocus::Files,
            PanelFocus::Narrative => PanelFocus::Chart,
            PanelFocus::Files => PanelFocus::Narrative,
        }
    }

    pub fn next(self) -> Self {
        match self {
            PanelFocus::Chart => PanelFocus::Narrative,
            PanelFocus::Narrative => PanelFocus::Files,
            PanelFocus::Files => PanelFocus::Chart,
        }
    }
}

/// Position of the commit window and the slider, for titles and the status bar.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WindowSummary {
    pub progress: u8,
    pub start: usize,
    pub active: usize,
    pub time_filtered: usize,
    pub active_lines: usize,
    pub selected_lines: usize,
}

/// Widget-ready copies of the latest snapshot, written by the render targets.
#[derive(Debug, Default)]
pub struct Panels {
    pub points: Vec<ScatterPoint>,
    pub brush: Option<BrushRect>,
    /// Narrative entries paired with whether their commit is brushed.
    pub narrative: Vec<(NarrativeEntry, bool)>,
    pub files: Vec<FileGroup>,
    pub languages: Vec<LanguageShare>,
    pub selection_text: String,
    pub window: WindowSummary,
}

/// Where the change log is in its lifecycle.
pub enum LoadPhase {
    Loading(PathBuf),
    Ready(Box<ViewCoordinator>),
    Failed(String),
}

/// Panel rects from the most recent frame. Collapsed panels have zero width.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PanelRects {
    /// Everything above the status bar.
    pub main: Rect,
    pub chart: Rect,
    pub summary: Rect,
    pub narrative: Rect,
    pub files: Rect,
    pub languages: Rect,
    pub status: Rect,
}

/// All mutable UI state passed through every render cycle.
pub struct AppState {
    pub mode: Mode,
    pub focus: PanelFocus,
    pub phase: LoadPhase,
    pub view_config: ViewConfig,
    pub panels: Rc<RefCell<Panels>>,
    /// Geometry of the previous frame, used to route mouse events.
    pub rects: PanelRects,
    /// Last mouse position over the chart, in chart coordinates.
    pub hover: Option<Point>,
    pub files_scroll: u16,
    /// Inner height of the files panel, cached after each render.
    pub files_viewport_height: u16,
    pub help_scroll: u16,
    /// Chart inner area the current projector was built for.
    chart_area: Rect,
}

impl AppState {
    pub fn new(log_path: PathBuf, view_config: ViewConfig) -> Self {
        Self {
            mode: Mode::default(),
            focus: PanelFocus::default(),
            phase: LoadPhase::Loading(log_path),
            view_config,
            panels: Rc::default(),
            rects: PanelRects::default(),
            hover: None,
            files_scroll: 0,
            files_viewport_height: 0,
            help_scroll: 0,
            chart_area: Rect::default(),
        }
    }

    /// Applies the outcome of the background load.
    ///
    /// On success the coordinator is built with a placeholder projection; the
    /// next render refits it to the chart area via [`AppState::fit_chart`].
    pub fn apply_load(&mut self, result: Result<Dataset, LoadError>) {
        match result {
            Ok(dataset) => {
                info!(
                    commits = dataset.len(),
                    lines = dataset.summary().total_loc,
                    "change log ready"
                );
                let projector = TimeOfDayProjection::new(0.0, 0.0, 1.0, 1.0);
                let mut coordinator = ViewCoordinator::new(
                    Arc::new(dataset),
                    self.view_config.clone(),
                    Box::new(projector),
                );
                attach_panels(&mut coordinator, &self.panels);
                coordinator.refresh();
                self.chart_area = Rect::default();
                self.phase = LoadPhase::Ready(Box::new(coordinator));
            }
            Err(e) => {
                error!(error = %e, "failed to load change log");
                self.phase = LoadPhase::Failed(e.to_string());
            }
        }
    }

    pub fn coordinator(&self) -> Option<&ViewCoordinator> {
        match &self.phase {
            LoadPhase::Ready(coordinator) => Some(coordinator),
            _ => None,
        }
    }

    /// Forwards one input event to the coordinator. Ignored until loaded.
    pub fn dispatch(&mut self, event: InputEvent) {
        if let LoadPhase::Ready(coordinator) = &mut self.phase {
            let report = coordinator.handle(event);
            debug!(
                ?event,
                generation = report.generation,
                missing = report.missing.len(),
                "dispatched"
            );
        }
    }

    pub fn is_brushing(&self) -> bool {
        self.coordinator().is_some_and(|c| c.is_brushing())
    }

    /// Moves the commit window by `delta` commits.
    pub fn scroll_by(&mut self, delta: isize) {
        self.dispatch(InputEvent::ScrollBy(delta));
    }

    pub fn scroll_top(&mut self) {
        self.dispatch(InputEvent::Scroll(ScrollOffset::Row(0)));
    }

    /// Jumps to the last full window; the coordinator clamps the offset.
    pub fn scroll_bottom(&mut self) {
        self.dispatch(InputEvent::Scroll(ScrollOffset::Row(usize::MAX)));
    }

    /// Half the applied commit window, never less than one commit.
    pub fn half_window(&self) -> isize {
        let window = self
            .coordinator()
            .map_or(1, |c| c.snapshot().window_size);
        (window / 2).max(1) as isize
    }

    /// Moves the time slider by `delta` percentage points, clamped to `0..=100`.
    pub fn nudge_progress(&mut self, delta: i16) {
        let Some(current) = self.coordinator().map(|c| c.filter().time_progress) else {
            return;
        };
        let next = (i16::from(current) + delta).clamp(0, 100) as u8;
        if next != current {
            self.set_progress(next);
        }
    }

    pub fn set_progress(&mut self, progress: u8) {
        self.dispatch(InputEvent::Slider(progress));
    }

    pub fn clear_brush(&mut self) {
        self.dispatch(InputEvent::ClearBrush);
    }

    pub fn files_scroll_down(&mut self, lines: u16) {
        self.files_scroll = self.files_scroll.saturating_add(lines);
    }

    pub fn files_scroll_up(&mut self, lines: u16) {
        self.files_scroll = self.files_scroll.saturating_sub(lines);
    }

    /// Rebuilds the projection when the chart's inner area changed size or
    /// position, so brush hit-testing stays in the same cell space as the
    /// mouse.
    pub fn fit_chart(&mut self, inner: Rect) {
        if inner == self.chart_area {
            return;
        }
        if let LoadPhase::Ready(coordinator) = &mut self.phase {
            // Cell centres, the same points the mouse maps to.
            let right = (f64::from(inner.width) - CELL_CENTRE).max(CELL_CENTRE);
            let bottom = (f64::from(inner.height) - CELL_CENTRE).max(CELL_CENTRE);
            let projector = TimeOfDayProjection::new(CELL_CENTRE, CELL_CENTRE, right, bottom);
            coordinator.set_projector(Box::new(projector));
            self.chart_area = inner;
        }
    }

    /// Chart coordinates of the cell at `pos`, if it lies inside the chart.
    /// Cells are addressed by their centre.
    pub fn chart_point(&self, pos: Position) -> Option<Point> {
        self.chart_area
            .contains(pos)
            .then(|| self.cell_to_chart(pos))
    }

    /// Like [`AppState::chart_point`], but clamps positions outside the chart
    /// to its nearest edge cell, so a drag can leave the chart.
    pub fn chart_point_clamped(&self, pos: Position) -> Point {
        let area = self.chart_area;
        let x = pos
            .x
            .clamp(area.x, area.right().saturating_sub(1).max(area.x));
        let y = pos
            .y
            .clamp(area.y, area.bottom().saturating_sub(1).max(area.y));
        self.cell_to_chart(Position { x, y })
    }

    fn cell_to_chart(&self, pos: Position) -> Point {
        Point::new(
            f64::from(pos.x.saturating_sub(self.chart_area.x)) + CELL_CENTRE,
            f64::from(pos.y.saturating_sub(self.chart_area.y)) + CELL_CENTRE,
        )
    }

    /// The active commit under the mouse, if any.
    pub fn hovered_commit(&self) -> Option<Arc<Commit>> {
        let at = self.hover?;
        self.coordinator()?
            .snapshot()
            .commit_at(at, HOVER_RADIUS)
            .cloned()
    }
}

/// Subscribes every view to the coordinator, each copying its slice of the
/// snapshot into `panels`.
fn attach_panels(coordinator: &mut ViewCoordinator, panels: &Rc<RefCell<Panels>>) {
    fn attach(
        coordinator: &mut ViewCoordinator,
        view: ViewKind,
        panels: &Rc<RefCell<Panels>>,
        update: fn(&mut Panels, &Snapshot),
    ) {
        let panels = Rc::clone(panels);
        coordinator.attach(view, move |snapshot: &Snapshot| {
            update(&mut panels.borrow_mut(), snapshot)
        });
    }

    attach(coordinator, ViewKind::Scatterplot, panels, |p, s| {
        p.points = s.points.clone();
        p.brush = s.filter.brush;
    });
    attach(coordinator, ViewKind::Narrative, panels, |p, s| {
        p.narrative = s
            .narrative
            .iter()
            .zip(&s.active)
            .map(|(entry, commit)| (entry.clone(), s.is_selected(commit)))
            .collect();
    });
    attach(coordinator, ViewKind::FileUnits, panels, |p, s| {
        p.files = s.file_groups.clone();
    });
    attach(coordinator, ViewKind::LanguageBreakdown, panels, |p, s| {
        p.languages = s.language_breakdown.entries().to_vec();
    });
    attach(coordinator, ViewKind::SelectionCount, panels, |p, s| {
        p.selection_text = s.selection_text.clone();
    });
    attach(coordinator, ViewKind::Summary, panels, |p, s| {
        p.window = WindowSummary {
            progress: s.filter.time_progress,
            start: s.filter.viewport_start,
            active: s.active.len(),
            time_filtered: s.time_filtered_len,
            active_lines: s.active_lines,
            selected_lines: s.selected_lines,
        };
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_state() -> AppState {
        let mut state = AppState::new(PathBuf::from("loc.csv"), ViewConfig::default());
        state.apply_load(Ok(Dataset::from_records(Vec::new())));
        state
    }

    #[test]
    fn panels_are_filled_on_load() {
        let state = ready_state();
        assert!(state.coordinator().is_some());
        let panels = state.panels.borrow();
        assert_eq!(panels.selection_text, "No commits selected");
        assert_eq!(panels.window.progress, 100);
    }

    #[test]
    fn chart_points_are_relative_to_the_fitted_area() {
        let mut state = ready_state();
        state.fit_chart(Rect::new(10, 5, 40, 20));

        let inside = state.chart_point(Position { x: 12, y: 6 });
        assert_eq!(inside, Some(Point::new(2.5, 1.5)));
        assert_eq!(state.chart_point(Position { x: 2, y: 6 }), None);
        assert_eq!(
            state.chart_point_clamped(Position { x: 200, y: 0 }),
            Point::new(39.5, 0.5)
        );
    }

    #[test]
    fn zero_window_config_pages_by_the_applied_window() {
        let config = ViewConfig {
            window_size: 0,
            ..ViewConfig::default()
        };
        let mut state = AppState::new(PathBuf::from("loc.csv"), config);
        state.apply_load(Ok(Dataset::from_records(Vec::new())));
        let snapshot_window = state.coordinator().map(|c| c.snapshot().window_size);
        assert_eq!(snapshot_window, Some(1));
        assert_eq!(state.half_window(), 1);
    }

    #[test]
    fn slider_nudges_clamp_at_the_ends() {
        let mut state = ready_state();
        state.nudge_progress(5);
        assert_eq!(state.panels.borrow().window.progress, 100);
        state.nudge_progress(-30);
        assert_eq!(state.panels.borrow().window.progress, 70);
        state.nudge_progress(-500);
        assert_eq!(state.panels.borrow().window.progress, 0);
    }

    #[test]
    fn failed_load_keeps_the_message() {
        let mut state = AppState::new(PathBuf::from("missing.csv"), ViewConfig::default());
        let err = LoadError::Io {
            path: PathBuf::from("missing.csv"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        state.apply_load(Err(err));
        assert!(matches!(state.phase, LoadPhase::Failed(ref msg) if msg.contains("missing.csv")));
        state.nudge_progress(-10);
        assert!(state.coordinator().is_none());
    }
}

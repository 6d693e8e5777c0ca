//! UI rendering module for commitscope.
//!
//! `render()` is the single entry point called by the event loop's
//! `terminal.draw()` closure. Layout arithmetic lives in `layout.rs`; each
//! panel has its own module and reads only from [`crate::app::Panels`].

mod files;
pub mod help;
pub mod keybindings;
mod layout;
mod narrative;
mod scatter;
mod stats;

use std::rc::Rc;

use ratatui::{
    layout::Rect,
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, Paragraph, Wrap},
    Frame,
};

use crate::app::{AppState, LoadPhase, Mode};
use crate::theme::Theme;
use layout::{compute_layout, inner_rect, render_status_bar};

/// Renders one complete frame.
///
/// Geometry is written back into `state` before any panel is drawn: the
/// rects route the next mouse event, and a changed chart area refits the
/// coordinator's projector so the brush and the dots share one coordinate
/// space. That refit notifies the render targets, so it must happen before
/// `panels` is borrowed for drawing.
///
/// # Arguments
///
/// * `frame` — current render frame provided by `terminal.draw()`
/// * `state` — mutable app state (geometry is cached here)
/// * `theme` — active color theme
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let rects = compute_layout(frame.area());
    state.rects = rects;
    state.files_viewport_height = inner_rect(rects.files).height;
    state.fit_chart(inner_rect(rects.chart));

    let panels = Rc::clone(&state.panels);
    let panels = panels.borrow();

    if matches!(state.phase, LoadPhase::Ready(_)) {
        scatter::render_scatter(frame, rects.chart, state, &panels, theme);
        if rects.summary.width > 0 {
            stats::render_summary(frame, rects.summary, state, &panels, theme);
        }
        narrative::render_narrative(frame, rects.narrative, state, &panels, theme);
        if rects.files.width > 0 {
            files::render_files(frame, rects.files, state, &panels, theme);
        }
        stats::render_languages(frame, rects.languages, state, &panels, theme);
    } else {
        render_placeholder(frame, rects.main, state, theme);
    }

    render_status_bar(frame, rects.status, state, &panels, theme);

    if state.mode == Mode::HelpOverlay {
        help::render_help_overlay(frame, theme, state.help_scroll);
    }
}

/// Full-area message while the log loads or after it failed to.
fn render_placeholder(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let lines = match &state.phase {
        LoadPhase::Loading(path) => vec![Line::raw(format!("Loading {} …", path.display()))],
        LoadPhase::Failed(message) => vec![
            Line::raw("Could not load the change log").fg(theme.error),
            Line::default(),
            Line::raw(message.clone()),
            Line::default(),
            Line::raw("Press q to quit.").fg(theme.muted),
        ],
        LoadPhase::Ready(_) => Vec::new(),
    };
    let block = Block::bordered().border_style(Style::default().fg(theme.border_inactive));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

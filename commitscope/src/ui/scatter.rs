//! Scatterplot panel: one dot per active commit, time on x, hour of day on y.
//!
//! Drawn on a Braille `Canvas` whose bounds are the chart's inner area in
//! cells. The coordinator's projector maps commits onto the cell centres of
//! that area. The
//! projector's y grows downwards like terminal rows while the canvas y grows
//! upwards, so every y is flipped once here.

use ratatui::{
    layout::Rect,
    style::{Style, Stylize},
    symbols::Marker,
    text::Span,
    widgets::canvas::{Canvas, Circle, Line as CanvasLine, Points, Rectangle},
    Frame,
};
use time::macros::format_description;

use crate::app::{AppState, Panels, PanelFocus, CELL_CENTRE};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

/// Scales configured dot radii down to chart cells.
const CELLS_PER_RADIUS_UNIT: f64 = 0.05;

/// Renders the scatterplot with hour gridlines, dots and the brush.
///
/// # Arguments
///
/// * `frame` — current render frame
/// * `area` — the chart `Rect` (includes borders)
/// * `state` — app state supplying focus and the active commits
/// * `panels` — latest points and brush
/// * `theme` — active color theme
pub fn render_scatter(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    panels: &Panels,
    theme: &Theme,
) {
    let title = chart_title(state);
    let block = panel_block(&title, state.focus == PanelFocus::Chart, theme);
    let inner = inner_rect(area);
    let (w, h) = (f64::from(inner.width), f64::from(inner.height));

    let mut day = Vec::new();
    let mut night = Vec::new();
    let mut selected = Vec::new();
    for point in &panels.points {
        let coord = (point.position.x, h - point.position.y);
        match (point.selected, point.daytime) {
            (true, _) => selected.push(coord),
            (false, true) => day.push(coord),
            (false, false) => night.push(coord),
        }
    }

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, w])
        .y_bounds([0.0, h])
        .paint(|ctx| {
            for hour in [6.0, 12.0, 18.0] {
                let y = CELL_CENTRE + hour / 24.0 * (h - 2.0 * CELL_CENTRE).max(0.0);
                ctx.draw(&CanvasLine {
                    x1: 0.0,
                    y1: y,
                    x2: w,
                    y2: y,
                    color: theme.grid,
                });
                ctx.print(0.0, y, Span::raw(format!("{hour:02}:00")).fg(theme.grid));
            }
            ctx.layer();

            for point in &panels.points {
                let radius = point.radius * CELLS_PER_RADIUS_UNIT;
                let color = if point.selected {
                    theme.dot_selected
                } else if point.daytime {
                    theme.dot_day
                } else {
                    theme.dot_night
                };
                ctx.draw(&Circle {
                    x: point.position.x,
                    y: h - point.position.y,
                    radius,
                    color,
                });
            }
            ctx.draw(&Points {
                coords: &night,
                color: theme.dot_night,
            });
            ctx.draw(&Points {
                coords: &day,
                color: theme.dot_day,
            });
            ctx.draw(&Points {
                coords: &selected,
                color: theme.dot_selected,
            });

            if let Some(brush) = panels.brush {
                ctx.draw(&Rectangle {
                    x: brush.min.x,
                    y: h - brush.max.y,
                    width: brush.width(),
                    height: brush.height(),
                    color: theme.brush,
                });
            }
        });

    frame.render_widget(canvas, area);

    if panels.points.is_empty() {
        let hint = Span::styled("no commits in range", Style::default().fg(theme.muted));
        let centre = inner.centered(
            ratatui::layout::Constraint::Length(hint.width() as u16),
            ratatui::layout::Constraint::Length(1),
        );
        frame.render_widget(hint, centre);
    }
}

/// ` Commits Feb 10, 2025 → Mar 2, 2025 ` for the active window.
fn chart_title(state: &AppState) -> String {
    let format = format_description!("[month repr:short] [day padding:none], [year]");
    let Some(coordinator) = state.coordinator() else {
        return " Commits ".to_owned();
    };
    let active = &coordinator.snapshot().active;
    match (active.first(), active.last()) {
        (Some(first), Some(last)) => {
            let from = first.timestamp().format(format).unwrap_or_default();
            let to = last.timestamp().format(format).unwrap_or_default();
            format!(" Commits {from} → {to} ")
        }
        _ => " Commits ".to_owned(),
    }
}

//! Files panel: a unit view with one square per changed line.
//!
//! Files in the active window are listed largest first; every square is
//! coloured by the line's file type so languages stand out across files.

use commitscope_core::projection::FileGroup;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::app::{AppState, Panels, PanelFocus};
use crate::theme::Theme;
use crate::ui::layout::panel_block;

/// Renders the unit view with manual vertical scrolling.
///
/// # Arguments
///
/// * `frame` — current render frame
/// * `area` — the files `Rect` (includes borders)
/// * `state` — app state supplying focus, `files_scroll` and the file types
/// * `panels` — latest file groups
/// * `theme` — active color theme
pub fn render_files(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    panels: &Panels,
    theme: &Theme,
) {
    let title = if panels.files.is_empty() {
        "Files".to_owned()
    } else {
        format!("Files ({})", panels.files.len())
    };
    let block = panel_block(&title, state.focus == PanelFocus::Files, theme);

    let file_types: &[String] = state
        .coordinator()
        .map(|c| c.dataset().summary().file_types.as_slice())
        .unwrap_or(&[]);

    let lines: Vec<Line> = if panels.files.is_empty() {
        vec![Line::raw("No files in view").fg(theme.muted)]
    } else {
        panels
            .files
            .iter()
            .flat_map(|group| group_lines(group, file_types, theme))
            .collect()
    };

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((state.files_scroll, 0)),
        area,
    );
}

/// `path  N lines` followed by the coloured units. Consecutive lines of the
/// same type share one span.
fn group_lines(group: &FileGroup, file_types: &[String], theme: &Theme) -> [Line<'static>; 2] {
    let header = Line::from(vec![
        Span::styled(
            group.file.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {} lines", group.line_count()),
            Style::default().fg(theme.muted),
        ),
    ]);

    let mut runs: Vec<(&str, usize)> = Vec::new();
    for record in &group.records {
        if let Some((file_type, n)) = runs.last_mut() {
            if *file_type == record.file_type {
                *n += 1;
                continue;
            }
        }
        runs.push((record.file_type.as_str(), 1));
    }
    let units: Vec<Span<'static>> = runs
        .into_iter()
        .map(|(file_type, n)| unit_span(file_type, n, file_types, theme))
        .collect();

    [header, Line::from(units)]
}

fn unit_span(file_type: &str, n: usize, file_types: &[String], theme: &Theme) -> Span<'static> {
    let index = file_types
        .iter()
        .position(|t| t == file_type)
        .unwrap_or(0);
    Span::styled("■".repeat(n), Style::default().fg(theme.file_type_color(index)))
}

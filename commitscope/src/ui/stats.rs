//! Summary and language-breakdown panels.

use commitscope_core::DatasetSummary;
use ratatui::{
    layout::Rect,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{AppState, Panels};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

/// Columns reserved next to each bar for the label and the percentage.
const BAR_LABEL_WIDTH: u16 = 22;

/// Whole-dataset statistics followed by the current window.
pub fn render_summary(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    panels: &Panels,
    theme: &Theme,
) {
    let block = panel_block("Summary", false, theme);
    let Some(coordinator) = state.coordinator() else {
        frame.render_widget(block, area);
        return;
    };
    let summary = coordinator.dataset().summary();
    let window = &panels.window;

    let mut lines = dataset_lines(summary, theme);
    lines.push(Line::default());
    lines.push(stat_line("In view", format!("{} commits", window.active), theme));
    lines.push(stat_line("", format!("{} lines", window.active_lines), theme));
    lines.push(stat_line(
        "Selected",
        format!("{} lines", window.selected_lines),
        theme,
    ));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn dataset_lines(summary: &DatasetSummary, theme: &Theme) -> Vec<Line<'static>> {
    vec![
        stat_line("Lines of code", summary.total_loc.to_string(), theme),
        stat_line("Commits", summary.total_commits.to_string(), theme),
        stat_line("Files", summary.file_count.to_string(), theme),
        stat_line(
            "Avg file length",
            format!("{:.2}", summary.average_file_length),
            theme,
        ),
        stat_line("File types", summary.file_types.join(", "), theme),
    ]
}

fn stat_line(label: &str, value: String, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<16}"), Style::default().fg(theme.muted)),
        Span::raw(value),
    ])
}

/// Horizontal bars of the brushed lines per file type, titled with the
/// selection count.
pub fn render_languages(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    panels: &Panels,
    theme: &Theme,
) {
    let block = panel_block(&panels.selection_text, false, theme);
    let max_bar = usize::from(inner_rect(area).width.saturating_sub(BAR_LABEL_WIDTH));

    let file_types: &[String] = state
        .coordinator()
        .map(|c| c.dataset().summary().file_types.as_slice())
        .unwrap_or(&[]);

    let lines: Vec<Line> = if panels.languages.is_empty() {
        vec![Line::raw("Brush the chart to break down lines by language").fg(theme.muted)]
    } else {
        panels
            .languages
            .iter()
            .map(|share| {
                let index = file_types
                    .iter()
                    .position(|t| *t == share.file_type)
                    .unwrap_or(0);
                let color = theme.file_type_color(index);
                let bar = (share.proportion * max_bar as f64).round() as usize;
                Line::from(vec![
                    Span::styled(format!("{:<6} ", share.file_type), Style::default().fg(color)),
                    Span::styled("█".repeat(bar.max(1)), Style::default().fg(color)),
                    Span::styled(
                        format!(" {:>5.1}% ({})", share.proportion * 100.0, share.count),
                        Style::default().fg(theme.muted),
                    ),
                ])
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

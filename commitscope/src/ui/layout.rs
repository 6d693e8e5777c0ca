//! Responsive dashboard layout for commitscope.
//!
//! Pure layout arithmetic, recomputed inside every `terminal.draw()` so each
//! frame reflects the live terminal size.
//!
//! # Panel geometry
//!
//! ```text
//! ┌ chart ───────────────────────────────┬ summary ┐
//! ├ narrative ──────┬ files ─────────────┼ langs ──┤
//! └─────────────────┴────────────────────┴─────────┘
//!  status bar
//! ```
//!
//! Below 100 columns the summary and files panels collapse. Adjacent borders
//! share a column via `Spacing::Overlap(1)` and `MergeStrategy::Fuzzy`.

use ratatui::{
    layout::{Constraint, Layout, Margin, Rect, Spacing},
    style::{Modifier, Style, Stylize},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
    Frame,
};

use crate::app::{AppState, LoadPhase, Mode, Panels, PanelRects};
use crate::theme::Theme;

/// Width of the slider track in the status bar.
const SLIDER_WIDTH: usize = 20;

/// Splits `area` into the dashboard panels.
///
/// # Arguments
///
/// * `area` — the full frame area
pub fn compute_layout(area: Rect) -> PanelRects {
    let wide = area.width >= 100;

    let [main, status] = area.layout(&Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]));
    let [top, bottom] = main.layout(&Layout::vertical([
        Constraint::Percentage(55),
        Constraint::Fill(1),
    ]));

    let (chart, summary) = if wide {
        let [chart, summary] = top.layout(
            &Layout::horizontal([Constraint::Fill(1), Constraint::Length(34)])
                .spacing(Spacing::Overlap(1)),
        );
        (chart, summary)
    } else {
        (top, Rect::default())
    };

    let (narrative, files, languages) = if wide {
        let [narrative, files, languages] = bottom.layout(
            &Layout::horizontal([
                Constraint::Percentage(40),
                Constraint::Percentage(35),
                Constraint::Percentage(25),
            ])
            .spacing(Spacing::Overlap(1)),
        );
        (narrative, files, languages)
    } else {
        let [narrative, languages] = bottom.layout(
            &Layout::horizontal([Constraint::Percentage(60), Constraint::Fill(1)])
                .spacing(Spacing::Overlap(1)),
        );
        (narrative, Rect::default(), languages)
    };

    PanelRects {
        main,
        chart,
        summary,
        narrative,
        files,
        languages,
        status,
    }
}

/// Returns the inner `Rect` of a panel after removing the 1-cell border.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin {
        vertical: 1,
        horizontal: 1,
    })
}

/// Builds a bordered `Block` for a panel: thick border when focused, plain
/// otherwise.
///
/// # Arguments
///
/// * `title` — panel title shown in the top border
/// * `is_focused` — `true` when this panel has keyboard focus
/// * `theme` — active color theme
pub fn panel_block<'a>(title: &'a str, is_focused: bool, theme: &'a Theme) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_focused {
        BorderType::Thick
    } else {
        BorderType::Plain
    };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
        .merge_borders(MergeStrategy::Fuzzy)
}

/// Renders the 1-row status bar: mode, time slider, selection count and
/// either the hovered commit or a usage hint.
///
/// # Arguments
///
/// * `frame` — current render frame
/// * `area` — the 1-row status `Rect`
/// * `state` — app state supplying mode, load phase and hover position
/// * `panels` — latest panel data
/// * `theme` — active color theme
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    panels: &Panels,
    theme: &Theme,
) {
    let (mode_text, mode_fg) = match state.mode {
        Mode::Normal => (" NORMAL ", theme.status_mode_normal),
        Mode::HelpOverlay => (" HELP ", theme.status_mode_help),
    };
    let mut spans = vec![Span::styled(
        mode_text,
        Style::default().fg(mode_fg).add_modifier(Modifier::BOLD),
    )];

    match &state.phase {
        LoadPhase::Loading(path) => {
            spans.push(Span::raw(format!(" loading {} ", path.display())));
        }
        LoadPhase::Failed(_) => {
            spans.push(Span::raw(" load failed ").fg(theme.error));
        }
        LoadPhase::Ready(_) => {
            spans.extend(slider_spans(panels.window.progress, theme));
            spans.push(Span::raw(format!(" {} ", panels.selection_text)));
            spans.push(Span::raw("│").fg(theme.muted));
            match state.hovered_commit() {
                Some(commit) => {
                    let short: String = commit.id().chars().take(7).collect();
                    spans.push(Span::raw(format!(
                        " {short} · {} · {} · +{} -{} ",
                        commitscope_core::narrative::format_when(commit.timestamp()),
                        commit.author(),
                        commit.additions(),
                        commit.deletions(),
                    )));
                }
                None => {
                    spans.push(Span::raw(" drag on the chart to select · ? help ").fg(theme.muted));
                }
            }
        }
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}

/// `time ██████░░░░ 60%`
fn slider_spans(progress: u8, theme: &Theme) -> [Span<'static>; 4] {
    let filled = usize::from(progress.min(100)) * SLIDER_WIDTH / 100;
    [
        Span::raw(" time "),
        Span::raw("█".repeat(filled)).fg(theme.slider_filled),
        Span::raw("░".repeat(SLIDER_WIDTH - filled)).fg(theme.slider_empty),
        Span::raw(format!(" {progress:>3}% ")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_terminals_collapse_side_panels() {
        let rects = compute_layout(Rect::new(0, 0, 80, 40));
        assert_eq!(rects.summary.width, 0);
        assert_eq!(rects.files.width, 0);
        assert_eq!(rects.status.height, 1);
    }

    #[test]
    fn wide_terminals_show_every_panel() {
        let rects = compute_layout(Rect::new(0, 0, 160, 50));
        for rect in [rects.chart, rects.summary, rects.narrative, rects.files, rects.languages] {
            assert!(rect.width > 0 && rect.height > 0, "{rect:?}");
        }
        assert_eq!(rects.status.y, 49);
    }
}

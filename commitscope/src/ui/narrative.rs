//! Narrative panel: one short paragraph per commit in the current window.
//!
//! Scrolling this panel moves the commit window itself, so the first entry
//! is always the commit at the viewport start.

use commitscope_core::narrative::{NarrativeEntry, EMPTY_NARRATIVE};
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

/// Renders the narrative for the active commits.
///
/// # Arguments
///
/// * `frame` — current render frame
/// * `area` — the narrative `Rect` (includes borders)
/// * `state` — app state supplying focus
/// * `panels` — latest narrative entries and window position
/// * `theme` — active color theme
pub fn render_narrative(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    panels: &Panels,
    theme: &Theme,
) {
    let window = &panels.window;
    let title = if window.active > 0 {
        format!(
            "Narrative {}-{} of {}",
            window.start + 1,
            window.start + window.active,
            window.time_filtered
        )
    } else {
        "Narrative".to_owned()
    };
    let block = panel_block(&title, state.focus == PanelFocus::Narrative, theme);

    let lines: Vec<Line> = if panels.narrative.is_empty() {
        vec![Line::raw(EMPTY_NARRATIVE).fg(theme.muted)]
    } else {
        panels
            .narrative
            .iter()
            .flat_map(|(entry, selected)| entry_lines(entry, *selected, theme))
            .collect()
    };

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

/// Heading, sentence, optional link, blank separator.
fn entry_lines(entry: &NarrativeEntry, selected: bool, theme: &Theme) -> Vec<Line<'static>> {
    let marker = if selected {
        Span::styled("● ", Style::default().fg(theme.dot_selected))
    } else {
        Span::raw("  ")
    };
    let short: String = entry.commit_id.chars().take(7).collect();
    let mut lines = vec![
        Line::from(vec![
            marker,
            Span::styled(
                format!("#{} ", entry.ordinal + 1),
                Style::default()
                    .fg(theme.narrative_heading)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(short, Style::default().fg(theme.muted)),
        ]),
        Line::styled(entry.text.clone(), Style::default().fg(theme.narrative_text)),
    ];
    if let Some(url) = &entry.url {
        lines.push(Line::styled(
            url.clone(),
            Style::default()
                .fg(theme.narrative_url)
                .add_modifier(Modifier::UNDERLINED),
        ));
    }
    lines.push(Line::default());
    lines
}

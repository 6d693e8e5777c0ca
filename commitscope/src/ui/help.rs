//! Help overlay renderer for commitscope.
//!
//! Draws a centred modal over the dashboard inside the same `terminal.draw()`
//! closure as every other panel: `Clear` erases the area, then a bordered
//! `Paragraph` lists the keybindings.

use ratatui::{
    layout::Constraint,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme::Theme;

/// Renders the help overlay as a centred modal.
///
/// Skipped on terminals narrower than 60 columns.
///
/// # Arguments
///
/// * `frame` — current render frame provided by `terminal.draw()`
/// * `theme` — active color theme (supplies `border_active` for the modal border)
/// * `help_scroll` — vertical scroll offset; j/k in HelpOverlay mode mutate this field
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 60 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(70), Constraint::Percentage(80));

    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help · j/k scroll, ? or Esc to dismiss ")
        .border_style(ratatui::style::Style::default().fg(theme.border_active));

    frame.render_widget(
        Paragraph::new(build_help_text())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        overlay_area,
    );
}

fn build_help_text() -> Text<'static> {
    Text::from(vec![
        Line::from("Commit window"),
        Line::from("  j / k         Next / previous commit"),
        Line::from("  Ctrl-d / u    Half a window forward / back"),
        Line::from("  g / G         First / last window"),
        Line::from("  mouse wheel   Scroll the window (or the files panel under the mouse)"),
        Line::from(""),
        Line::from("Time slider"),
        Line::from("  [ / ]         Move the cutoff back / forward by 5%"),
        Line::from("  0 / $         Earliest commit only / full range"),
        Line::from(""),
        Line::from("Brush"),
        Line::from("  drag          Select the commits inside the rectangle"),
        Line::from("  click         Clear the selection"),
        Line::from("  Esc           Clear the selection"),
        Line::from("  hover         Show commit details in the status bar"),
        Line::from(""),
        Line::from("Panels"),
        Line::from("  Tab / L       Focus next panel"),
        Line::from("  Shift-Tab / H Focus previous panel"),
        Line::from("  j / k         Scroll the files panel when it has focus"),
        Line::from(""),
        Line::from("General"),
        Line::from("  ?             Open / close this help overlay"),
        Line::from("  q             Quit"),
    ])
}

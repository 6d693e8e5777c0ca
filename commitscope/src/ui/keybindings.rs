//! Keybinding and mouse dispatcher for commitscope.
//!
//! Translates raw crossterm events into `AppState` calls, most of which end up
//! as coordinator input events, and returns a `KeyAction` telling the event
//! loop whether to continue or quit. Keys branch first on `state.mode`.

use commitscope_core::InputEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::app::{AppState, Mode, PanelFocus};

/// Slider step for `[` and `]`, in percentage points.
const SLIDER_STEP: i16 = 5;

/// Control-flow signal returned from the dispatchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Quit,
}

/// Dispatches a key event to the handler matching the current mode.
///
/// # Arguments
///
/// * `key`   — the raw crossterm key event (code + modifiers)
/// * `state` — mutable reference to all UI state
pub fn handle_key(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match state.mode {
        Mode::HelpOverlay => handle_help(key, state),
        Mode::Normal => handle_normal(key, state),
    }
}

// ---------------------------------------------------------------------------
// Normal mode
// ---------------------------------------------------------------------------

fn handle_normal(key: KeyEvent, state: &mut AppState) -> KeyAction {
    if let Some(action) = handle_scroll_key(key, state) {
        return action;
    }

    match key.code {
        // Time slider
        KeyCode::Char('[') => state.nudge_progress(-SLIDER_STEP),
        KeyCode::Char(']') => state.nudge_progress(SLIDER_STEP),
        KeyCode::Char('0') => state.set_progress(0),
        KeyCode::Char('$') => state.set_progress(100),

        KeyCode::Esc => state.clear_brush(),

        // Panel focus
        KeyCode::Tab | KeyCode::Char('L') => state.focus = state.focus.next(),
        KeyCode::BackTab | KeyCode::Char('H') => state.focus = state.focus.prev(),

        KeyCode::Char('?') => {
            state.help_scroll = 0;
            state.mode = Mode::HelpOverlay;
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => return KeyAction::Quit,
        _ => {}
    }
    KeyAction::Continue
}

/// j / k / g / G and Ctrl-d / Ctrl-u. The files panel scrolls itself when
/// focused; everywhere else these keys move the commit window.
///
/// Returns `None` when the key should fall through to the rest of the Normal
/// handler.
fn handle_scroll_key(key: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if state.focus == PanelFocus::Files {
        let half = (state.files_viewport_height / 2).max(1);
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => state.files_scroll_down(1),
            KeyCode::Char('k') | KeyCode::Up => state.files_scroll_up(1),
            KeyCode::Char('d') if ctrl => state.files_scroll_down(half),
            KeyCode::Char('u') if ctrl => state.files_scroll_up(half),
            KeyCode::Char('g') => state.files_scroll = 0,
            _ => return None,
        }
        return Some(KeyAction::Continue);
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => state.scroll_by(1),
        KeyCode::Char('k') | KeyCode::Up => state.scroll_by(-1),
        KeyCode::Char('d') if ctrl => state.scroll_by(state.half_window()),
        KeyCode::Char('u') if ctrl => state.scroll_by(-state.half_window()),
        KeyCode::Char('g') => state.scroll_top(),
        KeyCode::Char('G') => state.scroll_bottom(),
        _ => return None,
    }
    Some(KeyAction::Continue)
}

// ---------------------------------------------------------------------------
// HelpOverlay mode
// ---------------------------------------------------------------------------

fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            state.help_scroll = state.help_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.help_scroll = state.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('g') => state.help_scroll = 0,
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => state.mode = Mode::Normal,
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Mouse events
// ---------------------------------------------------------------------------

/// Handles a mouse event.
///
/// On the chart, press / drag / release drive the brush and plain movement
/// updates the hover position. A press elsewhere focuses the panel under the
/// mouse. The wheel scrolls the files panel when over it and the commit
/// window everywhere else.
///
/// # Arguments
///
/// * `mouse` — the crossterm mouse event
/// * `state` — mutable reference to all UI state
pub fn handle_mouse(mouse: MouseEvent, state: &mut AppState) -> KeyAction {
    let pos = Position {
        x: mouse.column,
        y: mouse.row,
    };

    if state.mode == Mode::HelpOverlay {
        match mouse.kind {
            MouseEventKind::ScrollUp => state.help_scroll = state.help_scroll.saturating_sub(3),
            MouseEventKind::ScrollDown => state.help_scroll = state.help_scroll.saturating_add(3),
            _ => {}
        }
        return KeyAction::Continue;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => match state.chart_point(pos) {
            Some(at) => {
                state.focus = PanelFocus::Chart;
                state.dispatch(InputEvent::BrushStart(at));
            }
            None => focus_panel_at(pos, state),
        },
        MouseEventKind::Drag(MouseButton::Left) if state.is_brushing() => {
            let to = state.chart_point_clamped(pos);
            state.hover = Some(to);
            state.dispatch(InputEvent::BrushMove(to));
        }
        MouseEventKind::Up(MouseButton::Left) if state.is_brushing() => {
            let at = state.chart_point_clamped(pos);
            state.dispatch(InputEvent::BrushEnd(at));
        }
        MouseEventKind::Moved => state.hover = state.chart_point(pos),
        MouseEventKind::ScrollUp => scroll_under(pos, state, -1),
        MouseEventKind::ScrollDown => scroll_under(pos, state, 1),
        _ => {}
    }
    KeyAction::Continue
}

fn focus_panel_at(pos: Position, state: &mut AppState) {
    let rects = state.rects;
    if rects.narrative.contains(pos) {
        state.focus = PanelFocus::Narrative;
    } else if rects.files.width > 0 && rects.files.contains(pos) {
        state.focus = PanelFocus::Files;
    }
}

fn scroll_under(pos: Position, state: &mut AppState, direction: isize) {
    if state.rects.files.width > 0 && state.rects.files.contains(pos) {
        if direction > 0 {
            state.files_scroll_down(3);
        } else {
            state.files_scroll_up(3);
        }
    } else {
        state.scroll_by(direction);
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use commitscope_core::{Dataset, LineRecord, ViewConfig};
    use crossterm::event::KeyEventState;
    use ratatui::layout::Rect;
    use time::macros::datetime;
    use time::OffsetDateTime;

    use super::*;

    fn ready_state() -> AppState {
        let mut state = AppState::new(PathBuf::from("loc.csv"), ViewConfig::default());
        state.apply_load(Ok(Dataset::from_records(Vec::new())));
        state.fit_chart(Rect::new(1, 1, 40, 10));
        state
    }

    fn commit(id: &str, timestamp: OffsetDateTime) -> LineRecord {
        LineRecord {
            commit_id: id.to_owned(),
            file: "src/app.js".to_owned(),
            file_type: "js".to_owned(),
            line: 1,
            depth: 0,
            length: 20,
            author: "emily".to_owned(),
            date: timestamp.date(),
            time: timestamp.time(),
            timezone: timestamp.offset(),
            timestamp,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn drag_on_chart_leaves_a_brush_and_click_clears_it() {
        let mut state = ready_state();
        handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 2, 2), &mut state);
        assert!(state.is_brushing());
        handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 10, 6), &mut state);
        handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 10, 6), &mut state);
        assert!(!state.is_brushing());
        assert!(state.panels.borrow().brush.is_some());

        handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 4, 4), &mut state);
        handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 4, 4), &mut state);
        assert!(state.panels.borrow().brush.is_none());
    }

    #[test]
    fn full_chart_drag_selects_every_active_commit() {
        let mut state = AppState::new(PathBuf::from("loc.csv"), ViewConfig::default());
        // Midnight lands on the bottom edge; the first and last commits on
        // the left and right edges.
        state.apply_load(Ok(Dataset::from_records(vec![
            commit("a1", datetime!(2025-02-10 00:00 UTC)),
            commit("b2", datetime!(2025-02-11 12:00 UTC)),
            commit("c3", datetime!(2025-02-12 23:30 UTC)),
        ])));
        state.fit_chart(Rect::new(1, 1, 40, 10));

        handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 1, 1), &mut state);
        handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 200, 200), &mut state);
        handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 200, 200), &mut state);

        let panels = state.panels.borrow();
        assert_eq!(panels.points.len(), 3);
        assert!(panels.points.iter().all(|p| p.selected), "{:?}", panels.points);
        assert_eq!(panels.selection_text, "3 commits selected");
    }

    #[test]
    fn help_overlay_swallows_quit() {
        let mut state = ready_state();
        assert_eq!(handle_key(key(KeyCode::Char('?')), &mut state), KeyAction::Continue);
        assert_eq!(state.mode, Mode::HelpOverlay);
        assert_eq!(handle_key(key(KeyCode::Char('q')), &mut state), KeyAction::Continue);
        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(handle_key(key(KeyCode::Char('q')), &mut state), KeyAction::Quit);
    }

    #[test]
    fn slider_keys_move_the_cutoff() {
        let mut state = ready_state();
        handle_key(key(KeyCode::Char('[')), &mut state);
        assert_eq!(state.panels.borrow().window.progress, 95);
        handle_key(key(KeyCode::Char('0')), &mut state);
        assert_eq!(state.panels.borrow().window.progress, 0);
        handle_key(key(KeyCode::Char('$')), &mut state);
        assert_eq!(state.panels.borrow().window.progress, 100);
    }
}

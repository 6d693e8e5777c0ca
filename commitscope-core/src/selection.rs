//! Selection state.
//!
//! Holds the single mutable [`FilterState`] and the transitions driven by
//! user input. The state space is the cross product of brush (active or
//! cleared), viewport offset and time progress; there are no other modes.

use std::sync::Arc;

use time::OffsetDateTime;

use crate::filter::{clamp_viewport_start, cutoff_for_progress, filter_time};
use crate::types::{BrushRect, Commit, Point};

/// The three filter dimensions. Lives for the whole session, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    /// Slider position in `0..=100`.
    pub time_progress: u8,
    /// `None` means the full time range.
    pub time_cutoff: Option<OffsetDateTime>,
    pub brush: Option<BrushRect>,
    pub viewport_start: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            time_progress: 100,
            time_cutoff: None,
            brush: None,
            viewport_start: 0,
        }
    }
}

/// A scroll position reported by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollOffset {
    /// Pixel offset, quantised by the item height.
    Pixels(f64),
    /// Index of the first visible item.
    Row(usize),
}

impl ScrollOffset {
    fn to_index(self, item_height: f64) -> usize {
        match self {
            ScrollOffset::Row(row) => row,
            ScrollOffset::Pixels(px) if item_height > 0.0 && px > 0.0 => {
                (px / item_height).floor() as usize
            }
            ScrollOffset::Pixels(_) => 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    filter: FilterState,
    anchor: Option<Point>,
    dragged: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// True between a brush start and its matching end.
    pub fn is_brushing(&self) -> bool {
        self.anchor.is_some()
    }

    /// Sets the viewport start from a scroll position, clamped against the
    /// length of the time-filtered sequence.
    pub fn scroll(&mut self, offset: ScrollOffset, item_height: f64, filtered_len: usize, window: usize) {
        let index = offset.to_index(item_height);
        self.filter.viewport_start = clamp_viewport_start(index, filtered_len, window);
    }

    /// Moves the viewport by `delta` items.
    pub fn scroll_by(&mut self, delta: isize, filtered_len: usize, window: usize) {
        let start = self.filter.viewport_start.saturating_add_signed(delta);
        self.filter.viewport_start = clamp_viewport_start(start, filtered_len, window);
    }

    /// Applies a slider move: derives the cutoff over `commits` and re-clamps
    /// the viewport against the new time-filtered length, which is returned.
    pub fn set_progress(&mut self, progress: u8, commits: &[Arc<Commit>], window: usize) -> usize {
        let progress = progress.min(100);
        self.filter.time_progress = progress;
        self.filter.time_cutoff = cutoff_for_progress(commits, progress);
        let filtered_len = filter_time(commits, self.filter.time_cutoff).len();
        self.filter.viewport_start =
            clamp_viewport_start(self.filter.viewport_start, filtered_len, window);
        filtered_len
    }

    /// Anchors a new brush. Any previous rectangle is dropped immediately.
    pub fn brush_start(&mut self, at: Point) {
        self.anchor = Some(at);
        self.dragged = false;
        self.filter.brush = None;
    }

    /// Stretches the brush from its anchor to `to`. Ignored without an anchor.
    pub fn brush_move(&mut self, to: Point) {
        if let Some(anchor) = self.anchor {
            self.dragged = true;
            self.filter.brush = Some(BrushRect::from_corners(anchor, to));
        }
    }

    /// Finishes the gesture. A drag leaves its rectangle in place; a click
    /// (no movement, or back onto the anchor) clears the brush.
    pub fn brush_end(&mut self, at: Point) {
        let Some(anchor) = self.anchor.take() else {
            return;
        };
        if self.dragged && anchor != at {
            self.filter.brush = Some(BrushRect::from_corners(anchor, at));
        } else {
            self.filter.brush = None;
        }
        self.dragged = false;
    }

    pub fn clear_brush(&mut self) {
        self.anchor = None;
        self.dragged = false;
        self.filter.brush = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_without_drag_clears_brush() {
        let mut s = SelectionState::new();
        s.brush_start(Point::new(1.0, 1.0));
        s.brush_move(Point::new(5.0, 5.0));
        s.brush_end(Point::new(5.0, 5.0));
        assert!(s.filter().brush.is_some());

        s.brush_start(Point::new(3.0, 3.0));
        s.brush_end(Point::new(3.0, 3.0));
        assert_eq!(s.filter().brush, None);
        assert!(!s.is_brushing());
    }

    #[test]
    fn pixel_scroll_is_quantised_and_clamped() {
        let mut s = SelectionState::new();
        s.scroll(ScrollOffset::Pixels(455.0), 150.0, 30, 20);
        assert_eq!(s.filter().viewport_start, 3);
        s.scroll(ScrollOffset::Pixels(1e6), 150.0, 30, 20);
        assert_eq!(s.filter().viewport_start, 10);
        s.scroll(ScrollOffset::Row(4), 150.0, 10, 20);
        assert_eq!(s.filter().viewport_start, 0);
    }

    #[test]
    fn move_before_start_is_ignored() {
        let mut s = SelectionState::new();
        s.brush_move(Point::new(2.0, 2.0));
        assert_eq!(s.filter().brush, None);
    }
}

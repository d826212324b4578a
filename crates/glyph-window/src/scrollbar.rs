//! Scrollbar geometry, shared by both axes of a window.
//!
//! A bar is a line of `len` cells along one axis: a back arrow, a track, and
//! a forward arrow. The thumb rides on the track. Its size is the visible
//! fraction of the content and its position the scrolled fraction.
//!
//! ```text
//!   ^   back arrow        < ░░███░░░░ >
//!   ░   track
//!   █   thumb
//!   ░
//!   v   forward arrow
//! ```
//!
//! All positions are screen coordinates. Arithmetic saturates, so a bar
//! hanging off either end of the `i32` range classifies and paints safely.

use glyph_term::buffer::{ScreenBuffer, glyph};
use glyph_term::style::Style;

/// Lines (or columns) moved by a press on the bare track.
pub const PAGE: usize = 5;

/// Direction a bar runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Vertical,
    Horizontal,
}

/// What a press on a bar landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    /// The up or left arrow.
    Back,
    /// The down or right arrow.
    Forward,
    /// Track before the thumb.
    PageBack,
    /// Track after the thumb.
    PageForward,
    /// The thumb, grabbed this many cells past its first cell.
    Thumb(i32),
}

/// One scrollbar, positioned and sized for the current scroll state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scrollbar {
    pub axis: Axis,
    /// Coordinate of the back arrow along the axis.
    pub start: i32,
    /// Fixed coordinate across the axis (column for vertical, row for
    /// horizontal).
    pub across: i32,
    /// Cells along the axis, both arrows included. At least 3.
    pub len: i32,
    /// Content extent along the axis.
    pub content: usize,
    /// Visible extent along the axis.
    pub view: usize,
    /// Current scroll offset.
    pub offset: usize,
}

/// Saturating `usize` to `i32`.
pub fn to_i32(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

/// Negative values become 0.
pub fn to_usize(n: i32) -> usize {
    usize::try_from(n).unwrap_or(0)
}

impl Scrollbar {
    /// Cells between the two arrows.
    fn track_len(&self) -> i32 {
        self.len.saturating_sub(2).max(0)
    }

    fn max_offset(&self) -> usize {
        self.content.saturating_sub(self.view)
    }

    /// The thumb as `(first cell, size)`, counted from the first track cell.
    /// `None` when the track is empty.
    #[must_use]
    pub fn thumb(&self) -> Option<(i32, i32)> {
        let track = to_usize(self.track_len());
        if track == 0 || self.content == 0 {
            return None;
        }
        let size = (track.saturating_mul(self.view) / self.content).clamp(1, track);
        let room = track - size;
        let max = self.max_offset();
        let pos = if max == 0 {
            0
        } else {
            self.offset.min(max).saturating_mul(room) / max
        };
        Some((to_i32(pos), to_i32(size)))
    }

    /// Screen position of the cell `step` cells along the bar.
    fn cell(&self, step: i32) -> (i32, i32) {
        let along = self.start.saturating_add(step);
        match self.axis {
            Axis::Vertical => (self.across, along),
            Axis::Horizontal => (along, self.across),
        }
    }

    /// Classify a press at screen position `(mx, my)`.
    #[must_use]
    pub fn hit(&self, mx: i32, my: i32) -> Option<Part> {
        let (along, across) = match self.axis {
            Axis::Vertical => (my, mx),
            Axis::Horizontal => (mx, my),
        };
        let end = i64::from(self.start) + i64::from(self.len);
        if across != self.across || along < self.start || i64::from(along) >= end {
            return None;
        }

        let step = along - self.start;
        if step == 0 {
            return Some(Part::Back);
        }
        if step == self.len - 1 {
            return Some(Part::Forward);
        }
        let on_track = step - 1;
        match self.thumb() {
            Some((pos, size)) if on_track >= pos && on_track < pos.saturating_add(size) => {
                Some(Part::Thumb(on_track - pos))
            }
            Some((pos, _)) if on_track < pos => Some(Part::PageBack),
            _ => Some(Part::PageForward),
        }
    }

    /// The offset that puts the thumb's grabbed cell under `(mx, my)`.
    #[must_use]
    pub fn offset_for_drag(&self, mx: i32, my: i32, grab: i32) -> usize {
        let max = self.max_offset();
        let Some((_, size)) = self.thumb() else {
            return self.offset.min(max);
        };
        let room = self.track_len() - size;
        if room <= 0 || max == 0 {
            return self.offset.min(max);
        }

        let along = match self.axis {
            Axis::Vertical => my,
            Axis::Horizontal => mx,
        };
        let pos = along
            .saturating_sub(self.start.saturating_add(1))
            .saturating_sub(grab)
            .clamp(0, room);
        to_usize(pos).saturating_mul(max) / to_usize(room)
    }

    /// Paint arrows, track, and thumb.
    pub fn draw(&self, buf: &mut ScreenBuffer) {
        let button = Style::BRIGHT_WHITE.join(&Style::BG_BLUE);
        let track = Style::BLACK.join(&Style::BG_BLACK);
        let thumb = Style::WHITE.join(&Style::BG_CYAN);
        let (back, forward) = match self.axis {
            Axis::Vertical => (glyph::TRIANGLE_UP, glyph::TRIANGLE_DOWN),
            Axis::Horizontal => (glyph::TRIANGLE_LEFT, glyph::TRIANGLE_RIGHT),
        };

        let (x, y) = self.cell(0);
        buf.set_cell(x, y, back, &button);
        let (x, y) = self.cell(self.len - 1);
        buf.set_cell(x, y, forward, &button);

        // Only walk the track cells that can land inside the buffer.
        let extent = match self.axis {
            Axis::Vertical => buf.height(),
            Axis::Horizontal => buf.width(),
        };
        let first = (-i64::from(self.start)).max(1);
        let last = (i64::from(extent) - i64::from(self.start)).min(i64::from(self.len) - 1);
        let (Ok(first), Ok(last)) = (i32::try_from(first), i32::try_from(last)) else {
            return;
        };

        let (pos, size) = self.thumb().unwrap_or((self.track_len(), 0));
        for step in first..last {
            let i = step - 1;
            let (x, y) = self.cell(step);
            if i >= pos && i < pos.saturating_add(size) {
                buf.set_cell(x, y, glyph::FULL_BLOCK, &thumb);
            } else {
                buf.set_cell(x, y, glyph::LIGHT_SHADE, &track);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

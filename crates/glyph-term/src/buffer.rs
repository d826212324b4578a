// SPDX-License-Identifier: MIT
//
// ScreenBuffer — the grid every frame is painted into.
//
// Every character position on screen is a cell in this buffer. Windows,
// chrome and the desktop background paint here; `render` then serializes
// the entire grid in one write.
//
// Design:
//
//   - Flat `Vec<Cell>` with row-major indexing. Rendering walks it front to
//     back, which is exactly the order the bytes go out.
//
//   - Permissive coordinates. Every drawing call takes signed positions and
//     clips cell by cell, so callers can compute absolute positions for
//     dragged or scrolled content without bounds-checking first.
//
//   - Whole-frame redraw. There is no previous frame and no diff: while a
//     window is dragged most of the screen changes anyway, and a full
//     redraw can never leave stale cells behind. Style-run compression in
//     `StyleWriter` keeps the byte count reasonable.

use std::io::{self, Write};

use crate::ansi;
use crate::cell::Cell;
use crate::output::{OutputBuffer, StyleWriter};
use crate::style::Style;

// ─── Glyphs ─────────────────────────────────────────────────────────────────

/// Single-column glyphs used by the window layer.
pub mod glyph {
    pub const LIGHT_SHADE: char = '░';
    pub const FULL_BLOCK: char = '█';
    pub const DIAMOND: char = '*';
    pub const BULLET: char = '*';
    pub const CIRCLE: char = 'o';
    pub const CHECK: char = '+';
    pub const TRIANGLE_UP: char = '^';
    pub const TRIANGLE_DOWN: char = 'v';
    pub const TRIANGLE_LEFT: char = '<';
    pub const TRIANGLE_RIGHT: char = '>';
    pub const ARROW_RIGHT: char = '>';
    pub const RESIZE_HANDLE: char = '#';
}

// ─── BoxStyle ───────────────────────────────────────────────────────────────

/// A set of box-drawing glyphs for [`ScreenBuffer::draw_box`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxStyle {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
}

impl BoxStyle {
    /// `╔═╗ ║ ╚═╝`: the default border.
    pub const DOUBLE: Self = Self {
        top_left: '╔',
        top_right: '╗',
        bottom_left: '╚',
        bottom_right: '╝',
        horizontal: '═',
        vertical: '║',
    };

    /// `╭─╮ │ ╰─╯`: single line with rounded corners.
    pub const ROUNDED: Self = Self {
        top_left: '╭',
        top_right: '╮',
        bottom_left: '╰',
        bottom_right: '╯',
        horizontal: '─',
        vertical: '│',
    };

    /// `┏━┓ ┃ ┗━┛`: heavy line.
    pub const HEAVY: Self = Self {
        top_left: '┏',
        top_right: '┓',
        bottom_left: '┗',
        bottom_right: '┛',
        horizontal: '━',
        vertical: '┃',
    };

    /// Pick a glyph set: `heavy` wins over `rounded`; neither gives double.
    #[must_use]
    pub const fn select(rounded: bool, heavy: bool) -> Self {
        if heavy {
            Self::HEAVY
        } else if rounded {
            Self::ROUNDED
        } else {
            Self::DOUBLE
        }
    }
}

// ─── ScreenBuffer ───────────────────────────────────────────────────────────

/// A fully populated `width × height` grid of [`Cell`]s.
///
/// # Examples
///
/// ```
/// use glyph_term::buffer::ScreenBuffer;
/// use glyph_term::style::Style;
///
/// let mut buf = ScreenBuffer::new(20, 5);
/// buf.draw_string(2, 1, "hi ╳", &Style::CYAN);
/// assert_eq!(buf.get(5, 1).unwrap().ch, '╳');
///
/// // Off-screen writes are silently dropped.
/// buf.set_cell(-1, 99, 'x', &Style::RED);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ScreenBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl ScreenBuffer {
    // ─── Construction ────────────────────────────────────────────────────

    /// Allocate a grid with every cell set to a space in the reset style.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let size = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; size],
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    /// Buffer width in columns.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Buffer height in rows.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Flat index for in-bounds signed coordinates, `None` otherwise.
    #[inline]
    #[allow(clippy::cast_sign_loss)] // Both checked non-negative.
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && x < i32::from(self.width) && y < i32::from(self.height) {
            Some(y as usize * usize::from(self.width) + x as usize)
        } else {
            None
        }
    }

    /// Get a cell, or `None` if `(x, y)` is outside the grid.
    #[inline]
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// All cells, row-major.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// One row as a slice. Returns `None` if `y` is out of bounds.
    #[must_use]
    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        if y < self.height {
            let w = usize::from(self.width);
            let start = usize::from(y) * w;
            Some(&self.cells[start..start + w])
        } else {
            None
        }
    }

    /// The glyphs of row `y` as a `String` (handy for assertions and logs).
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        self.row(y).map_or_else(String::new, |r| r.iter().map(|c| c.ch).collect())
    }

    // ─── Clear ───────────────────────────────────────────────────────────

    /// Reset every cell to a space in the reset style. Produces no output.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    // ─── Point Writes ────────────────────────────────────────────────────

    /// Write one cell. Out-of-range coordinates are a silent no-op.
    #[inline]
    pub fn set_cell(&mut self, x: i32, y: i32, ch: char, style: &Style) {
        if let Some(i) = self.index(x, y) {
            let cell = &mut self.cells[i];
            cell.ch = ch;
            if cell.style != *style {
                cell.style = style.clone();
            }
        }
    }

    /// Write the first grapheme unit of `glyph`. Empty input writes nothing.
    pub fn set_glyph(&mut self, x: i32, y: i32, glyph: &str, style: &Style) {
        if let Some(ch) = glyph.chars().next() {
            self.set_cell(x, y, ch, style);
        }
    }

    // ─── Text ────────────────────────────────────────────────────────────

    /// Write `text` one grapheme unit per column from `(x, y)`, stopping at
    /// the right edge of the buffer.
    pub fn draw_string(&mut self, x: i32, y: i32, text: &str, style: &Style) {
        self.draw_string_clipped(x, y, text, style, i32::MAX);
    }

    /// Like [`draw_string`](Self::draw_string) but also stops before column
    /// `max_x` (exclusive). This is how window content stays inside its frame.
    pub fn draw_string_clipped(&mut self, x: i32, y: i32, text: &str, style: &Style, max_x: i32) {
        if y < 0 || y >= i32::from(self.height) {
            return;
        }
        let limit = i32::from(self.width).min(max_x);
        let mut col = x;
        for ch in text.chars() {
            if col >= limit {
                break;
            }
            self.set_cell(col, y, ch, style);
            col += 1;
        }
    }

    // ─── Shapes ──────────────────────────────────────────────────────────

    /// Draw a `w × h` rectangle border with its top-left corner at `(x, y)`.
    ///
    /// `heavy` selects the heavy set, else `rounded` the rounded set, else
    /// the double-line set. Each glyph goes through [`set_cell`](Self::set_cell),
    /// so partially off-screen boxes are clipped cell by cell. Non-positive
    /// sizes draw nothing.
    pub fn draw_box(&mut self, x: i32, y: i32, w: i32, h: i32, style: &Style, rounded: bool, heavy: bool) {
        if w <= 0 || h <= 0 {
            return;
        }
        let g = BoxStyle::select(rounded, heavy);
        let right = x.saturating_add(w - 1);
        let bottom = y.saturating_add(h - 1);
        let columns = clip_span(i64::from(x) + 1, i64::from(x) + i64::from(w) - 1, self.width);
        let rows = clip_span(i64::from(y) + 1, i64::from(y) + i64::from(h) - 1, self.height);

        self.set_cell(x, y, g.top_left, style);
        self.set_cell(right, y, g.top_right, style);
        self.set_cell(x, bottom, g.bottom_left, style);
        self.set_cell(right, bottom, g.bottom_right, style);

        for cx in columns {
            self.set_cell(cx, y, g.horizontal, style);
            self.set_cell(cx, bottom, g.horizontal, style);
        }
        for cy in rows {
            self.set_cell(x, cy, g.vertical, style);
            self.set_cell(right, cy, g.vertical, style);
        }
    }

    /// Fill a `w × h` rectangle with `ch`, clipped to the buffer.
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, ch: char, style: &Style) {
        // Intersect in i64 so x + w can't overflow.
        let x1 = i64::from(x).max(0);
        let y1 = i64::from(y).max(0);
        let x2 = (i64::from(x) + i64::from(w)).min(i64::from(self.width));
        let y2 = (i64::from(y) + i64::from(h)).min(i64::from(self.height));
        if x1 >= x2 || y1 >= y2 {
            return;
        }

        let width = usize::from(self.width);
        // All four values are now within [0, u16::MAX].
        let (x1, x2) = (x1 as usize, x2 as usize);
        for row in y1 as usize..y2 as usize {
            let start = row * width;
            for cell in &mut self.cells[start + x1..start + x2] {
                cell.ch = ch;
                if cell.style != *style {
                    cell.style = style.clone();
                }
            }
        }
    }

    // ─── Render ──────────────────────────────────────────────────────────

    /// Serialize the whole grid into `out`.
    ///
    /// Emits cursor-home, then every cell in row-major order with its style
    /// token only where it differs from the previous cell's, `\r\n` between
    /// rows (not after the last), and a final style reset. The grid is not
    /// touched.
    pub fn render_into(&self, out: &mut OutputBuffer) {
        // Writes into the in-memory buffer cannot fail.
        let _ = out.write_all(ansi::CURSOR_HOME);

        let mut writer = StyleWriter::new();
        let width = usize::from(self.width).max(1);
        for (y, row) in self.cells.chunks(width).enumerate() {
            if y > 0 {
                let _ = out.write_all(b"\r\n");
            }
            for cell in row {
                writer.write_cell(out, cell);
            }
        }

        let _ = out.write_all(ansi::RESET);
    }

    /// Serialize the grid and write it to `w` with a single write + flush.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn render_to(&self, w: &mut impl Write) -> io::Result<()> {
        let mut out = OutputBuffer::with_cells(self.cells.len());
        self.render_into(&mut out);
        out.flush_to(w)
    }

    /// Serialize the grid and write it to stdout in one flush.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn render(&self) -> io::Result<()> {
        let mut out = OutputBuffer::with_cells(self.cells.len());
        self.render_into(&mut out);
        out.flush_stdout()
    }
}

impl std::fmt::Debug for ScreenBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ScreenBuffer({}x{})", self.width, self.height)
    }
}

/// `[from, to)` clipped to `[0, len)`. Empty when nothing is left.
#[allow(clippy::cast_possible_truncation)]
fn clip_span(from: i64, to: i64, len: u16) -> std::ops::Range<i32> {
    let len = i64::from(len);
    let from = from.clamp(0, len);
    let to = to.clamp(from, len);
    // Both ends are within [0, u16::MAX].
    from as i32..to as i32
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::display_width;
    use pretty_assertions::assert_eq;

    fn rendered(buf: &ScreenBuffer) -> String {
        let mut out = OutputBuffer::new();
        buf.render_into(&mut out);
        String::from_utf8(out.as_bytes().to_vec()).unwrap()
    }

    fn all_empty(buf: &ScreenBuffer) -> bool {
        buf.cells().iter().all(Cell::is_empty)
    }

    // ── Construction & clear ────────────────────────────────────────────

    #[test]
    fn new_is_fully_populated() {
        let buf = ScreenBuffer::new(7, 3);
        assert_eq!(buf.cells().len(), 21);
        assert!(all_empty(&buf));
    }

    #[test]
    fn zero_size_buffer() {
        let buf = ScreenBuffer::new(0, 0);
        assert!(buf.cells().is_empty());
        assert!(buf.get(0, 0).is_none());
        assert_eq!(rendered(&buf), "\x1b[H\x1b[0m");
    }

    #[test]
    fn clear_resets_every_cell() {
        for (w, h) in [(1, 1), (3, 2), (80, 24), (1, 50)] {
            let mut buf = ScreenBuffer::new(w, h);
            buf.fill_rect(0, 0, i32::from(w), i32::from(h), '#', &Style::RED);
            buf.clear();
            assert!(all_empty(&buf), "{w}x{h} not cleared");
        }
    }

    #[test]
    fn clear_twice_is_same_as_once() {
        let mut buf = ScreenBuffer::new(4, 4);
        buf.draw_string(0, 0, "abcd", &Style::GREEN);
        buf.clear();
        let once = buf.clone();
        buf.clear();
        assert_eq!(buf, once);
    }

    // ── set_cell ────────────────────────────────────────────────────────

    #[test]
    fn set_cell_in_bounds() {
        let mut buf = ScreenBuffer::new(5, 5);
        buf.set_cell(4, 4, 'z', &Style::BLUE);
        assert_eq!(buf.get(4, 4), Some(&Cell::new('z', Style::BLUE)));
    }

    #[test]
    fn set_cell_out_of_bounds_is_noop() {
        let mut buf = ScreenBuffer::new(5, 5);
        for (x, y) in [(-1, 0), (0, -1), (5, 0), (0, 5), (i32::MIN, i32::MIN), (i32::MAX, 2)] {
            buf.set_cell(x, y, 'x', &Style::RED);
        }
        assert!(all_empty(&buf));
    }

    #[test]
    fn set_glyph_takes_first_unit() {
        let mut buf = ScreenBuffer::new(3, 1);
        buf.set_glyph(0, 0, "█▓", &Style::RED);
        buf.set_glyph(1, 0, "", &Style::RED);
        assert_eq!(buf.row_text(0), "█  ");
    }

    // ── draw_string ─────────────────────────────────────────────────────

    #[test]
    fn draw_string_stops_at_width() {
        let mut buf = ScreenBuffer::new(5, 1);
        buf.draw_string(2, 0, "hello", &Style::RESET);
        assert_eq!(buf.row_text(0), "  hel");
    }

    #[test]
    fn draw_string_negative_x_clips_left() {
        let mut buf = ScreenBuffer::new(5, 1);
        buf.draw_string(-2, 0, "abcdef", &Style::RESET);
        assert_eq!(buf.row_text(0), "cdef ");
    }

    #[test]
    fn draw_string_offscreen_rows_ignored() {
        let mut buf = ScreenBuffer::new(5, 2);
        buf.draw_string(0, -1, "abc", &Style::RESET);
        buf.draw_string(0, 2, "abc", &Style::RESET);
        assert!(all_empty(&buf));
    }

    #[test]
    fn draw_string_clipped_respects_max_x() {
        let mut buf = ScreenBuffer::new(10, 1);
        buf.draw_string_clipped(1, 0, "abcdefgh", &Style::RESET, 4);
        assert_eq!(buf.row_text(0), " abc      ");
    }

    #[test]
    fn draw_string_clipped_max_x_beyond_width() {
        let mut buf = ScreenBuffer::new(4, 1);
        buf.draw_string_clipped(0, 0, "abcdefgh", &Style::RESET, 100);
        assert_eq!(buf.row_text(0), "abcd");
    }

    #[test]
    fn draw_string_clipped_never_splits_multibyte() {
        let mut buf = ScreenBuffer::new(10, 1);
        let text = "╔═é█🦀x";
        buf.draw_string_clipped(0, 0, text, &Style::RESET, 4);
        assert_eq!(buf.row_text(0), "╔═é█      ");
        assert_eq!(display_width(text), 6);
        for cell in buf.row(0).unwrap() {
            assert_eq!(cell.ch.to_string().chars().count(), 1);
        }
    }

    #[test]
    fn draw_string_huge_x_does_not_overflow() {
        let mut buf = ScreenBuffer::new(4, 1);
        buf.draw_string(i32::MAX, 0, "abc", &Style::RESET);
        buf.draw_string(i32::MAX - 1, 0, "abc", &Style::RESET);
        assert!(all_empty(&buf));
    }

    // ── draw_box ────────────────────────────────────────────────────────

    #[test]
    fn draw_box_double_default() {
        let mut buf = ScreenBuffer::new(4, 3);
        buf.draw_box(0, 0, 4, 3, &Style::CYAN, false, false);
        assert_eq!(buf.row_text(0), "╔══╗");
        assert_eq!(buf.row_text(1), "║  ║");
        assert_eq!(buf.row_text(2), "╚══╝");
        assert_eq!(buf.get(0, 0).unwrap().style, Style::CYAN);
        assert!(buf.get(1, 1).unwrap().is_empty());
    }

    #[test]
    fn draw_box_rounded_and_heavy() {
        let mut buf = ScreenBuffer::new(3, 3);
        buf.draw_box(0, 0, 3, 3, &Style::RESET, true, false);
        assert_eq!(buf.row_text(0), "╭─╮");
        assert_eq!(buf.row_text(2), "╰─╯");

        buf.draw_box(0, 0, 3, 3, &Style::RESET, true, true);
        assert_eq!(buf.row_text(0), "┏━┓");
        assert_eq!(buf.row_text(1), "┃ ┃");
        assert_eq!(buf.row_text(2), "┗━┛");
    }

    #[test]
    fn draw_box_partially_offscreen() {
        let mut buf = ScreenBuffer::new(4, 4);
        buf.draw_box(-2, -1, 5, 4, &Style::RESET, false, false);
        // Right edge at x=2, bottom edge at y=2.
        assert_eq!(buf.row_text(0), "  ║ ");
        assert_eq!(buf.row_text(1), "  ║ ");
        assert_eq!(buf.row_text(2), "══╝ ");
        assert_eq!(buf.row_text(3), "    ");
    }

    #[test]
    fn draw_box_huge_size_is_clipped_to_the_grid() {
        let started = std::time::Instant::now();
        let mut buf = ScreenBuffer::new(4, 4);
        buf.draw_box(0, 0, i32::MAX, 2, &Style::RESET, false, false);
        assert_eq!(buf.row_text(0), "╔═══");
        assert_eq!(buf.row_text(1), "╚═══");

        let mut buf = ScreenBuffer::new(4, 4);
        buf.draw_box(1, -5, 2, i32::MAX, &Style::RESET, false, false);
        for y in 0..4 {
            assert_eq!(buf.row_text(y), " ║║ ");
        }

        let mut buf = ScreenBuffer::new(4, 4);
        buf.draw_box(i32::MIN, i32::MIN, i32::MAX, i32::MAX, &Style::RESET, true, false);
        assert!(all_empty(&buf));

        assert!(started.elapsed() < std::time::Duration::from_secs(1));
    }

    #[test]
    fn draw_box_entirely_offscreen() {
        let mut buf = ScreenBuffer::new(4, 4);
        buf.draw_box(10, 10, 5, 5, &Style::RESET, false, false);
        buf.draw_box(-20, -20, 5, 5, &Style::RESET, false, true);
        buf.draw_box(0, 0, 0, 5, &Style::RESET, false, false);
        buf.draw_box(0, 0, 5, -3, &Style::RESET, false, false);
        assert!(all_empty(&buf));
    }

    #[test]
    fn box_style_selection() {
        assert_eq!(BoxStyle::select(false, false), BoxStyle::DOUBLE);
        assert_eq!(BoxStyle::select(true, false), BoxStyle::ROUNDED);
        assert_eq!(BoxStyle::select(false, true), BoxStyle::HEAVY);
        assert_eq!(BoxStyle::select(true, true), BoxStyle::HEAVY);
    }

    // ── fill_rect ───────────────────────────────────────────────────────

    #[test]
    fn fill_rect_clips_each_side() {
        let mut buf = ScreenBuffer::new(4, 3);
        buf.fill_rect(-1, 1, 3, 5, '░', &Style::BG_BLUE);
        assert_eq!(buf.row_text(0), "    ");
        assert_eq!(buf.row_text(1), "░░  ");
        assert_eq!(buf.row_text(2), "░░  ");
        assert_eq!(buf.get(1, 2).unwrap().style, Style::BG_BLUE);
    }

    #[test]
    fn fill_rect_degenerate_sizes() {
        let mut buf = ScreenBuffer::new(4, 3);
        buf.fill_rect(0, 0, 0, 3, 'x', &Style::RESET);
        buf.fill_rect(0, 0, 3, -1, 'x', &Style::RESET);
        buf.fill_rect(i32::MAX, i32::MAX, i32::MAX, i32::MAX, 'x', &Style::RESET);
        buf.fill_rect(i32::MIN, i32::MIN, 5, 5, 'x', &Style::RESET);
        assert!(all_empty(&buf));
    }

    // ── render ──────────────────────────────────────────────────────────

    #[test]
    fn render_compresses_style_runs() {
        let s1 = Style::from_static("\x1b[31m");
        let s2 = Style::from_static("\x1b[32m");
        let mut buf = ScreenBuffer::new(3, 1);
        buf.set_cell(0, 0, 'A', &s1);
        buf.set_cell(1, 0, 'B', &s1);
        buf.set_cell(2, 0, 'C', &s2);
        assert_eq!(rendered(&buf), "\x1b[H\x1b[31mAB\x1b[32mC\x1b[0m");
    }

    #[test]
    fn render_separates_rows_with_crlf() {
        let mut buf = ScreenBuffer::new(2, 3);
        buf.draw_string(0, 0, "ab", &Style::RESET);
        buf.draw_string(0, 1, "cd", &Style::RESET);
        buf.draw_string(0, 2, "ef", &Style::RESET);
        assert_eq!(rendered(&buf), "\x1b[H\x1b[0mab\r\ncd\r\nef\x1b[0m");
    }

    #[test]
    fn render_style_run_spans_rows() {
        let mut buf = ScreenBuffer::new(2, 2);
        buf.fill_rect(0, 0, 2, 2, 'x', &Style::CYAN);
        assert_eq!(rendered(&buf), "\x1b[H\x1b[36mxx\r\nxx\x1b[0m");
    }

    #[test]
    fn render_emits_each_change_once() {
        let mut buf = ScreenBuffer::new(4, 1);
        buf.set_cell(0, 0, 'a', &Style::RED);
        buf.set_cell(1, 0, 'b', &Style::GREEN);
        buf.set_cell(2, 0, 'c', &Style::RED);
        buf.set_cell(3, 0, 'd', &Style::RED);
        let out = rendered(&buf);
        assert_eq!(out, "\x1b[H\x1b[31ma\x1b[32mb\x1b[31mcd\x1b[0m");
        assert_eq!(out.matches("\x1b[32m").count(), 1);
    }

    #[test]
    fn render_does_not_mutate() {
        let mut buf = ScreenBuffer::new(3, 2);
        buf.draw_string(0, 1, "x█y", &Style::YELLOW);
        let before = buf.clone();
        let first = rendered(&buf);
        let second = rendered(&buf);
        assert_eq!(buf, before);
        assert_eq!(first, second);
    }

    #[test]
    fn render_to_writes_once() {
        let mut buf = ScreenBuffer::new(1, 1);
        buf.set_cell(0, 0, '█', &Style::RESET);
        let mut sink = Vec::new();
        buf.render_to(&mut sink).unwrap();
        assert_eq!(String::from_utf8(sink).unwrap(), "\x1b[H\x1b[0m█\x1b[0m");
    }

    #[test]
    fn render_blanks_control_chars() {
        let mut buf = ScreenBuffer::new(3, 1);
        buf.draw_string(0, 0, "a\nb", &Style::RESET);
        assert_eq!(buf.get(1, 0).unwrap().ch, '\n');
        assert_eq!(rendered(&buf), "\x1b[H\x1b[0ma b\x1b[0m");
    }
}

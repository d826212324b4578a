//! Window — a draggable, resizable, closable box of text.
//!
//! A `Window` is pure state plus two entry points: [`Window::update_mouse`]
//! turns the current mouse sample into drag/resize/close/scroll actions, and
//! [`Window::draw`] paints the window into a [`ScreenBuffer`]. It knows
//! nothing about other windows; z-order and focus belong to the
//! [`Desktop`](crate::desktop::Desktop).
//!
//! # Anatomy
//!
//! ```text
//!   x                    x+w-1
//! y ╔ * Title      [█]╗         title bar: drag zone up to x+w-7,
//!   ║ content        ^║█        close zone from x+w-6 to x+w-1
//!   ║ content        █║█        vertical bar when lines overflow
//!   ║ content        v║█
//!   ║<██░░░░░░░░░░░>  ║█        horizontal bar when columns overflow
//!   ╚═════════════════#█        resize zone: bottom-right 3×3
//!    ██████████████████         shadow, right and bottom
//! ```
//!
//! On a scrollbar an arrow steps one line or column, the bare track pages
//! by five, and the thumb can be dragged.
//!
//! Actions start on the *edge* of a left press (up → down) and end on
//! release, so holding the button while sweeping across another window's
//! title bar does not grab it.

use glyph_term::buffer::{ScreenBuffer, glyph};
use glyph_term::mouse::MouseState;
use glyph_term::style::Style;
use glyph_term::terminal::Size;
use glyph_term::text::{display_width, substring};

use crate::scrollbar::{Axis, PAGE, Part, Scrollbar, to_i32, to_usize};

/// Smallest width a resize can shrink a window to.
pub const MIN_WIDTH: i32 = 15;

/// Smallest height a resize can shrink a window to.
pub const MIN_HEIGHT: i32 = 6;

/// Width of the close-button hot zone at the right end of the title bar.
const CLOSE_ZONE: i32 = 6;

/// Side of the square resize hot zone in the bottom-right corner.
const RESIZE_ZONE: i32 = 3;

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// Border and title-bar styling for the window's current interaction state.
struct Chrome {
    border: Style,
    title_bg: Style,
    title_fg: Style,
    rounded: bool,
    heavy: bool,
}

impl Chrome {
    fn for_window(w: &Window) -> Self {
        if w.resizing {
            Self {
                border: Style::BRIGHT_MAGENTA,
                title_bg: Style::BG_MAGENTA,
                title_fg: Style::BRIGHT_WHITE,
                rounded: false,
                heavy: true,
            }
        } else if w.dragging {
            Self {
                border: Style::BRIGHT_YELLOW,
                title_bg: Style::BG_YELLOW,
                title_fg: Style::BLACK,
                rounded: false,
                heavy: true,
            }
        } else if w.active {
            Self {
                border: Style::BRIGHT_CYAN,
                title_bg: Style::BG_BRIGHT_CYAN,
                title_fg: Style::BLACK,
                rounded: true,
                heavy: false,
            }
        } else {
            Self {
                border: Style::CYAN,
                title_bg: Style::BG_CYAN,
                title_fg: Style::BLACK,
                rounded: false,
                heavy: false,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Window
// ---------------------------------------------------------------------------

/// A single window on the desktop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    title: String,

    active: bool,
    dragging: bool,
    resizing: bool,
    visible: bool,

    /// Pointer position relative to the window origin when a drag began.
    drag_offset: (i32, i32),
    /// Left-button state seen on the previous update, for edge detection.
    was_left_pressed: bool,

    move_count: u32,
    resize_count: u32,

    /// Axis and grab offset of a scrollbar thumb being dragged.
    thumb_drag: Option<(Axis, i32)>,

    content: Vec<String>,
    /// Widest content line, in grapheme units.
    content_width: usize,
    scroll_x: usize,
    scroll_y: usize,
}

impl Window {
    /// Create a visible, inactive window with no content.
    #[must_use]
    pub fn new(x: i32, y: i32, w: i32, h: i32, title: impl Into<String>) -> Self {
        Self {
            x,
            y,
            w,
            h,
            title: title.into(),
            active: false,
            dragging: false,
            resizing: false,
            visible: true,
            drag_offset: (0, 0),
            was_left_pressed: false,
            move_count: 0,
            resize_count: 0,
            thumb_drag: None,
            content: Vec::new(),
            content_width: 0,
            scroll_x: 0,
            scroll_y: 0,
        }
    }

    // -- Accessors ---------------------------------------------------------

    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    #[must_use]
    pub const fn width(&self) -> i32 {
        self.w
    }

    #[must_use]
    pub const fn height(&self) -> i32 {
        self.h
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Focus is decided by the desktop each tick.
    pub const fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.dragging
    }

    #[must_use]
    pub const fn is_resizing(&self) -> bool {
        self.resizing
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// How many times a drag has actually moved the window.
    #[must_use]
    pub const fn move_count(&self) -> u32 {
        self.move_count
    }

    /// How many times a resize has actually changed the size.
    #[must_use]
    pub const fn resize_count(&self) -> u32 {
        self.resize_count
    }

    /// Hide the window. Hidden windows neither draw nor react to the mouse.
    pub const fn close(&mut self) {
        self.visible = false;
        self.dragging = false;
        self.resizing = false;
        self.thumb_drag = None;
    }

    pub const fn show(&mut self) {
        self.visible = true;
    }

    // -- Hit testing -------------------------------------------------------

    /// One past the right edge.
    const fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    /// One past the bottom edge.
    const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    /// The draggable part of the title bar: from just inside the left corner
    /// up to the close-button zone.
    #[must_use]
    pub const fn title_contains(&self, mx: i32, my: i32) -> bool {
        my == self.y && mx > self.x && mx < self.right().saturating_sub(CLOSE_ZONE)
    }

    /// The right end of the title bar, deliberately wider than the drawn
    /// `[█]` so it is easy to hit.
    #[must_use]
    pub const fn close_button_contains(&self, mx: i32, my: i32) -> bool {
        my == self.y && mx >= self.right().saturating_sub(CLOSE_ZONE) && mx < self.right()
    }

    /// The 3×3 block in the bottom-right corner.
    #[must_use]
    pub const fn resize_handle_contains(&self, mx: i32, my: i32) -> bool {
        mx >= self.right().saturating_sub(RESIZE_ZONE)
            && mx < self.right()
            && my >= self.bottom().saturating_sub(RESIZE_ZONE)
            && my < self.bottom()
    }

    /// Anywhere inside the frame.
    #[must_use]
    pub const fn contains(&self, mx: i32, my: i32) -> bool {
        mx >= self.x && mx < self.right() && my >= self.y && my < self.bottom()
    }

    /// The scrollbar under `(mx, my)`, if any, and the part that was hit.
    fn scrollbar_hit(&self, mx: i32, my: i32) -> Option<(Axis, Part)> {
        [Axis::Vertical, Axis::Horizontal]
            .into_iter()
            .find_map(|axis| self.scrollbar(axis)?.hit(mx, my).map(|part| (axis, part)))
    }

    // -- Mouse -------------------------------------------------------------

    /// Apply one mouse sample. `term` bounds drags and resizes.
    ///
    /// On a press edge the first matching zone wins: close, scrollbars,
    /// resize handle, then the title bar. Release ends any drag, resize, or
    /// thumb drag. While the button stays down, a drag moves the window
    /// (clamped so its shadow stays on screen), a resize changes its size
    /// (clamped to the minimum and to the terminal edge), and a grabbed
    /// thumb scrolls the content. Only real moves and resizes are counted.
    pub fn update_mouse(&mut self, mouse: &MouseState, term: Size) {
        if !self.visible {
            return;
        }

        let mx = i32::from(mouse.x);
        let my = i32::from(mouse.y);
        let pressed = mouse.left_down;
        let term_w = i32::from(term.cols);
        let term_h = i32::from(term.rows);

        if pressed && !self.was_left_pressed {
            if self.close_button_contains(mx, my) {
                log::debug!("window {:?} closed", self.title);
                self.close();
            } else if let Some((axis, part)) = self.scrollbar_hit(mx, my) {
                self.active = true;
                self.press_scrollbar(axis, part);
            } else if self.resize_handle_contains(mx, my) {
                self.active = true;
                self.resizing = true;
            } else if self.title_contains(mx, my) {
                self.active = true;
                self.dragging = true;
                self.drag_offset = (mx.saturating_sub(self.x), my.saturating_sub(self.y));
            }
        } else if !pressed && self.was_left_pressed {
            self.dragging = false;
            self.resizing = false;
            self.thumb_drag = None;
        } else if pressed && self.dragging {
            let max_x = term_w.saturating_sub(self.w).saturating_sub(2);
            let max_y = term_h.saturating_sub(self.h).saturating_sub(2);
            let new_x = mx.saturating_sub(self.drag_offset.0).min(max_x).max(0);
            let new_y = my.saturating_sub(self.drag_offset.1).min(max_y).max(0);
            if (new_x, new_y) != (self.x, self.y) {
                self.x = new_x;
                self.y = new_y;
                self.move_count += 1;
            }
        } else if pressed && self.resizing {
            let new_w = mx.saturating_sub(self.x).saturating_add(1).max(MIN_WIDTH).min(term_w.saturating_sub(self.x));
            let new_h = my.saturating_sub(self.y).saturating_add(1).max(MIN_HEIGHT).min(term_h.saturating_sub(self.y));
            if (new_w, new_h) != (self.w, self.h) {
                self.w = new_w;
                self.h = new_h;
                self.resize_count += 1;
                self.clamp_scroll();
            }
        } else if pressed {
            self.drag_thumb(mx, my);
        }

        self.was_left_pressed = pressed;
    }

    /// Follow a grabbed thumb. No-op when no thumb is held.
    fn drag_thumb(&mut self, mx: i32, my: i32) {
        let Some((axis, grab)) = self.thumb_drag else {
            return;
        };
        if let Some(bar) = self.scrollbar(axis) {
            let offset = bar.offset_for_drag(mx, my, grab);
            self.set_scroll_offset(axis, offset);
        }
    }

    fn press_scrollbar(&mut self, axis: Axis, part: Part) {
        match (axis, part) {
            (_, Part::Thumb(grab)) => self.thumb_drag = Some((axis, grab)),
            (Axis::Vertical, Part::Back) => self.scroll_up(1),
            (Axis::Vertical, Part::Forward) => self.scroll_down(1),
            (Axis::Vertical, Part::PageBack) => self.scroll_up(PAGE),
            (Axis::Vertical, Part::PageForward) => self.scroll_down(PAGE),
            (Axis::Horizontal, Part::Back) => self.scroll_left(1),
            (Axis::Horizontal, Part::Forward) => self.scroll_right(1),
            (Axis::Horizontal, Part::PageBack) => self.scroll_left(PAGE),
            (Axis::Horizontal, Part::PageForward) => self.scroll_right(PAGE),
        }
    }

    // -- Content & scrolling -----------------------------------------------

    /// Replace the content lines and scroll back to the top-left.
    pub fn set_content<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.content = lines.into_iter().map(Into::into).collect();
        self.content_width = self.content.iter().map(|l| display_width(l)).max().unwrap_or(0);
        self.scroll_x = 0;
        self.scroll_y = 0;
    }

    /// Append one content line. The scroll position is kept.
    pub fn add_content_line(&mut self, line: impl Into<String>) {
        let line = line.into();
        self.content_width = self.content_width.max(display_width(&line));
        self.content.push(line);
    }

    /// Drop all content; the window falls back to its info text.
    pub fn clear_content(&mut self) {
        self.content.clear();
        self.content_width = 0;
        self.scroll_x = 0;
        self.scroll_y = 0;
    }

    #[must_use]
    pub fn content(&self) -> &[String] {
        &self.content
    }

    /// Current scroll offset as `(column, line)`.
    #[must_use]
    pub const fn scroll(&self) -> (usize, usize) {
        (self.scroll_x, self.scroll_y)
    }

    /// Whether a scrollbar thumb is being dragged.
    #[must_use]
    pub const fn is_scrolling(&self) -> bool {
        self.thumb_drag.is_some()
    }

    pub const fn scroll_up(&mut self, lines: usize) {
        self.scroll_y = self.scroll_y.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_y = self.scroll_y.saturating_add(lines).min(self.max_scroll_y());
    }

    pub const fn scroll_left(&mut self, cols: usize) {
        self.scroll_x = self.scroll_x.saturating_sub(cols);
    }

    pub fn scroll_right(&mut self, cols: usize) {
        self.scroll_x = self.scroll_x.saturating_add(cols).min(self.max_scroll_x());
    }

    fn set_scroll_offset(&mut self, axis: Axis, offset: usize) {
        match axis {
            Axis::Vertical => self.scroll_y = offset.min(self.max_scroll_y()),
            Axis::Horizontal => self.scroll_x = offset.min(self.max_scroll_x()),
        }
    }

    /// Which scrollbars are shown, as `(vertical, horizontal)`.
    ///
    /// Each bar takes a row or column from the content area, which can push
    /// the other axis into overflow too.
    fn scrollbars(&self) -> (bool, bool) {
        let rows = to_usize(self.h.saturating_sub(2));
        let cols = to_usize(self.w.saturating_sub(2));
        let lines = self.content.len();
        let width = self.content_width;

        let wide = width > cols;
        let vertical = lines > rows || (wide && lines > rows.saturating_sub(1));
        let horizontal = wide || (vertical && width > cols.saturating_sub(1));
        (vertical, horizontal)
    }

    /// Rows available for content inside the frame.
    fn area_height(&self) -> usize {
        let (_, horizontal) = self.scrollbars();
        to_usize(self.h.saturating_sub(2)).saturating_sub(usize::from(horizontal))
    }

    /// Columns available for content inside the frame.
    fn area_width(&self) -> usize {
        let (vertical, _) = self.scrollbars();
        to_usize(self.w.saturating_sub(2)).saturating_sub(usize::from(vertical))
    }

    fn max_scroll_y(&self) -> usize {
        self.content.len().saturating_sub(self.area_height())
    }

    fn max_scroll_x(&self) -> usize {
        self.content_width.saturating_sub(self.area_width())
    }

    /// Keep the scroll offset valid after the area grows.
    fn clamp_scroll(&mut self) {
        self.scroll_x = self.scroll_x.min(self.max_scroll_x());
        self.scroll_y = self.scroll_y.min(self.max_scroll_y());
    }

    /// The bar for `axis`, when it is shown and has room for both arrows
    /// and a track.
    fn scrollbar(&self, axis: Axis) -> Option<Scrollbar> {
        let (vertical, horizontal) = self.scrollbars();
        let bar = match axis {
            Axis::Vertical if vertical => Scrollbar {
                axis,
                start: self.y.saturating_add(1),
                across: self.right().saturating_sub(2),
                len: to_i32(self.area_height()),
                content: self.content.len(),
                view: self.area_height(),
                offset: self.scroll_y,
            },
            Axis::Horizontal if horizontal => Scrollbar {
                axis,
                start: self.x.saturating_add(1),
                across: self.bottom().saturating_sub(2),
                len: to_i32(self.area_width()),
                content: self.content_width,
                view: self.area_width(),
                offset: self.scroll_x,
            },
            _ => return None,
        };
        (bar.len >= 3).then_some(bar)
    }

    // -- Drawing -----------------------------------------------------------

    /// Paint the window. Hidden windows paint nothing. Every write is clipped
    /// by the buffer, so windows may hang off any edge.
    pub fn draw(&self, buf: &mut ScreenBuffer) {
        if !self.visible {
            return;
        }

        let chrome = Chrome::for_window(self);
        let content_style = Style::BLACK.join(&Style::BG_WHITE);
        let title_style = chrome.title_fg.join(&chrome.title_bg);
        let (x, y, w, h) = (self.x, self.y, self.w, self.h);
        let right = self.right();

        self.draw_shadow(buf);
        buf.draw_box(x, y, w, h, &chrome.border, chrome.rounded, chrome.heavy);

        // Title bar.
        buf.fill_rect(x.saturating_add(1), y, w.saturating_sub(2), 1, ' ', &chrome.title_bg);
        let marker = if self.resizing {
            glyph::RESIZE_HANDLE
        } else if self.dragging {
            glyph::TRIANGLE_RIGHT
        } else {
            glyph::DIAMOND
        };
        let label = format!(" {marker} {} ", self.title);
        let max_label = to_usize(w.saturating_sub(8));
        let label = if display_width(&label) > max_label {
            substring(&label, 0, max_label)
        } else {
            label.as_str()
        };
        buf.draw_string_clipped(x.saturating_add(2), y, label, &title_style, right.saturating_sub(4));

        buf.set_cell(right.saturating_sub(4), y, '[', &title_style);
        buf.set_cell(right.saturating_sub(3), y, glyph::FULL_BLOCK, &Style::BRIGHT_RED.join(&Style::BG_RED));
        buf.set_cell(right.saturating_sub(2), y, ']', &title_style);

        // Content area.
        buf.fill_rect(
            x.saturating_add(1),
            y.saturating_add(1),
            w.saturating_sub(2),
            h.saturating_sub(2),
            ' ',
            &content_style,
        );
        if self.content.is_empty() {
            self.draw_info(buf, &content_style);
        } else {
            self.draw_content(buf, &content_style);
        }

        if w > 6 && h > 3 {
            buf.set_cell(right.saturating_sub(1), self.bottom().saturating_sub(1), glyph::RESIZE_HANDLE, &chrome.border);
        }
    }

    /// Full blocks down the right side and along the bottom, offset by one.
    fn draw_shadow(&self, buf: &mut ScreenBuffer) {
        let shadow = Style::BLACK.join(&Style::BG_BLACK);
        buf.fill_rect(self.right(), self.y.saturating_add(1), 1, self.h, glyph::FULL_BLOCK, &shadow);
        buf.fill_rect(self.x.saturating_add(1), self.bottom(), self.w, 1, glyph::FULL_BLOCK, &shadow);
    }

    fn draw_content(&self, buf: &mut ScreenBuffer, style: &Style) {
        let area_w = self.area_width();
        let left = self.x.saturating_add(1);
        let right = left.saturating_add(to_i32(area_w));

        let visible = self.content.iter().skip(self.scroll_y).take(self.area_height());
        for (i, line) in visible.enumerate() {
            if self.scroll_x < display_width(line) {
                let row = self.y.saturating_add(1).saturating_add(to_i32(i));
                let part = substring(line, self.scroll_x, area_w);
                buf.draw_string_clipped(left, row, part, style, right);
            }
        }

        for axis in [Axis::Vertical, Axis::Horizontal] {
            if let Some(bar) = self.scrollbar(axis) {
                bar.draw(buf);
            }
        }
    }

    /// Fallback text for windows without content: title, size, counters,
    /// and interaction status, as far as the height allows.
    fn draw_info(&self, buf: &mut ScreenBuffer, style: &Style) {
        let (x, y, w, h) = (self.x, self.y, self.w, self.h);
        let clip = self.right().saturating_sub(2);
        let left = x.saturating_add(2);
        let line = |n: i32| y.saturating_add(n);

        let heading = format!("{} {}", glyph::BULLET, self.title);
        buf.draw_string_clipped(left, line(2), &heading, &Style::BRIGHT_BLUE.join(&Style::BG_WHITE), clip);

        let size = format!("{} Size: {w}x{h}", glyph::ARROW_RIGHT);
        buf.draw_string_clipped(left, line(3), &size, style, clip);

        if h > 5 {
            let moves = format!("{} Moves: {}", glyph::TRIANGLE_UP, self.move_count);
            buf.draw_string_clipped(left, line(4), &moves, style, clip);
        }
        if h > 6 {
            let resizes = format!("{} Resizes: {}", glyph::TRIANGLE_DOWN, self.resize_count);
            buf.draw_string_clipped(left, line(5), &resizes, style, clip);
        }
        if h > 7 {
            let status = if self.resizing {
                format!("{} RESIZING", glyph::TRIANGLE_UP)
            } else if self.dragging {
                format!("{} DRAGGING", glyph::TRIANGLE_RIGHT)
            } else if self.active {
                format!("{} ACTIVE", glyph::CHECK)
            } else {
                format!("{} Inactive", glyph::CIRCLE)
            };
            let row = self.bottom().saturating_sub(3);
            buf.draw_string_clipped(left, row, &status, &Style::BRIGHT_WHITE.join(&Style::BG_BLUE), clip);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Desktop — z-ordered windows over a dotted background.
//!
//! The desktop owns the window stack (last is topmost) and implements
//! [`App`], so it can be handed straight to
//! [`Session::run`](glyph_term::session::Session::run).
//!
//! Each tick:
//!
//! 1. Every window loses focus.
//! 2. Visible windows see the mouse from the top of the stack down. The
//!    first one that is dragging, resizing, or holding a scrollbar thumb
//!    takes focus, is raised to the top, and stops the walk so windows underneath never see the gesture.
//! 3. Paint: dotted background, windows bottom to top, the pointer marker,
//!    and the status bar on the last row.

use glyph_term::buffer::{ScreenBuffer, glyph};
use glyph_term::mouse::MouseState;
use glyph_term::session::App;
use glyph_term::style::Style;
use glyph_term::terminal::Size;

use crate::window::Window;

/// Background dots fall on every cell where `(x + y) % DOT_SPACING == 0`.
const DOT_SPACING: i32 = 20;

/// A stack of windows plus the chrome around them.
#[derive(Debug, Clone, Default)]
pub struct Desktop {
    windows: Vec<Window>,
    mouse: MouseState,
    size: Size,
    status: String,
    pointer_style: Style,
}

impl Desktop {
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: default_status(),
            pointer_style: Style::RED,
            ..Self::default()
        }
    }

    /// Push a window on top of the stack.
    pub fn add_window(&mut self, window: Window) {
        self.windows.push(window);
    }

    /// Remove and return the window at stack position `index`.
    pub fn remove_window(&mut self, index: usize) -> Option<Window> {
        (index < self.windows.len()).then(|| self.windows.remove(index))
    }

    /// Windows bottom to top.
    #[must_use]
    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    #[must_use]
    pub fn windows_mut(&mut self) -> &mut [Window] {
        &mut self.windows
    }

    /// The topmost window, visible or not.
    #[must_use]
    pub fn topmost(&self) -> Option<&Window> {
        self.windows.last()
    }

    /// Replace the status bar text.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Style of the pointer marker. Default: red.
    pub fn set_pointer_style(&mut self, style: Style) {
        self.pointer_style = style;
    }

    /// Route one mouse sample through the window stack.
    pub fn update(&mut self, mouse: &MouseState, size: Size) {
        self.mouse = *mouse;
        self.size = size;

        for window in &mut self.windows {
            window.set_active(false);
        }

        for i in (0..self.windows.len()).rev() {
            let window = &mut self.windows[i];
            if !window.is_visible() {
                continue;
            }
            window.update_mouse(mouse, size);
            if window.is_dragging() || window.is_resizing() || window.is_scrolling() {
                window.set_active(true);
                if i + 1 != self.windows.len() {
                    let raised = self.windows.remove(i);
                    log::debug!("raised window {:?}", raised.title());
                    self.windows.push(raised);
                }
                break;
            }
        }
    }

    /// Paint the whole desktop into `buf`.
    pub fn paint(&self, buf: &mut ScreenBuffer) {
        Self::draw_background(buf);

        for window in &self.windows {
            window.draw(buf);
        }

        buf.set_cell(
            i32::from(self.mouse.x),
            i32::from(self.mouse.y),
            glyph::DIAMOND,
            &self.pointer_style,
        );

        self.draw_status_bar(buf);
    }

    fn draw_background(buf: &mut ScreenBuffer) {
        for y in 0..i32::from(buf.height()) {
            for x in 0..i32::from(buf.width()) {
                if (x + y) % DOT_SPACING == 0 {
                    buf.set_cell(x, y, '.', &Style::CYAN);
                }
            }
        }
    }

    fn draw_status_bar(&self, buf: &mut ScreenBuffer) {
        let Some(row) = buf.height().checked_sub(1) else {
            return;
        };
        let row = i32::from(row);
        let style = Style::BLACK.join(&Style::BG_BRIGHT_CYAN);
        buf.fill_rect(0, row, i32::from(buf.width()), 1, ' ', &style);
        buf.draw_string(0, row, &self.status, &style);
    }
}

impl App for Desktop {
    fn update(&mut self, mouse: &MouseState, size: Size) {
        Self::update(self, mouse, size);
    }

    fn paint(&mut self, buf: &mut ScreenBuffer) {
        Self::paint(self, buf);
    }
}

fn default_status() -> String {
    let b = glyph::BULLET;
    format!(
        " glyphdesk {b} DRAG: Title {b} RESIZE: {} {b} CLOSE: [{}] {b} Q: Quit ",
        glyph::RESIZE_HANDLE,
        glyph::FULL_BLOCK
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

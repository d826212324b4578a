// SPDX-License-Identifier: MIT
//
// Session — the frame loop that wires terminal, decoder, and buffer together.
//
// # The Tick
//
// Single-threaded and poll-driven. Every tick (16 ms by default):
//
//   1. One non-blocking read through the mouse decoder. A quit key ends the
//      session.
//   2. Check the SIGINT/SIGTERM flag. A pending signal ends the session.
//   3. Re-query the terminal size. On change, reallocate the screen buffer
//      and hand the new bounds to the decoder.
//   4. Let the application react to the mouse sample.
//   5. Clear, paint, and render the whole frame in one write.
//   6. Sleep for the rest of the tick.
//
// There is no dirty tracking: every tick paints and renders a full frame.
//
// Every exit from `run` (quit, signal, error) goes through
// `Terminal::leave`, which shares the once-only teardown with `Drop` and
// the panic hook.

use std::io::{self, Read, Write};
use std::time::{Duration, Instant};

use crate::buffer::ScreenBuffer;
use crate::error::Result;
use crate::mouse::{MouseDecoder, MouseState, Status};
use crate::output::OutputBuffer;
use crate::reader::StdinSource;
use crate::terminal::{self, Size, Terminal};

// ─── App Trait ───────────────────────────────────────────────────────────────

/// Application interface for the session.
///
/// Each tick the session calls [`update`](App::update) with the latest mouse
/// sample and terminal size, then [`paint`](App::paint) with a freshly
/// cleared buffer of exactly that size.
pub trait App {
    /// React to the current mouse sample. `size` is the live terminal size.
    fn update(&mut self, mouse: &MouseState, size: Size);

    /// Paint the whole frame. The buffer has been cleared before this call.
    fn paint(&mut self, buf: &mut ScreenBuffer);
}

/// Why [`Session::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The user pressed `q` or `Q`.
    Quit,
    /// SIGINT or SIGTERM arrived.
    Signal,
}

// ─── Config ──────────────────────────────────────────────────────────────────

/// Frame loop timing and fallback geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Target time per frame. Default: 16 ms (~60 Hz).
    pub frame_interval: Duration,
    /// Size used when the terminal cannot be queried. Default: 80×24.
    pub fallback_size: Size,
}

impl SessionConfig {
    /// Slowest accepted frame rate.
    pub const MIN_FPS: u32 = 1;
    /// Fastest accepted frame rate.
    pub const MAX_FPS: u32 = 240;

    /// Default configuration with the frame interval derived from `fps`,
    /// clamped to [`MIN_FPS`](Self::MIN_FPS)..=[`MAX_FPS`](Self::MAX_FPS).
    #[must_use]
    pub fn with_fps(fps: u32) -> Self {
        let fps = fps.clamp(Self::MIN_FPS, Self::MAX_FPS);
        Self {
            frame_interval: Duration::from_secs(1) / fps,
            ..Self::default()
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(16),
            fallback_size: Size::FALLBACK,
        }
    }
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// Owns the terminal, the mouse decoder, and the screen buffer.
///
/// # Example
///
/// ```no_run
/// use glyph_term::buffer::ScreenBuffer;
/// use glyph_term::mouse::MouseState;
/// use glyph_term::session::{App, Session, SessionConfig};
/// use glyph_term::style::Style;
/// use glyph_term::terminal::Size;
///
/// struct Pointer(MouseState);
///
/// impl App for Pointer {
///     fn update(&mut self, mouse: &MouseState, _size: Size) {
///         self.0 = *mouse;
///     }
///
///     fn paint(&mut self, buf: &mut ScreenBuffer) {
///         buf.set_cell(i32::from(self.0.x), i32::from(self.0.y), '*', &Style::BRIGHT_YELLOW);
///     }
/// }
///
/// let mut session = Session::new(SessionConfig::default());
/// session.run(&mut Pointer(MouseState::default()))?;
/// # Ok::<(), glyph_term::Error>(())
/// ```
#[derive(Debug)]
pub struct Session {
    terminal: Terminal,
    mouse: MouseDecoder,
    buffer: ScreenBuffer,
    out: OutputBuffer,
    config: SessionConfig,
}

impl Session {
    /// Create a session sized to the current terminal. Does not touch
    /// terminal modes until [`run`](Self::run).
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let terminal = Terminal::new(config.fallback_size);
        let size = terminal.size();
        Self {
            terminal,
            mouse: MouseDecoder::new(size),
            buffer: ScreenBuffer::new(size.cols, size.rows),
            out: OutputBuffer::with_cells(size.area() as usize),
            config,
        }
    }

    /// The active configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Size of the current screen buffer.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.buffer.width(), self.buffer.height())
    }

    /// The most recent mouse sample.
    #[inline]
    #[must_use]
    pub const fn mouse(&self) -> &MouseState {
        self.mouse.state()
    }

    /// Enter the terminal, run the frame loop until quit or signal, and
    /// restore the terminal on every exit path.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode cannot be entered, a frame cannot be
    /// written, or the terminal cannot be restored. When both the loop and
    /// the restore fail, the loop's error is returned and the restore error
    /// is logged.
    pub fn run(&mut self, app: &mut impl App) -> Result<Exit> {
        terminal::clear_shutdown_request();
        self.terminal.enter()?;

        let result = self.run_inner(app);
        let restored = self.terminal.leave();

        match (result, restored) {
            (Ok(exit), Ok(())) => {
                log::debug!("session ended: {exit:?}");
                Ok(exit)
            }
            (Ok(_), Err(err)) => Err(err),
            (Err(err), restored) => {
                if let Err(restore_err) = restored {
                    log::warn!("failed to restore terminal after error: {restore_err}");
                }
                Err(err)
            }
        }
    }

    fn run_inner(&mut self, app: &mut impl App) -> Result<Exit> {
        let mut input = StdinSource::new();
        let stdout = io::stdout();

        loop {
            let started = Instant::now();
            let size = self.terminal.refresh_size();

            if let Some(exit) = self.tick(app, &mut input, &mut stdout.lock(), size)? {
                return Ok(exit);
            }

            if let Some(rest) = self.config.frame_interval.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }

    /// Run one frame against `input` and `out` at terminal size `size`.
    ///
    /// Returns `Some(exit)` if the session should end; in that case nothing
    /// is painted or written.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the frame to `out` fails.
    pub fn tick(
        &mut self,
        app: &mut impl App,
        input: &mut impl Read,
        out: &mut impl Write,
        size: Size,
    ) -> Result<Option<Exit>> {
        if self.mouse.update(input) == Status::Quit {
            return Ok(Some(Exit::Quit));
        }

        if terminal::shutdown_requested() {
            log::debug!("shutdown requested by signal");
            return Ok(Some(Exit::Signal));
        }

        if size != self.size() {
            log::debug!("reallocating screen buffer {} -> {size}", self.size());
            self.buffer = ScreenBuffer::new(size.cols, size.rows);
            self.mouse.set_bounds(size);
        }

        app.update(self.mouse.state(), size);

        self.buffer.clear();
        app.paint(&mut self.buffer);

        self.out.clear();
        self.buffer.render_into(&mut self.out);
        self.out.flush_to(out)?;

        Ok(None)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Style;
    use pretty_assertions::assert_eq;
    use serial_test::serial;

    /// Records what the session hands it and paints the pointer.
    #[derive(Default)]
    struct Probe {
        updates: Vec<(MouseState, Size)>,
        paints: usize,
        painted_size: Option<Size>,
    }

    impl App for Probe {
        fn update(&mut self, mouse: &MouseState, size: Size) {
            self.updates.push((*mouse, size));
        }

        fn paint(&mut self, buf: &mut ScreenBuffer) {
            self.paints += 1;
            self.painted_size = Some(Size::new(buf.width(), buf.height()));
            if let Some(&(m, _)) = self.updates.last() {
                buf.set_cell(i32::from(m.x), i32::from(m.y), '*', &Style::YELLOW);
            }
        }
    }

    fn session(size: Size) -> Session {
        let mut s = Session::new(SessionConfig::default());
        s.buffer = ScreenBuffer::new(size.cols, size.rows);
        s.mouse = MouseDecoder::new(size);
        s
    }

    // ── Config ──────────────────────────────────────────────────────────

    #[test]
    fn default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.frame_interval, Duration::from_millis(16));
        assert_eq!(config.fallback_size, Size::new(80, 24));
    }

    #[test]
    fn config_from_fps() {
        assert_eq!(SessionConfig::with_fps(50).frame_interval, Duration::from_millis(20));
        assert_eq!(SessionConfig::with_fps(0).frame_interval, Duration::from_secs(1));
        assert_eq!(
            SessionConfig::with_fps(10_000).frame_interval,
            Duration::from_secs(1) / SessionConfig::MAX_FPS
        );
    }

    // ── Tick ────────────────────────────────────────────────────────────

    #[test]
    #[serial]
    fn tick_decodes_paints_and_renders() {
        let size = Size::new(4, 2);
        let mut s = session(size);
        let mut app = Probe::default();
        let mut input: &[u8] = b"\x1b[<0;2;2M";
        let mut out = Vec::new();

        assert_eq!(s.tick(&mut app, &mut input, &mut out, size).unwrap(), None);
        assert_eq!(app.updates, vec![(MouseState { x: 1, y: 1, left_down: true }, size)]);
        assert_eq!(app.paints, 1);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\x1b[H\x1b[0m    \r\n \x1b[33m*\x1b[0m  \x1b[0m"
        );
    }

    #[test]
    #[serial]
    fn tick_quits_without_painting() {
        let size = Size::new(4, 2);
        let mut s = session(size);
        let mut app = Probe::default();
        let mut input: &[u8] = b"\x1b[<0;2;2Mq";
        let mut out = Vec::new();

        assert_eq!(s.tick(&mut app, &mut input, &mut out, size).unwrap(), Some(Exit::Quit));
        assert_eq!(app.paints, 0);
        assert!(out.is_empty());
        assert!(s.mouse().left_down);
    }

    #[test]
    #[serial]
    fn tick_reallocates_on_resize() {
        let mut s = session(Size::new(4, 2));
        let mut app = Probe::default();
        let mut out = Vec::new();
        let bigger = Size::new(10, 6);

        let mut input: &[u8] = b"";
        s.tick(&mut app, &mut input, &mut out, bigger).unwrap();
        assert_eq!(s.size(), bigger);
        assert_eq!(app.painted_size, Some(bigger));

        // A report that was out of range before the resize is now accepted.
        let mut input: &[u8] = b"\x1b[<0;9;5M";
        s.tick(&mut app, &mut input, &mut out, bigger).unwrap();
        assert_eq!(*s.mouse(), MouseState { x: 8, y: 4, left_down: true });
    }

    #[test]
    #[serial]
    fn tick_renders_every_frame_even_when_idle() {
        let size = Size::new(2, 1);
        let mut s = session(size);
        let mut app = Probe::default();
        for _ in 0..3 {
            let mut out = Vec::new();
            let mut input: &[u8] = b"";
            s.tick(&mut app, &mut input, &mut out, size).unwrap();
            assert!(!out.is_empty());
        }
        assert_eq!(app.paints, 3);
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    #[allow(unsafe_code)]
    fn tick_exits_on_signal_without_painting() {
        let size = Size::new(4, 2);
        let mut s = session(size);
        let mut app = Probe::default();
        let mut out = Vec::new();

        terminal::install_signal_handlers();
        terminal::clear_shutdown_request();
        assert_eq!(unsafe { libc::raise(libc::SIGINT) }, 0);

        let mut input: &[u8] = b"\x1b[<0;2;2M";
        let exit = s.tick(&mut app, &mut input, &mut out, size).unwrap();
        terminal::clear_shutdown_request();

        assert_eq!(exit, Some(Exit::Signal));
        assert_eq!(app.paints, 0);
        assert!(app.updates.is_empty());
        assert!(out.is_empty());
        // The sample read in the same tick is still recorded.
        assert!(s.mouse().left_down);
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    #[allow(unsafe_code)]
    fn quit_key_wins_over_pending_signal() {
        let size = Size::new(4, 2);
        let mut s = session(size);
        let mut app = Probe::default();
        let mut out = Vec::new();

        terminal::install_signal_handlers();
        assert_eq!(unsafe { libc::raise(libc::SIGTERM) }, 0);

        let mut input: &[u8] = b"q";
        let exit = s.tick(&mut app, &mut input, &mut out, size).unwrap();
        terminal::clear_shutdown_request();

        assert_eq!(exit, Some(Exit::Quit));
        assert!(out.is_empty());
    }
}

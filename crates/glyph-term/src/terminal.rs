// SPDX-License-Identifier: MIT
//
// Terminal control — raw mode, signal-driven shutdown, and exactly-once
// restoration.
//
// Safety: This module necessarily uses `unsafe` for termios (tcgetattr,
// tcsetattr), ioctl (TIOCGWINSZ), sigaction, and raw fd writes.
// These are the standard POSIX interfaces for terminal control. Each
// unsafe block is minimal.
#![allow(unsafe_code)]
//
// Every way out of a session funnels into one routine, `teardown()`: the
// quit key, SIGINT/SIGTERM, a normal or error return from the frame loop,
// `Drop` on the `Terminal` handle, and the panic hook. A process-wide
// `INITIALIZED` flag is swapped to false on the first call, so the restore
// sequence and the termios reset happen once no matter how many of those
// paths fire.
//
// Signal handlers only store to an atomic. The frame loop notices the flag
// within one tick and runs the normal teardown from ordinary code, so no
// non-async-signal-safe work ever happens inside a handler.
//
// The restore sequence is written straight to fd 1, bypassing Rust's
// stdout lock. That keeps the panic hook from deadlocking when the panic
// happened mid-flush, and lets the hook share `teardown()` with everyone
// else.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, Once};

use crate::ansi;
use crate::error::{Error, Result};

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    /// Number of columns (width in character cells).
    pub cols: u16,
    /// Number of rows (height in character cells).
    pub rows: u16,
}

impl Size {
    /// Size assumed when the terminal cannot be queried.
    pub const FALLBACK: Self = Self { cols: 80, rows: 24 };

    #[inline]
    #[must_use]
    pub const fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    /// Total number of cells (`cols × rows`).
    #[inline]
    #[must_use]
    pub const fn area(self) -> u32 {
        self.cols as u32 * self.rows as u32
    }

    /// Whether the signed point `(x, y)` lies inside `[0, cols) × [0, rows)`.
    #[inline]
    #[must_use]
    pub fn contains(self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < i32::from(self.cols) && y < i32::from(self.rows)
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::FALLBACK
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.cols, self.rows)
    }
}

// ─── Terminal Queries ───────────────────────────────────────────────────────

/// Query the current terminal size via `ioctl(TIOCGWINSZ)` on stdout.
///
/// Returns `None` if stdout is not a terminal or the query fails.
#[cfg(unix)]
#[must_use]
pub fn get_size() -> Option<Size> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &raw mut ws) };

    if result == 0 && ws.ws_col > 0 && ws.ws_row > 0 {
        Some(Size::new(ws.ws_col, ws.ws_row))
    } else {
        None
    }
}

#[cfg(not(unix))]
#[must_use]
pub fn get_size() -> Option<Size> {
    None
}

// ─── Escape Sequences ───────────────────────────────────────────────────────

/// Entry sequence: clear, home, hide the cursor, then enable click
/// reporting, SGR coordinates, and any-motion tracking.
///
/// # Errors
///
/// Propagates write errors from `w`.
pub fn write_setup(w: &mut impl Write) -> io::Result<()> {
    ansi::clear_screen(w)?;
    ansi::cursor_home(w)?;
    ansi::cursor_hide(w)?;
    ansi::enable_mouse(w)
}

/// Exit sequence: disable the mouse modes in reverse order, show the
/// cursor, clear, home, and reset attributes.
///
/// # Errors
///
/// Propagates write errors from `w`.
pub fn write_restore(w: &mut impl Write) -> io::Result<()> {
    ansi::disable_mouse(w)?;
    ansi::cursor_show(w)?;
    ansi::clear_screen(w)?;
    ansi::cursor_home(w)?;
    ansi::reset(w)
}

// ─── Process-wide State ─────────────────────────────────────────────────────

/// Original termios, saved on entry. Behind a [`Mutex`], not `static mut`,
/// so the panic hook can reach it without the [`Terminal`] handle.
#[cfg(unix)]
static TERMIOS_BACKUP: Mutex<Option<libc::termios>> = Mutex::new(None);

/// True between a successful [`Terminal::enter`] and the first teardown.
static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Set by the SIGINT/SIGTERM handler. Checked by the frame loop each tick.
static SHUTDOWN_REQUESTED: AtomicBool = AtomicBool::new(false);

static PANIC_HOOK_INSTALLED: Once = Once::new();
static SIGNAL_HANDLERS_INSTALLED: Once = Once::new();

/// Whether a session currently owns the terminal.
#[inline]
#[must_use]
pub fn is_initialized() -> bool {
    INITIALIZED.load(Ordering::Acquire)
}

/// Whether SIGINT or SIGTERM has arrived since the last
/// [`clear_shutdown_request`].
#[inline]
#[must_use]
pub fn shutdown_requested() -> bool {
    SHUTDOWN_REQUESTED.load(Ordering::Relaxed)
}

/// Forget a pending shutdown request.
pub fn clear_shutdown_request() {
    SHUTDOWN_REQUESTED.store(false, Ordering::Relaxed);
}

// ─── Signals ────────────────────────────────────────────────────────────────

/// Route SIGINT and SIGTERM to [`SHUTDOWN_REQUESTED`].
///
/// Raw mode leaves `ISIG` on, so Ctrl-C still arrives as SIGINT and lands
/// here instead of killing the process with the terminal in raw mode.
#[cfg(unix)]
pub(crate) fn install_signal_handlers() {
    SIGNAL_HANDLERS_INSTALLED.call_once(|| unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_sigaction = shutdown_handler as *const () as usize;
        sa.sa_flags = libc::SA_RESTART;
        libc::sigemptyset(&raw mut sa.sa_mask);
        libc::sigaction(libc::SIGINT, &raw const sa, std::ptr::null_mut());
        libc::sigaction(libc::SIGTERM, &raw const sa, std::ptr::null_mut());
    });
}

#[cfg(unix)]
extern "C" fn shutdown_handler(_sig: libc::c_int) {
    SHUTDOWN_REQUESTED.store(true, Ordering::Relaxed);
}

#[cfg(not(unix))]
pub(crate) fn install_signal_handlers() {
    SIGNAL_HANDLERS_INSTALLED.call_once(|| {});
}

// ─── Panic Hook ─────────────────────────────────────────────────────────────

/// Restore the terminal before the default hook prints the panic message,
/// so the message lands on a cooked, visible-cursor terminal.
fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = teardown();
            original(info);
        }));
    });
}

// ─── Teardown ───────────────────────────────────────────────────────────────

/// Restore the terminal: write the exit sequence, then reinstate the saved
/// termios.
///
/// Runs at most once per [`Terminal::enter`]. Every call after the first
/// (or before any entry) is a no-op returning `Ok(())`. The termios reset
/// is attempted even if the write fails.
///
/// # Errors
///
/// Returns [`Error::Io`] if the restore sequence could not be written, or
/// [`Error::SetAttributes`] if the original termios could not be reapplied.
pub fn teardown() -> Result<()> {
    teardown_to(write_raw)
}

/// [`teardown`] with the restore sequence handed to `write`.
fn teardown_to(write: impl FnOnce(&[u8]) -> io::Result<()>) -> Result<()> {
    if !INITIALIZED.swap(false, Ordering::AcqRel) {
        return Ok(());
    }

    let mut seq = Vec::with_capacity(64);
    let _ = write_restore(&mut seq);
    let written = write(&seq);
    let restored = restore_termios();
    written?;
    restored?;

    log::debug!("terminal restored");
    Ok(())
}

/// Write all of `bytes` to fd 1 without taking the stdout lock.
#[cfg(unix)]
fn write_raw(mut bytes: &[u8]) -> io::Result<()> {
    while !bytes.is_empty() {
        let n = unsafe {
            libc::write(libc::STDOUT_FILENO, bytes.as_ptr().cast::<libc::c_void>(), bytes.len())
        };
        if n < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                continue;
            }
            return Err(err);
        }
        if n == 0 {
            return Err(io::ErrorKind::WriteZero.into());
        }
        #[allow(clippy::cast_sign_loss)] // n > 0 checked above.
        let n = n as usize;
        bytes = &bytes[n..];
    }
    Ok(())
}

#[cfg(not(unix))]
fn write_raw(bytes: &[u8]) -> io::Result<()> {
    let mut out = io::stdout();
    out.write_all(bytes)?;
    out.flush()
}

/// Reapply the termios saved by [`enable_raw_mode`] and clear the backup.
#[cfg(unix)]
fn restore_termios() -> Result<()> {
    let Ok(mut guard) = TERMIOS_BACKUP.lock() else {
        return Ok(());
    };
    if let Some(original) = guard.take() {
        let rc = unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, &raw const original) };
        if rc != 0 {
            return Err(Error::SetAttributes(io::Error::last_os_error()));
        }
    }
    Ok(())
}

#[cfg(not(unix))]
fn restore_termios() -> Result<()> {
    Ok(())
}

// ─── Raw Mode ───────────────────────────────────────────────────────────────

/// Save the current termios and switch stdin to non-canonical, no-echo mode
/// with `VMIN = 0`, `VTIME = 0` so reads never block.
///
/// Signals (`ISIG`) and output processing are left alone: `\r\n` is still
/// written explicitly between rows and Ctrl-C must still raise SIGINT.
#[cfg(unix)]
fn enable_raw_mode() -> Result<()> {
    let mut termios: libc::termios = unsafe { std::mem::zeroed() };
    if unsafe { libc::tcgetattr(libc::STDIN_FILENO, &raw mut termios) } != 0 {
        return Err(Error::GetAttributes(io::Error::last_os_error()));
    }

    if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
        *guard = Some(termios);
    }

    termios.c_lflag &= !(libc::ECHO | libc::ICANON);
    termios.c_cc[libc::VMIN] = 0;
    termios.c_cc[libc::VTIME] = 0;

    if unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, &raw const termios) } != 0 {
        let err = io::Error::last_os_error();
        if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
            *guard = None;
        }
        return Err(Error::SetAttributes(err));
    }

    Ok(())
}

#[cfg(not(unix))]
fn enable_raw_mode() -> Result<()> {
    Ok(())
}

// ─── Terminal ───────────────────────────────────────────────────────────────

/// Terminal handle owning the session lifecycle.
///
/// [`enter`](Self::enter) puts the terminal in raw mode and writes the
/// entry sequence; [`leave`](Self::leave), `Drop`, a signal-driven shutdown, or a
/// panic all restore it through the same [`teardown`].
///
/// # Example
///
/// ```no_run
/// use glyph_term::terminal::{Size, Terminal};
///
/// let mut term = Terminal::new(Size::FALLBACK);
/// term.enter()?;
/// // ... render frames ...
/// term.leave()?;
/// # Ok::<(), glyph_term::Error>(())
/// ```
#[derive(Debug)]
pub struct Terminal {
    /// Last known size (refresh with [`refresh_size`](Self::refresh_size)).
    size: Size,
}

impl Terminal {
    /// Create a handle and query the current size, using `fallback` when the
    /// size cannot be determined (tests, pipes).
    ///
    /// Does **not** touch terminal modes: call [`enter`](Self::enter) for that.
    #[must_use]
    pub fn new(fallback: Size) -> Self {
        Self {
            size: get_size().unwrap_or(fallback),
        }
    }

    /// Cached terminal size.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Re-query the size from the OS. Keeps the cached value if the query
    /// fails, so a transient error doesn't collapse the layout.
    pub fn refresh_size(&mut self) -> Size {
        if let Some(s) = get_size() {
            if s != self.size {
                log::debug!("terminal resized {} -> {s}", self.size);
            }
            self.size = s;
        }
        self.size
    }

    /// Whether this process currently has the terminal in session mode.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        is_initialized()
    }

    /// Enter session mode: raw mode, the [`write_setup`] sequence, SIGINT/SIGTERM
    /// handlers, and the restoring panic hook.
    ///
    /// Idempotent: calling `enter()` while already active is a no-op.
    ///
    /// # Errors
    ///
    /// [`Error::GetAttributes`] / [`Error::SetAttributes`] if raw mode cannot
    /// be enabled (for example when stdin is not a terminal), or
    /// [`Error::Io`] if the setup sequence cannot be written. The terminal
    /// is restored before an I/O error is returned.
    pub fn enter(&mut self) -> Result<()> {
        if is_initialized() {
            return Ok(());
        }

        install_panic_hook();
        enable_raw_mode()?;
        INITIALIZED.store(true, Ordering::Release);
        install_signal_handlers();

        let written = {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_setup(&mut lock).and_then(|()| lock.flush())
        };
        if let Err(err) = written {
            let _ = teardown();
            return Err(err.into());
        }

        log::debug!("entered raw mode at {}", self.size);
        Ok(())
    }

    /// Leave session mode. Flushes anything still buffered in stdout, then
    /// runs [`teardown`]. No-op if already restored.
    ///
    /// # Errors
    ///
    /// Propagates [`teardown`] errors.
    pub fn leave(&mut self) -> Result<()> {
        if !is_initialized() {
            return Ok(());
        }
        let _ = io::stdout().flush();
        teardown()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if let Err(err) = self.leave() {
            log::warn!("failed to restore terminal: {err}");
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

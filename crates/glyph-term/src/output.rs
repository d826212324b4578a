// SPDX-License-Identifier: MIT
//
// Output buffering and style-run compression.
//
// Two components work together so a frame costs exactly one write:
//
//   OutputBuffer: accumulates all bytes of a frame in memory so the whole
//   grid can be written with a single write() + flush.
//
//   StyleWriter: remembers the style token it emitted last and skips the
//   escape bytes when the next cell carries an equal token. A row of forty
//   cells in one style costs one escape sequence, not forty.

use std::io::{self, Write};

use crate::cell::Cell;
use crate::style::Style;

// ─── OutputBuffer ────────────────────────────────────────────────────────────

/// A byte buffer that accumulates a frame for a single `write()` call.
///
/// Default capacity: 16 KB, enough for an 80×24 frame with heavy styling
/// without reallocation.
#[derive(Debug)]
pub struct OutputBuffer {
    buf: Vec<u8>,
}

const DEFAULT_CAPACITY: usize = 16_384;

impl OutputBuffer {
    /// Create an empty buffer with default capacity (16 KB).
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(DEFAULT_CAPACITY),
        }
    }

    /// Create an empty buffer sized for a `cells`-cell frame.
    #[must_use]
    pub fn with_cells(cells: usize) -> Self {
        Self {
            buf: Vec::with_capacity(DEFAULT_CAPACITY.max(cells * 4)),
        }
    }

    /// Number of bytes accumulated.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the buffer is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The accumulated bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Append a grapheme unit as UTF-8.
    ///
    /// Control characters are written as a space:
    /// a stray `\n` or `\x1b` stored in a cell must not move the cursor or
    /// open an escape sequence mid-frame.
    #[inline]
    pub fn write_glyph(&mut self, ch: char) {
        let ch = if ch.is_control() { ' ' } else { ch };
        let mut enc = [0u8; 4];
        self.buf.extend_from_slice(ch.encode_utf8(&mut enc).as_bytes());
    }

    /// Clear the buffer for reuse (keeps allocated capacity).
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Write accumulated output to stdout in one write, then clear.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn flush_stdout(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        self.flush_to(&mut stdout)
    }

    /// Write accumulated output to an arbitrary writer and clear the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        if !self.buf.is_empty() {
            w.write_all(&self.buf)?;
            w.flush()?;
            self.buf.clear();
        }
        Ok(())
    }
}

impl Write for OutputBuffer {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // Real flushing happens in flush_stdout() / flush_to().
        Ok(())
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── StyleWriter ─────────────────────────────────────────────────────────────

/// Stateful cell emitter that skips repeated style tokens.
///
/// The first cell after construction (or [`reset_state`](Self::reset_state))
/// always emits its style, because nothing is known about what the terminal
/// currently has in effect.
#[derive(Debug)]
pub struct StyleWriter {
    last_style: Option<Style>,
}

impl StyleWriter {
    /// Create a writer with no tracked style.
    #[must_use]
    pub const fn new() -> Self {
        Self { last_style: None }
    }

    /// Forget the tracked style. Call after anything that resets the terminal.
    pub fn reset_state(&mut self) {
        self.last_style = None;
    }

    /// The style most recently emitted, if any.
    #[must_use]
    pub const fn last_style(&self) -> Option<&Style> {
        self.last_style.as_ref()
    }

    /// Emit `cell`: its style token only if it differs from the last one,
    /// then its glyph.
    pub fn write_cell(&mut self, out: &mut OutputBuffer, cell: &Cell) {
        if self.last_style.as_ref() != Some(&cell.style) {
            out.buf.extend_from_slice(cell.style.as_bytes());
            self.last_style = Some(cell.style.clone());
        }
        out.write_glyph(cell.ch);
    }
}

impl Default for StyleWriter {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

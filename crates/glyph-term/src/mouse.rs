// SPDX-License-Identifier: MIT
//
// SGR mouse decoder — raw stdin bytes in, one authoritative mouse sample out.
//
// The terminal reports pointer activity as `ESC [ < b ; x ; y M` (press or
// motion) and `ESC [ < b ; x ; y m` (release), with 1-based coordinates.
// Reads are non-blocking and arbitrary: a sequence may arrive split across
// several reads, or several sequences may arrive in one. The decoder keeps a
// small assembly buffer of the sequence in progress and parses it as soon as
// a terminator shows up.
//
// There is no event queue. Each accepted left-button report overwrites the
// single `MouseState`; the window layer only ever needs "where is the pointer
// and is the button down right now".
//
// Rules, in scan order:
//
//   - `q` or `Q` anywhere means quit. Scanning stops and the partial
//     sequence is dropped. No valid SGR report contains either byte.
//   - ESC starts a fresh sequence, discarding any partial one.
//   - Other bytes are appended while a sequence is in progress, and ignored
//     otherwise.
//   - A partial sequence longer than `MAX_SEQUENCE_LEN` is garbage and is
//     discarded; scanning continues with the next byte.
//   - Malformed, out-of-range, and non-left-button reports are dropped
//     silently. Nothing here logs: a mouse move is hundreds of reports.

use std::io::Read;

use crate::terminal::Size;

/// Longest partial sequence kept before it is discarded as garbage.
pub const MAX_SEQUENCE_LEN: usize = 30;

/// Bytes requested from the source per [`MouseDecoder::update`].
pub const READ_CHUNK: usize = 1024;

const ESC: u8 = 0x1b;
const SGR_PREFIX: &[u8] = b"\x1b[<";

/// Shortest buffer worth scanning for a terminator.
const MIN_SEQUENCE_LEN: usize = 6;

/// Button-code bit set on wheel reports.
const WHEEL_BIT: i32 = 64;

// ─── MouseState ─────────────────────────────────────────────────────────────

/// The current pointer sample, in 0-based cell coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MouseState {
    pub x: u16,
    pub y: u16,
    pub left_down: bool,
}

/// Outcome of feeding bytes to the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Nothing changed.
    Idle,
    /// The mouse state changed.
    Updated,
    /// A quit key was seen. The caller should restore the terminal and exit.
    Quit,
}

// ─── MouseDecoder ───────────────────────────────────────────────────────────

/// Incremental SGR mouse decoder.
///
/// # Examples
///
/// ```
/// use glyph_term::mouse::{MouseDecoder, Status};
/// use glyph_term::terminal::Size;
///
/// let mut mouse = MouseDecoder::new(Size::new(80, 24));
/// assert_eq!(mouse.feed(b"\x1b[<0;46;1"), Status::Idle);
/// assert_eq!(mouse.feed(b"3M"), Status::Updated);
/// assert_eq!((mouse.x(), mouse.y(), mouse.is_left_down()), (45, 12, true));
///
/// assert_eq!(mouse.feed(b"q"), Status::Quit);
/// ```
#[derive(Debug, Clone)]
pub struct MouseDecoder {
    state: MouseState,
    /// Partial escape sequence. Empty when no sequence is in progress.
    pending: Vec<u8>,
    bounds: Size,
}

impl MouseDecoder {
    /// Create a decoder that accepts coordinates inside `bounds`.
    #[must_use]
    pub fn new(bounds: Size) -> Self {
        Self {
            state: MouseState::default(),
            pending: Vec::with_capacity(MAX_SEQUENCE_LEN + 1),
            bounds,
        }
    }

    /// Update the terminal size used to bounds-check reported coordinates.
    pub const fn set_bounds(&mut self, bounds: Size) {
        self.bounds = bounds;
    }

    /// Current bounds.
    #[inline]
    #[must_use]
    pub const fn bounds(&self) -> Size {
        self.bounds
    }

    /// Perform one read of up to [`READ_CHUNK`] bytes from `source` and scan
    /// them with [`feed`](Self::feed).
    ///
    /// No data, `WouldBlock`, and any other read error all mean "nothing
    /// this tick": the state is untouched and [`Status::Idle`] is returned.
    pub fn update(&mut self, source: &mut impl Read) -> Status {
        let mut chunk = [0u8; READ_CHUNK];
        match source.read(&mut chunk) {
            Ok(0) | Err(_) => Status::Idle,
            Ok(n) => self.feed(&chunk[..n]),
        }
    }

    /// Scan `bytes` in order, updating the mouse state.
    pub fn feed(&mut self, bytes: &[u8]) -> Status {
        let before = self.state;

        for &byte in bytes {
            match byte {
                b'q' | b'Q' => {
                    self.pending.clear();
                    return Status::Quit;
                }
                ESC => {
                    self.pending.clear();
                    self.pending.push(ESC);
                }
                _ if !self.pending.is_empty() => {
                    self.pending.push(byte);
                    if self.pending.len() > MAX_SEQUENCE_LEN {
                        self.pending.clear();
                    } else {
                        self.try_complete();
                    }
                }
                _ => {}
            }
        }

        if self.state == before {
            Status::Idle
        } else {
            Status::Updated
        }
    }

    /// If the pending bytes hold a terminated SGR report, parse it and clear
    /// the buffer whether or not parsing succeeds.
    fn try_complete(&mut self) {
        if self.pending.len() < MIN_SEQUENCE_LEN || !self.pending.starts_with(SGR_PREFIX) {
            return;
        }

        let end = self
            .pending
            .iter()
            .position(|&b| b == b'M')
            .or_else(|| self.pending.iter().position(|&b| b == b'm'));

        if let Some(end) = end {
            let pressed = self.pending[end] == b'M';
            if let Some(state) = parse_report(&self.pending[SGR_PREFIX.len()..end], pressed, self.bounds) {
                self.state = state;
            }
            self.pending.clear();
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub const fn state(&self) -> &MouseState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub const fn x(&self) -> u16 {
        self.state.x
    }

    #[inline]
    #[must_use]
    pub const fn y(&self) -> u16 {
        self.state.y
    }

    #[inline]
    #[must_use]
    pub const fn is_left_down(&self) -> bool {
        self.state.left_down
    }

    /// Whether a partial escape sequence is waiting for more bytes.
    #[inline]
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

impl Default for MouseDecoder {
    fn default() -> Self {
        Self::new(Size::FALLBACK)
    }
}

// ─── Report Parsing ─────────────────────────────────────────────────────────

/// Parse `b;x;y` into a left-button sample inside `bounds`.
///
/// Exactly three decimal fields. Coordinates arrive 1-based. Button codes
/// with the low two bits clear are the left button (plain, or with the
/// motion bit 32 while dragging); the wheel bit excludes scroll reports.
fn parse_report(data: &[u8], pressed: bool, bounds: Size) -> Option<MouseState> {
    let text = std::str::from_utf8(data).ok()?;
    let mut fields = text.split(';');
    let button: i32 = fields.next()?.parse().ok()?;
    let x: i32 = fields.next()?.parse().ok()?;
    let y: i32 = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }

    let x = x.checked_sub(1)?;
    let y = y.checked_sub(1)?;
    if !bounds.contains(x, y) {
        return None;
    }
    if button < 0 || button & 3 != 0 || button & WHEEL_BIT != 0 {
        return None;
    }

    Some(MouseState {
        x: u16::try_from(x).ok()?,
        y: u16::try_from(y).ok()?,
        left_down: pressed,
    })
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io;

    fn decoder() -> MouseDecoder {
        MouseDecoder::new(Size::new(80, 24))
    }

    fn at(x: u16, y: u16, left_down: bool) -> MouseState {
        MouseState { x, y, left_down }
    }

    // ── Basic reports ───────────────────────────────────────────────────

    #[test]
    fn press_then_release() {
        let mut m = decoder();
        assert_eq!(m.feed(b"\x1b[<0;46;13M"), Status::Updated);
        assert_eq!(*m.state(), at(45, 12, true));

        assert_eq!(m.feed(b"\x1b[<0;46;13m"), Status::Updated);
        assert_eq!(*m.state(), at(45, 12, false));
        assert!(!m.has_pending());
    }

    #[test]
    fn drag_motion_counts_as_left() {
        let mut m = decoder();
        assert_eq!(m.feed(b"\x1b[<32;10;5M"), Status::Updated);
        assert_eq!(*m.state(), at(9, 4, true));
    }

    #[test]
    fn several_reports_in_one_read_last_wins() {
        let mut m = decoder();
        assert_eq!(m.feed(b"\x1b[<0;1;1M\x1b[<32;2;2M\x1b[<32;3;4M"), Status::Updated);
        assert_eq!(*m.state(), at(2, 3, true));
    }

    #[test]
    fn identical_report_is_idle() {
        let mut m = decoder();
        m.feed(b"\x1b[<0;5;5M");
        assert_eq!(m.feed(b"\x1b[<0;5;5M"), Status::Idle);
    }

    // ── Split reads ─────────────────────────────────────────────────────

    #[test]
    fn split_at_every_position() {
        let seq = b"\x1b[<0;46;13M";
        for cut in 1..seq.len() {
            let mut m = decoder();
            assert_eq!(m.feed(&seq[..cut]), Status::Idle, "cut at {cut}");
            assert!(m.has_pending());
            assert_eq!(m.feed(&seq[cut..]), Status::Updated, "cut at {cut}");
            assert_eq!(*m.state(), at(45, 12, true));
            assert!(!m.has_pending());
        }
    }

    #[test]
    fn byte_at_a_time() {
        let mut m = decoder();
        for &b in b"\x1b[<0;7;8M" {
            m.feed(&[b]);
        }
        assert_eq!(*m.state(), at(6, 7, true));
    }

    #[test]
    fn escape_restarts_sequence() {
        let mut m = decoder();
        m.feed(b"\x1b[<0;4");
        m.feed(b"\x1b[<0;2;3M");
        assert_eq!(*m.state(), at(1, 2, true));
    }

    // ── Quit ────────────────────────────────────────────────────────────

    #[test]
    fn quit_anywhere() {
        let mut m = decoder();
        assert_eq!(m.feed(b"abcQxyz"), Status::Quit);
        assert_eq!(m.feed(b"q"), Status::Quit);
    }

    #[test]
    fn quit_after_report_in_same_read() {
        let mut m = decoder();
        assert_eq!(m.feed(b"\x1b[<0;1;1Mq"), Status::Quit);
        assert_eq!(*m.state(), at(0, 0, true));
    }

    #[test]
    fn quit_inside_partial_sequence_clears_it() {
        let mut m = decoder();
        m.feed(b"\x1b[<0;1");
        assert_eq!(m.feed(b"q;1M"), Status::Quit);
        assert!(!m.has_pending());
        assert_eq!(*m.state(), MouseState::default());
    }

    // ── Overflow ────────────────────────────────────────────────────────

    #[test]
    fn overflow_discards_then_recovers() {
        let mut m = decoder();
        let mut junk = vec![ESC];
        junk.extend(std::iter::repeat_n(b'1', 40));
        assert_eq!(m.feed(&junk), Status::Idle);
        assert!(!m.has_pending());

        assert_eq!(m.feed(b"\x1b[<0;3;3M"), Status::Updated);
        assert_eq!(*m.state(), at(2, 2, true));
    }

    #[test]
    fn pending_never_exceeds_limit() {
        let mut m = decoder();
        m.feed(b"\x1b");
        for _ in 0..100 {
            m.feed(b"9");
            assert!(m.pending.len() <= MAX_SEQUENCE_LEN);
        }
    }

    #[test]
    fn non_sgr_escape_is_dropped_by_overflow() {
        let mut m = decoder();
        m.feed(b"\x1bOA");
        assert!(m.has_pending());
        m.feed(&[b'x'; 40]);
        assert!(!m.has_pending());
    }

    // ── Rejected reports ────────────────────────────────────────────────

    #[test]
    fn out_of_bounds_dropped() {
        let mut m = MouseDecoder::new(Size::new(10, 5));
        for seq in [&b"\x1b[<0;11;1M"[..], b"\x1b[<0;1;6M", b"\x1b[<0;0;1M", b"\x1b[<0;1;-3M"] {
            assert_eq!(m.feed(seq), Status::Idle);
            assert!(!m.has_pending());
        }
        assert_eq!(m.feed(b"\x1b[<0;10;5M"), Status::Updated);
        assert_eq!(*m.state(), at(9, 4, true));
    }

    #[test]
    fn bounds_follow_resize() {
        let mut m = MouseDecoder::new(Size::new(10, 5));
        assert_eq!(m.feed(b"\x1b[<0;50;20M"), Status::Idle);
        m.set_bounds(Size::new(100, 40));
        assert_eq!(m.feed(b"\x1b[<0;50;20M"), Status::Updated);
    }

    #[test]
    fn other_buttons_ignored() {
        let mut m = decoder();
        // Middle, right, motion with no button, wheel up, wheel down.
        for seq in [&b"\x1b[<1;5;5M"[..], b"\x1b[<2;5;5M", b"\x1b[<35;5;5M", b"\x1b[<64;5;5M", b"\x1b[<65;5;5M"] {
            assert_eq!(m.feed(seq), Status::Idle, "{seq:?}");
        }
        assert_eq!(*m.state(), MouseState::default());
    }

    #[test]
    fn malformed_fields_dropped() {
        let mut m = decoder();
        for seq in [
            &b"\x1b[<0;5M"[..],
            b"\x1b[<0;5;5;5M",
            b"\x1b[<a;5;5M",
            b"\x1b[<0;;5M",
            b"\x1b[<0;99999999999;5M",
            b"\x1b[<;;M",
        ] {
            assert_eq!(m.feed(seq), Status::Idle, "{seq:?}");
            assert!(!m.has_pending());
        }
        assert_eq!(*m.state(), MouseState::default());
    }

    #[test]
    fn min_coordinate_does_not_overflow() {
        let mut m = decoder();
        assert_eq!(m.feed(b"\x1b[<0;-2147483648;1M"), Status::Idle);
    }

    #[test]
    fn stray_bytes_without_escape_ignored() {
        let mut m = decoder();
        assert_eq!(m.feed(b"[<0;5;5M"), Status::Idle);
        assert!(!m.has_pending());
    }

    // ── update() ────────────────────────────────────────────────────────

    struct WouldBlock;

    impl Read for WouldBlock {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::ErrorKind::WouldBlock.into())
        }
    }

    #[test]
    fn update_from_reader() {
        let mut m = decoder();
        let mut src: &[u8] = b"\x1b[<0;46;13M";
        assert_eq!(m.update(&mut src), Status::Updated);
        assert_eq!(*m.state(), at(45, 12, true));
    }

    #[test]
    fn update_empty_or_blocked_is_idle() {
        let mut m = decoder();
        let mut empty: &[u8] = b"";
        assert_eq!(m.update(&mut empty), Status::Idle);
        assert_eq!(m.update(&mut WouldBlock), Status::Idle);
        assert_eq!(*m.state(), MouseState::default());
    }

    #[test]
    fn update_reads_one_chunk() {
        let mut m = decoder();
        let mut input = vec![b'x'; READ_CHUNK];
        input.push(b'q');
        let mut src: &[u8] = &input;
        assert_eq!(m.update(&mut src), Status::Idle);
        assert_eq!(m.update(&mut src), Status::Quit);
    }
}

// SPDX-License-Identifier: MIT
//
// ANSI escape sequences, as bytes.
//
// Stateless writers for the handful of terminal commands glyphdesk uses:
// cursor visibility, screen clearing, SGR colors and attributes, and the
// three mouse-reporting modes. Deciding *when* to emit belongs to the
// session (entry and exit sequences) and to `StyleWriter` (per-cell styles).
//
// Errors come only from the writer. Writing into a `Vec` or `OutputBuffer`
// cannot fail.
use std::io::{self, Write};

use crate::color::{Attr, CellColor};

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Cursor-home sequence (CUP with no parameters).
pub const CURSOR_HOME: &[u8] = b"\x1b[H";

/// SGR 0: reset every attribute and color.
pub const RESET: &[u8] = b"\x1b[0m";

/// Move the cursor to the top-left corner.
#[inline]
pub fn cursor_home(w: &mut impl Write) -> io::Result<()> {
    w.write_all(CURSOR_HOME)
}

/// `ESC[?25l`: make the cursor invisible.
#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

/// `ESC[?25h`: make the cursor visible again.
#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// `ESC[2J`: erase the whole display. The cursor does not move.
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

/// `ESC[0m`: drop every color and attribute.
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(RESET)
}

// ─── Colors ──────────────────────────────────────────────────────────────────

/// Set the foreground (text) color.
///
/// Compact SGR codes for palette 0–15 (30–37, 90–97), the 256-color form
/// for 16–255, and 24-bit `TrueColor` for RGB.
pub fn fg(w: &mut impl Write, color: CellColor) -> io::Result<()> {
    match color {
        CellColor::Default => w.write_all(b"\x1b[39m"),
        CellColor::Ansi256(idx) => {
            if idx < 8 {
                write!(w, "\x1b[{}m", 30 + u16::from(idx))
            } else if idx < 16 {
                write!(w, "\x1b[{}m", 82 + u16::from(idx))
            } else {
                write!(w, "\x1b[38;5;{idx}m")
            }
        }
        CellColor::Rgb(r, g, b) => write!(w, "\x1b[38;2;{r};{g};{b}m"),
    }
}

/// Set the background color. Same strategy as [`fg`] with BG codes
/// (40–47, 100–107, 48;5;N, 48;2;R;G;B).
pub fn bg(w: &mut impl Write, color: CellColor) -> io::Result<()> {
    match color {
        CellColor::Default => w.write_all(b"\x1b[49m"),
        CellColor::Ansi256(idx) => {
            if idx < 8 {
                write!(w, "\x1b[{}m", 40 + u16::from(idx))
            } else if idx < 16 {
                write!(w, "\x1b[{}m", 92 + u16::from(idx))
            } else {
                write!(w, "\x1b[48;5;{idx}m")
            }
        }
        CellColor::Rgb(r, g, b) => write!(w, "\x1b[48;2;{r};{g};{b}m"),
    }
}

/// Write all set attributes as one SGR sequence.
///
/// `\x1b[1;4m` for bold + underline. Does nothing if no attributes are set.
pub fn attrs(w: &mut impl Write, attr: Attr) -> io::Result<()> {
    const CODES: [(Attr, &[u8]); 8] = [
        (Attr::BOLD, b"1"),
        (Attr::DIM, b"2"),
        (Attr::ITALIC, b"3"),
        (Attr::UNDERLINE, b"4"),
        (Attr::BLINK, b"5"),
        (Attr::INVERSE, b"7"),
        (Attr::HIDDEN, b"8"),
        (Attr::STRIKETHROUGH, b"9"),
    ];

    if attr.is_empty() {
        return Ok(());
    }

    w.write_all(b"\x1b[")?;
    let mut first = true;
    for (flag, code) in CODES {
        if attr.contains(flag) {
            if !first {
                w.write_all(b";")?;
            }
            w.write_all(code)?;
            first = false;
        }
    }
    w.write_all(b"m")
}

// ─── Mouse Protocol ─────────────────────────────────────────────────────────

/// Enable click reporting (1000), SGR extended coordinates (1006), and
/// any-motion tracking (1003), in that order.
pub fn enable_mouse(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1000h\x1b[?1006h\x1b[?1003h")
}

/// Disable the three mouse modes enabled by [`enable_mouse`].
pub fn disable_mouse(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1003l\x1b[?1006l\x1b[?1000l")
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn emit(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn cursor_sequences() {
        assert_eq!(emit(|w| cursor_home(w)), "\x1b[H");
        assert_eq!(emit(|w| cursor_hide(w)), "\x1b[?25l");
        assert_eq!(emit(|w| cursor_show(w)), "\x1b[?25h");
    }

    #[test]
    fn screen_sequences() {
        assert_eq!(emit(|w| clear_screen(w)), "\x1b[2J");
        assert_eq!(emit(|w| reset(w)), "\x1b[0m");
    }

    #[test]
    fn fg_palette_encodings() {
        assert_eq!(emit(|w| fg(w, CellColor::Default)), "\x1b[39m");
        assert_eq!(emit(|w| fg(w, CellColor::CYAN)), "\x1b[36m");
        assert_eq!(emit(|w| fg(w, CellColor::BRIGHT_CYAN)), "\x1b[96m");
        assert_eq!(emit(|w| fg(w, CellColor::Ansi256(208))), "\x1b[38;5;208m");
        assert_eq!(emit(|w| fg(w, CellColor::Rgb(1, 2, 3))), "\x1b[38;2;1;2;3m");
    }

    #[test]
    fn bg_palette_encodings() {
        assert_eq!(emit(|w| bg(w, CellColor::Default)), "\x1b[49m");
        assert_eq!(emit(|w| bg(w, CellColor::BLUE)), "\x1b[44m");
        assert_eq!(emit(|w| bg(w, CellColor::BRIGHT_BLUE)), "\x1b[104m");
        assert_eq!(emit(|w| bg(w, CellColor::Ansi256(17))), "\x1b[48;5;17m");
        assert_eq!(emit(|w| bg(w, CellColor::Rgb(9, 8, 7))), "\x1b[48;2;9;8;7m");
    }

    #[test]
    fn attrs_encoding() {
        assert_eq!(emit(|w| attrs(w, Attr::empty())), "");
        assert_eq!(emit(|w| attrs(w, Attr::BOLD)), "\x1b[1m");
        assert_eq!(emit(|w| attrs(w, Attr::BOLD | Attr::UNDERLINE | Attr::STRIKETHROUGH)), "\x1b[1;4;9m");
    }

    #[test]
    fn mouse_modes() {
        assert_eq!(emit(|w| enable_mouse(w)), "\x1b[?1000h\x1b[?1006h\x1b[?1003h");
        assert_eq!(emit(|w| disable_mouse(w)), "\x1b[?1003l\x1b[?1006l\x1b[?1000l");
    }
}

// SPDX-License-Identifier: MIT
//
// Terminal colors and text attributes.
//
// These are the structured inputs to `Style::from_colors`. The screen buffer
// itself never sees them: cells carry an opaque `Style` token, and the
// renderer only compares tokens. Keeping the structured form around lets
// callers build styles without hand-writing escape sequences.

use std::fmt;

// ─── CellColor ───────────────────────────────────────────────────────────────

/// A terminal color as the terminal understands it.
///
/// Palette indices 0–15 encode to the compact SGR forms (30–37, 90–97 for
/// foreground; 40–47, 100–107 for background), so a style built from
/// `Ansi256(6)` is byte-identical to the classic `ESC[36m` cyan.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellColor {
    /// 24-bit `TrueColor`.
    Rgb(u8, u8, u8),

    /// Index into the xterm 256-color palette. 0–15 are the classic colors.
    Ansi256(u8),

    /// Whatever the user's terminal theme uses (SGR 39 / 49).
    #[default]
    Default,
}

impl CellColor {
    pub const BLACK: Self = Self::Ansi256(0);
    pub const RED: Self = Self::Ansi256(1);
    pub const GREEN: Self = Self::Ansi256(2);
    pub const YELLOW: Self = Self::Ansi256(3);
    pub const BLUE: Self = Self::Ansi256(4);
    pub const MAGENTA: Self = Self::Ansi256(5);
    pub const CYAN: Self = Self::Ansi256(6);
    pub const WHITE: Self = Self::Ansi256(7);
    pub const BRIGHT_RED: Self = Self::Ansi256(9);
    pub const BRIGHT_GREEN: Self = Self::Ansi256(10);
    pub const BRIGHT_YELLOW: Self = Self::Ansi256(11);
    pub const BRIGHT_BLUE: Self = Self::Ansi256(12);
    pub const BRIGHT_MAGENTA: Self = Self::Ansi256(13);
    pub const BRIGHT_CYAN: Self = Self::Ansi256(14);
    pub const BRIGHT_WHITE: Self = Self::Ansi256(15);

    /// `true` for [`CellColor::Default`].
    #[inline]
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }
}

impl fmt::Debug for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Self::Ansi256(idx) => write!(f, "ansi({idx})"),
            Self::Default => write!(f, "default"),
        }
    }
}

impl fmt::Display for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ─── Text Attributes ─────────────────────────────────────────────────────────

bitflags::bitflags! {
    /// SGR text attributes, one bit each. Combine with `|`:
    ///
    /// ```
    /// use glyph_term::color::Attr;
    ///
    /// let heading = Attr::BOLD | Attr::UNDERLINE;
    /// assert!(heading.contains(Attr::UNDERLINE));
    /// assert!(!heading.contains(Attr::ITALIC));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Attr: u8 {
        /// SGR 1.
        const BOLD          = 1 << 0;
        /// SGR 2, faint.
        const DIM           = 1 << 1;
        /// SGR 3 — italic.
        const ITALIC        = 1 << 2;
        /// SGR 4 — underline.
        const UNDERLINE     = 1 << 3;
        /// SGR 5 — blink.
        const BLINK         = 1 << 4;
        /// SGR 7, reverse video.
        const INVERSE       = 1 << 5;
        /// SGR 8, concealed.
        const HIDDEN        = 1 << 6;
        /// SGR 9.
        const STRIKETHROUGH = 1 << 7;
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

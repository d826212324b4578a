// SPDX-License-Identifier: MIT
//
// Style — the opaque color/attribute tag carried by every cell.
//
// A Style is a concatenation of SGR escape sequences, stored verbatim.
// The renderer never interprets it: it compares tokens and writes the
// bytes of a token only when it differs from the one emitted for the
// previous cell. Equality is therefore byte equality of the sequence,
// not semantic color equality (`ESC[36m` and `ESC[38;5;6m` are different
// styles even though most terminals draw them identically).
//
// Cheap to clone: palette constants are `&'static str`, composed styles
// share one `Arc<str>` across every cell they are written to.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::ansi;
use crate::color::{Attr, CellColor};

#[derive(Clone)]
enum Repr {
    Static(&'static str),
    Shared(Arc<str>),
}

/// An opaque, comparable terminal style token.
///
/// # Examples
///
/// ```
/// use glyph_term::style::Style;
///
/// let title = Style::BLACK.join(&Style::BG_CYAN);
/// assert_eq!(title.as_str(), "\x1b[30m\x1b[46m");
/// assert_ne!(title, Style::RESET);
/// assert_eq!(Style::default(), Style::RESET);
/// ```
#[derive(Clone)]
pub struct Style(Repr);

impl Style {
    /// The default cell style: a full SGR reset.
    pub const RESET: Self = Self::from_static("\x1b[0m");

    pub const BLACK: Self = Self::from_static("\x1b[30m");
    pub const RED: Self = Self::from_static("\x1b[31m");
    pub const GREEN: Self = Self::from_static("\x1b[32m");
    pub const YELLOW: Self = Self::from_static("\x1b[33m");
    pub const BLUE: Self = Self::from_static("\x1b[34m");
    pub const MAGENTA: Self = Self::from_static("\x1b[35m");
    pub const CYAN: Self = Self::from_static("\x1b[36m");
    pub const WHITE: Self = Self::from_static("\x1b[37m");
    pub const BRIGHT_RED: Self = Self::from_static("\x1b[91m");
    pub const BRIGHT_GREEN: Self = Self::from_static("\x1b[92m");
    pub const BRIGHT_YELLOW: Self = Self::from_static("\x1b[93m");
    pub const BRIGHT_BLUE: Self = Self::from_static("\x1b[94m");
    pub const BRIGHT_MAGENTA: Self = Self::from_static("\x1b[95m");
    pub const BRIGHT_CYAN: Self = Self::from_static("\x1b[96m");
    pub const BRIGHT_WHITE: Self = Self::from_static("\x1b[97m");
    /// 256-color orange.
    pub const ORANGE: Self = Self::from_static("\x1b[38;5;208m");

    pub const BG_BLACK: Self = Self::from_static("\x1b[40m");
    pub const BG_RED: Self = Self::from_static("\x1b[41m");
    pub const BG_GREEN: Self = Self::from_static("\x1b[42m");
    pub const BG_YELLOW: Self = Self::from_static("\x1b[43m");
    pub const BG_BLUE: Self = Self::from_static("\x1b[44m");
    pub const BG_MAGENTA: Self = Self::from_static("\x1b[45m");
    pub const BG_CYAN: Self = Self::from_static("\x1b[46m");
    pub const BG_WHITE: Self = Self::from_static("\x1b[47m");
    pub const BG_BRIGHT_BLUE: Self = Self::from_static("\x1b[104m");
    pub const BG_BRIGHT_CYAN: Self = Self::from_static("\x1b[106m");
    pub const BG_BRIGHT_WHITE: Self = Self::from_static("\x1b[107m");

    /// Wrap a static escape sequence without allocating.
    #[inline]
    #[must_use]
    pub const fn from_static(seq: &'static str) -> Self {
        Self(Repr::Static(seq))
    }

    /// Wrap an owned escape sequence.
    #[must_use]
    pub fn new(seq: impl Into<Arc<str>>) -> Self {
        Self(Repr::Shared(seq.into()))
    }

    /// Build a style from structured colors and attributes.
    ///
    /// `CellColor::Default` and empty attributes contribute nothing; a style
    /// with neither colors nor attributes is the empty token, which leaves
    /// whatever the terminal currently has in effect.
    #[must_use]
    pub fn from_colors(fg: CellColor, bg: CellColor, attrs: Attr) -> Self {
        let mut seq = Vec::with_capacity(32);
        // Writing into a Vec cannot fail.
        let _ = ansi::attrs(&mut seq, attrs);
        if !fg.is_default() {
            let _ = ansi::fg(&mut seq, fg);
        }
        if !bg.is_default() {
            let _ = ansi::bg(&mut seq, bg);
        }
        Self::new(String::from_utf8_lossy(&seq).into_owned())
    }

    /// Concatenate two styles (typically a foreground and a background).
    #[must_use]
    pub fn join(&self, other: &Self) -> Self {
        let mut seq = String::with_capacity(self.as_str().len() + other.as_str().len());
        seq.push_str(self.as_str());
        seq.push_str(other.as_str());
        Self::new(seq)
    }

    /// The raw escape sequence.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        match &self.0 {
            Repr::Static(s) => s,
            Repr::Shared(s) => s,
        }
    }

    /// The raw escape sequence as bytes, ready for output.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.as_str().as_bytes()
    }

    /// Whether this is exactly the reset token.
    #[inline]
    #[must_use]
    pub fn is_reset(&self) -> bool {
        *self == Self::RESET
    }

    /// Write the escape sequence to `w`.
    ///
    /// # Errors
    ///
    /// Propagates errors from the underlying writer.
    #[inline]
    pub fn write_to(&self, w: &mut impl std::io::Write) -> std::io::Result<()> {
        w.write_all(self.as_bytes())
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::RESET
    }
}

impl PartialEq for Style {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Repr::Shared(a), Repr::Shared(b)) if Arc::ptr_eq(a, b) => true,
            _ => self.as_str() == other.as_str(),
        }
    }
}

impl Eq for Style {}

impl Hash for Style {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl From<&'static str> for Style {
    fn from(seq: &'static str) -> Self {
        Self::from_static(seq)
    }
}

impl From<String> for Style {
    fn from(seq: String) -> Self {
        Self::new(seq)
    }
}

impl fmt::Debug for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Style({:?})", self.as_str().escape_debug().to_string())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

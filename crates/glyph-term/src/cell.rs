// SPDX-License-Identifier: MIT
//
// Cell — the atomic unit of the screen grid.
//
// One grapheme unit plus one style token. A grapheme unit is a UTF-8 lead
// byte followed by its continuation bytes, which in a Rust `&str` is
// exactly one `char`. Each unit occupies one column slot regardless of how
// wide the terminal actually draws it; the grid does no wide-character
// bookkeeping.

use crate::style::Style;

/// A single screen cell.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Cell {
    /// The grapheme unit drawn in this slot.
    pub ch: char,
    /// The style token emitted before `ch` when it differs from the previous cell's.
    pub style: Style,
}

impl Cell {
    /// An empty cell: a space in the reset style.
    pub const EMPTY: Self = Self {
        ch: ' ',
        style: Style::RESET,
    };

    /// Create a cell from a grapheme unit and a style.
    #[inline]
    #[must_use]
    pub const fn new(ch: char, style: Style) -> Self {
        Self { ch, style }
    }

    /// Whether this cell is a space in the reset style.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ch == ' ' && self.style.is_reset()
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cell({:?}, {:?})", self.ch, self.style)
    }
}

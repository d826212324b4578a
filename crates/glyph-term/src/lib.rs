// SPDX-License-Identifier: MIT
//
// glyph-term — Terminal I/O core for glyphdesk.
//
// Two pieces carry all the weight here: a full-frame Unicode screen buffer
// that serializes the whole grid in one write with style-run compression,
// and an SGR mouse decoder that turns an unstructured byte stream into a
// single authoritative (x, y, left_down) sample. Everything else in the
// workspace (windows, chrome, the desktop) is glue built on those two.
//
// Like the rest of the workspace this crate talks to the terminal directly:
// raw termios, hand-written ANSI, no TUI framework in between.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

pub mod ansi;
pub mod buffer;
pub mod cell;
pub mod color;
pub mod error;
pub mod mouse;
pub mod output;
pub mod reader;
pub mod session;
pub mod style;
pub mod terminal;
pub mod text;

pub use error::{Error, Result};

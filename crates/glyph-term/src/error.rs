// SPDX-License-Identifier: MIT
//
// Error types for terminal session setup and I/O.
//
// Only the session can fail. Drawing never does (out-of-range writes are
// clipped), and the mouse decoder swallows malformed input by contract.

use std::io;

use thiserror::Error;

/// Errors raised while entering, running, or leaving a terminal session.
#[derive(Error, Debug)]
pub enum Error {
    /// `tcgetattr` on stdin failed: stdin is not a usable terminal.
    #[error("failed to read terminal attributes: {0}")]
    GetAttributes(#[source] io::Error),

    /// `tcsetattr` on stdin failed while entering or leaving raw mode.
    #[error("failed to set terminal attributes: {0}")]
    SetAttributes(#[source] io::Error),

    /// Writing to the terminal failed.
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

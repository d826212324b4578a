// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Non-blocking stdin source for the mouse decoder.
//
// The frame loop must never stall waiting for input: it has a frame to
// paint every tick whether or not the mouse moved. Raw mode already sets
// VMIN = 0 / VTIME = 0, but a zero-timeout `poll()` in front of the read
// keeps the source non-blocking even when stdin was never put in raw mode
// (a pipe, a test harness).
//
// The source is a plain `io::Read`, so the decoder can be driven from a
// byte slice in tests and from the real terminal in the session.

use std::io::{self, Read};

/// Non-blocking reader over the process's stdin.
///
/// `read` returns `Err(WouldBlock)` when no bytes are ready and `Ok(0)` at
/// end of input. It never waits.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinSource;

impl StdinSource {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Whether stdin has bytes ready right now.
    #[cfg(unix)]
    #[must_use]
    pub fn is_ready(&self) -> bool {
        let mut pfd = libc::pollfd {
            fd: libc::STDIN_FILENO,
            events: libc::POLLIN,
            revents: 0,
        };
        let ready = unsafe { libc::poll(&raw mut pfd, 1, 0) };
        ready > 0 && pfd.revents & (libc::POLLIN | libc::POLLHUP) != 0
    }

    #[cfg(not(unix))]
    #[must_use]
    pub fn is_ready(&self) -> bool {
        false
    }
}

#[cfg(unix)]
impl Read for StdinSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if !self.is_ready() {
            return Err(io::ErrorKind::WouldBlock.into());
        }

        let n = unsafe { libc::read(libc::STDIN_FILENO, buf.as_mut_ptr().cast(), buf.len()) };
        if n < 0 {
            return Err(io::Error::last_os_error());
        }
        #[allow(clippy::cast_sign_loss)] // n >= 0 checked above.
        Ok(n as usize)
    }
}

/// Without `poll()` there is no way to read stdin without blocking, so the
/// fallback never produces input.
#[cfg(not(unix))]
impl Read for StdinSource {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::ErrorKind::WouldBlock.into())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer_reads_nothing() {
        let mut src = StdinSource::new();
        assert_eq!(src.read(&mut []).unwrap(), 0);
    }

    #[test]
    fn read_never_blocks() {
        // Whatever stdin is in the test harness (closed, a pipe, /dev/null),
        // a read must return immediately with data, EOF, or WouldBlock.
        let mut src = StdinSource::new();
        let mut buf = [0u8; 16];
        if let Ok(n) = src.read(&mut buf) {
            assert!(n <= buf.len());
        }
    }

    #[test]
    fn is_ready_does_not_panic() {
        let _ = StdinSource::new().is_ready();
    }
}

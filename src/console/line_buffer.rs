//! Line accumulator for byte-wise serial input
//!
//! No editing: printable bytes are appended, CR or LF ends the line.
//! Bytes from 0x80 up are kept so UTF-8 text arrives intact; the line is
//! checked as a whole when it is read back.

use core::fmt;

/// Maximum line length
pub const LINE_SIZE: usize = 128;

/// Why a completed line cannot be dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineError {
    /// Input ran past `LINE_SIZE`
    TooLong,
    /// Bytes are not valid UTF-8
    InvalidUtf8,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineError::TooLong => write!(f, "line longer than {} bytes", LINE_SIZE),
            LineError::InvalidUtf8 => write!(f, "line is not valid UTF-8"),
        }
    }
}

/// Line input buffer
pub struct LineBuffer {
    buf: [u8; LINE_SIZE],
    len: usize,
    overflowed: bool,
}

impl LineBuffer {
    /// Create empty buffer
    pub const fn new() -> Self {
        Self {
            buf: [0u8; LINE_SIZE],
            len: 0,
            overflowed: false,
        }
    }

    /// Feed one input byte. Returns `true` when a line terminator arrives.
    ///
    /// ASCII control bytes other than CR/LF are ignored.
    pub fn feed(&mut self, byte: u8) -> bool {
        match byte {
            b'\r' | b'\n' => true,
            0x20..=0x7E | 0x80..=0xFF => {
                self.push(byte);
                false
            }
            _ => false,
        }
    }

    /// Push a character. Bytes past `LINE_SIZE` are dropped and flagged.
    pub fn push(&mut self, c: u8) {
        if self.len < LINE_SIZE {
            self.buf[self.len] = c;
            self.len += 1;
        } else {
            self.overflowed = true;
        }
    }

    /// Clear buffer
    pub fn clear(&mut self) {
        self.len = 0;
        self.overflowed = false;
    }

    /// The collected line, or why it has to be rejected.
    pub fn text(&self) -> Result<&str, LineError> {
        if self.overflowed {
            return Err(LineError::TooLong);
        }
        core::str::from_utf8(&self.buf[..self.len]).map_err(|_| LineError::InvalidUtf8)
    }

    /// True if input was lost since the last `clear`.
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Get buffer length
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

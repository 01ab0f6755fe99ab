//! Output sink for command text.

use core::fmt::Write;

/// Text sink that can be flushed before the device goes away.
pub trait ConsoleOutput: Write {
    /// Push buffered output to the wire. Default: nothing buffered.
    fn flush(&mut self) {}
}

#[cfg(test)]
impl ConsoleOutput for std::string::String {}

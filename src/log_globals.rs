//! Global log stream instance.
//!
//! Firmware wires the console to this stream; tests build their own.

use crate::logging::LogStream;

/// Console log stream.
///
/// Producers: the dispatcher and its handlers. Consumer: the main loop,
/// which drains it to the serial port between commands.
pub static CONSOLE_LOG: LogStream = LogStream::new();

//! Shared test helpers
#![allow(dead_code)]

use device_console::console::{Console, ConsoleOutput};

/// Test output buffer
pub struct TestOutput {
    buf: [u8; 2048],
    len: usize,
    pub flushes: u32,
}

impl TestOutput {
    pub fn new() -> Self {
        Self { buf: [0u8; 2048], len: 0, flushes: 0 }
    }

    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    pub fn contains(&self, s: &str) -> bool {
        self.as_str().contains(s)
    }

    pub fn lines(&self) -> Vec<&str> {
        self.as_str().lines().collect()
    }
}

impl core::fmt::Write for TestOutput {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let bytes = s.as_bytes();
        let available = self.buf.len() - self.len;
        let to_copy = bytes.len().min(available);
        self.buf[self.len..self.len + to_copy].copy_from_slice(&bytes[..to_copy]);
        self.len += to_copy;
        Ok(())
    }
}

impl ConsoleOutput for TestOutput {
    fn flush(&mut self) {
        self.flushes += 1;
    }
}

/// Dispatch one line, returning its status and output
pub fn run(console: &mut Console<'_>, line: &str) -> (i32, TestOutput) {
    let mut out = TestOutput::new();
    let status = console
        .dispatch_line(line, &mut out)
        .expect("test lines are never blank");
    (status, out)
}

//! Log stream drain.
//!
//! Formats [`LogEntry`] values and writes them to any text sink (UART,
//! stdout, a test buffer).

use core::fmt::Write;

use crate::logging::{BufWriter, LogEntry, LogStream};

/// Formatted line size: timestamp, level, tag and message.
const LINE_BUF_SIZE: usize = 160;

/// Format log entry to bytes.
///
/// Format: `[timestamp_us] LEVEL tag: message\n`
fn format_log_entry(entry: &LogEntry, buf: &mut [u8]) -> usize {
    let mut writer = BufWriter { buf, pos: 0 };

    let _ = writeln!(
        writer,
        "[{:10}] {} {}: {}",
        entry.timestamp_us,
        entry.level.as_str(),
        entry.tag(),
        core::str::from_utf8(entry.message()).unwrap_or("<invalid utf8>")
    );

    writer.pos
}

/// Write a single entry.
pub fn write_entry(out: &mut dyn Write, entry: &LogEntry) -> core::fmt::Result {
    let mut buf = [0u8; LINE_BUF_SIZE];
    let len = format_log_entry(entry, &mut buf);
    // format_log_entry truncates on a byte boundary; keep the valid prefix
    let text = match core::str::from_utf8(&buf[..len]) {
        Ok(s) => s,
        Err(e) => core::str::from_utf8(&buf[..e.valid_up_to()]).unwrap_or(""),
    };
    out.write_str(text)
}

/// Drain every pending entry into `out`, then report drops once.
///
/// Returns the number of entries written.
pub fn drain_to<const N: usize>(stream: &LogStream<N>, out: &mut dyn Write) -> usize {
    let mut written = 0;

    while let Some(entry) = stream.drain() {
        if write_entry(out, &entry).is_err() {
            break;
        }
        written += 1;
    }

    let dropped = stream.dropped();
    if dropped > 0 {
        let _ = writeln!(out, "[WARN] log dropped={}", dropped);
        stream.reset_dropped();
    }

    written
}

//! Non-blocking logging for the service console.
//!
//! ```text
//! Console / handlers       LogStream            Drain (main loop)
//! ──────────────────       ─────────            ─────────────────
//!
//! con_info!() ──────────▶ [L0][L1][L2] ──────▶ log_sink::drain_to()
//! no allocation            lock-free           blocking ok
//! never blocks             ring buffer
//! ```
//!
//! # Rules
//!
//! - Handlers never block on log output
//! - Messages may be dropped if the ring is full (drops are counted)
//! - Messages above the stream threshold are discarded before queuing
//! - A drained entry is always complete: slots are published after writing

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, AtomicU8, Ordering};

/// Maximum message length.
pub const MAX_MSG_LEN: usize = 96;

/// Tag bytes kept in a log entry (longer tags are truncated for display).
pub const MAX_TAG_LEN: usize = 16;

/// Longest tag a [`TagLevels`] table can hold.
pub const MAX_LEVEL_TAG_LEN: usize = 32;

/// Log buffer size (number of entries).
pub const LOG_BUFFER_SIZE: usize = 64;

/// Log level, ordered from least to most verbose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Verbose = 5,
}

/// Accepted spellings for each level. Matched case-insensitively.
const LEVEL_ALIASES: &[(&str, LogLevel)] = &[
    ("e", LogLevel::Error),
    ("error", LogLevel::Error),
    ("w", LogLevel::Warn),
    ("warn", LogLevel::Warn),
    ("warning", LogLevel::Warn),
    ("i", LogLevel::Info),
    ("info", LogLevel::Info),
    ("d", LogLevel::Debug),
    ("debug", LogLevel::Debug),
    ("v", LogLevel::Verbose),
    ("verbose", LogLevel::Verbose),
];

impl LogLevel {
    /// Parse a level name or single-letter alias.
    pub fn parse(s: &str) -> Option<Self> {
        LEVEL_ALIASES
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(s))
            .map(|&(_, level)| level)
    }

    /// Canonical lowercase name, as accepted by `parse`.
    pub fn name(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Verbose => "verbose",
        }
    }

    /// Convert to string for output.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Verbose => "VERBOSE",
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => LogLevel::Error,
            2 => LogLevel::Warn,
            3 => LogLevel::Info,
            4 => LogLevel::Debug,
            _ => LogLevel::Verbose,
        }
    }
}

/// A single log entry.
#[derive(Clone, Copy)]
pub struct LogEntry {
    /// Timestamp in microseconds.
    pub timestamp_us: i64,
    /// Log level.
    pub level: LogLevel,
    tag_len: u8,
    tag: [u8; MAX_TAG_LEN],
    len: u8,
    msg: [u8; MAX_MSG_LEN],
}

impl LogEntry {
    const EMPTY: Self = Self {
        timestamp_us: 0,
        level: LogLevel::Info,
        tag_len: 0,
        tag: [0; MAX_TAG_LEN],
        len: 0,
        msg: [0; MAX_MSG_LEN],
    };

    /// Build an entry, truncating tag and message to their fixed sizes.
    pub fn new(timestamp_us: i64, level: LogLevel, tag: &str, msg: &[u8]) -> Self {
        let mut entry = Self::EMPTY;
        entry.timestamp_us = timestamp_us;
        entry.level = level;
        entry.fill(tag.as_bytes(), msg);
        entry
    }

    fn fill(&mut self, tag: &[u8], msg: &[u8]) {
        let tag_len = tag.len().min(MAX_TAG_LEN);
        self.tag[..tag_len].copy_from_slice(&tag[..tag_len]);
        self.tag_len = tag_len as u8;

        let len = msg.len().min(MAX_MSG_LEN);
        self.msg[..len].copy_from_slice(&msg[..len]);
        self.len = len as u8;
    }

    /// Tag that produced the entry.
    pub fn tag(&self) -> &str {
        core::str::from_utf8(&self.tag[..self.tag_len as usize]).unwrap_or("?")
    }

    /// Message bytes (not null-terminated).
    pub fn message(&self) -> &[u8] {
        &self.msg[..self.len as usize]
    }
}

impl Default for LogEntry {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Ring slot. `seq` tells whose turn the slot is:
/// `seq == pos` free for the producer at `pos`,
/// `seq == pos + 1` published and ready for the consumer at `pos`.
struct Slot {
    seq: AtomicU32,
    entry: UnsafeCell<LogEntry>,
}

impl Slot {
    #[allow(clippy::declare_interior_mutable_const)]
    const EMPTY: Self = Self {
        seq: AtomicU32::new(0),
        entry: UnsafeCell::new(LogEntry::EMPTY),
    };
}

/// Lock-free log stream (multiple producers, multiple consumers).
///
/// - Producers claim a position, fill the slot, then publish it
/// - Push never blocks (drops message if full)
/// - Drain only returns published entries
pub struct LogStream<const N: usize = LOG_BUFFER_SIZE> {
    slots: [Slot; N],
    write_idx: AtomicU32,
    read_idx: AtomicU32,
    dropped: AtomicU32,
    threshold: AtomicU8,
}

// SAFETY: a slot's entry is only touched by the thread that won its
// position with compare_exchange, and ownership is handed over through
// the slot's `seq` (Release on publish, Acquire on claim).
unsafe impl<const N: usize> Sync for LogStream<N> {}
unsafe impl<const N: usize> Send for LogStream<N> {}

impl<const N: usize> LogStream<N> {
    const MASK: usize = N - 1;

    /// Create a new empty stream that accepts everything up to `Info`.
    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "Log buffer size must be power of 2");
        assert!(N <= (1 << 30), "Log buffer too large for u32 positions");

        let mut slots = [Slot::EMPTY; N];
        let mut i = 0;
        while i < N {
            slots[i].seq = AtomicU32::new(i as u32);
            i += 1;
        }

        Self {
            slots,
            write_idx: AtomicU32::new(0),
            read_idx: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
            threshold: AtomicU8::new(LogLevel::Info as u8),
        }
    }

    /// Most verbose level this stream still accepts.
    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.threshold.load(Ordering::Relaxed))
    }

    /// Change the acceptance threshold.
    pub fn set_level(&self, level: LogLevel) {
        self.threshold.store(level as u8, Ordering::Relaxed);
    }

    /// Whether a message at `level` would be queued.
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level as u8 <= self.threshold.load(Ordering::Relaxed)
    }

    /// Push a log entry (never blocks).
    ///
    /// Returns `true` if the message was queued, `false` if it was filtered
    /// by the threshold or dropped because the ring is full.
    #[inline]
    pub fn push(&self, timestamp_us: i64, level: LogLevel, tag: &str, msg: &[u8]) -> bool {
        if !self.enabled(level) {
            return false;
        }

        let mut pos = self.write_idx.load(Ordering::Relaxed);
        let slot = loop {
            let slot = &self.slots[(pos as usize) & Self::MASK];
            let seq = slot.seq.load(Ordering::Acquire);
            let diff = seq.wrapping_sub(pos) as i32;

            if diff == 0 {
                match self.write_idx.compare_exchange_weak(
                    pos,
                    pos.wrapping_add(1),
                    Ordering::Relaxed,
                    Ordering::Relaxed,
                ) {
                    Ok(_) => break slot,
                    Err(current) => pos = current,
                }
            } else if diff < 0 {
                // Slot still holds an undrained entry from the previous lap
                self.dropped.fetch_add(1, Ordering::Relaxed);
                return false;
            } else {
                pos = self.write_idx.load(Ordering::Relaxed);
            }
        };

        // SAFETY: winning the compare_exchange for `pos` while `seq == pos`
        // makes this producer the only writer; no consumer reads the slot
        // until `seq` is advanced below.
        unsafe {
            let entry = &mut *slot.entry.get();
            entry.timestamp_us = timestamp_us;
            entry.level = level;
            entry.fill(tag.as_bytes(), msg);
        }

        slot.seq.store(pos.wrapping_add(1), Ordering::Release);
        true
    }

    /// Drain next log entry.
    ///
    /// Returns `None` if no published entry is available. An entry whose
    /// producer is still writing is not returned yet.
    #[inline]
    pub fn drain(&self) -> Option<LogEntry> {
        let mut pos = self.read_idx.load(Ordering::Relaxed);
        let slot = loop {
            let slot = &self.slots[(pos as usize) & Self::MASK];
            let seq = slot.seq.load(Ordering::Acquire);
            let diff = seq.wrapping_sub(pos.wrapping_add(1)) as i32;

            if diff == 0 {
                match self.read_idx.compare_exchange_weak(
                    pos,
                    pos.wrapping_add(1),
                    Ordering::Relaxed,
                    Ordering::Relaxed,
                ) {
                    Ok(_) => break slot,
                    Err(current) => pos = current,
                }
            } else if diff < 0 {
                return None;
            } else {
                pos = self.read_idx.load(Ordering::Relaxed);
            }
        };

        // SAFETY: `seq == pos + 1` was observed with Acquire, so the
        // producer's writes are visible, and the compare_exchange made this
        // the only reader of the slot.
        let entry = unsafe { *slot.entry.get() };

        slot.seq.store(pos.wrapping_add(N as u32), Ordering::Release);
        Some(entry)
    }

    /// Get count of dropped messages.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Reset dropped counter (e.g., after reporting).
    #[inline]
    pub fn reset_dropped(&self) {
        self.dropped.store(0, Ordering::Relaxed);
    }

    /// Number of claimed positions not yet drained (includes entries still
    /// being written).
    #[inline]
    pub fn pending(&self) -> u32 {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);
        write.wrapping_sub(read)
    }
}

impl<const N: usize> Default for LogStream<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-tag level table with a default for unlisted tags.
///
/// Mirrors `esp_log_level_set` semantics: setting `*` replaces the default
/// and forgets every per-tag override.
pub struct TagLevels<const N: usize = 8> {
    default: LogLevel,
    tags: [[u8; MAX_LEVEL_TAG_LEN]; N],
    tag_lens: [u8; N],
    levels: [LogLevel; N],
    count: usize,
}

impl<const N: usize> TagLevels<N> {
    pub const fn new(default: LogLevel) -> Self {
        Self {
            default,
            tags: [[0; MAX_LEVEL_TAG_LEN]; N],
            tag_lens: [0; N],
            levels: [LogLevel::Info; N],
            count: 0,
        }
    }

    /// Set the level for `tag`, or for everything when `tag` is `*`.
    ///
    /// Returns `false` if the tag is too long or the table is full.
    pub fn set(&mut self, tag: &str, level: LogLevel) -> bool {
        if tag == "*" {
            self.default = level;
            self.count = 0;
            return true;
        }

        if tag.is_empty() || tag.len() > MAX_LEVEL_TAG_LEN {
            return false;
        }

        if let Some(i) = self.position(tag) {
            self.levels[i] = level;
            return true;
        }

        if self.count == N {
            return false;
        }

        let i = self.count;
        self.tags[i][..tag.len()].copy_from_slice(tag.as_bytes());
        self.tag_lens[i] = tag.len() as u8;
        self.levels[i] = level;
        self.count += 1;
        true
    }

    /// Effective level for `tag`.
    pub fn get(&self, tag: &str) -> LogLevel {
        self.position(tag)
            .map(|i| self.levels[i])
            .unwrap_or(self.default)
    }

    pub fn default_level(&self) -> LogLevel {
        self.default
    }

    /// Number of per-tag overrides.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn position(&self, tag: &str) -> Option<usize> {
        (0..self.count).find(|&i| &self.tags[i][..self.tag_lens[i] as usize] == tag.as_bytes())
    }
}

/// Format a message into a buffer.
///
/// Returns the number of bytes written; output past the end is discarded.
#[inline]
pub fn format_to_buffer(buf: &mut [u8], args: core::fmt::Arguments<'_>) -> usize {
    let mut writer = BufWriter { buf, pos: 0 };
    let _ = core::fmt::write(&mut writer, args);
    writer.pos
}

/// Truncating `fmt::Write` over a byte slice.
pub(crate) struct BufWriter<'a> {
    pub(crate) buf: &'a mut [u8],
    pub(crate) pos: usize,
}

impl core::fmt::Write for BufWriter<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let bytes = s.as_bytes();
        let remaining = self.buf.len() - self.pos;
        let to_write = bytes.len().min(remaining);
        self.buf[self.pos..self.pos + to_write].copy_from_slice(&bytes[..to_write]);
        self.pos += to_write;
        Ok(())
    }
}

/// Log into a stream without allocating.
///
/// # Example
///
/// ```ignore
/// con_log!(LogLevel::Info, CONSOLE_LOG, now_us, "console", "registered {}", n);
/// ```
#[macro_export]
macro_rules! con_log {
    ($level:expr, $stream:expr, $timestamp:expr, $tag:expr, $($arg:tt)*) => {{
        let level = $level;
        if $stream.enabled(level) {
            let mut buf = [0u8; $crate::logging::MAX_MSG_LEN];
            let len = $crate::logging::format_to_buffer(&mut buf, format_args!($($arg)*));
            $stream.push($timestamp, level, $tag, &buf[..len]);
        }
    }};
}

#[macro_export]
macro_rules! con_error {
    ($stream:expr, $timestamp:expr, $tag:expr, $($arg:tt)*) => {
        $crate::con_log!($crate::logging::LogLevel::Error, $stream, $timestamp, $tag, $($arg)*)
    };
}

#[macro_export]
macro_rules! con_warn {
    ($stream:expr, $timestamp:expr, $tag:expr, $($arg:tt)*) => {
        $crate::con_log!($crate::logging::LogLevel::Warn, $stream, $timestamp, $tag, $($arg)*)
    };
}

#[macro_export]
macro_rules! con_info {
    ($stream:expr, $timestamp:expr, $tag:expr, $($arg:tt)*) => {
        $crate::con_log!($crate::logging::LogLevel::Info, $stream, $timestamp, $tag, $($arg)*)
    };
}

#[macro_export]
macro_rules! con_debug {
    ($stream:expr, $timestamp:expr, $tag:expr, $($arg:tt)*) => {
        $crate::con_log!($crate::logging::LogLevel::Debug, $stream, $timestamp, $tag, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_stream_basic() {
        let stream = LogStream::<16>::new();

        assert!(stream.push(1000, LogLevel::Info, "console", b"test message"));
        assert_eq!(stream.pending(), 1);

        let entry = stream.drain().unwrap();
        assert_eq!(entry.timestamp_us, 1000);
        assert_eq!(entry.level, LogLevel::Info);
        assert_eq!(entry.tag(), "console");
        assert_eq!(entry.message(), b"test message");

        assert!(stream.drain().is_none());
    }

    #[test]
    fn test_log_stream_full() {
        let stream = LogStream::<4>::new();

        assert!(stream.push(1, LogLevel::Info, "t", b"1"));
        assert!(stream.push(2, LogLevel::Info, "t", b"2"));
        assert!(stream.push(3, LogLevel::Info, "t", b"3"));
        assert!(stream.push(4, LogLevel::Info, "t", b"4"));

        assert!(!stream.push(5, LogLevel::Info, "t", b"5"));
        assert_eq!(stream.dropped(), 1);

        stream.drain();
        assert!(stream.push(6, LogLevel::Info, "t", b"6"));
    }

    #[test]
    fn test_threshold_filters_without_counting_drops() {
        let stream = LogStream::<4>::new();

        assert!(!stream.push(1, LogLevel::Debug, "t", b"quiet"));
        assert_eq!(stream.pending(), 0);
        assert_eq!(stream.dropped(), 0);

        stream.set_level(LogLevel::Verbose);
        assert!(stream.push(2, LogLevel::Debug, "t", b"loud"));
        assert_eq!(stream.level(), LogLevel::Verbose);
    }

    #[test]
    fn test_entry_truncates_tag_and_message() {
        let long = [b'x'; MAX_MSG_LEN + 10];
        let entry = LogEntry::new(0, LogLevel::Warn, "a_really_long_component_tag", &long);
        assert_eq!(entry.tag().len(), MAX_TAG_LEN);
        assert_eq!(entry.message().len(), MAX_MSG_LEN);
    }

    #[test]
    fn test_format_to_buffer() {
        let mut buf = [0u8; 32];
        let len = format_to_buffer(&mut buf, format_args!("Hello {}", 42));
        assert_eq!(&buf[..len], b"Hello 42");
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(LogLevel::parse("e"), Some(LogLevel::Error));
        assert_eq!(LogLevel::parse("WARNING"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("Info"), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("d"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("V"), Some(LogLevel::Verbose));
        assert_eq!(LogLevel::parse("bogus"), None);
        assert_eq!(LogLevel::parse(""), None);
        assert_eq!(LogLevel::parse("none"), None);
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Error < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Verbose);
    }

    #[test]
    fn test_tag_levels_override_and_wildcard() {
        let mut levels = TagLevels::<2>::new(LogLevel::Info);

        assert!(levels.set("wifi", LogLevel::Debug));
        assert_eq!(levels.get("wifi"), LogLevel::Debug);
        assert_eq!(levels.get("nvs"), LogLevel::Info);

        assert!(levels.set("nvs", LogLevel::Error));
        assert!(!levels.set("http", LogLevel::Warn), "table holds two tags");
        assert!(levels.set("wifi", LogLevel::Warn), "existing tag is updated in place");

        assert!(levels.set("*", LogLevel::Verbose));
        assert!(levels.is_empty());

        // Tags are not limited to the log entry's display width
        assert!(levels.set("esp_netif_handlers", LogLevel::Debug));
        assert_eq!(levels.get("esp_netif_handlers"), LogLevel::Debug);
        assert!(!levels.set(&"x".repeat(MAX_LEVEL_TAG_LEN + 1), LogLevel::Debug));
        assert_eq!(levels.get("wifi"), LogLevel::Verbose);
    }

    #[test]
    fn test_macro_respects_threshold() {
        let stream = LogStream::<8>::new();
        crate::con_debug!(stream, 1, "console", "hidden {}", 1);
        crate::con_warn!(stream, 2, "console", "shown {}", 2);

        let entry = stream.drain().unwrap();
        assert_eq!(entry.level, LogLevel::Warn);
        assert_eq!(entry.message(), b"shown 2");
        assert!(stream.drain().is_none());
    }

    #[test]
    fn test_multiple_producers() {
        use std::sync::Arc;
        use std::thread;

        let stream = Arc::new(LogStream::<64>::new());
        let mut handles = vec![];

        for i in 0..4 {
            let stream = Arc::clone(&stream);
            handles.push(thread::spawn(move || {
                for j in 0..10 {
                    let msg = format!("Thread {} msg {}", i, j);
                    stream.push(j as i64, LogLevel::Info, "t", msg.as_bytes());
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let mut count = 0;
        while stream.drain().is_some() {
            count += 1;
        }
        assert_eq!(count + stream.dropped(), 40);
    }

    #[test]
    fn test_drain_while_producing() {
        use std::sync::atomic::AtomicBool;
        use std::sync::Arc;
        use std::thread;

        const PRODUCERS: i64 = 4;
        const PER_PRODUCER: i64 = 2000;

        let stream = Arc::new(LogStream::<8>::new());
        let done = Arc::new(AtomicBool::new(false));

        let mut handles = vec![];
        for p in 0..PRODUCERS {
            let stream = Arc::clone(&stream);
            handles.push(thread::spawn(move || {
                for j in 0..PER_PRODUCER {
                    let ts = p * PER_PRODUCER + j;
                    // Message mirrors the timestamp so a half-written slot shows up
                    let msg = format!("ts={:08}", ts);
                    stream.push(ts, LogLevel::Info, "prod", msg.as_bytes());
                }
            }));
        }

        let consumer = {
            let stream = Arc::clone(&stream);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut count = 0u32;
                loop {
                    let finished = done.load(Ordering::Acquire);
                    while let Some(entry) = stream.drain() {
                        let expected = format!("ts={:08}", entry.timestamp_us);
                        assert_eq!(entry.message(), expected.as_bytes());
                        assert_eq!(entry.tag(), "prod");
                        count += 1;
                    }
                    if finished {
                        return count;
                    }
                    thread::yield_now();
                }
            })
        };

        for handle in handles {
            handle.join().unwrap();
        }
        done.store(true, Ordering::Release);
        let count = consumer.join().unwrap();

        assert_eq!(count + stream.dropped(), (PRODUCERS * PER_PRODUCER) as u32);
        assert_eq!(stream.pending(), 0);
    }

    #[test]
    fn test_slot_reused_after_drain() {
        let stream = LogStream::<2>::new();
        for round in 0..5 {
            assert!(stream.push(round, LogLevel::Info, "t", b"a"));
            assert!(stream.push(round, LogLevel::Info, "t", b"b"));
            assert!(!stream.push(round, LogLevel::Info, "t", b"c"));
            assert_eq!(stream.drain().unwrap().message(), b"a");
            assert_eq!(stream.drain().unwrap().message(), b"b");
            assert!(stream.drain().is_none());
        }
        assert_eq!(stream.dropped(), 5);
    }
}

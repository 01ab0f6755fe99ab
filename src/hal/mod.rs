//! Hardware Abstraction Layer for the service console.
//!
//! Handlers only see the [`Device`] trait. On ESP-IDF it is backed by
//! [`esp::EspDevice`]; elsewhere [`sim::SimDevice`] stands in.

#[cfg(target_os = "espidf")]
pub mod esp;
pub mod sim;

#[cfg(target_os = "espidf")]
pub use esp::EspDevice;
pub use sim::SimDevice;

use crate::console::ConsoleError;
use crate::logging::LogLevel;

/// Chip identification summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChipInfo {
    pub cores: u8,
    /// `CHIP_FEATURE_*` bitmask.
    pub features: u32,
    pub revision: u16,
}

/// Heap statistics for 8-bit capable memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeapStats {
    pub free: usize,
    pub min_free: usize,
    pub largest_block: usize,
}

/// RTOS task summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskStats {
    pub count: u32,
    /// Stack high-water mark of the calling task, in words.
    /// `None` when the firmware lacks that instrumentation.
    pub stack_hwm_words: Option<u32>,
}

/// Device facilities the built-in commands query or drive.
pub trait Device {
    /// Time since boot.
    fn uptime_us(&self) -> i64;

    /// Raw `esp_reset_reason_t` code. See [`reset_reason_name`].
    fn reset_reason(&self) -> u32;

    fn chip_info(&self) -> ChipInfo;

    fn heap_stats(&self) -> HeapStats;

    fn task_stats(&self) -> TaskStats;

    /// Apply `level` to `tag`, or to every tag when `tag` is `*`.
    fn set_log_level(&mut self, tag: &str, level: LogLevel) -> Result<(), ConsoleError>;

    /// Restart the device. On hardware this does not return.
    fn restart(&mut self);
}

/// Reset reason codes as numbered by ESP-IDF.
const RESET_REASONS: &[(u32, &str)] = &[
    (0, "unknown"),
    (1, "poweron"),
    (2, "ext"),
    (3, "sw"),
    (4, "panic"),
    (5, "int_wdt"),
    (6, "task_wdt"),
    (7, "wdt"),
    (8, "deepsleep"),
    (9, "brownout"),
    (10, "sdio"),
];

/// Name of a reset reason code; unmapped codes are `"other"`.
pub fn reset_reason_name(code: u32) -> &'static str {
    RESET_REASONS
        .iter()
        .find(|&&(c, _)| c == code)
        .map(|&(_, name)| name)
        .unwrap_or("other")
}

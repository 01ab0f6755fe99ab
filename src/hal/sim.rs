//! Simulated device for host builds and tests.

use super::{ChipInfo, Device, HeapStats, TaskStats};
use crate::console::ConsoleError;
use crate::logging::{LogLevel, TagLevels, MAX_LEVEL_TAG_LEN};

/// Deterministic stand-in for an ESP32.
///
/// Fields are public so tests can shape the values each command reports.
pub struct SimDevice {
    pub uptime_us: i64,
    pub reset_reason: u32,
    pub chip: ChipInfo,
    pub heap: HeapStats,
    pub tasks: TaskStats,
    /// Levels applied through `set_log_level`.
    pub log_levels: TagLevels,
    /// Number of restart requests seen.
    pub restarts: u32,
}

impl SimDevice {
    pub const fn new() -> Self {
        Self {
            uptime_us: 1_500_000,
            reset_reason: 1,
            chip: ChipInfo { cores: 2, features: 0x12, revision: 3 },
            heap: HeapStats { free: 262_144, min_free: 200_000, largest_block: 131_072 },
            tasks: TaskStats { count: 1, stack_hwm_words: None },
            log_levels: TagLevels::new(LogLevel::Info),
            restarts: 0,
        }
    }
}

impl Default for SimDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for SimDevice {
    fn uptime_us(&self) -> i64 {
        self.uptime_us
    }

    fn reset_reason(&self) -> u32 {
        self.reset_reason
    }

    fn chip_info(&self) -> ChipInfo {
        self.chip
    }

    fn heap_stats(&self) -> HeapStats {
        self.heap
    }

    fn task_stats(&self) -> TaskStats {
        self.tasks
    }

    fn set_log_level(&mut self, tag: &str, level: LogLevel) -> Result<(), ConsoleError> {
        if tag.is_empty() || tag.len() > MAX_LEVEL_TAG_LEN {
            return Err(ConsoleError::Usage);
        }
        if self.log_levels.set(tag, level) {
            Ok(())
        } else {
            Err(ConsoleError::TableFull)
        }
    }

    fn restart(&mut self) {
        self.restarts += 1;
    }
}

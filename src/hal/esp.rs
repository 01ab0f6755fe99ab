//! ESP-IDF backed device.

use esp_idf_svc::sys;

use super::{ChipInfo, Device, HeapStats, TaskStats};
use crate::console::ConsoleError;
use crate::console::line_buffer::LINE_SIZE;
use crate::logging::LogLevel;

/// Device queries through the esp-idf-sys bindings.
pub struct EspDevice {
    _private: (),
}

impl EspDevice {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Default for EspDevice {
    fn default() -> Self {
        Self::new()
    }
}

fn esp_level(level: LogLevel) -> sys::esp_log_level_t {
    match level {
        LogLevel::Error => sys::esp_log_level_t_ESP_LOG_ERROR,
        LogLevel::Warn => sys::esp_log_level_t_ESP_LOG_WARN,
        LogLevel::Info => sys::esp_log_level_t_ESP_LOG_INFO,
        LogLevel::Debug => sys::esp_log_level_t_ESP_LOG_DEBUG,
        LogLevel::Verbose => sys::esp_log_level_t_ESP_LOG_VERBOSE,
    }
}

impl Device for EspDevice {
    fn uptime_us(&self) -> i64 {
        unsafe { sys::esp_timer_get_time() }
    }

    fn reset_reason(&self) -> u32 {
        unsafe { sys::esp_reset_reason() as u32 }
    }

    fn chip_info(&self) -> ChipInfo {
        let mut info = sys::esp_chip_info_t::default();
        // SAFETY: esp_chip_info only writes into the provided struct
        unsafe { sys::esp_chip_info(&mut info) };

        ChipInfo {
            cores: info.cores,
            features: info.features,
            revision: info.revision,
        }
    }

    fn heap_stats(&self) -> HeapStats {
        let caps = sys::MALLOC_CAP_8BIT;
        unsafe {
            HeapStats {
                free: sys::heap_caps_get_free_size(caps) as usize,
                min_free: sys::heap_caps_get_minimum_free_size(caps) as usize,
                largest_block: sys::heap_caps_get_largest_free_block(caps) as usize,
            }
        }
    }

    fn task_stats(&self) -> TaskStats {
        let count = unsafe { sys::uxTaskGetNumberOfTasks() } as u32;

        #[cfg(feature = "stack-hwm")]
        let stack_hwm_words = Some(unsafe { sys::uxTaskGetStackHighWaterMark(core::ptr::null_mut()) } as u32);
        #[cfg(not(feature = "stack-hwm"))]
        let stack_hwm_words = None;

        TaskStats { count, stack_hwm_words }
    }

    fn set_log_level(&mut self, tag: &str, level: LogLevel) -> Result<(), ConsoleError> {
        // A token never outgrows the input line
        if tag.is_empty() || tag.len() > LINE_SIZE {
            return Err(ConsoleError::Usage);
        }

        // esp_log_level_set copies the tag, a stack C string is enough
        let mut c_tag = [0u8; LINE_SIZE + 1];
        c_tag[..tag.len()].copy_from_slice(tag.as_bytes());

        unsafe { sys::esp_log_level_set(c_tag.as_ptr() as *const _, esp_level(level)) };
        Ok(())
    }

    fn restart(&mut self) {
        unsafe { sys::esp_restart() }
    }
}

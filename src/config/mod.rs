//! Module: config
//!
//! Purpose: Console configuration and persistent settings backends.
//!
//! - `ConsoleConfig`: prompt, banner, initial log threshold
//! - `nvs`: settings hooks over ESP-IDF NVS (device builds only)

#[cfg(target_os = "espidf")]
pub mod nvs;

use crate::logging::LogLevel;

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");

/// Console configuration.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleConfig {
    /// Printed before each input line.
    pub prompt: &'static str,
    /// Print the version banner at startup.
    pub banner: bool,
    /// Initial threshold of the console log stream.
    pub log_level: LogLevel,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prompt: "svc> ",
            banner: true,
            log_level: LogLevel::Info,
        }
    }
}

//! What a handler gets to work with.

use super::registry::CommandDescriptor;
use super::settings::SettingsHooks;
use super::ConsoleOutput;
use crate::hal::Device;
use crate::logging::LogStream;

/// Log tag for console diagnostics.
pub const TAG: &str = "console";

/// Collaborators lent to a handler for one invocation.
pub struct CommandContext<'a> {
    pub out: &'a mut dyn ConsoleOutput,
    pub device: &'a mut dyn Device,
    pub settings: &'a mut dyn SettingsHooks,
    /// Console diagnostics stream.
    pub log: &'a LogStream,
    /// Registered commands, for `help`.
    pub commands: &'a [CommandDescriptor],
}

impl CommandContext<'_> {
    /// Timestamp for log entries.
    pub fn now_us(&self) -> i64 {
        self.device.uptime_us()
    }
}

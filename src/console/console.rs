//! Console: command registry plus dispatcher

use core::fmt::Write;

use super::commands::register_builtins;
use super::context::{CommandContext, TAG};
use super::error::STATUS_OK;
use super::parser::Args;
use super::registry::{CommandDescriptor, Registry, DEFAULT_CAPACITY};
use super::settings::SettingsHooks;
use super::{ConsoleError, ConsoleOutput};
use crate::config::{ConsoleConfig, VERSION};
use crate::hal::Device;
use crate::logging::LogStream;
use crate::{con_debug, con_error, con_info, con_warn};

/// Service console.
///
/// Owns the command table and borrows the device, the settings backend and
/// a log stream for its whole life. One line is dispatched at a time.
pub struct Console<'a, const N: usize = DEFAULT_CAPACITY> {
    registry: Registry<N>,
    device: &'a mut dyn Device,
    settings: &'a mut dyn SettingsHooks,
    log: &'a LogStream,
    config: ConsoleConfig,
}

impl<'a, const N: usize> Console<'a, N> {
    /// Create console with an empty command table
    pub fn new(
        device: &'a mut dyn Device,
        settings: &'a mut dyn SettingsHooks,
        log: &'a LogStream,
        config: ConsoleConfig,
    ) -> Self {
        log.set_level(config.log_level);
        Self {
            registry: Registry::new(),
            device,
            settings,
            log,
            config,
        }
    }

    /// Create console with `help` and the service commands registered.
    pub fn with_builtins(
        device: &'a mut dyn Device,
        settings: &'a mut dyn SettingsHooks,
        log: &'a LogStream,
        config: ConsoleConfig,
    ) -> Result<Self, ConsoleError> {
        let mut console = Self::new(device, settings, log, config);

        if let Err(e) = register_builtins(&mut console.registry) {
            con_error!(console.log, console.device.uptime_us(), TAG, "registration failed: {}", e);
            return Err(e);
        }

        con_info!(
            console.log,
            console.device.uptime_us(),
            TAG,
            "service terminal commands registered ({})",
            console.registry.len()
        );
        Ok(console)
    }

    /// Add a command. Meant for startup, before input is accepted.
    pub fn register(&mut self, descriptor: CommandDescriptor) -> Result<(), ConsoleError> {
        self.registry.register(descriptor).inspect_err(|e| {
            con_error!(self.log, self.device.uptime_us(), TAG, "register '{}': {}", descriptor.name, e);
        })
    }

    pub fn registry(&self) -> &Registry<N> {
        &self.registry
    }

    /// Run one tokenized line and return its exit status.
    ///
    /// Unknown commands print an error and return non-zero without running
    /// anything. Otherwise the handler's status is returned unchanged.
    pub fn dispatch(&mut self, args: &Args<'_>, out: &mut dyn ConsoleOutput) -> i32 {
        if args.is_empty() {
            return STATUS_OK; // Empty line, do nothing
        }

        let name = args.command();
        let now = self.device.uptime_us();

        let handler = match self.registry.lookup(name) {
            Ok(CommandDescriptor { handler: Some(h), .. }) => *h,
            _ => {
                let _ = writeln!(out, "{} '{}'", ConsoleError::NotFound, name);
                con_warn!(self.log, now, TAG, "unknown command '{}'", name);
                return ConsoleError::NotFound.status();
            }
        };

        con_debug!(self.log, now, TAG, "dispatch {} argc={}", name, args.argc());

        let mut ctx = CommandContext {
            out,
            device: &mut *self.device,
            settings: &mut *self.settings,
            log: self.log,
            commands: self.registry.as_slice(),
        };
        let status = handler(args, &mut ctx);

        if status != STATUS_OK {
            con_warn!(self.log, self.device.uptime_us(), TAG, "{} -> status {}", name, status);
        }
        status
    }

    /// Tokenize and dispatch. `None` for a blank line.
    pub fn dispatch_line(&mut self, line: &str, out: &mut dyn ConsoleOutput) -> Option<i32> {
        let args = Args::parse(line);
        if args.is_empty() {
            return None;
        }
        Some(self.dispatch(&args, out))
    }

    /// Print the prompt
    pub fn print_prompt(&self, out: &mut dyn Write) {
        let _ = write!(out, "{}", self.config.prompt);
    }

    /// Print welcome banner
    pub fn print_banner(&self, out: &mut dyn Write) {
        if self.config.banner {
            let _ = writeln!(out, "\r\n{}", VERSION);
            let _ = writeln!(out, "Type 'help' for commands.\r");
        }
        self.print_prompt(out);
    }
}

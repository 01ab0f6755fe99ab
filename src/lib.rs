//! # DeviceConsole
//!
//! Service terminal for ESP32 firmware: the recovery and debug surface.
//!
//! ## Architecture
//!
//! A line flows front end → [`console::Console::dispatch`] → handler:
//! - The registry is a fixed table built once at startup
//! - Handlers validate their own arguments, then do one bounded unit of work
//! - Device facilities sit behind [`hal::Device`], storage behind
//!   [`console::SettingsHooks`]; neither is known to the dispatcher
//! - No allocation, no panics on input; non-zero status means "failed"

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod console;
pub mod hal;
pub mod log_globals;
pub mod log_sink;
pub mod logging;

pub use config::ConsoleConfig;
pub use console::{Args, CommandDescriptor, Console, ConsoleError, ConsoleOutput, SettingsHooks};
pub use hal::Device;
pub use log_globals::CONSOLE_LOG;
pub use logging::{LogLevel, LogStream};

//! Service console for diagnostics and recovery
//!
//! Fixed command table, one synchronous dispatch per line.
//! Zero heap allocation - all static buffers.

pub mod commands;
#[allow(clippy::module_inception)]
pub mod console;
pub mod context;
pub mod error;
pub mod line_buffer;
pub mod output;
pub mod parser;
pub mod registry;
pub mod settings;

pub use commands::{register_builtins, BUILTINS, HELP};
pub use console::Console;
pub use context::CommandContext;
pub use error::{ConsoleError, STATUS_FAILED, STATUS_OK};
pub use line_buffer::{LineBuffer, LineError};
pub use output::ConsoleOutput;
pub use parser::Args;
pub use registry::{CommandDescriptor, Handler, Registry};
pub use settings::{MemorySettings, NoSettings, SettingsHooks};

//! Command descriptors and the fixed-capacity registry

use super::context::CommandContext;
use super::parser::Args;
use super::ConsoleError;

/// Default number of registry slots.
pub const DEFAULT_CAPACITY: usize = 16;

/// Command handler: validates its own arguments, returns an exit status.
pub type Handler = fn(&Args<'_>, &mut CommandContext<'_>) -> i32;

/// Command descriptor
#[derive(Clone, Copy)]
pub struct CommandDescriptor {
    pub name: &'static str,
    pub help: &'static str,
    pub handler: Option<Handler>,
}

impl CommandDescriptor {
    const EMPTY: Self = Self { name: "", help: "", handler: None };

    pub const fn new(name: &'static str, help: &'static str, handler: Handler) -> Self {
        Self { name, help, handler: Some(handler) }
    }

    fn is_valid(&self) -> bool {
        !self.name.is_empty()
            && !self.name.chars().any(char::is_whitespace)
            && self.handler.is_some()
    }
}

impl core::fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("help", &self.help)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}

/// Registered commands in registration order.
///
/// Registration is expected once, at startup, before input is accepted.
pub struct Registry<const N: usize = DEFAULT_CAPACITY> {
    entries: [CommandDescriptor; N],
    len: usize,
}

impl<const N: usize> Registry<N> {
    /// Create empty registry
    pub const fn new() -> Self {
        Self {
            entries: [CommandDescriptor::EMPTY; N],
            len: 0,
        }
    }

    /// Add a command.
    ///
    /// Fails without modifying the registry if the descriptor is invalid,
    /// the name is taken, or every slot is used.
    pub fn register(&mut self, descriptor: CommandDescriptor) -> Result<(), ConsoleError> {
        if !descriptor.is_valid() {
            return Err(ConsoleError::InvalidDescriptor);
        }
        if self.lookup(descriptor.name).is_ok() {
            return Err(ConsoleError::DuplicateCommand);
        }
        if self.len == N {
            return Err(ConsoleError::TableFull);
        }

        self.entries[self.len] = descriptor;
        self.len += 1;
        Ok(())
    }

    /// Find a command by exact name
    pub fn lookup(&self, name: &str) -> Result<&CommandDescriptor, ConsoleError> {
        self.as_slice()
            .iter()
            .find(|c| c.name == name)
            .ok_or(ConsoleError::NotFound)
    }

    /// Commands in registration order. Clone the iterator to walk again.
    pub fn list(&self) -> impl Iterator<Item = &CommandDescriptor> + Clone {
        self.as_slice().iter()
    }

    /// Get all command names
    pub fn names(&self) -> impl Iterator<Item = &'static str> + Clone + '_ {
        self.list().map(|c| c.name)
    }

    pub fn as_slice(&self) -> &[CommandDescriptor] {
        &self.entries[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for Registry<N> {
    fn default() -> Self {
        Self::new()
    }
}

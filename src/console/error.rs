//! Console error types

/// Status returned by a command that succeeded.
pub const STATUS_OK: i32 = 0;

/// Status returned for usage errors and unknown commands.
pub const STATUS_FAILED: i32 = 1;

/// Console error with code and message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    /// E01: A command with this name is already registered
    DuplicateCommand,
    /// E02: Descriptor has an empty/invalid name or no handler
    InvalidDescriptor,
    /// E03: Unknown command
    NotFound,
    /// E04: Argument count or content mismatch
    Usage,
    /// E05: Fixed-capacity table exhausted
    TableFull,
    /// E06: Settings storage error
    Storage,
}

impl ConsoleError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateCommand => "E01",
            Self::InvalidDescriptor => "E02",
            Self::NotFound => "E03",
            Self::Usage => "E04",
            Self::TableFull => "E05",
            Self::Storage => "E06",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::DuplicateCommand => "duplicate command",
            Self::InvalidDescriptor => "invalid descriptor",
            Self::NotFound => "unknown command",
            Self::Usage => "usage error",
            Self::TableFull => "table full",
            Self::Storage => "storage error",
        }
    }

    /// Exit status reported to the front end.
    pub fn status(&self) -> i32 {
        STATUS_FAILED
    }
}

impl core::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

//! Custom error types with exit codes

use thiserror::Error;

/// Malformed command schema, raised while building a [`CommandSchema`]
///
/// These are programming-time contract violations: the dispatcher never
/// catches them and the host aborts before any invocation.
///
/// [`CommandSchema`]: crate::command::CommandSchema
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SchemaError {
    /// Command name is empty
    #[error("Command name cannot be empty")]
    EmptyCommandName,

    /// Option name is empty or contains characters outside `[A-Za-z0-9_-]`
    #[error("Invalid option name '{option}'")]
    InvalidOptionName { option: String },

    /// Short alias is not exactly one character
    #[error("Short name of option --{option} must be a single character, got '{short_name}'")]
    InvalidShortName { option: String, short_name: String },

    /// Required option also declares a default
    #[error("Required option --{option} cannot have a default value")]
    RequiredWithDefault { option: String },

    /// Default does not fit the declared value type
    #[error("Default value {value} of option --{option} is not {expected}")]
    DefaultTypeMismatch {
        option: String,
        expected: String,
        value: String,
    },

    /// Same long name declared twice
    #[error("Option --{option} is declared more than once")]
    DuplicateOption { option: String },

    /// Same short alias used by two options
    #[error("Short name -{short_name} is used by both --{first} and --{second}")]
    DuplicateShortName {
        short_name: String,
        first: String,
        second: String,
    },

    /// Collides with `help`, `version`, `format`, `-h` or `-v`
    #[error("'{name}' is reserved and cannot be declared by a command")]
    ReservedName { name: String },
}

/// Failure raised while running a single invocation
///
/// Every variant is caught at the dispatcher boundary and turned into a
/// [`CommandResult`](crate::command::CommandResult).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvocationError {
    /// A required option was not supplied
    #[error("Option --{name} is required")]
    MissingRequiredOption { name: String },

    /// A supplied value does not match the declared type
    #[error("Option --{name} expects {expected}, got '{value}'")]
    InvalidOptionValue {
        name: String,
        expected: String,
        value: String,
    },

    /// Action answered with a 4xx status
    #[error("{rendered}")]
    ActionClientError { code: u16, rendered: String },

    /// Action answered with a 5xx status
    #[error("{rendered}")]
    ActionServerError { code: u16, rendered: String },

    /// Action raised instead of answering
    #[error("{kind}({message})")]
    UnexpectedFailure { kind: String, message: String },
}

impl InvocationError {
    /// Get the process exit code for this error
    #[must_use]
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        match *self {
            Self::MissingRequiredOption { .. }
            | Self::InvalidOptionValue { .. }
            | Self::ActionClientError { .. } => 1,
            Self::ActionServerError { .. } | Self::UnexpectedFailure { .. } => 2,
        }
    }

    /// Render the user-visible message
    ///
    /// Status failures print the action's structured body as-is, everything
    /// else is a one-line `Error: ...`.
    #[must_use]
    #[inline]
    pub fn render(&self) -> String {
        match self {
            Self::ActionClientError { rendered, .. } | Self::ActionServerError { rendered, .. } => {
                rendered.clone()
            }
            _ => format!("Error: {self}"),
        }
    }

    /// Create a missing required option error
    #[inline]
    pub fn missing_option<S: Into<String>>(name: S) -> Self {
        Self::MissingRequiredOption { name: name.into() }
    }

    /// Create an unexpected failure error
    #[inline]
    pub fn unexpected<K: Into<String>, M: Into<String>>(kind: K, message: M) -> Self {
        Self::UnexpectedFailure {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

/// Host-level error for the `resource-cli` binary
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CliError {
    /// Manifest missing, unreadable or invalid
    #[error("Manifest error: {message}")]
    Manifest { message: String },

    /// No command with that name in the manifest
    #[error("Command not found: {name}")]
    CommandNotFound { name: String },

    /// Filesystem or process error outside of an invocation
    #[error("I/O error: {message}")]
    Io { message: String },
}

impl CliError {
    /// Get the appropriate exit code for this error type
    #[must_use]
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        match *self {
            Self::Manifest { .. } | Self::Io { .. } => 1,
            Self::CommandNotFound { .. } => 127,
        }
    }

    /// Create a manifest error
    #[inline]
    pub fn manifest<S: Into<String>>(message: S) -> Self {
        Self::Manifest {
            message: message.into(),
        }
    }

    /// Create a command not found error
    #[inline]
    pub fn command_not_found<S: Into<String>>(name: S) -> Self {
        Self::CommandNotFound { name: name.into() }
    }

    /// Create an I/O error
    #[inline]
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
        }
    }
}

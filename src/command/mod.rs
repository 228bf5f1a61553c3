//! Command module
//!
//! Schema, help rendering and the dispatcher that turns an argument vector
//! into a [`CommandResult`]

pub mod dispatch;
pub mod help;
pub mod schema;

use core::str::FromStr;

pub use dispatch::ResourceCommand;
pub use schema::{CommandSchema, CommandSchemaBuilder, OptionSpec, ValueType};

use crate::error::InvocationError;

/// Final message and exit code of one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub message: String,
    pub exit_code: i32,
}

impl CommandResult {
    #[must_use]
    #[inline]
    pub fn new<S: Into<String>>(message: S, exit_code: i32) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Result with exit code 0
    #[must_use]
    #[inline]
    pub fn success<S: Into<String>>(message: S) -> Self {
        Self::new(message, 0)
    }

    #[must_use]
    #[inline]
    pub const fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

impl From<InvocationError> for CommandResult {
    #[inline]
    fn from(err: InvocationError) -> Self {
        Self::new(err.render(), err.exit_code())
    }
}

/// Output format requested with `--format`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum OutputFormat {
    /// Selected output field when the schema names one
    #[default]
    Text,
    /// Full structured body
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {s}. Use 'text' or 'json'")),
        }
    }
}

//! Action boundary
//!
//! A command ultimately issues one request against a [`Resource`]: a verb, a
//! resource identifier and the bound parameters. The resource answers with an
//! [`ActionOutcome`] (status code plus ordered body) or raises an
//! [`ActionFailure`].

use core::fmt;
use core::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::error::InvocationError;

pub mod router;
pub mod shell;

pub use router::Router;
pub use shell::ShellResource;

/// Bound parameters, in schema order; `null` means no value
pub type Params = IndexMap<String, Value>;

/// Ordered response body
pub type Body = IndexMap<String, Value>;

/// Request verb understood by resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Verb {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl Verb {
    #[must_use]
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Patch => "patch",
            Self::Delete => "delete",
            Self::Head => "head",
            Self::Options => "options",
        }
    }
}

impl fmt::Display for Verb {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = String;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "post" => Ok(Self::Post),
            "put" => Ok(Self::Put),
            "patch" => Ok(Self::Patch),
            "delete" => Ok(Self::Delete),
            "head" => Ok(Self::Head),
            "options" => Ok(Self::Options),
            _ => Err(format!(
                "Invalid method: {s}. Use get, post, put, patch, delete, head or options"
            )),
        }
    }
}

/// Answer of a resource request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionOutcome {
    /// HTTP-like status: below 400 is success, 4xx client error, 5xx server error
    pub code: u16,
    pub body: Body,
}

impl ActionOutcome {
    #[must_use]
    #[inline]
    pub const fn new(code: u16, body: Body) -> Self {
        Self { code, body }
    }

    /// Successful (200) outcome
    #[must_use]
    #[inline]
    pub const fn ok(body: Body) -> Self {
        Self::new(200, body)
    }

    /// Build an outcome from `(field, value)` pairs
    #[must_use]
    pub fn from_fields<K, V, I>(code: u16, fields: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let body = fields
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self::new(code, body)
    }

    #[must_use]
    #[inline]
    pub const fn is_success(&self) -> bool {
        self.code < 400
    }

    #[must_use]
    #[inline]
    pub const fn is_server_error(&self) -> bool {
        self.code >= 500
    }

    /// Body field by name
    #[must_use]
    #[inline]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.body.get(name)
    }

    /// Full structured representation of the body
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be serialized
    #[inline]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.body)
    }
}

/// Failure raised by a resource instead of answering
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}({message})")]
pub struct ActionFailure {
    /// Short failure kind, e.g. `ResourceNotFound`
    pub kind: String,
    pub message: String,
}

impl ActionFailure {
    #[inline]
    pub fn new<K: Into<String>, M: Into<String>>(kind: K, message: M) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// No handler serves this verb and identifier
    #[must_use]
    pub fn not_found(verb: Verb, uri: &str) -> Self {
        Self::new("ResourceNotFound", format!("{verb} {uri}"))
    }
}

impl From<ActionFailure> for InvocationError {
    #[inline]
    fn from(failure: ActionFailure) -> Self {
        Self::UnexpectedFailure {
            kind: failure.kind,
            message: failure.message,
        }
    }
}

/// Capability invoked by a command
///
/// # Implementations
/// - [`Router`]: in-process handlers registered per verb and identifier
/// - [`ShellResource`]: shell commands declared in a manifest
pub trait Resource {
    /// Issue one request
    ///
    /// # Errors
    ///
    /// Returns an [`ActionFailure`] when the request cannot be answered at all.
    /// Status failures (4xx/5xx) are answers, not errors.
    fn request(&self, verb: Verb, uri: &str, params: &Params) -> Result<ActionOutcome, ActionFailure>;
}

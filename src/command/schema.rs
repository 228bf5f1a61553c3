//! Command and option schema
//!
//! A [`CommandSchema`] is built once, validated, and never changes
//! afterwards. Besides the declared options it carries getopt-style
//! short/long option strings derived at build time.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::SchemaError;
use crate::parser::OptionValue;
use crate::resource::Verb;

/// Version reported when a command does not declare one
pub const DEFAULT_VERSION: &str = "0.1.0";

/// Long names every command answers to
pub const RESERVED_LONG_NAMES: [&str; 3] = ["help", "version", "format"];

/// Short aliases every command answers to
pub const RESERVED_SHORT_NAMES: [char; 2] = ['h', 'v'];

const REQUIRED: &str = ":";
const OPTIONAL: &str = "::";

/// Declared type of an option value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ValueType {
    #[default]
    String,
    Integer,
    Number,
    Boolean,
}

impl ValueType {
    /// Human-readable expectation used in error messages
    #[must_use]
    #[inline]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::String => "a string",
            Self::Integer => "an integer",
            Self::Number => "a number",
            Self::Boolean => "a boolean",
        }
    }

    /// Coerce a parsed value, `None` when it does not fit
    ///
    /// A bare flag is boolean `true` for string and boolean options and
    /// invalid for numeric ones.
    #[must_use]
    pub fn coerce(self, value: &OptionValue) -> Option<Value> {
        let Some(text) = value.as_text() else {
            return match self {
                Self::String | Self::Boolean => Some(Value::Bool(true)),
                Self::Integer | Self::Number => None,
            };
        };

        match self {
            Self::String => Some(Value::String(text.to_owned())),
            Self::Integer => text.trim().parse::<i64>().ok().map(Value::from),
            Self::Number => {
                let text = text.trim();
                if let Ok(integer) = text.parse::<i64>() {
                    return Some(Value::from(integer));
                }
                text.parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
            }
            Self::Boolean => match text.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" => Some(Value::Bool(true)),
                "false" | "0" | "no" => Some(Value::Bool(false)),
                _ => None,
            },
        }
    }

    /// Check a declared default against this type, `None` when it does not fit
    ///
    /// Text defaults go through the same coercion as argv values. Scalar
    /// defaults of a string option are kept as their text.
    #[must_use]
    pub fn coerce_default(self, value: &Value) -> Option<Value> {
        match (self, value) {
            (_, Value::String(text)) => self.coerce(&OptionValue::Text(text.clone())),
            (Self::String, Value::Number(_) | Value::Bool(_)) => Some(Value::String(value.to_string())),
            (Self::Integer, Value::Number(number)) if number.is_i64() => Some(value.clone()),
            (Self::Number, Value::Number(_)) | (Self::Boolean, Value::Bool(_)) => Some(value.clone()),
            _ => None,
        }
    }
}

/// One declared option
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSpec {
    name: String,
    short_name: Option<String>,
    description: String,
    required: bool,
    default: Option<Value>,
    value_type: ValueType,
}

impl OptionSpec {
    /// Optional string option without alias or default
    #[must_use]
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            short_name: None,
            description: String::new(),
            required: false,
            default: None,
            value_type: ValueType::String,
        }
    }

    /// Set the short alias (builder pattern); checked when the schema is built
    #[must_use]
    pub fn with_short<S: Into<String>>(mut self, short_name: S) -> Self {
        self.short_name = Some(short_name.into());
        self
    }

    #[must_use]
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub const fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set the default value; `null` clears it
    #[must_use]
    pub fn with_default<V: Into<Value>>(mut self, default: V) -> Self {
        self.default = Some(default.into()).filter(|value| !value.is_null());
        self
    }

    #[must_use]
    pub const fn with_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    #[inline]
    pub fn short_name(&self) -> Option<&str> {
        self.short_name.as_deref()
    }

    #[must_use]
    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    #[inline]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    #[must_use]
    #[inline]
    pub const fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    #[must_use]
    #[inline]
    pub const fn value_type(&self) -> ValueType {
        self.value_type
    }

    const fn getopt_suffix(&self) -> &'static str {
        if self.required { REQUIRED } else { OPTIONAL }
    }

    /// Check the declaration and normalize the default to the declared type
    fn validated(mut self) -> Result<Self, SchemaError> {
        if !is_valid_option_name(&self.name) {
            return Err(SchemaError::InvalidOptionName {
                option: self.name.clone(),
            });
        }

        if RESERVED_LONG_NAMES.contains(&self.name.as_str()) {
            return Err(SchemaError::ReservedName {
                name: format!("--{}", self.name),
            });
        }

        if let Some(short_name) = self.short_name.as_deref() {
            let mut chars = short_name.chars();
            let (Some(first), None) = (chars.next(), chars.next()) else {
                return Err(SchemaError::InvalidShortName {
                    option: self.name.clone(),
                    short_name: short_name.to_owned(),
                });
            };

            if RESERVED_SHORT_NAMES.contains(&first) {
                return Err(SchemaError::ReservedName {
                    name: format!("-{first}"),
                });
            }
        }

        if self.required && self.default.is_some() {
            return Err(SchemaError::RequiredWithDefault {
                option: self.name.clone(),
            });
        }

        if let Some(default) = self.default.take() {
            let coerced = self.value_type.coerce_default(&default).ok_or_else(|| {
                SchemaError::DefaultTypeMismatch {
                    option: self.name.clone(),
                    expected: self.value_type.describe().to_owned(),
                    value: default.to_string(),
                }
            })?;
            self.default = Some(coerced);
        }

        Ok(self)
    }
}

/// `[A-Za-z][A-Za-z0-9_-]*`
fn is_valid_option_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Immutable description of one command
#[derive(Debug, Clone, PartialEq)]
pub struct CommandSchema {
    name: String,
    description: String,
    version: String,
    method: Verb,
    uri: String,
    output: String,
    options: IndexMap<String, OptionSpec>,
    short_options: String,
    long_options: Vec<String>,
}

impl CommandSchema {
    /// Start building a schema for the command `name`
    #[must_use]
    pub fn builder<S: Into<String>>(name: S) -> CommandSchemaBuilder {
        CommandSchemaBuilder::new(name)
    }

    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    #[inline]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Verb of the request issued by this command
    #[must_use]
    #[inline]
    pub const fn method(&self) -> Verb {
        self.method
    }

    /// Identifier of the resource the command targets
    #[must_use]
    #[inline]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Body field printed verbatim in text mode, `None` when unset
    #[must_use]
    #[inline]
    pub fn output(&self) -> Option<&str> {
        Some(self.output.as_str()).filter(|output| !output.is_empty())
    }

    /// Declared options in declaration order
    #[must_use]
    #[inline]
    pub const fn options(&self) -> &IndexMap<String, OptionSpec> {
        &self.options
    }

    #[must_use]
    #[inline]
    pub fn option(&self, name: &str) -> Option<&OptionSpec> {
        self.options.get(name)
    }

    /// getopt-style short option string, e.g. `hvn:l::`
    #[must_use]
    #[inline]
    pub fn short_options(&self) -> &str {
        &self.short_options
    }

    /// getopt-style long option names, e.g. `["help", "version", "format::", "name:"]`
    #[must_use]
    #[inline]
    pub fn long_options(&self) -> &[String] {
        &self.long_options
    }
}

/// Builder for [`CommandSchema`]
#[derive(Debug, Clone)]
#[must_use]
pub struct CommandSchemaBuilder {
    name: String,
    description: String,
    version: String,
    method: Verb,
    uri: String,
    output: String,
    options: Vec<OptionSpec>,
}

impl CommandSchemaBuilder {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            version: DEFAULT_VERSION.to_owned(),
            method: Verb::Get,
            uri: String::new(),
            output: String::new(),
            options: Vec::new(),
        }
    }

    pub fn description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    pub fn version<S: Into<String>>(mut self, version: S) -> Self {
        self.version = version.into();
        self
    }

    pub const fn method(mut self, method: Verb) -> Self {
        self.method = method;
        self
    }

    pub fn uri<S: Into<String>>(mut self, uri: S) -> Self {
        self.uri = uri.into();
        self
    }

    /// Body field to print in text mode; empty means always print JSON
    pub fn output<S: Into<String>>(mut self, output: S) -> Self {
        self.output = output.into();
        self
    }

    pub fn option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    /// Validate and freeze the schema
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The command name is empty
    /// - An option name is malformed, reserved or declared twice
    /// - A short alias is not exactly one character, reserved or reused
    /// - A required option declares a default
    pub fn build(self) -> Result<CommandSchema, SchemaError> {
        if self.name.trim().is_empty() {
            return Err(SchemaError::EmptyCommandName);
        }

        let mut options: IndexMap<String, OptionSpec> = IndexMap::new();
        for option in self.options {
            let option = option.validated()?;

            if options.contains_key(option.name()) {
                return Err(SchemaError::DuplicateOption {
                    option: option.name.clone(),
                });
            }

            if let Some(short_name) = option.short_name()
                && let Some(other) = options
                    .values()
                    .find(|other| other.short_name() == Some(short_name))
            {
                return Err(SchemaError::DuplicateShortName {
                    short_name: short_name.to_owned(),
                    first: other.name.clone(),
                    second: option.name.clone(),
                });
            }

            options.insert(option.name.clone(), option);
        }

        let short_options = build_short_options(&options);
        let long_options = build_long_options(&options);

        Ok(CommandSchema {
            name: self.name,
            description: self.description,
            version: self.version,
            method: self.method,
            uri: self.uri,
            output: self.output,
            options,
            short_options,
            long_options,
        })
    }
}

fn build_short_options(options: &IndexMap<String, OptionSpec>) -> String {
    let mut short_options = RESERVED_SHORT_NAMES.iter().collect::<String>();
    for option in options.values() {
        if let Some(short_name) = option.short_name() {
            short_options.push_str(short_name);
            short_options.push_str(option.getopt_suffix());
        }
    }
    short_options
}

fn build_long_options(options: &IndexMap<String, OptionSpec>) -> Vec<String> {
    let mut long_options = vec![
        "help".to_owned(),
        "version".to_owned(),
        format!("format{OPTIONAL}"),
    ];
    for option in options.values() {
        long_options.push(format!("{}{}", option.name, option.getopt_suffix()));
    }
    long_options
}

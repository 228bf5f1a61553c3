//! Command manifest module
//!
//! Handles YAML manifest parsing, JSON schema validation, and conversion of
//! manifest entries into [`CommandSchema`]s

pub mod schema;
pub mod validation;
pub mod yaml;

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::command::{CommandSchema, OptionSpec, ValueType};
use crate::error::{CliError, SchemaError};
use crate::resource::Verb;
use crate::system::System;

/// Top-level manifest structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Version for commands that do not declare one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Declared commands
    pub commands: Vec<CommandConfig>,
}

/// One command entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub method: Verb,
    pub uri: String,
    /// Body field printed in text mode
    #[serde(default)]
    pub output: String,
    /// Shell command serving `method` + `uri`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run: Option<String>,
    #[serde(default)]
    pub options: Vec<OptionConfig>,
}

/// One option entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, rename = "type")]
    pub value_type: ValueType,
}

impl Manifest {
    /// Load manifest from file
    pub fn load_from_file(system: &dyn System, path: &Path) -> anyhow::Result<Self> {
        yaml::load_manifest(system, path)
    }

    /// Validate manifest semantics beyond the JSON schema
    pub fn validate(&self) -> anyhow::Result<()> {
        validation::validate_manifest(self)
    }

    /// Command entry by name
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&CommandConfig> {
        self.commands.iter().find(|command| command.name == name)
    }

    /// Build the schema of the command `name`
    pub fn schema_for(&self, name: &str) -> anyhow::Result<CommandSchema> {
        let command = self
            .find(name)
            .ok_or_else(|| CliError::command_not_found(name))?;

        command
            .to_schema(self.version.as_deref())
            .map_err(|e| CliError::manifest(format!("Command '{name}': {e}")).into())
    }
}

impl CommandConfig {
    /// Convert to a validated schema; `default_version` applies when the entry has none
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] found in the entry
    pub fn to_schema(&self, default_version: Option<&str>) -> Result<CommandSchema, SchemaError> {
        let mut builder = CommandSchema::builder(self.name.as_str())
            .description(self.description.as_str())
            .method(self.method)
            .uri(self.uri.as_str())
            .output(self.output.as_str());

        if let Some(version) = self.version.as_deref().or(default_version) {
            builder = builder.version(version);
        }

        self.options
            .iter()
            .fold(builder, |builder, option| builder.option(option.to_spec()))
            .build()
    }
}

impl OptionConfig {
    #[must_use]
    pub fn to_spec(&self) -> OptionSpec {
        let mut spec = OptionSpec::new(self.name.as_str())
            .with_description(self.description.as_str())
            .with_required(self.required)
            .with_type(self.value_type);

        if let Some(short) = self.short.as_deref() {
            spec = spec.with_short(short);
        }
        if let Some(default) = self.default.as_ref() {
            spec = spec.with_default(default.clone());
        }

        spec
    }
}

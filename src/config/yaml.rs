//! YAML manifest loading and parsing

use std::path::Path;

use anyhow::{Context as _, Result};
use serde_json::Value;
use tracing::debug;

use crate::config::Manifest;
use crate::error::CliError;
use crate::system::System;

/// Load, check and parse a YAML manifest from file
///
/// The document is validated against the embedded JSON schema before it is
/// deserialized, so shape errors are reported against the raw YAML.
pub fn load_manifest(system: &dyn System, path: &Path) -> Result<Manifest> {
    if !system.is_file(path) {
        return Err(CliError::manifest(format!(
            "Manifest file not found: {}\n\
            Create a commands.yaml file or specify a different path with --manifest",
            path.display()
        ))
        .into());
    }

    let content = system
        .read_to_string(path)
        .with_context(|| format!("Failed to read manifest file: {}", path.display()))?;

    let manifest = parse_manifest(&content)
        .with_context(|| format!("Invalid manifest: {}", path.display()))?;

    debug!(
        "Loaded {} command(s) from {}",
        manifest.commands.len(),
        path.display()
    );

    Ok(manifest)
}

/// Parse and validate manifest text
pub fn parse_manifest(content: &str) -> Result<Manifest> {
    let value: Value = serde_yaml::from_str(content)
        .map_err(|e| CliError::manifest(format!("Failed to parse YAML: {e}")))?;

    crate::config::schema::validate_against_schema(&value)?;

    let manifest: Manifest = serde_json::from_value(value)
        .map_err(|e| CliError::manifest(format!("Failed to read manifest structure: {e}")))?;

    manifest.validate()?;

    Ok(manifest)
}

//! Manifest validation logic

use std::collections::{HashMap, HashSet};

use anyhow::{Result, anyhow};
use regex::Regex;

use crate::config::{CommandConfig, Manifest};
use crate::error::CliError;

/// Validate a complete manifest
///
/// # Errors
///
/// Returns an error if:
/// - The manifest declares no commands
/// - Two commands share a name
/// - Two commands declare `run` for the same method and uri
/// - A command entry is invalid
pub fn validate_manifest(manifest: &Manifest) -> Result<()> {
    if manifest.commands.is_empty() {
        return Err(CliError::manifest("Manifest must declare at least one command").into());
    }

    let mut seen = HashSet::new();
    let mut routes = HashMap::new();
    for (index, command) in manifest.commands.iter().enumerate() {
        validate_command(command, index, manifest.version.as_deref())?;

        if !seen.insert(command.name.as_str()) {
            return Err(CliError::manifest(format!(
                "Command #{}: Duplicate command name '{}'",
                index + 1,
                command.name
            ))
            .into());
        }

        // Shell routes are keyed by verb and uri; a second script would replace the first
        if command.run.is_some()
            && let Some(first) = routes.insert((command.method, command.uri.as_str()), command.name.as_str())
        {
            return Err(CliError::manifest(format!(
                "Command #{}: '{}' runs {} {} already served by '{first}'",
                index + 1,
                command.name,
                command.method,
                command.uri
            ))
            .into());
        }
    }

    Ok(())
}

/// Validate a single command entry
fn validate_command(command: &CommandConfig, index: usize, default_version: Option<&str>) -> Result<()> {
    let context = format!("Command #{}", index + 1);

    validate_command_name(&command.name)
        .map_err(|e| CliError::manifest(format!("{context}: {e}")))?;

    if command.uri.trim().is_empty() {
        return Err(CliError::manifest(format!("{context}: uri cannot be empty")).into());
    }

    if let Some(run) = command.run.as_deref()
        && run.trim().is_empty()
    {
        return Err(CliError::manifest(format!("{context}: run cannot be empty")).into());
    }

    command
        .to_schema(default_version)
        .map_err(|e| CliError::manifest(format!("{context} ('{}'): {e}", command.name)))?;

    Ok(())
}

/// Validate a command name
///
/// # Errors
///
/// Returns an error if the name is not a lowercase word usable as a subcommand
pub fn validate_command_name(name: &str) -> Result<()> {
    let regex = Regex::new(r"^[a-z0-9][a-z0-9._-]*$")?;
    if regex.is_match(name) {
        return Ok(());
    }

    Err(anyhow!(
        "Invalid command name '{name}'. Use lowercase letters, digits, '.', '_' or '-'"
    ))
}

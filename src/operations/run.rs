//! Run operation coordination

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::command::{CommandResult, ResourceCommand};
use crate::config::Manifest;
use crate::error::CliError;
use crate::resource::ShellResource;
use crate::system::System;

/// File name looked up in the current and per-user configuration directories
pub const MANIFEST_FILE_NAME: &str = "commands.yaml";

/// Directory under the per-user configuration directory
pub const APP_DIR_NAME: &str = "resource-cli";

/// Locate the manifest to load
///
/// An explicit path wins (relative paths resolve against the current
/// directory). Otherwise `./commands.yaml` is tried, then
/// `<config_dir>/resource-cli/commands.yaml`.
///
/// # Errors
///
/// Returns an error if:
/// - The current directory cannot be determined
/// - No explicit path is given and neither default location holds a manifest
pub fn resolve_manifest_path(system: &dyn System, explicit: Option<&str>) -> Result<PathBuf> {
    let current_dir = system
        .current_dir()
        .map_err(|e| CliError::io(format!("Failed to determine current directory: {e}")))?;

    if let Some(path) = explicit {
        return Ok(current_dir.join(path));
    }

    let local = current_dir.join(MANIFEST_FILE_NAME);
    if system.is_file(&local) {
        return Ok(local);
    }

    if let Some(config_dir) = system.config_dir() {
        let user = config_dir.join(APP_DIR_NAME).join(MANIFEST_FILE_NAME);
        if system.is_file(&user) {
            return Ok(user);
        }
    }

    Err(CliError::manifest(format!(
        "No manifest found. Create ./{MANIFEST_FILE_NAME} or specify one with --manifest"
    ))
    .into())
}

/// Loaded manifest ready to serve invocations
#[derive(Debug)]
#[non_exhaustive]
pub struct RunOperation {
    manifest: Manifest,
    working_dir: Option<PathBuf>,
}

impl RunOperation {
    /// Resolve and load the manifest
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No manifest can be located
    /// - The manifest cannot be read, parsed or validated
    pub fn new(manifest_path: Option<&str>, system: &dyn System) -> Result<Self> {
        let path = resolve_manifest_path(system, manifest_path)?;
        debug!("Using manifest {}", path.display());

        let manifest = Manifest::load_from_file(system, &path)?;

        Ok(Self {
            manifest,
            working_dir: path.parent().map(Path::to_path_buf),
        })
    }

    /// Wrap an already loaded manifest; shell commands run in `working_dir`
    #[must_use]
    pub const fn from_manifest(manifest: Manifest, working_dir: Option<PathBuf>) -> Self {
        Self {
            manifest,
            working_dir,
        }
    }

    #[must_use]
    pub const fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Dispatch one invocation
    ///
    /// `argv[0]` names the command; the rest are its arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `argv` is empty or names an undeclared command
    /// - The command schema cannot be built
    ///
    /// Invocation failures are not errors: they come back as a non-zero
    /// [`CommandResult`].
    pub fn execute<S: AsRef<str>>(&self, argv: &[S]) -> Result<CommandResult> {
        let name = argv
            .first()
            .map(AsRef::as_ref)
            .ok_or_else(|| CliError::command_not_found(""))?;

        let schema = self.manifest.schema_for(name)?;

        if self
            .manifest
            .find(name)
            .is_some_and(|command| command.run.is_none())
        {
            warn!("Command '{name}' declares no run entry");
        }

        let mut resource = ShellResource::from_manifest(&self.manifest);
        if let Some(dir) = self.working_dir.as_ref() {
            resource = resource.with_working_dir(dir);
        }

        info!("Invoking {} {}", schema.method(), schema.uri());
        let command = ResourceCommand::new(schema, &resource);
        let result = command.invoke(argv);
        debug!("'{name}' finished with exit code {}", result.exit_code);

        Ok(result)
    }

    /// One `name<TAB>description` line per declared command
    #[must_use]
    pub fn list(&self) -> String {
        self.manifest
            .commands
            .iter()
            .map(|command| format!("{}\t{}", command.name, command.description))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

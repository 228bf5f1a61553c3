//! Shell-backed resource
//!
//! Each `(verb, uri)` pair maps to a shell command. The bound parameters are
//! handed over as environment variables and the command's stdout becomes the
//! response body.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use serde_json::Value;
use tracing::{debug, warn};

use super::{ActionFailure, ActionOutcome, Body, Params, Resource, Verb};
use crate::config::Manifest;

/// Prefix of per-parameter environment variables
pub const PARAM_ENV_PREFIX: &str = "CLI_PARAM_";

/// Resource whose handlers are shell commands
#[derive(Debug, Clone, Default)]
pub struct ShellResource {
    routes: HashMap<(Verb, String), String>,
    working_dir: Option<PathBuf>,
}

impl ShellResource {
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve every manifest command that declares a `run` entry
    #[must_use]
    pub fn from_manifest(manifest: &Manifest) -> Self {
        manifest
            .commands
            .iter()
            .filter_map(|command| {
                command
                    .run
                    .as_ref()
                    .map(|run| (command.method, command.uri.clone(), run.clone()))
            })
            .fold(Self::new(), |resource, (verb, uri, run)| {
                resource.with_route(verb, uri, run)
            })
    }

    /// Map a verb and identifier to a shell command (builder pattern)
    #[must_use]
    pub fn with_route<U: Into<String>, C: Into<String>>(mut self, verb: Verb, uri: U, command: C) -> Self {
        self.routes.insert((verb, uri.into()), command.into());
        self
    }

    /// Run commands in `dir` instead of the current directory (builder pattern)
    #[must_use]
    pub fn with_working_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    fn execute(&self, command: &str, verb: Verb, uri: &str, params: &Params) -> Result<Output, ActionFailure> {
        let (shell, shell_args) = get_shell_command();
        let params_json = serde_json::to_string(params)
            .map_err(|e| ActionFailure::new("JsonError", e.to_string()))?;

        let mut cmd = Command::new(&shell);
        cmd.args(&shell_args)
            .arg(command)
            .env("CLI_METHOD", verb.as_str())
            .env("CLI_URI", uri)
            .env("CLI_PARAMS", params_json)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        for (name, value) in params {
            if let Some(text) = env_value(value) {
                cmd.env(param_env_key(name), text);
            }
        }

        if let Some(dir) = self.working_dir.as_ref() {
            cmd.current_dir(dir);
        }

        debug!("Executing for {} {}: {}", verb, uri, command);
        cmd.output().map_err(|e| {
            ActionFailure::new("SpawnError", format!("Failed to execute '{command}': {e}"))
        })
    }
}

impl Resource for ShellResource {
    fn request(&self, verb: Verb, uri: &str, params: &Params) -> Result<ActionOutcome, ActionFailure> {
        let command = self
            .routes
            .get(&(verb, uri.to_owned()))
            .ok_or_else(|| ActionFailure::not_found(verb, uri))?;

        let output = self.execute(command, verb, uri, params)?;
        Ok(outcome_from_output(&output))
    }
}

/// Environment variable name for a parameter: `CLI_PARAM_` + upper-cased name
#[must_use]
pub fn param_env_key(name: &str) -> String {
    format!("{PARAM_ENV_PREFIX}{}", name.to_uppercase().replace('-', "_"))
}

/// Text handed to the shell for a bound value, `None` when unset
fn env_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

/// Translate a finished process into an outcome
///
/// Exit status 0 answers 200, 1 answers 400, anything else (including death
/// by signal) answers 500.
fn outcome_from_output(output: &Output) -> ActionOutcome {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    let code = status_code(output.status.code());
    let mut body = parse_body(stdout.trim());

    if code >= 400 {
        warn!(
            "Command exited with status {}",
            output.status.code().unwrap_or(-1)
        );
        if !stderr.trim().is_empty() {
            body.insert("error".to_owned(), Value::String(stderr.trim().to_owned()));
        }
    } else if !stderr.trim().is_empty() {
        debug!("Command stderr: {}", stderr.trim());
    }

    ActionOutcome::new(code, body)
}

const fn status_code(exit: Option<i32>) -> u16 {
    match exit {
        Some(0) => 200,
        Some(1) => 400,
        _ => 500,
    }
}

/// A JSON object becomes the body as-is; any other text lands in `output`
fn parse_body(stdout: &str) -> Body {
    if stdout.is_empty() {
        return Body::new();
    }

    match serde_json::from_str::<Body>(stdout) {
        Ok(body) => body,
        Err(_) => Body::from([("output".to_owned(), Value::String(stdout.to_owned()))]),
    }
}

/// Get the appropriate shell command for the current platform
fn get_shell_command() -> (String, Vec<String>) {
    if cfg!(target_os = "windows") {
        return ("cmd".to_owned(), vec!["/C".to_owned()]);
    } else {
        return ("sh".to_owned(), vec!["-c".to_owned()]);
    }
}

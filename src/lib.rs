//! `resource-cli` - declarative command dispatch
//!
//! A command is declared as a [`CommandSchema`](command::CommandSchema): a
//! name, a set of options and the resource request it issues. Invoking it
//! parses argv, binds the options, issues the request and maps the outcome
//! to a message plus an exit code.
//!
//! The library can be used with any [`Resource`](resource::Resource); the
//! bundled binary serves commands from a YAML manifest through shell
//! commands.

pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod operations;
pub mod parser;
pub mod resource;
pub mod system;

use anyhow::Result;
use cli::Args;
use command::CommandResult;
use operations::RunOperation;
use system::System;

/// Main entry point for the resource-cli library
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded or the command is not declared
pub fn run(args: &Args, system: &dyn System) -> Result<CommandResult> {
    let operation = RunOperation::new(args.manifest.as_deref(), system)?;
    operation.execute(args.command.as_slice())
}

/// Run the `--list` mode
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded
pub fn run_list(args: &Args, system: &dyn System) -> Result<String> {
    let operation = RunOperation::new(args.manifest.as_deref(), system)?;
    Ok(operation.list())
}

//! # resource-cli
//!
//! Runs commands declared in a YAML manifest. Each command binds its options
//! and issues one request; the answer becomes the output and exit code.
//!
//! ```sh
//! resource-cli greeting --name Ada --lang ja
//! resource-cli --manifest ./ops.yaml deploy --env staging --format json
//! resource-cli --list
//! ```

use clap::Parser as _;
use resource_cli::cli::Args;
use resource_cli::error::CliError;
use resource_cli::system::RealSystem;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

fn main() {
    let args = Args::parse();

    // stdout carries command output only
    let log_level = if args.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let system = RealSystem::new();

    if args.list {
        match resource_cli::run_list(&args, &system) {
            Ok(listing) => {
                println!("{listing}");
                std::process::exit(0);
            }
            Err(err) => fail(&err),
        }
    }

    match resource_cli::run(&args, &system) {
        Ok(result) => {
            println!("{}", result.message);
            std::process::exit(result.exit_code);
        }
        Err(err) => fail(&err),
    }
}

fn fail(err: &anyhow::Error) -> ! {
    error!("{err:#}");
    std::process::exit(
        err.downcast_ref::<CliError>()
            .map_or(1, CliError::exit_code),
    );
}

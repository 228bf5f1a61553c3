use clap::Parser;

/// Environment variable naming the manifest file
pub const MANIFEST_ENV: &str = "RESOURCE_CLI_MANIFEST";

/// Command-line arguments for resource-cli
#[derive(Parser, Debug, Clone)]
#[command(name = "resource-cli")]
#[command(about = "Run resource commands declared in a YAML manifest")]
#[command(long_about = None)]
#[command(version)]
pub struct Args {
    /// Manifest file path (defaults to ./commands.yaml, then the user config directory)
    #[arg(long, value_name = "PATH", env = MANIFEST_ENV)]
    pub manifest: Option<String>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// List declared commands instead of running one
    #[arg(long, conflicts_with = "command")]
    pub list: bool,

    /// Command name followed by its own options, e.g. `greeting --name Ada -l ja`
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true,
        required_unless_present = "list"
    )]
    pub command: Vec<String>,
}

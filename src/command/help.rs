//! Help and version text

use serde_json::Value;

use super::schema::{CommandSchema, OptionSpec};

/// Render the help message for a command
#[must_use]
pub fn render_help(schema: &CommandSchema) -> String {
    let mut help = format!(
        "{}\n\nUsage: {} [options]\n\nOptions:\n",
        schema.description(),
        schema.name()
    );

    for option in schema.options().values() {
        help.push_str(&option_line(option));
    }

    help.push_str("  --help, -h\t\tShow this help message\n");
    help.push_str("  --version, -v\t\tShow version information\n");
    help.push_str("  --format\t\tOutput format (text|json) (default: text)\n");

    help
}

/// `{name} version {version}`
#[must_use]
pub fn render_version(schema: &CommandSchema) -> String {
    format!("{} version {}", schema.name(), schema.version())
}

fn option_line(option: &OptionSpec) -> String {
    let mut line = format!("  --{}", option.name());
    if let Some(short_name) = option.short_name() {
        line.push_str(&format!(", -{short_name}"));
    }

    line.push('\t');
    line.push_str(option.description());

    if option.is_required() {
        line.push_str(" (required)");
    }

    if let Some(default) = option.default_value() {
        let default = match default {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        line.push_str(&format!(" (default: {default})"));
    }

    line.push('\n');
    line
}

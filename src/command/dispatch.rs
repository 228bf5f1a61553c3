//! Dispatcher: argv in, message and exit code out
//!
//! This is the single place where invocation errors become exit codes;
//! callers of [`ResourceCommand::invoke`] never see an error.

use serde_json::Value;
use tracing::{debug, warn};

use super::help::{render_help, render_version};
use super::schema::CommandSchema;
use super::{CommandResult, OutputFormat};
use crate::error::InvocationError;
use crate::parser::{ArgParser, ParsedOptions, has_switch};
use crate::resource::{ActionOutcome, Params, Resource};

/// A command bound to the resource it invokes
#[non_exhaustive]
pub struct ResourceCommand<'res> {
    schema: CommandSchema,
    resource: &'res dyn Resource,
    parser: ArgParser,
}

impl<'res> ResourceCommand<'res> {
    #[must_use]
    pub fn new(schema: CommandSchema, resource: &'res dyn Resource) -> Self {
        Self {
            schema,
            resource,
            parser: ArgParser::new(),
        }
    }

    #[must_use]
    #[inline]
    pub const fn schema(&self) -> &CommandSchema {
        &self.schema
    }

    /// Run the command for `argv`, whose first element is the command name
    pub fn invoke<S: AsRef<str>>(&self, argv: &[S]) -> CommandResult {
        match self.try_invoke(argv) {
            Ok(result) => result,
            Err(err) => {
                debug!("{} failed: {:?}", self.schema.name(), err);
                CommandResult::from(err)
            }
        }
    }

    fn try_invoke<S: AsRef<str>>(&self, argv: &[S]) -> Result<CommandResult, InvocationError> {
        if has_switch(argv, "help", 'h') {
            return Ok(CommandResult::success(render_help(&self.schema)));
        }

        if has_switch(argv, "version", 'v') {
            return Ok(CommandResult::success(render_version(&self.schema)));
        }

        let options = self.parser.parse_argv(argv);
        debug!("Parsed options: {:?}", options);

        let params = self.bind(&options)?;
        let format = requested_format(&options);

        debug!(
            "Requesting {} {} with {} param(s)",
            self.schema.method(),
            self.schema.uri(),
            params.len()
        );
        let outcome = self
            .resource
            .request(self.schema.method(), self.schema.uri(), &params)?;
        debug!("Resource answered {}", outcome.code);

        self.render(&outcome, format)
    }

    /// Bind parsed options to the declared ones
    ///
    /// The long name wins over the short alias; an absent optional option
    /// takes its default, or `null` when it has none.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A required option is absent
    /// - A value does not coerce to the option's declared type
    pub fn bind(&self, options: &ParsedOptions) -> Result<Params, InvocationError> {
        let mut params = Params::new();

        for (name, option) in self.schema.options() {
            let short_value = option.short_name().and_then(|short| options.get(short));
            let value = options.get(name.as_str()).or(short_value);

            let bound = match value {
                Some(value) => option.value_type().coerce(value).ok_or_else(|| {
                    InvocationError::InvalidOptionValue {
                        name: name.clone(),
                        expected: option.value_type().describe().to_owned(),
                        value: value.as_text().unwrap_or("true").to_owned(),
                    }
                })?,
                None if option.is_required() => {
                    return Err(InvocationError::missing_option(name.as_str()));
                }
                None => option.default_value().cloned().unwrap_or(Value::Null),
            };

            params.insert(name.clone(), bound);
        }

        Ok(params)
    }

    fn render(&self, outcome: &ActionOutcome, format: OutputFormat) -> Result<CommandResult, InvocationError> {
        if !outcome.is_success() {
            let rendered = to_json(outcome)?;
            return Err(if outcome.is_server_error() {
                InvocationError::ActionServerError {
                    code: outcome.code,
                    rendered,
                }
            } else {
                InvocationError::ActionClientError {
                    code: outcome.code,
                    rendered,
                }
            });
        }

        let Some(output) = self.schema.output() else {
            return Ok(CommandResult::success(to_json(outcome)?));
        };

        if format == OutputFormat::Json {
            return Ok(CommandResult::success(to_json(outcome)?));
        }

        match outcome.field(output) {
            Some(Value::String(text)) => Ok(CommandResult::success(text.clone())),
            Some(value) => Ok(CommandResult::success(value.to_string())),
            None => {
                debug!("Output field '{}' not in body, rendering JSON", output);
                Ok(CommandResult::success(to_json(outcome)?))
            }
        }
    }
}

/// Format from `--format`; a bare flag or unknown value means text
fn requested_format(options: &ParsedOptions) -> OutputFormat {
    let Some(format) = options.get("format").and_then(|value| value.as_text()) else {
        return OutputFormat::Text;
    };

    format.parse::<OutputFormat>().unwrap_or_else(|err| {
        warn!("{}, using text", err);
        OutputFormat::Text
    })
}

fn to_json(outcome: &ActionOutcome) -> Result<String, InvocationError> {
    outcome
        .to_json()
        .map_err(|e| InvocationError::unexpected("JsonError", e.to_string()))
}

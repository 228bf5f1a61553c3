//! Raw argument vector tokenizer

use indexmap::IndexMap;
use tracing::trace;

/// Value bound to a parsed option
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum OptionValue {
    /// Explicit value, possibly the empty string
    Text(String),
    /// Present without a value, i.e. boolean `true`
    Flag,
}

impl OptionValue {
    /// Text of the value, `None` for a bare flag
    #[must_use]
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Flag => None,
        }
    }

    /// Whether the option was given without a value
    #[must_use]
    #[inline]
    pub const fn is_flag(&self) -> bool {
        matches!(*self, Self::Flag)
    }
}

impl From<&str> for OptionValue {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Parsed options, iterated in order of first assignment
pub type ParsedOptions = IndexMap<String, OptionValue>;

/// One option read from the argument vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOption {
    /// Name without leading dashes
    pub name: String,
    pub value: OptionValue,
    /// Extra tokens consumed after the option itself (0 or 1)
    pub advance: usize,
}

/// Command line argument parser
///
/// Pure function of its input: the same vector always yields the same map.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArgParser;

impl ArgParser {
    #[must_use]
    pub const fn new() -> Self {
        return Self;
    }

    /// Parse an argument vector whose first element is the program name
    ///
    /// Options are read left to right until the first standalone argument
    /// (a token without a leading `-`); that token and everything after it
    /// are ignored. Repeated options keep the last value.
    #[must_use]
    pub fn parse_argv<S: AsRef<str>>(&self, argv: &[S]) -> ParsedOptions {
        let mut options = ParsedOptions::new();
        let args = argv.get(1..).unwrap_or_default();

        let mut index = 0;
        while let Some(arg) = args.get(index) {
            let arg = arg.as_ref();
            if !arg.starts_with('-') {
                trace!(
                    "Standalone argument '{}', ignoring {} remaining token(s)",
                    arg,
                    args.len() - index - 1
                );
                break;
            }

            let next = args.get(index + 1).map(AsRef::as_ref);
            let parsed = match arg.strip_prefix("--") {
                Some(long) => Self::parse_long(long, next),
                None => Self::parse_short(&arg[1..], next),
            };

            index += 1 + parsed.advance;
            options.insert(parsed.name, parsed.value);
        }

        options
    }

    /// Parse `--name=value`, `--name value` or `--name`
    #[must_use]
    pub fn parse_long(arg: &str, next: Option<&str>) -> ParsedOption {
        if let Some((name, value)) = arg.split_once('=') {
            return ParsedOption {
                name: name.to_owned(),
                value: OptionValue::Text(value.to_owned()),
                advance: 0,
            };
        }

        Self::with_lookahead(arg, next)
    }

    /// Parse `-n value` or `-n`
    #[must_use]
    pub fn parse_short(arg: &str, next: Option<&str>) -> ParsedOption {
        Self::with_lookahead(arg, next)
    }

    fn with_lookahead(name: &str, next: Option<&str>) -> ParsedOption {
        match next {
            Some(value) if !value.starts_with('-') => ParsedOption {
                name: name.to_owned(),
                value: OptionValue::Text(value.to_owned()),
                advance: 1,
            },
            _ => ParsedOption {
                name: name.to_owned(),
                value: OptionValue::Flag,
                advance: 0,
            },
        }
    }
}

/// Whether any token equals `--{long}` or `-{short}`
///
/// Scans the whole vector, unlike [`ArgParser::parse_argv`], so help and
/// version requests are honored even after malformed or standalone tokens.
#[must_use]
pub fn has_switch<S: AsRef<str>>(argv: &[S], long: &str, short: char) -> bool {
    let long = format!("--{long}");
    let short = format!("-{short}");
    argv.iter().any(|arg| arg.as_ref() == long || arg.as_ref() == short)
}

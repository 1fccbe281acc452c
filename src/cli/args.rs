//! Command-line argument parsing for prospect-stream.
//!
//! This module handles parsing command-line arguments and determining
//! which CLI command to execute.

use thiserror::Error;

use crate::models::{SearchKind, SearchRequest, DEFAULT_PER_PAGE};

/// Options for a search run.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchArgs {
    /// Query words joined by single spaces
    pub query: String,
    pub kind: SearchKind,
    pub page: u32,
    pub per_page: u32,
    /// Force blank-line frame dispatch
    pub blank_line: bool,
}

impl SearchArgs {
    /// Build the request these options describe.
    pub fn to_request(&self) -> SearchRequest {
        SearchRequest::new(self.query.clone(), self.kind)
            .with_page(self.page)
            .with_per_page(self.per_page)
    }
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Run a search (default)
    Search(SearchArgs),
}

/// Error type for argument parsing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArgsError {
    #[error("missing search query")]
    MissingQuery,

    #[error("{flag} expects a value")]
    MissingValue { flag: String },

    #[error("{flag} expects a positive number, got '{value}'")]
    InvalidNumber { flag: String, value: String },

    #[error("unknown option '{0}'")]
    UnknownFlag(String),
}

/// Parse command-line arguments and return the appropriate command.
///
/// `--version`/`-V` and `--help`/`-h` win over everything else. A bare `--`
/// ends option parsing; the rest is query text.
///
/// # Examples
///
/// ```
/// use prospect_stream::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["prospect-stream".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut kind = SearchKind::Companies;
    let mut page = 1;
    let mut per_page = DEFAULT_PER_PAGE;
    let mut blank_line = false;
    let mut words: Vec<String> = Vec::new();
    let mut first_error = None;

    // Skip the program name
    let mut args = args.skip(1);
    let mut options_done = false;

    while let Some(arg) = args.next() {
        if options_done {
            words.push(arg);
            continue;
        }
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--people" => kind = SearchKind::People,
            "--companies" => kind = SearchKind::Companies,
            "--blank-line" => blank_line = true,
            "--page" | "--per-page" => {
                let parsed = args
                    .next()
                    .ok_or_else(|| ArgsError::MissingValue { flag: arg.clone() })
                    .and_then(|value| parse_positive(&arg, &value));
                match (arg.as_str(), parsed) {
                    ("--page", Ok(n)) => page = n,
                    (_, Ok(n)) => per_page = n,
                    (_, Err(e)) => {
                        first_error.get_or_insert(e);
                    }
                }
            }
            "--" => options_done = true,
            flag if flag.starts_with("--") => {
                first_error.get_or_insert(ArgsError::UnknownFlag(flag.to_string()));
            }
            _ => words.push(arg),
        }
    }

    if let Some(err) = first_error {
        return Err(err);
    }

    let query = words.join(" ");
    if query.trim().is_empty() {
        return Err(ArgsError::MissingQuery);
    }

    Ok(CliCommand::Search(SearchArgs {
        query,
        kind,
        page,
        per_page,
        blank_line,
    }))
}

fn parse_positive(flag: &str, value: &str) -> Result<u32, ArgsError> {
    match value.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ArgsError::InvalidNumber {
            flag: flag.to_string(),
            value: value.to_string(),
        }),
    }
}

// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config error diagnostics with fuzzy match suggestions.
//!
//! Converts TOML syntax errors and Figment decode errors into miette
//! diagnostics with source spans, valid key listings, and "did you mean?"
//! suggestions using Jaro-Winkler string similarity.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
/// Catches `provider` -> `providers` and `provisoners` -> `provisioners`.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration error with rich diagnostic information.
///
/// `Read` and `Parse` come from the raw file; `UnknownKey`, `InvalidType`,
/// `MissingKey`, and `Decode` mean the text was valid TOML but did not fit
/// the configuration shape; `Validation` covers semantic checks after that.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("error reading {path}: {source}")]
    #[diagnostic(code(plinth::config::read))]
    Read {
        /// Path of the file that failed to read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration text is not valid TOML.
    #[error("error parsing {path}: {message}")]
    #[diagnostic(code(plinth::config::parse))]
    Parse {
        /// Name of the source (file path or `<inline>`).
        path: String,
        /// Parser message.
        message: String,
        /// Location of the syntax error.
        #[label("syntax error here")]
        span: Option<SourceSpan>,
        /// The source text for context display.
        #[source_code]
        src: NamedSource<String>,
    },

    /// An unknown key was found in the configuration.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(plinth::config::unknown_key),
        help("{}", format_unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        /// The unrecognized key name.
        key: String,
        /// Suggested correction via fuzzy matching, if any.
        suggestion: Option<String>,
        /// List of valid keys for the section.
        valid_keys: String,
        /// Source span for the offending key.
        #[label("this key is not recognized")]
        span: Option<SourceSpan>,
        /// The source text for context display.
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A configuration value has the wrong type.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(plinth::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        /// Dotted path of the key with the wrong type.
        key: String,
        /// Description of the type mismatch.
        detail: String,
        /// What type was expected.
        expected: String,
        /// Source span for the offending key.
        #[label("wrong type here")]
        span: Option<SourceSpan>,
        /// The source text.
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A required configuration key is missing.
    #[error("missing required key `{key}`")]
    #[diagnostic(code(plinth::config::missing_key))]
    MissingKey {
        /// The missing key name.
        key: String,
    },

    /// Any other failure to map the TOML onto the configuration shape.
    #[error("error decoding configuration: {message}")]
    #[diagnostic(code(plinth::config::decode))]
    Decode {
        /// Decoder message.
        message: String,
    },

    /// A validation error for a config value.
    #[error("validation error: {message}")]
    #[diagnostic(code(plinth::config::validation))]
    Validation {
        /// Description of the validation failure.
        message: String,
    },
}

impl ConfigError {
    /// Returns true if the text was not syntactically valid.
    pub fn is_parse(&self) -> bool {
        matches!(self, ConfigError::Parse { .. })
    }

    /// Returns true if valid text could not be mapped onto the config shape.
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            ConfigError::UnknownKey { .. }
                | ConfigError::InvalidType { .. }
                | ConfigError::MissingKey { .. }
                | ConfigError::Decode { .. }
        )
    }
}

/// Format the help message for unknown key errors.
fn format_unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Convert a TOML syntax error into a `ConfigError::Parse`.
pub fn parse_error(source_name: &str, content: &str, err: &toml::de::Error) -> ConfigError {
    let span = err
        .span()
        .map(|range| SourceSpan::new(range.start.into(), range.len()));

    ConfigError::Parse {
        path: source_name.to_string(),
        message: err.message().to_string(),
        span,
        src: NamedSource::new(source_name, content.to_string()),
    }
}

/// Convert a `figment::Error` into a list of decode-class `ConfigError`s.
///
/// A figment error may carry several underlying errors; each one becomes a
/// separate diagnostic.
pub fn figment_to_config_errors(
    err: figment::Error,
    source_name: &str,
    content: &str,
) -> Vec<ConfigError> {
    use figment::error::Kind;

    let mut errors = Vec::new();

    for error in err {
        let section: Vec<String> = error.path.iter().map(|s| s.to_string()).collect();

        let config_error = match &error.kind {
            Kind::UnknownField(field, expected) => {
                let valid_keys: Vec<&str> = expected.to_vec();
                let suggestion = suggest_key(field, &valid_keys);
                let (span, src) = source_span(source_name, content, &section, field);

                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion,
                    valid_keys: valid_keys.join(", "),
                    span,
                    src,
                }
            }
            Kind::MissingField(field) => ConfigError::MissingKey {
                key: field.clone().into_owned(),
            },
            Kind::InvalidType(actual, expected) => {
                let (span, src) = match section.split_last() {
                    Some((field, parent)) => source_span(source_name, content, parent, field),
                    None => (None, None),
                };
                ConfigError::InvalidType {
                    key: section.join("."),
                    detail: format!("found {actual}, expected {expected}"),
                    expected: expected.to_string(),
                    span,
                    src,
                }
            }
            _ => ConfigError::Decode {
                message: format!("{error}"),
            },
        };

        errors.push(config_error);
    }

    errors
}

fn source_span(
    source_name: &str,
    content: &str,
    section: &[String],
    field: &str,
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    match find_key_offset(content, section, field) {
        Some(offset) => (
            Some(SourceSpan::new(offset.into(), field.len())),
            Some(NamedSource::new(source_name, content.to_string())),
        ),
        None => (None, None),
    }
}

/// Find the byte offset of a key in TOML content, relative to a section path.
///
/// For `path = ["providers"]` and `field = "aws"`, finds the `[providers]`
/// header then searches for `aws` after it. For top-level fields, searches
/// from the start. Quoted keys (`"aws" = ...`) are matched too; the returned
/// offset points at the key text inside the quotes.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let search_start = match path.first() {
        None => 0,
        Some(section) => {
            let header = format!("[{section}]");
            content.find(&header).map(|pos| pos + header.len())?
        }
    };

    let remaining = &content[search_start..];

    let mut byte_offset = 0;
    for line in remaining.split_inclusive('\n') {
        let trimmed = line.trim_start();
        let indent = line.len() - trimmed.len();

        let (key_start, after) = match trimmed.strip_prefix('"') {
            Some(quoted) => match quoted.strip_prefix(field).and_then(|a| a.strip_prefix('"')) {
                Some(after) => (indent + 1, after),
                None => {
                    byte_offset += line.len();
                    continue;
                }
            },
            None => match trimmed.strip_prefix(field) {
                Some(after) => (indent, after),
                None => {
                    byte_offset += line.len();
                    continue;
                }
            },
        };

        if after.starts_with(' ') || after.starts_with('=') || after.starts_with('\t') {
            return Some(search_start + byte_offset + key_start);
        }
        byte_offset += line.len();
    }

    None
}

/// Suggest a similar key name using Jaro-Winkler string similarity.
///
/// Returns the best match above the similarity threshold, or `None` if
/// no valid key is close enough to the unknown key.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    let mut best_score = SUGGESTION_THRESHOLD;
    let mut best_match = None;

    for &key in valid_keys {
        let score = strsim::jaro_winkler(unknown, key);
        if score > best_score {
            best_score = score;
            best_match = Some(key.to_string());
        }
    }

    best_match
}

/// Render a list of `ConfigError`s to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}

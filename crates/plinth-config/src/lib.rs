// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CLI configuration for Plinth.
//!
//! The configuration maps provider and provisioner names to the executables
//! that implement them. Built-in defaults are merged with the user's
//! configuration file (TOML, strict `deny_unknown_fields`), and load errors
//! are reported as miette diagnostics with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use plinth_config::{builtin_config, load_user_config};
//!
//! let user = load_user_config().expect("config errors");
//! let config = builtin_config().merge(&user);
//! println!("aws -> {}", config.providers["aws"]);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{config_file, load_config, load_config_from_str, load_user_config};
pub use model::{builtin_config, CliConfig};

/// Load a configuration file and validate it.
///
/// Returns either a valid `CliConfig` or every error found: read failures,
/// parse and decode errors, then semantic validation errors.
pub fn load_and_validate(path: &Path) -> Result<CliConfig, Vec<ConfigError>> {
    let config = loader::load_config(path)?;
    validation::validate_config(&config)?;
    Ok(config)
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<CliConfig, Vec<ConfigError>> {
    let config = loader::load_config_from_str(toml_content)?;
    validation::validate_config(&config)?;
    Ok(config)
}

// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader: TOML syntax check, then Figment decoding.
//!
//! The user configuration lives at `~/.plinthrc` on Unix-like systems and at
//! `plinth.rc` in the roaming application data directory on Windows. Set
//! `PLINTH_CLI_CONFIG_FILE` to point somewhere else.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Format, Toml},
    Figment,
};
use tracing::debug;

use crate::diagnostic::{self, ConfigError};
use crate::model::CliConfig;

/// Environment variable that overrides the default config file location.
pub const CONFIG_FILE_ENV: &str = "PLINTH_CLI_CONFIG_FILE";

/// Source name used in diagnostics for configuration loaded from a string.
const INLINE_SOURCE: &str = "<inline>";

/// Returns the path of the user configuration file, if one can be determined.
///
/// The file is not required to exist.
pub fn config_file() -> Option<PathBuf> {
    config_file_from(std::env::var_os(CONFIG_FILE_ENV))
}

fn config_file_from(env_override: Option<OsString>) -> Option<PathBuf> {
    match env_override {
        Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => default_config_file(),
    }
}

#[cfg(windows)]
fn default_config_file() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("plinth.rc"))
}

#[cfg(not(windows))]
fn default_config_file() -> Option<PathBuf> {
    dirs::home_dir().map(|dir| dir.join(".plinthrc"))
}

/// Load the user configuration from [`config_file`].
///
/// A missing file is not an error and yields an empty configuration.
pub fn load_user_config() -> Result<CliConfig, Vec<ConfigError>> {
    match config_file() {
        Some(path) if path.is_file() => load_config(&path),
        Some(path) => {
            debug!(path = %path.display(), "no user config file, using built-in defaults only");
            Ok(CliConfig::default())
        }
        None => Ok(CliConfig::default()),
    }
}

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<CliConfig, Vec<ConfigError>> {
    let source_name = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|source| {
        vec![ConfigError::Read {
            path: source_name.clone(),
            source,
        }]
    })?;

    let config = decode(&source_name, &content)?;
    debug!(
        path = %source_name,
        providers = config.providers.len(),
        provisioners = config.provisioners.len(),
        "loaded CLI config"
    );
    Ok(config)
}

/// Load configuration from a TOML string.
pub fn load_config_from_str(toml_content: &str) -> Result<CliConfig, Vec<ConfigError>> {
    decode(INLINE_SOURCE, toml_content)
}

/// Syntax errors are reported on their own; decoding only runs on valid TOML.
fn decode(source_name: &str, content: &str) -> Result<CliConfig, Vec<ConfigError>> {
    if let Err(err) = content.parse::<toml::Table>() {
        return Err(vec![diagnostic::parse_error(source_name, content, &err)]);
    }

    Figment::from(Toml::string(content))
        .extract()
        .map_err(|err| diagnostic::figment_to_config_errors(err, source_name, content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_override_wins() {
        let path = config_file_from(Some(OsString::from("/tmp/custom.rc")));
        assert_eq!(path, Some(PathBuf::from("/tmp/custom.rc")));
    }

    #[test]
    fn empty_env_override_is_ignored() {
        assert_eq!(config_file_from(Some(OsString::new())), default_config_file());
        assert_eq!(config_file_from(None), default_config_file());
    }

    #[cfg(not(windows))]
    #[test]
    fn default_file_is_dotfile_in_home() {
        if let Some(path) = default_config_file() {
            assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(".plinthrc"));
        }
    }

    #[test]
    fn syntax_error_is_parse_class() {
        let errors = load_config_from_str("[providers\naws = \"x\"").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].is_parse());
    }
}

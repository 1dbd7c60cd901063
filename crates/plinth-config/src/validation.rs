// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use std::collections::HashMap;

use crate::diagnostic::ConfigError;
use crate::model::CliConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &CliConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    validate_section("providers", &config.providers, &mut errors);
    validate_section("provisioners", &config.provisioners, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_section(
    section: &str,
    entries: &HashMap<String, String>,
    errors: &mut Vec<ConfigError>,
) {
    // Sorted so error order is stable.
    let mut names: Vec<&String> = entries.keys().collect();
    names.sort();

    for name in names {
        if name.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("{section} contains an entry with an empty name"),
            });
        }
        if entries[name].trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("{section}.{name} must name an executable, got an empty path"),
            });
        }
    }
}

// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `plinth plugins` subcommands.

use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use plinth_config::validation::validate_config;
use plinth_config::{builtin_config, render_errors, CliConfig, ConfigError};
use plinth_core::PluginKind;
use plinth_plugin::{ExecutableResolver, FactoryRegistry, ProcessLauncher};
use tracing::info;

/// Print every configured plugin with its resolved command.
pub fn list(config_path: Option<&Path>) -> i32 {
    let config = match load_merged(config_path) {
        Ok(config) => config,
        Err(errors) => {
            render_errors(&errors);
            return 1;
        }
    };

    print!("{}", render_plugin_table(&config, &ExecutableResolver::from_env()));
    0
}

/// Launch one plugin through its factory and report the negotiated service.
pub fn check(kind: PluginKind, name: &str, config_path: Option<&Path>) -> i32 {
    let config = match load_merged(config_path) {
        Ok(config) => config,
        Err(errors) => {
            render_errors(&errors);
            return 1;
        }
    };

    let registry = FactoryRegistry::build(
        &config,
        Arc::new(ExecutableResolver::from_env()),
        Arc::new(ProcessLauncher),
    );

    match registry.instantiate(kind, name) {
        Ok(handle) => {
            info!(%kind, name, service = handle.service_name(), "plugin check passed");
            println!(
                "{kind} `{name}`: service `{}` at {}",
                handle.service_name(),
                handle.endpoint()
            );
            0
        }
        Err(e) => {
            eprintln!("error: {e}");
            1
        }
    }
}

/// Built-in defaults overridden by the user config (explicit path or the
/// default location).
fn load_merged(config_path: Option<&Path>) -> Result<CliConfig, Vec<ConfigError>> {
    let user = match config_path {
        Some(path) => plinth_config::load_and_validate(path)?,
        None => {
            let user = plinth_config::load_user_config()?;
            validate_config(&user)?;
            user
        }
    };
    Ok(builtin_config().merge(&user))
}

fn render_plugin_table(config: &CliConfig, resolver: &ExecutableResolver) -> String {
    let mut out = String::new();

    for (heading, kind) in [
        ("providers", PluginKind::Provider),
        ("provisioners", PluginKind::Provisioner),
    ] {
        let entries = config.plugins(kind);
        let mut names: Vec<&String> = entries.keys().collect();
        names.sort();

        let _ = writeln!(out, "{heading}:");
        if names.is_empty() {
            let _ = writeln!(out, "  (none)");
        }
        for name in names {
            let path = &entries[name];
            let resolved = resolver.resolve(path);
            if resolved.program() == Path::new(path) {
                let _ = writeln!(out, "  {name:<16} {path}");
            } else {
                let _ = writeln!(out, "  {name:<16} {path} -> {resolved}");
            }
        }
    }

    out
}

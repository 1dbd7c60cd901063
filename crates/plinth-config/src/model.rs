// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model for the Plinth CLI.
//!
//! This is the configuration of the CLI itself (which executables implement
//! which plugins), not of the infrastructure it manages.

use std::collections::HashMap;

use plinth_core::PluginKind;
use serde::{Deserialize, Serialize};

/// Name-to-executable mappings for external plugins.
///
/// ```toml
/// [providers]
/// aws = "/opt/plugins/plinth-provider-aws"
///
/// [provisioners]
/// chef = "plinth-provisioner-chef"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Provider name to executable path or bare command name.
    #[serde(default)]
    pub providers: HashMap<String, String>,

    /// Provisioner name to executable path or bare command name.
    #[serde(default)]
    pub provisioners: HashMap<String, String>,
}

impl CliConfig {
    /// Merge two configurations into a new one. Entries in `other` win.
    ///
    /// Neither input is modified.
    pub fn merge(&self, other: &CliConfig) -> CliConfig {
        CliConfig {
            providers: merge_maps(&self.providers, &other.providers),
            provisioners: merge_maps(&self.provisioners, &other.provisioners),
        }
    }

    /// The mapping for the given plugin kind.
    pub fn plugins(&self, kind: PluginKind) -> &HashMap<String, String> {
        match kind {
            PluginKind::Provider => &self.providers,
            PluginKind::Provisioner => &self.provisioners,
        }
    }

    /// Returns true if no plugins of either kind are configured.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty() && self.provisioners.is_empty()
    }
}

fn merge_maps(
    base: &HashMap<String, String>,
    overrides: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut result = base.clone();
    result.extend(
        overrides
            .iter()
            .map(|(name, path)| (name.clone(), path.clone())),
    );
    result
}

/// Built-in plugin defaults, overridable by user configuration.
///
/// Bare command names are resolved at invocation time, so a binary shipped
/// next to the `plinth` executable is preferred over one on `PATH`.
pub fn builtin_config() -> CliConfig {
    const PROVIDERS: &[&str] = &[
        "aws",
        "digitalocean",
        "heroku",
        "dnsimple",
        "consul",
        "cloudflare",
    ];
    const PROVISIONERS: &[&str] = &["local-exec", "remote-exec", "file"];

    CliConfig {
        providers: PROVIDERS
            .iter()
            .map(|name| (name.to_string(), format!("plinth-provider-{name}")))
            .collect(),
        provisioners: PROVISIONERS
            .iter()
            .map(|name| (name.to_string(), format!("plinth-provisioner-{name}")))
            .collect(),
    }
}

// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Factory registry derived from the CLI configuration.
//!
//! Building the registry only copies names and paths into factories; no
//! executable is resolved and no process is started until a factory is
//! invoked.

use std::collections::HashMap;
use std::sync::Arc;

use plinth_config::CliConfig;
use plinth_core::{PlinthError, PluginKind, PluginLauncher};

use crate::factory::PluginFactory;
use crate::handle::PluginHandle;
use crate::resolver::ExecutableResolver;

/// Build the provider factories for every entry in `config.providers`.
pub fn build_provider_factories(
    config: &CliConfig,
    resolver: Arc<ExecutableResolver>,
    launcher: Arc<dyn PluginLauncher>,
) -> HashMap<String, PluginFactory> {
    build_factories(PluginKind::Provider, config, resolver, launcher)
}

/// Build the provisioner factories for every entry in `config.provisioners`.
pub fn build_provisioner_factories(
    config: &CliConfig,
    resolver: Arc<ExecutableResolver>,
    launcher: Arc<dyn PluginLauncher>,
) -> HashMap<String, PluginFactory> {
    build_factories(PluginKind::Provisioner, config, resolver, launcher)
}

fn build_factories(
    kind: PluginKind,
    config: &CliConfig,
    resolver: Arc<ExecutableResolver>,
    launcher: Arc<dyn PluginLauncher>,
) -> HashMap<String, PluginFactory> {
    config
        .plugins(kind)
        .iter()
        .map(|(name, path)| {
            (
                name.clone(),
                PluginFactory::new(kind, path.clone(), resolver.clone(), launcher.clone()),
            )
        })
        .collect()
}

/// Provider and provisioner factories keyed by name.
///
/// Immutable once built; share it behind an `Arc` if several threads need
/// to look up factories.
#[derive(Debug, Clone, Default)]
pub struct FactoryRegistry {
    providers: HashMap<String, PluginFactory>,
    provisioners: HashMap<String, PluginFactory>,
}

impl FactoryRegistry {
    /// Build factories for every plugin in `config`.
    pub fn build(
        config: &CliConfig,
        resolver: Arc<ExecutableResolver>,
        launcher: Arc<dyn PluginLauncher>,
    ) -> Self {
        Self {
            providers: build_provider_factories(config, resolver.clone(), launcher.clone()),
            provisioners: build_provisioner_factories(config, resolver, launcher),
        }
    }

    pub fn provider_factories(&self) -> &HashMap<String, PluginFactory> {
        &self.providers
    }

    pub fn provisioner_factories(&self) -> &HashMap<String, PluginFactory> {
        &self.provisioners
    }

    /// The factories for the given plugin kind.
    pub fn factories(&self, kind: PluginKind) -> &HashMap<String, PluginFactory> {
        match kind {
            PluginKind::Provider => &self.providers,
            PluginKind::Provisioner => &self.provisioners,
        }
    }

    pub fn get(&self, kind: PluginKind, name: &str) -> Option<&PluginFactory> {
        self.factories(kind).get(name)
    }

    /// Plugin names of the given kind, sorted.
    pub fn names(&self, kind: PluginKind) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories(kind).keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Look up and invoke the named factory.
    pub fn instantiate(&self, kind: PluginKind, name: &str) -> Result<PluginHandle, PlinthError> {
        self.get(kind, name)
            .ok_or_else(|| PlinthError::UnknownPlugin {
                kind,
                name: name.to_string(),
            })?
            .invoke()
    }

    /// Total number of registered factories across both kinds.
    pub fn len(&self) -> usize {
        self.providers.len() + self.provisioners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty() && self.provisioners.is_empty()
    }
}

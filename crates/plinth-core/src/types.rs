// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the plugin crates.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The capability a plugin executable implements.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PluginKind {
    Provider,
    Provisioner,
}

/// A resolved, invokable plugin command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginCommand {
    program: PathBuf,
}

impl PluginCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The executable that will be spawned.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Build a `std::process::Command` for this plugin. Nothing is spawned.
    pub fn to_command(&self) -> Command {
        Command::new(&self.program)
    }
}

impl std::fmt::Display for PluginCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program.display())
    }
}

/// Configuration handed to a [`PluginLauncher`](crate::PluginLauncher) when
/// creating a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// The command that starts the plugin process.
    pub command: PluginCommand,
    /// Whether the host owns the process lifetime. A managed process is
    /// terminated when its channel is released.
    pub managed: bool,
}

impl ClientConfig {
    /// Client configuration for a host-managed plugin process.
    pub fn managed(command: PluginCommand) -> Self {
        Self {
            command,
            managed: true,
        }
    }
}

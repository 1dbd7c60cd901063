// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for Plinth plugin operations.

use thiserror::Error;

use crate::types::PluginKind;

/// The error type returned by plugin clients, factories, and registries.
///
/// Resolution never fails, so there is no "binary not found" variant: a
/// missing executable surfaces as [`PlinthError::Connect`] when the process
/// spawn is attempted.
#[derive(Debug, Error)]
pub enum PlinthError {
    /// The plugin process could not be launched or its channel established.
    #[error("failed to connect to plugin `{command}`: {message}")]
    Connect {
        command: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The plugin was reachable but did not advertise a usable service name.
    #[error("service discovery failed for plugin `{command}`: {message}")]
    ServiceDiscovery { command: String, message: String },

    /// No factory is registered under the requested name.
    #[error("unknown {kind}: {name}")]
    UnknownPlugin { kind: PluginKind, name: String },
}

impl PlinthError {
    /// Returns true for channel establishment failures.
    pub fn is_connect(&self) -> bool {
        matches!(self, PlinthError::Connect { .. })
    }

    /// Returns true for service name negotiation failures.
    pub fn is_service_discovery(&self) -> bool {
        matches!(self, PlinthError::ServiceDiscovery { .. })
    }
}

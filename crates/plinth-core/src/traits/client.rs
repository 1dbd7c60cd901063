// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Launcher and client traits for external plugin processes.

use crate::error::PlinthError;
use crate::traits::channel::ChannelHandle;
use crate::types::ClientConfig;

/// Creates plugin clients.
///
/// Creating a client must not start the process; that happens in
/// [`PluginClient::connect`].
pub trait PluginLauncher: Send + Sync {
    fn new_client(&self, config: ClientConfig) -> Box<dyn PluginClient>;
}

/// A client for one plugin process.
///
/// Both methods block until they succeed or fail. Implementations apply no
/// retries of their own.
pub trait PluginClient: Send {
    /// Launch the plugin if needed and establish the RPC channel.
    fn connect(&mut self) -> Result<ChannelHandle, PlinthError>;

    /// The service name the plugin registered its capability under.
    fn service_name(&mut self) -> Result<String, PlinthError>;
}

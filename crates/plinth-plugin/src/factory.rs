// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deferred plugin factories.
//!
//! A `PluginFactory` is plain data: the capability kind, the configured
//! plugin path, and the collaborators needed to launch it. Nothing is
//! resolved or spawned until [`PluginFactory::invoke`] is called, and every
//! invocation launches and connects afresh.

use std::sync::Arc;

use plinth_core::{
    ClientConfig, PlinthError, PluginCommand, PluginKind, PluginLauncher, RpcChannel,
};
use tracing::debug;

use crate::handle::PluginHandle;
use crate::resolver::ExecutableResolver;

/// Deferred constructor for one named plugin.
#[derive(Clone)]
pub struct PluginFactory {
    kind: PluginKind,
    path: String,
    resolver: Arc<ExecutableResolver>,
    launcher: Arc<dyn PluginLauncher>,
}

impl PluginFactory {
    /// Create a factory. Performs no I/O.
    pub fn new(
        kind: PluginKind,
        path: impl Into<String>,
        resolver: Arc<ExecutableResolver>,
        launcher: Arc<dyn PluginLauncher>,
    ) -> Self {
        Self {
            kind,
            path: path.into(),
            resolver,
            launcher,
        }
    }

    pub fn kind(&self) -> PluginKind {
        self.kind
    }

    /// The plugin path as configured, before resolution.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Resolve the command this factory would launch right now.
    pub fn command(&self) -> PluginCommand {
        self.resolver.resolve(&self.path)
    }

    /// Launch the plugin and connect to it.
    ///
    /// The process is host-managed. Connect and service discovery errors from
    /// the plugin client are returned as-is; nothing is retried or cached, so
    /// a later call starts over.
    pub fn invoke(&self) -> Result<PluginHandle, PlinthError> {
        let command = self.command();
        debug!(kind = %self.kind, path = %self.path, %command, "launching plugin");

        let mut client = self.launcher.new_client(ClientConfig::managed(command));
        let channel = client.connect()?;
        let service = client.service_name()?;

        debug!(kind = %self.kind, %service, endpoint = %channel.endpoint(), "plugin connected");
        Ok(PluginHandle::new(self.kind, channel, service))
    }
}

impl std::fmt::Debug for PluginFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginFactory")
            .field("kind", &self.kind)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::sync::Mutex;

    use plinth_core::{ChannelHandle, PluginClient};

    use super::*;

    #[derive(Debug)]
    struct NullChannel;

    impl Read for NullChannel {
        fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
            Ok(0)
        }
    }

    impl Write for NullChannel {
        fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
            Ok(data.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl RpcChannel for NullChannel {
        fn endpoint(&self) -> String {
            "null".to_string()
        }
    }

    /// Records client configs and answers with a fixed service name.
    #[derive(Default)]
    struct RecordingLauncher {
        configs: Mutex<Vec<ClientConfig>>,
        service: Option<String>,
    }

    struct RecordingClient {
        command: String,
        service: Option<String>,
    }

    impl PluginLauncher for RecordingLauncher {
        fn new_client(&self, config: ClientConfig) -> Box<dyn PluginClient> {
            let command = config.command.to_string();
            self.configs.lock().unwrap().push(config);
            Box::new(RecordingClient {
                command,
                service: self.service.clone(),
            })
        }
    }

    impl PluginClient for RecordingClient {
        fn connect(&mut self) -> Result<ChannelHandle, PlinthError> {
            Ok(Box::new(NullChannel))
        }

        fn service_name(&mut self) -> Result<String, PlinthError> {
            self.service.clone().ok_or_else(|| PlinthError::ServiceDiscovery {
                command: self.command.clone(),
                message: "no service advertised".into(),
            })
        }
    }

    fn factory(kind: PluginKind, launcher: Arc<RecordingLauncher>) -> PluginFactory {
        PluginFactory::new(
            kind,
            "./plugins/plugin-x",
            Arc::new(ExecutableResolver::new(None, None)),
            launcher,
        )
    }

    #[test]
    fn construction_does_not_launch() {
        let launcher = Arc::new(RecordingLauncher::default());
        let f = factory(PluginKind::Provider, launcher.clone());

        assert_eq!(f.kind(), PluginKind::Provider);
        assert_eq!(f.path(), "./plugins/plugin-x");
        assert!(launcher.configs.lock().unwrap().is_empty());
    }

    #[test]
    fn invoke_uses_managed_resolved_command() {
        let launcher = Arc::new(RecordingLauncher {
            service: Some("Provisioner".into()),
            ..Default::default()
        });
        let handle = factory(PluginKind::Provisioner, launcher.clone())
            .invoke()
            .expect("invoke should succeed");

        assert_eq!(handle.kind(), PluginKind::Provisioner);
        assert_eq!(handle.service_name(), "Provisioner");

        let configs = launcher.configs.lock().unwrap();
        assert_eq!(configs.len(), 1);
        assert!(configs[0].managed);
        assert_eq!(configs[0].command, PluginCommand::new("./plugins/plugin-x"));
    }

    #[test]
    fn service_discovery_error_is_propagated() {
        let launcher = Arc::new(RecordingLauncher::default());
        let err = factory(PluginKind::Provider, launcher).invoke().unwrap_err();
        assert!(err.is_service_discovery());
    }

    #[test]
    fn debug_hides_collaborators() {
        let f = factory(PluginKind::Provider, Arc::new(RecordingLauncher::default()));
        let rendered = format!("{f:?}");
        assert!(rendered.contains("Provider"));
        assert!(rendered.contains("plugin-x"));
    }
}

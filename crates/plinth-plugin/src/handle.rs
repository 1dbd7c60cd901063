// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! RPC-backed capability handles returned by plugin factories.

use plinth_core::{ChannelHandle, PluginKind, RpcChannel};

/// A resource provider implemented by an external plugin process.
#[derive(Debug)]
pub struct RpcResourceProvider {
    channel: ChannelHandle,
    name: String,
}

impl RpcResourceProvider {
    pub fn new(channel: ChannelHandle, name: impl Into<String>) -> Self {
        Self {
            channel,
            name: name.into(),
        }
    }

    /// The service name the plugin registered its provider under.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn channel(&mut self) -> &mut dyn RpcChannel {
        self.channel.as_mut()
    }

    pub fn into_parts(self) -> (ChannelHandle, String) {
        (self.channel, self.name)
    }
}

/// A resource provisioner implemented by an external plugin process.
#[derive(Debug)]
pub struct RpcResourceProvisioner {
    channel: ChannelHandle,
    name: String,
}

impl RpcResourceProvisioner {
    pub fn new(channel: ChannelHandle, name: impl Into<String>) -> Self {
        Self {
            channel,
            name: name.into(),
        }
    }

    /// The service name the plugin registered its provisioner under.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn channel(&mut self) -> &mut dyn RpcChannel {
        self.channel.as_mut()
    }

    pub fn into_parts(self) -> (ChannelHandle, String) {
        (self.channel, self.name)
    }
}

/// A live plugin, owned exclusively by whoever invoked the factory.
#[derive(Debug)]
pub enum PluginHandle {
    Provider(RpcResourceProvider),
    Provisioner(RpcResourceProvisioner),
}

impl PluginHandle {
    /// Wrap a channel and service name in the handle matching `kind`.
    pub fn new(kind: PluginKind, channel: ChannelHandle, name: String) -> Self {
        match kind {
            PluginKind::Provider => PluginHandle::Provider(RpcResourceProvider::new(channel, name)),
            PluginKind::Provisioner => {
                PluginHandle::Provisioner(RpcResourceProvisioner::new(channel, name))
            }
        }
    }

    pub fn kind(&self) -> PluginKind {
        match self {
            PluginHandle::Provider(_) => PluginKind::Provider,
            PluginHandle::Provisioner(_) => PluginKind::Provisioner,
        }
    }

    pub fn service_name(&self) -> &str {
        match self {
            PluginHandle::Provider(p) => p.name(),
            PluginHandle::Provisioner(p) => p.name(),
        }
    }

    pub fn endpoint(&self) -> String {
        match self {
            PluginHandle::Provider(p) => p.channel.endpoint(),
            PluginHandle::Provisioner(p) => p.channel.endpoint(),
        }
    }

    pub fn into_provider(self) -> Option<RpcResourceProvider> {
        match self {
            PluginHandle::Provider(p) => Some(p),
            PluginHandle::Provisioner(_) => None,
        }
    }

    pub fn into_provisioner(self) -> Option<RpcResourceProvisioner> {
        match self {
            PluginHandle::Provisioner(p) => Some(p),
            PluginHandle::Provider(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};

    use super::*;

    #[derive(Debug, Default)]
    struct LoopbackChannel {
        buf: Vec<u8>,
    }

    impl Read for LoopbackChannel {
        fn read(&mut self, out: &mut [u8]) -> std::io::Result<usize> {
            let n = out.len().min(self.buf.len());
            out[..n].copy_from_slice(&self.buf[..n]);
            self.buf.drain(..n);
            Ok(n)
        }
    }

    impl Write for LoopbackChannel {
        fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
            self.buf.extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl RpcChannel for LoopbackChannel {
        fn endpoint(&self) -> String {
            "loopback".to_string()
        }
    }

    #[test]
    fn handle_matches_kind() {
        let provider = PluginHandle::new(
            PluginKind::Provider,
            Box::new(LoopbackChannel::default()),
            "Provider".into(),
        );
        assert_eq!(provider.kind(), PluginKind::Provider);
        assert_eq!(provider.service_name(), "Provider");
        assert_eq!(provider.endpoint(), "loopback");
        assert!(provider.into_provisioner().is_none());

        let provisioner = PluginHandle::new(
            PluginKind::Provisioner,
            Box::new(LoopbackChannel::default()),
            "Provisioner".into(),
        );
        let provisioner = provisioner.into_provisioner().expect("provisioner handle");
        assert_eq!(provisioner.name(), "Provisioner");
    }

    #[test]
    fn channel_is_usable_through_handle() {
        let mut provider = RpcResourceProvider::new(Box::new(LoopbackChannel::default()), "p");
        provider.channel().write_all(b"ping").unwrap();

        let mut reply = [0u8; 4];
        provider.channel().read_exact(&mut reply).unwrap();
        assert_eq!(&reply, b"ping");

        let (_, name) = provider.into_parts();
        assert_eq!(name, "p");
    }
}

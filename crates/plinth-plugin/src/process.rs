// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-backed plugin client.
//!
//! The plugin is started with stdout piped. Its first line of output is the
//! handshake `<network>|<address>|<service>`, for example
//! `tcp|127.0.0.1:41021|Provider`. The client dials the address and reports
//! the service name. Everything the plugin writes to stdout after the
//! handshake is drained on a background thread and logged at debug level.
//! Managed plugin processes are killed when the channel is dropped, or when
//! the handshake fails.
//!
//! There are no retries and no timeouts: a plugin that never prints its
//! handshake blocks `connect`.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpStream;
#[cfg(unix)]
use std::os::unix::net::UnixStream;
use std::process::{Child, ChildStdout, Stdio};
use std::thread;

use plinth_core::{
    ChannelHandle, ClientConfig, PlinthError, PluginClient, PluginLauncher, RpcChannel,
};
use tracing::debug;

/// Launches plugins as child processes of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLauncher;

impl PluginLauncher for ProcessLauncher {
    fn new_client(&self, config: ClientConfig) -> Box<dyn PluginClient> {
        Box::new(ProcessClient::new(config))
    }
}

/// Client for one plugin process. Nothing is spawned until `connect`.
#[derive(Debug)]
pub struct ProcessClient {
    config: ClientConfig,
    service: Option<String>,
}

impl ProcessClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            service: None,
        }
    }

    fn command_name(&self) -> String {
        self.config.command.to_string()
    }

    fn connect_error(
        &self,
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> PlinthError {
        PlinthError::Connect {
            command: self.command_name(),
            message: message.into(),
            source,
        }
    }
}

impl PluginClient for ProcessClient {
    fn connect(&mut self) -> Result<ChannelHandle, PlinthError> {
        let mut cmd = self.config.command.to_command();
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().map_err(|e| {
            self.connect_error("failed to start plugin process", Some(Box::new(e)))
        })?;
        let mut process = PluginProcess {
            child,
            managed: self.config.managed,
        };
        let pid = process.child.id();
        debug!(command = %self.command_name(), pid, "plugin process started");

        let stdout = process
            .child
            .stdout
            .take()
            .ok_or_else(|| self.connect_error("plugin stdout was not captured", None))?;
        let mut stdout = BufReader::new(stdout);

        let mut line = String::new();
        let read = stdout.read_line(&mut line).map_err(|e| {
            self.connect_error("failed to read plugin handshake", Some(Box::new(e)))
        })?;
        if read == 0 {
            return Err(
                self.connect_error("plugin exited before completing the handshake", None)
            );
        }

        let handshake = Handshake::parse(line.trim_end())
            .map_err(|message| self.connect_error(message, None))?;
        drain_stdout(pid, stdout).map_err(|e| {
            self.connect_error("failed to start stdout drain", Some(Box::new(e)))
        })?;

        let stream = handshake.dial().map_err(|e| {
            self.connect_error(
                format!("failed to dial {}", handshake.endpoint()),
                Some(Box::new(e)),
            )
        })?;

        self.service = Some(handshake.service.clone());
        Ok(Box::new(ProcessChannel {
            stream,
            endpoint: handshake.endpoint(),
            _process: process,
        }))
    }

    fn service_name(&mut self) -> Result<String, PlinthError> {
        match self.service.as_deref() {
            Some("") => Err(PlinthError::ServiceDiscovery {
                command: self.command_name(),
                message: "plugin advertised an empty service name".to_string(),
            }),
            Some(service) => Ok(service.to_string()),
            None => Err(PlinthError::ServiceDiscovery {
                command: self.command_name(),
                message: "plugin is not connected".to_string(),
            }),
        }
    }
}

/// Read and log plugin stdout until the pipe closes.
///
/// The thread is detached; it ends when the plugin exits or is killed.
fn drain_stdout(pid: u32, mut stdout: BufReader<ChildStdout>) -> std::io::Result<()> {
    thread::Builder::new()
        .name(format!("plugin-stdout-{pid}"))
        .spawn(move || {
            let mut buf = [0u8; 8192];
            loop {
                match stdout.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => {
                        let output = String::from_utf8_lossy(&buf[..n]);
                        debug!(pid, output = %output.trim_end(), "plugin stdout");
                    }
                    Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                    Err(e) => {
                        debug!(pid, error = %e, "plugin stdout closed");
                        break;
                    }
                }
            }
        })
        .map(|_| ())
}

/// The parsed first line of plugin output.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Handshake {
    network: Network,
    address: String,
    service: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Network {
    Tcp,
    #[cfg(unix)]
    Unix,
}

impl Handshake {
    fn parse(line: &str) -> Result<Self, String> {
        let mut parts = line.splitn(3, '|');
        let (Some(network), Some(address), Some(service)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(format!("malformed plugin handshake: {line:?}"));
        };

        let network = match network {
            "tcp" => Network::Tcp,
            #[cfg(unix)]
            "unix" => Network::Unix,
            other => return Err(format!("unsupported plugin network `{other}`")),
        };
        if address.is_empty() {
            return Err("plugin handshake has an empty address".to_string());
        }

        Ok(Self {
            network,
            address: address.to_string(),
            service: service.to_string(),
        })
    }

    fn endpoint(&self) -> String {
        match self.network {
            Network::Tcp => format!("tcp://{}", self.address),
            #[cfg(unix)]
            Network::Unix => format!("unix://{}", self.address),
        }
    }

    fn dial(&self) -> std::io::Result<Stream> {
        match self.network {
            Network::Tcp => TcpStream::connect(self.address.as_str()).map(Stream::Tcp),
            #[cfg(unix)]
            Network::Unix => UnixStream::connect(&self.address).map(Stream::Unix),
        }
    }
}

#[derive(Debug)]
enum Stream {
    Tcp(TcpStream),
    #[cfg(unix)]
    Unix(UnixStream),
}

/// Owns the child process; kills and reaps it on drop when managed.
#[derive(Debug)]
struct PluginProcess {
    child: Child,
    managed: bool,
}

impl Drop for PluginProcess {
    fn drop(&mut self) {
        if self.managed {
            debug!(pid = self.child.id(), "stopping managed plugin process");
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

/// Channel to a plugin started by [`ProcessLauncher`].
#[derive(Debug)]
pub struct ProcessChannel {
    stream: Stream,
    endpoint: String,
    // Dropped last.
    _process: PluginProcess,
}

impl Read for ProcessChannel {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match &mut self.stream {
            Stream::Tcp(s) => s.read(buf),
            #[cfg(unix)]
            Stream::Unix(s) => s.read(buf),
        }
    }
}

impl Write for ProcessChannel {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match &mut self.stream {
            Stream::Tcp(s) => s.write(buf),
            #[cfg(unix)]
            Stream::Unix(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match &mut self.stream {
            Stream::Tcp(s) => s.flush(),
            #[cfg(unix)]
            Stream::Unix(s) => s.flush(),
        }
    }
}

impl RpcChannel for ProcessChannel {
    fn endpoint(&self) -> String {
        self.endpoint.clone()
    }
}

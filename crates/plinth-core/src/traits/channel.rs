// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The byte channel to a running plugin.

use std::io::{Read, Write};

/// An established connection to a plugin process.
///
/// The RPC protocol spoken over the channel belongs to the layer above.
/// Dropping the channel releases the connection, and for managed plugins
/// the process as well.
pub trait RpcChannel: Read + Write + Send + std::fmt::Debug {
    /// Human-readable description of the remote end (e.g. `tcp://127.0.0.1:4100`).
    fn endpoint(&self) -> String;
}

/// Owned handle to an [`RpcChannel`].
pub type ChannelHandle = Box<dyn RpcChannel>;

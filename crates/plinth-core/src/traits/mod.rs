// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin-client traits.
//!
//! Factories never spawn processes themselves. They go through a
//! [`PluginLauncher`], which lets tests substitute a fake client.

pub mod channel;
pub mod client;

pub use channel::{ChannelHandle, RpcChannel};
pub use client::{PluginClient, PluginLauncher};

// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Plinth.
//!
//! This crate provides the error type, plugin kinds, and the plugin-client
//! traits shared by the configuration and plugin crates. The traits here are
//! the seam between plugin factories and whatever actually launches and
//! talks to an external plugin process.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::PlinthError;
pub use types::{ClientConfig, PluginCommand, PluginKind};

pub use traits::{ChannelHandle, PluginClient, PluginLauncher, RpcChannel};

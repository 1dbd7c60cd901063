// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin resolution and RPC-backed factories.
//!
//! Providers and provisioners are separate executables. The configuration
//! maps each plugin name to an executable path or command name; the
//! [`FactoryRegistry`] turns those entries into [`PluginFactory`] values,
//! and invoking a factory resolves the executable, launches it through a
//! [`PluginLauncher`](plinth_core::PluginLauncher), and wraps the resulting
//! channel in a [`PluginHandle`].

pub mod factory;
pub mod handle;
pub mod process;
pub mod registry;
pub mod resolver;

pub use factory::PluginFactory;
pub use handle::{PluginHandle, RpcResourceProvider, RpcResourceProvisioner};
pub use process::{ProcessChannel, ProcessClient, ProcessLauncher};
pub use registry::{build_provider_factories, build_provisioner_factories, FactoryRegistry};
pub use resolver::ExecutableResolver;

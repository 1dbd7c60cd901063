// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Executable resolution for plugin commands.
//!
//! A plugin path from the configuration is either an explicit path or a bare
//! command name. Bare names are looked up next to the running executable
//! first, then on the search path. If both miss, the name is used verbatim
//! and any "not found" failure surfaces when the process is spawned.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use plinth_core::PluginCommand;
use tracing::debug;

/// Resolves plugin identifiers to commands.
///
/// The process environment (own executable directory, `PATH`, working
/// directory) is captured once at construction, so resolution against an
/// unchanged filesystem always yields the same command.
#[derive(Debug, Clone, Default)]
pub struct ExecutableResolver {
    exe_dir: Option<PathBuf>,
    search_path: Option<OsString>,
    cwd: PathBuf,
}

impl ExecutableResolver {
    /// Capture the current process environment.
    ///
    /// Failing to locate the current executable only disables the
    /// co-located lookup.
    pub fn from_env() -> Self {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));

        Self {
            exe_dir,
            search_path: std::env::var_os("PATH"),
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Build a resolver from an explicit host directory and search path.
    pub fn new(exe_dir: Option<PathBuf>, search_path: Option<OsString>) -> Self {
        Self {
            exe_dir,
            search_path,
            cwd: PathBuf::from("."),
        }
    }

    /// Directory of the host executable, if known.
    pub fn exe_dir(&self) -> Option<&Path> {
        self.exe_dir.as_deref()
    }

    /// Resolve `id` to the command that should be spawned. Never fails.
    pub fn resolve(&self, id: &str) -> PluginCommand {
        if has_separator(id) {
            debug!(id, "plugin path is explicit, using verbatim");
            return PluginCommand::new(id);
        }

        if let Some(path) = self.co_located(id) {
            debug!(id, path = %path.display(), "resolved plugin next to host executable");
            return PluginCommand::new(path);
        }

        if let Some(path) = self.search(id) {
            debug!(id, path = %path.display(), "resolved plugin on search path");
            return PluginCommand::new(path);
        }

        debug!(id, "plugin not found, deferring to spawn");
        PluginCommand::new(id)
    }

    fn co_located(&self, id: &str) -> Option<PathBuf> {
        let exe_dir = self.exe_dir.as_ref()?;
        let file_name = Path::new(id).file_name()?;
        let candidate = exe_dir.join(file_name);
        candidate.exists().then_some(candidate)
    }

    fn search(&self, id: &str) -> Option<PathBuf> {
        if id.is_empty() {
            return None;
        }
        which::which_in(id, self.search_path.as_ref(), &self.cwd).ok()
    }
}

fn has_separator(id: &str) -> bool {
    id.chars().any(std::path::is_separator)
}

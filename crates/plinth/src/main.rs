// SPDX-FileCopyrightText: 2026 Plinth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plinth - host for external provider and provisioner plugins.
//!
//! This is the binary entry point.

mod plugins;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use plinth_core::PluginKind;

/// Plinth - host for external provider and provisioner plugins.
#[derive(Parser, Debug)]
#[command(name = "plinth", version, about, long_about = None)]
struct Cli {
    /// Log level used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Inspect and check configured plugins.
    Plugins {
        #[command(subcommand)]
        action: PluginsAction,
    },
}

#[derive(Subcommand, Debug)]
enum PluginsAction {
    /// List configured plugins and the command each resolves to.
    List {
        /// CLI config file to use instead of the default location.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Launch a plugin and report the service it registers.
    Check {
        /// Plugin kind: provider or provisioner.
        kind: PluginKind,
        /// Configured plugin name.
        name: String,
        /// CLI config file to use instead of the default location.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let code = match cli.command {
        Some(Commands::Plugins { action }) => match action {
            PluginsAction::List { config } => plugins::list(config.as_deref()),
            PluginsAction::Check { kind, name, config } => {
                plugins::check(kind, &name, config.as_deref())
            }
        },
        None => {
            println!("plinth: use --help for available commands");
            0
        }
    };

    std::process::exit(code);
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("plinth={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

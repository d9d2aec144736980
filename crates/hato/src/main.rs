// SPDX-FileCopyrightText: 2026 Hato Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hato -- bot event dispatch service for the Hato chat platform.
//!
//! This is the binary entry point.

mod seed;
mod serve;
mod shutdown;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, miette};

/// Bot event dispatch service.
#[derive(Parser, Debug)]
#[command(name = "hato", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the dispatch service.
    Serve {
        /// Path to a specific config file (skips the XDG hierarchy).
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Load and validate configuration, then exit.
    CheckConfig {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn load(config: Option<&PathBuf>) -> miette::Result<hato_config::HatoConfig> {
    let config = match config {
        Some(path) => hato_config::load_config_from_path(path),
        None => hato_config::load_config(),
    }
    .into_diagnostic()?;

    let issues = hato_config::validate(&config);
    if !issues.is_empty() {
        for issue in &issues {
            eprintln!("config error: {issue}");
        }
        return Err(miette!("{} configuration issue(s) found", issues.len()));
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { config }) => {
            let config = load(config.as_ref())?;
            serve::run_serve(config).await.into_diagnostic()
        }
        Some(Commands::CheckConfig { config }) => {
            let config = load(config.as_ref())?;
            println!(
                "ok: log_level={} database={} retention_days={}",
                config.service.log_level, config.storage.database_path, config.log.retention_days
            );
            Ok(())
        }
        None => {
            println!("hato: use --help for available commands");
            Ok(())
        }
    }
}

//! # Stockroom Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stockroom [--config PATH] [--file PATH]                                │
//! │                                                                         │
//! │  main.rs ────► flags, logging, config                                   │
//! │  menu.rs ────► the interactive loop                                     │
//! │  prompt.rs ──► input parsing and re-ask                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use stockroom_cli::{init_tracing, AppConfig, Shell};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "stockroom")]
#[command(about = "Interactive inventory tracker for electronics, groceries and clothing")]
#[command(version)]
struct Cli {
    /// Inventory file used by save/load and read at startup
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // An explicit config file must load; the implicit one may fall back
    let mut config = match cli.config {
        Some(path) => AppConfig::load(Some(path.clone()))
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::load_or_default(None),
    };

    if let Some(file) = cli.file {
        config.inventory_file = file;
    }
    config.validate().context("invalid configuration")?;

    info!(file = %config.inventory_file.display(), "Starting Stockroom");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(config, stdin.lock(), stdout.lock());
    shell.load_on_start().context("startup load failed")?;
    shell.run().context("interactive session failed")?;

    Ok(())
}

//! titanctl - TITAN-1 uplink terminal
//!
//! Loads configuration and the document index, then hands the terminal
//! to the interactive session.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::Command;
use titan_common::{loader, TitanConfig};
use titanctl::tui::{self, SessionEnd};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "titanctl")]
#[command(about = "TITAN-1 secure uplink terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/titan/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Document index URL or path, overriding the config
    #[arg(long)]
    documents: Option<String>,

    /// Log filter, overriding the config (e.g. "debug", "titanctl=trace")
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = TitanConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(documents) = cli.documents {
        config.documents = documents;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    let log_path = titanctl::logging::init(&config.logging);
    info!(?log_path, hostname = %config.hostname, "titanctl starting");

    let source = config.document_source();
    let store = loader::load(&source).await;
    info!(%source, documents = store.len(), "document index ready");

    match tui::run(&config, store)? {
        SessionEnd::Quit => {}
        SessionEnd::Navigate(navigation) => {
            println!("Redirecting to {}", navigation.target);
            if let Some(program) = &config.open_command {
                if let Err(e) = Command::new(program).arg(&navigation.target).spawn() {
                    warn!(program = %program, "failed to launch open command: {}", e);
                    eprintln!("Could not launch {}: {}", program, e);
                }
            }
        }
    }

    Ok(())
}

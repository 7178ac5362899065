// src/main.rs

use anyhow::Result;
use clap::Parser;
use std::time::Duration;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { db_path } => {
            commands::cmd_init(&db_path)?;
        }
        Commands::Check {
            feed,
            db_path,
            json,
            timeout,
        } => {
            let feeds = commands::parse_feeds(&feed).map_err(|e| anyhow::anyhow!(e))?;
            commands::cmd_check(&feeds, &db_path, json, Duration::from_secs(timeout))?;
        }
        Commands::Status { db_path } => {
            commands::cmd_status(&db_path)?;
        }
    }

    Ok(())
}

// src/cli.rs

//! CLI definitions for cvewatch
//!
//! Command-line interface definitions using clap. The command
//! implementations are in the `commands` module.

use clap::{Parser, Subcommand};

pub const DEFAULT_DB_PATH: &str = "/var/lib/cvewatch/cvewatch.db";

#[derive(Parser)]
#[command(name = "cvewatch")]
#[command(version)]
#[command(about = "Detect new and changed CVE records in the NVD feeds", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the checkpoint database
    Init {
        /// Path to the database file
        #[arg(short, long, default_value = DEFAULT_DB_PATH)]
        db_path: String,
    },

    /// Fetch feeds and report records that are new or changed
    Check {
        /// Feed to check: recent, modified, or all
        #[arg(short, long, default_value = "all")]
        feed: String,

        /// Path to the database file
        #[arg(short, long, default_value = DEFAULT_DB_PATH)]
        db_path: String,

        /// Emit the changed set as JSON instead of text
        #[arg(long)]
        json: bool,

        /// HTTP timeout in seconds
        #[arg(long, default_value_t = 30)]
        timeout: u64,
    },

    /// Show stored checkpoints
    Status {
        /// Path to the database file
        #[arg(short, long, default_value = DEFAULT_DB_PATH)]
        db_path: String,
    },
}

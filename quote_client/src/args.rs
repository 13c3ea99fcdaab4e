//! Command-line arguments for the quote client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::sync::SyncStrategy;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about = "Keep a list of quotes and sync it with a remote endpoint", long_about = None)]
pub struct Args {
    /// JSON config file (defaults to `config.json` in the data directory).
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding saved quotes and the session cache.
    #[clap(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Remote endpoint as `host:port`.
    #[clap(long, global = true)]
    pub server: Option<String>,

    /// Conflict resolution used when syncing.
    #[clap(long, global = true, value_enum)]
    pub strategy: Option<SyncStrategy>,

    /// Seconds between sync rounds in `watch`.
    #[clap(long, global = true)]
    pub interval: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a new quote.
    Add {
        #[clap(long)]
        text: String,
        /// Category label; empty falls back to "Uncategorized".
        #[clap(long, default_value = "")]
        category: String,
        /// Also post the new quote to the remote endpoint.
        #[clap(long)]
        push: bool,
    },
    /// Show a random quote, optionally from one category.
    Random {
        #[clap(long)]
        category: Option<String>,
    },
    /// List quotes; the chosen category is remembered for next time.
    List {
        /// Category to show, or "all".
        #[clap(long)]
        category: Option<String>,
    },
    /// Show one quote by id.
    Show { id: u64 },
    /// List known categories.
    Categories,
    /// Show the last quote viewed in this session.
    Last,
    /// Forget the session cache.
    ClearSession,
    /// Write all quotes as JSON to a file ("-" for stdout).
    Export { path: PathBuf },
    /// Append quotes from a JSON file.
    Import { path: PathBuf },
    /// Run a single sync round.
    Sync,
    /// Sync periodically until Ctrl+C.
    Watch,
}

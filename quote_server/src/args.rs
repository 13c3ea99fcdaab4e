//! Command-line arguments for the quote endpoint.
use clap::Parser;
use quote_common::net::SYNC_PORT;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about = "Mock remote endpoint for quote synchronisation", long_about = None)]
pub struct Args {
    /// Address to bind the TCP listener to.
    #[clap(long, default_value = "0.0.0.0")]
    pub bind: String,

    /// TCP port to listen on.
    #[clap(long, default_value_t = SYNC_PORT)]
    pub port: u16,

    /// Seconds between edits of a random remote quote; 0 disables editing.
    #[clap(long, default_value_t = 30)]
    pub edit_interval: u64,
}

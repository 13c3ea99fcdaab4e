//! Client configuration.
//!
//! Settings come from three layers, later ones winning: built-in defaults, an
//! optional JSON file (`--config`, or `config.json` inside the data directory),
//! and command-line flags.
use quote_common::net::{SYNC_PORT, addr};
use quote_common::{QuoteError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::args::Args;
use crate::sync::SyncStrategy;

const CONFIG_FILE: &str = "config.json";

fn default_data_dir() -> PathBuf {
    PathBuf::from(".quotes")
}

fn default_server_addr() -> String {
    addr("127.0.0.1", SYNC_PORT)
}

fn default_sync_interval_secs() -> u64 {
    30
}

fn default_timeout_secs() -> u64 {
    5
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding quotes, the category filter and the session cache.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// `host:port` of the remote endpoint.
    #[serde(default = "default_server_addr")]
    pub server_addr: String,
    #[serde(default = "default_sync_interval_secs")]
    pub sync_interval_secs: u64,
    #[serde(default)]
    pub strategy: SyncStrategy,
    /// Connect/read/write timeout for each request to the endpoint.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            server_addr: default_server_addr(),
            sync_interval_secs: default_sync_interval_secs(),
            strategy: SyncStrategy::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Reads a config file; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read(path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| QuoteError::Config(format!("{}: {}", path.display(), e))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Builds the effective configuration for `args`.
    pub fn resolve(args: &Args) -> Result<Self> {
        let path = match (&args.config, &args.data_dir) {
            (Some(path), _) => path.clone(),
            (None, Some(dir)) => dir.join(CONFIG_FILE),
            (None, None) => default_data_dir().join(CONFIG_FILE),
        };
        let mut config = Self::load(&path)?;

        if let Some(dir) = &args.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(server) = &args.server {
            config.server_addr = server.trim().to_string();
        }
        if let Some(strategy) = args.strategy {
            config.strategy = strategy;
        }
        if let Some(interval) = args.interval {
            config.sync_interval_secs = interval;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sync_interval_secs == 0 {
            return Err(QuoteError::Config("sync interval must be at least 1 second".into()));
        }
        if self.timeout_secs == 0 {
            return Err(QuoteError::Config("timeout must be at least 1 second".into()));
        }
        if self.server_addr.is_empty() {
            return Err(QuoteError::Config("server address is empty".into()));
        }
        Ok(())
    }

    pub fn sync_interval(&self) -> Duration {
        Duration::from_secs(self.sync_interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["quote_client"];
        argv.extend_from_slice(extra);
        argv.push("sync");
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(&dir.path().join("none.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.server_addr, "127.0.0.1:8080");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{"strategy": "last-write-wins", "sync_interval_secs": 5}"#).unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.strategy, SyncStrategy::LastWriteWins);
        assert_eq!(config.sync_interval(), Duration::from_secs(5));
        assert_eq!(config.data_dir, default_data_dir());
    }

    #[test]
    fn flags_override_file_found_in_data_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{"server_addr": "10.0.0.1:9000", "strategy": "last-write-wins"}"#,
        )
        .unwrap();
        let data_dir = dir.path().to_str().unwrap();
        let config = Config::resolve(&args(&["--data-dir", data_dir, "--strategy", "server-wins"])).unwrap();
        assert_eq!(config.server_addr, "10.0.0.1:9000");
        assert_eq!(config.strategy, SyncStrategy::ServerWins);
        assert_eq!(config.data_dir, dir.path());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().to_str().unwrap();
        let err = Config::resolve(&args(&["--data-dir", data_dir, "--interval", "0"])).unwrap_err();
        assert!(matches!(err, QuoteError::Config(_)));
    }

    #[test]
    fn malformed_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "{").unwrap();
        assert!(matches!(Config::load(&path), Err(QuoteError::Config(_))));
    }
}

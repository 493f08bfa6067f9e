use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Interactive dashboard relating PGA Tour player statistics to FedExCup points.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose run-time diagnostics
    #[arg(long)]
    pub debug: bool,
}

/// Runtime settings, read from the environment once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub data_path: PathBuf,
}

pub const DEFAULT_BIND: &str = "127.0.0.1:8050";
pub const DEFAULT_DATA_PATH: &str = "top_80_players.csv";

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bind = lookup("DASHBOARD_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind
            .parse()
            .with_context(|| format!("invalid DASHBOARD_BIND address '{bind}'"))?;
        let data_path = PathBuf::from(
            lookup("DASHBOARD_DATA").unwrap_or_else(|| DEFAULT_DATA_PATH.to_string()),
        );
        Ok(Self {
            bind_addr,
            data_path,
        })
    }
}

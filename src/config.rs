//! Process settings read from the environment

use anyhow::Context;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_CONFIG_PATH: &str = "config/pricing_config.json";
pub const DEFAULT_CONFIG_TTL_SECS: u64 = 60;

/// Service settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    /// JSON file holding the pricing configuration
    pub pricing_config_path: PathBuf,
    /// How long a loaded configuration snapshot is reused before re-reading
    pub pricing_config_ttl: Duration,
}

impl Settings {
    /// Read settings from `QUOTE_BIND_ADDR`, `PRICING_CONFIG_PATH` and
    /// `PRICING_CONFIG_TTL_SECS`, falling back to defaults for unset values.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bind_addr = lookup("QUOTE_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("QUOTE_BIND_ADDR is not a valid socket address")?;

        let pricing_config_path = lookup("PRICING_CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        let ttl_secs = match lookup("PRICING_CONFIG_TTL_SECS") {
            Some(raw) => raw
                .parse()
                .context("PRICING_CONFIG_TTL_SECS must be a whole number of seconds")?,
            None => DEFAULT_CONFIG_TTL_SECS,
        };

        Ok(Self {
            bind_addr,
            pricing_config_path,
            pricing_config_ttl: Duration::from_secs(ttl_secs),
        })
    }
}

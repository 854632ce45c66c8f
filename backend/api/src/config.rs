use anyhow::Context;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::time::Duration;

pub const DEFAULT_LISTEN: &str = "0.0.0.0:3000";
pub const DEFAULT_CAMPAIGN_DIR: &str = "data/campaigns";
pub const DEFAULT_MOCK_SOURCE: &str = "data/mock/campaign-list.json";
pub const DEFAULT_REFRESH_MS: u64 = 5_000;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen: SocketAddr,
    pub campaign_dir: PathBuf,
    pub mock_source: PathBuf,
    pub refresh_every: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let listen = lookup("LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN.into())
            .parse()
            .context("LISTEN_ADDR must be host:port")?;
        let campaign_dir = lookup("CAMPAIGN_DIR")
            .unwrap_or_else(|| DEFAULT_CAMPAIGN_DIR.into())
            .into();
        let mock_source = lookup("MOCK_SOURCE")
            .unwrap_or_else(|| DEFAULT_MOCK_SOURCE.into())
            .into();
        let refresh_ms = match lookup("REFRESH_MS") {
            Some(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("REFRESH_MS must be milliseconds, got {raw:?}"))?,
            None => DEFAULT_REFRESH_MS,
        };
        if refresh_ms == 0 {
            anyhow::bail!("REFRESH_MS must be greater than zero");
        }
        Ok(Self {
            listen,
            campaign_dir,
            mock_source,
            refresh_every: Duration::from_millis(refresh_ms),
        })
    }
}

use std::{env, net::SocketAddr, time::Duration};

use anyhow::{Context, Result};
use url::Url;

pub const DEFAULT_UPSTREAM_URL: &str =
    "https://app.base44.com/api/apps/680d6ca95153f09fa29b4f1a/entities/Client";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub api_key: Option<String>,
    pub upstream_url: Url,
    pub upstream_timeout: Duration,
    pub sse_keepalive: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .and_then(|v| v.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let bind_addr = lookup("BIND_ADDR")
            .map(|raw| {
                raw.trim()
                    .trim_matches('"')
                    .trim_matches('\'')
                    .to_string()
            })
            .and_then(|v| v.parse::<SocketAddr>().ok())
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], port)));

        let api_key = lookup("API_KEY")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let upstream_raw =
            lookup("BASE44_UPSTREAM_URL").unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string());
        let upstream_url = Url::parse(upstream_raw.trim())
            .with_context(|| format!("BASE44_UPSTREAM_URL is not a valid URL: {upstream_raw}"))?;
        if upstream_url.cannot_be_a_base() {
            anyhow::bail!("BASE44_UPSTREAM_URL cannot carry path segments: {upstream_raw}");
        }

        let upstream_timeout = lookup("UPSTREAM_TIMEOUT_SECONDS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|v| *v > 0)
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        let sse_keepalive = lookup("SSE_KEEPALIVE_SECONDS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|v| *v > 0)
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(25));

        Ok(Self {
            bind_addr,
            api_key,
            upstream_url,
            upstream_timeout,
            sse_keepalive,
        })
    }
}

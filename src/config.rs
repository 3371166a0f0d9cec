use anyhow::Context;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:4000/graphql";
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

const ENDPOINT_VAR: &str = "SCHOOLD_GRAPHQL_URL";
const TIMEOUT_VAR: &str = "SCHOOLD_REQUEST_TIMEOUT_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub endpoint: String,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut cfg = Config::default();
        if let Some(v) = lookup(ENDPOINT_VAR) {
            let v = v.trim();
            if !v.is_empty() {
                cfg.endpoint = v.to_string();
            }
        }
        if let Some(v) = lookup(TIMEOUT_VAR) {
            let ms: u64 = v
                .trim()
                .parse()
                .with_context(|| format!("{TIMEOUT_VAR} must be a whole number of milliseconds"))?;
            cfg.request_timeout = Duration::from_millis(ms);
        }
        Ok(cfg)
    }
}

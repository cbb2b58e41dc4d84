//! Process configuration read from the environment.

use std::time::Duration;

use anyhow::{Context, Result};

/// Runtime settings for the web frontend.
#[derive(Debug, Clone)]
pub struct Config {
    /// Socket address to listen on
    pub bind_addr: String,
    /// Base URL of the coefficient prediction service
    pub prediction_url: String,
    /// Base URL of the dataset service
    pub dataset_url: String,
    /// Upper bound on any single remote call
    pub request_timeout: Duration,
    /// Explorer sessions idle longer than this are dropped
    pub session_idle: Duration,
    /// Maximum number of live explorer sessions
    pub max_sessions: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            prediction_url: "http://127.0.0.1:5000".to_string(),
            dataset_url: "http://127.0.0.1:5000".to_string(),
            request_timeout: Duration::from_secs(15),
            session_idle: Duration::from_secs(30 * 60),
            max_sessions: 10_000,
        }
    }
}

impl Config {
    /// Build the configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bind_addr = lookup("BIND_ADDR").unwrap_or(defaults.bind_addr);
        let prediction_url = lookup("PREDICTION_SERVICE_URL")
            .map(|url| trim_base_url(&url))
            .unwrap_or(defaults.prediction_url);
        let dataset_url = lookup("DATASET_SERVICE_URL")
            .map(|url| trim_base_url(&url))
            .unwrap_or(defaults.dataset_url);

        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_positive(&raw, "REQUEST_TIMEOUT_SECS")?),
            None => defaults.request_timeout,
        };
        let session_idle = match lookup("SESSION_IDLE_SECS") {
            Some(raw) => Duration::from_secs(parse_positive(&raw, "SESSION_IDLE_SECS")?),
            None => defaults.session_idle,
        };
        let max_sessions = match lookup("MAX_SESSIONS") {
            Some(raw) => parse_positive(&raw, "MAX_SESSIONS")?,
            None => defaults.max_sessions,
        };

        Ok(Self {
            bind_addr,
            prediction_url,
            dataset_url,
            request_timeout,
            session_idle,
            max_sessions,
        })
    }
}

fn trim_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn parse_positive(raw: &str, key: &str) -> Result<u64> {
    let value: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{key} must be a positive integer, got {raw:?}"))?;
    anyhow::ensure!(value > 0, "{key} must be greater than zero");
    Ok(value)
}

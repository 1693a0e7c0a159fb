//! Client configuration loaded from defaults and the environment.

use std::time::Duration;

use crate::error::ConfigError;
use crate::view::DEFAULT_PAGE_SIZE;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const ENV_URL: &str = "AVHUB_URL";
const ENV_PAGE_SIZE: &str = "AVHUB_PAGE_SIZE";
const ENV_TIMEOUT: &str = "AVHUB_TIMEOUT_SECS";

/// Settings shared by every view and request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubConfig {
    /// Root of the API, without the `/api` suffix.
    pub base_url: String,
    /// Rows per table page.
    pub page_size: usize,
    /// Per-request timeout.
    pub timeout: Option<Duration>,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: None,
        }
    }
}

impl HubConfig {
    /// Loads the defaults overridden by `AVHUB_URL`, `AVHUB_PAGE_SIZE` and
    /// `AVHUB_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_URL).filter(|v| !v.trim().is_empty()) {
            config.base_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(raw) = lookup(ENV_PAGE_SIZE) {
            config.page_size = parse_page_size(&raw)?;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT) {
            config.timeout = Some(parse_timeout(&raw)?);
        }

        Ok(config)
    }
}

fn parse_page_size(raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(invalid(ENV_PAGE_SIZE, raw, "must be at least 1")),
        Ok(size) => Ok(size),
        Err(e) => Err(invalid(ENV_PAGE_SIZE, raw, e)),
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| invalid(ENV_TIMEOUT, raw, e))
}

fn invalid(var: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidEnv {
        var,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

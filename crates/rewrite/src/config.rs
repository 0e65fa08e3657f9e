use std::time::Duration;

use crate::error::{Result, RewriteError};

pub const API_URL_ENV: &str = "RECAST_API_URL";
pub const API_KEY_ENV: &str = "RECAST_API_KEY";
pub const API_TIMEOUT_ENV: &str = "RECAST_API_TIMEOUT_SECS";

// Rewrite responses routinely take tens of seconds for large files.
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const MAX_TIMEOUT_SECS: u64 = 600;

/// Connection settings for the rewrite service.
#[derive(Debug, Clone)]
pub struct RewriteConfig {
    pub api_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl RewriteConfig {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn from_env() -> Result<Self> {
        let timeout = std::env::var(API_TIMEOUT_ENV).ok();
        Ok(Self {
            api_url: require_env(API_URL_ENV)?,
            api_key: require_env(API_KEY_ENV)?,
            timeout: parse_timeout(timeout.as_deref()),
        })
    }
}

fn require_env(name: &'static str) -> Result<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(RewriteError::MissingConfig { name })
}

fn parse_timeout(raw: Option<&str>) -> Duration {
    let secs = raw
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_TIMEOUT_SECS)
        .clamp(1, MAX_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_timeout_defaults_and_clamps() {
        assert_eq!(parse_timeout(None), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(
            parse_timeout(Some("")),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
        assert_eq!(
            parse_timeout(Some("abc")),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
        assert_eq!(parse_timeout(Some("30")), Duration::from_secs(30));
        assert_eq!(parse_timeout(Some("0")), Duration::from_secs(1));
        assert_eq!(
            parse_timeout(Some("100000")),
            Duration::from_secs(MAX_TIMEOUT_SECS)
        );
    }

    #[test]
    fn new_uses_the_default_timeout() {
        let config = RewriteConfig::new("https://example.test/v1", "key");
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.api_url, "https://example.test/v1");
    }
}

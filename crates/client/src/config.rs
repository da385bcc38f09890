//! Client configuration from environment variables.

use std::time::Duration;

use maicivy_shared::{realtime_url, ConfigError, API_URL_ENV, DEFAULT_API_URL};
use url::Url;

use crate::backoff::{ReconnectPolicy, RetryPolicy};

pub const DEFAULT_PING_INTERVAL: Duration = Duration::from_secs(30);

/// Settings shared by every data hook in the app.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Backend base URL, e.g. `http://localhost:8080`
    pub api_base_url: String,
    pub reconnect: ReconnectPolicy,
    pub retry: RetryPolicy,
    /// Keepalive cadence on the realtime socket; `None` disables pings.
    pub ping_interval: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            reconnect: ReconnectPolicy::default(),
            retry: RetryPolicy::default(),
            ping_interval: Some(DEFAULT_PING_INTERVAL),
        }
    }
}

impl ClientConfig {
    /// Build a config for the given backend, validating the URL.
    pub fn new(api_base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let api_base_url = api_base_url.into();
        validate_base_url(&api_base_url)?;
        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        })
    }

    /// Parse configuration from the environment.
    ///
    /// Environment variables:
    /// - `MAICIVY_API_URL`: backend base URL (default: "http://localhost:8080")
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Ok(Self::default()),
        }
    }

    pub fn with_reconnect(mut self, reconnect: ReconnectPolicy) -> Self {
        self.reconnect = reconnect;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_ping_interval(mut self, ping_interval: Option<Duration>) -> Self {
        self.ping_interval = ping_interval;
        self
    }

    /// Realtime analytics socket for this backend.
    pub fn realtime_url(&self) -> String {
        realtime_url(&self.api_base_url)
    }
}

fn validate_base_url(raw: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };
    let parsed = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_backend() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.realtime_url(), "ws://localhost:8080/ws/analytics");
    }

    #[test]
    fn new_trims_trailing_slash() {
        let config = ClientConfig::new("https://api.maicivy.dev/").unwrap();
        assert_eq!(config.api_base_url, "https://api.maicivy.dev");
        assert_eq!(config.realtime_url(), "wss://api.maicivy.dev/ws/analytics");
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(matches!(
            ClientConfig::new("ftp://example.com"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(ClientConfig::new("not a url").is_err());
    }
}

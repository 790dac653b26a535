//! Configuration for the tasklist client.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tasklist_http::DEFAULT_BASE_URL;
use tasklist_runtime::StoreConfig;

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "tasklist=info,tasklist_runtime=warn";

/// Default bound on waiting for in-flight calls at unmount
pub const DEFAULT_SHUTDOWN_TIMEOUT_MS: u64 = 5000;

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend base URL, without trailing slash (`TODO_API_URL`)
    pub api_url: String,
    /// Unmount waits at most this long for in-flight calls (`TODO_SHUTDOWN_TIMEOUT_MS`)
    pub shutdown_timeout_ms: u64,
    /// Tracing filter directives (`RUST_LOG`)
    pub log_filter: String,
}

impl ClientConfig {
    /// Read the configuration from the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the configuration through `lookup`, falling back to defaults for
    /// missing or unparseable values
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            api_url: lookup("TODO_API_URL").map_or_else(
                || DEFAULT_BASE_URL.to_string(),
                |url| url.trim_end_matches('/').to_string(),
            ),
            shutdown_timeout_ms: lookup("TODO_SHUTDOWN_TIMEOUT_MS")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT_MS),
            log_filter: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }

    /// Shutdown bound as a [`Duration`]
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }

    /// Store settings derived from this configuration
    #[must_use]
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::default().with_shutdown_timeout(self.shutdown_timeout())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, "http://localhost:5000/api");
        assert_eq!(config.shutdown_timeout(), Duration::from_secs(5));
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn overrides_are_applied() {
        let config = ClientConfig::from_lookup(lookup_in(&[
            ("TODO_API_URL", "https://todos.example.com/api/"),
            ("TODO_SHUTDOWN_TIMEOUT_MS", "250"),
            ("RUST_LOG", "debug"),
        ]));

        assert_eq!(config.api_url, "https://todos.example.com/api");
        assert_eq!(config.shutdown_timeout_ms, 250);
        assert_eq!(config.log_filter, "debug");
        assert_eq!(
            config.store_config().default_shutdown_timeout,
            Duration::from_millis(250)
        );
    }

    #[test]
    fn unparseable_timeout_falls_back() {
        let config =
            ClientConfig::from_lookup(lookup_in(&[("TODO_SHUTDOWN_TIMEOUT_MS", "soon")]));
        assert_eq!(config.shutdown_timeout_ms, DEFAULT_SHUTDOWN_TIMEOUT_MS);
    }
}

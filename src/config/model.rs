//! Serde data structures for the erase-proxy configuration file.
//!
//! Contains [`Config`] (the root), [`ServerConfig`] for the inbound side
//! and [`DownstreamConfig`] for the image service being relayed to. Every
//! field has a default, so an empty file is a valid config. All types
//! derive `Serialize` and `Deserialize` with `deny_unknown_fields` for
//! strict parsing.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_ERASE_PATH: &str = "/api/erase";
pub const DEFAULT_DOWNSTREAM_URL: &str = "http://localhost:5555/upload";

fn default_path() -> String {
    DEFAULT_ERASE_PATH.to_string()
}

const fn default_max_body() -> usize {
    16 * 1024 * 1024
}

fn default_url() -> String {
    DEFAULT_DOWNSTREAM_URL.to_string()
}

const fn default_timeout() -> u64 {
    30_000
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub downstream: DownstreamConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Route that accepts `POST` erase requests.
    #[serde(default = "default_path")]
    pub path: String,

    /// Maximum inbound body size in bytes.
    #[serde(default = "default_max_body")]
    pub max_body: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            max_body: default_max_body(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DownstreamConfig {
    /// Full URL of the image service upload endpoint.
    #[serde(default = "default_url")]
    pub url: String,

    /// Exchange timeout in milliseconds. `0` waits forever.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for DownstreamConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout: default_timeout(),
        }
    }
}

impl DownstreamConfig {
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        if self.timeout == 0 {
            None
        } else {
            Some(Duration::from_millis(self.timeout))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.server.path, "/api/erase");
        assert_eq!(config.server.max_body, 16 * 1024 * 1024);
        assert_eq!(config.downstream.url, "http://localhost:5555/upload");
        assert_eq!(config.downstream.timeout, 30_000);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"downstream": {"timeout": 1000}}"#).unwrap();
        assert_eq!(config.downstream.url, DEFAULT_DOWNSTREAM_URL);
        assert_eq!(
            config.downstream.timeout(),
            Some(Duration::from_millis(1000))
        );
    }

    #[test]
    fn zero_timeout_disables_it() {
        let downstream = DownstreamConfig {
            timeout: 0,
            ..DownstreamConfig::default()
        };
        assert_eq!(downstream.timeout(), None);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = serde_json::from_str::<Config>(r#"{"routes": []}"#);
        assert!(result.is_err());
    }
}

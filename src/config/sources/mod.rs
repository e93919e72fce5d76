//! File-based config sources.
//!
//! Provides [`FileSource`](file_source::FileSource) for YAML, JSON and
//! TOML files (each gated by a feature flag), the [`parse_config_str`]
//! helper for format-specific deserialization, and [`sha256_hex`] for
//! content versioning.

pub mod file_source;

use sha2::{Digest, Sha256};

use crate::config::model::Config;
use crate::error::EraseProxyError;

/// Parse a config string based on file extension.
pub fn parse_config_str(
    ext: &str,
    content: &str,
    path_display: &str,
) -> Result<Config, EraseProxyError> {
    let parsed: Result<Config, Box<dyn std::error::Error + Send + Sync>> = match ext {
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => serde_yml::from_str(content).map_err(Into::into),

        #[cfg(feature = "json")]
        "json" => serde_json::from_str(content).map_err(Into::into),

        #[cfg(feature = "toml")]
        "toml" => toml::from_str(content).map_err(Into::into),

        other => return Err(EraseProxyError::UnsupportedFormat(other.to_string())),
    };

    parsed.map_err(|source| EraseProxyError::ConfigParse {
        path: path_display.to_string(),
        source,
    })
}

/// Compute a lowercase hex-encoded SHA-256 digest.
#[must_use]
pub fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

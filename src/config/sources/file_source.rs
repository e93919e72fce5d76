//! Async file-based config source with SHA256 versioning.
//!
//! [`FileSource`] reads a config file via Tokio, parses it according to
//! its extension, validates the result and computes a SHA256 hash of the
//! raw content for version reporting.

use std::path::{Path, PathBuf};

use super::{parse_config_str, sha256_hex};
use crate::config::model::Config;
use crate::config::validation::validate;
use crate::config::ConfigVersion;
use crate::error::EraseProxyError;

pub struct FileSource {
    path: PathBuf,
    format: &'static str,
}

impl FileSource {
    /// Create a source for `path`, rejecting extensions this build cannot parse.
    pub fn new(path: &Path) -> Result<Self, EraseProxyError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let format = match ext {
            #[cfg(feature = "yaml")]
            "yaml" | "yml" => "yaml",

            #[cfg(feature = "json")]
            "json" => "json",

            #[cfg(feature = "toml")]
            "toml" => "toml",

            other => return Err(EraseProxyError::UnsupportedFormat(other.to_string())),
        };

        Ok(Self {
            path: path.to_path_buf(),
            format,
        })
    }

    #[must_use]
    pub const fn format(&self) -> &'static str {
        self.format
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_content(&self) -> Result<String, EraseProxyError> {
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                EraseProxyError::ConfigFileNotFound {
                    path: self.path.clone(),
                }
            } else {
                EraseProxyError::Io(e)
            }
        })
    }

    pub async fn load(&self) -> Result<(Config, ConfigVersion), EraseProxyError> {
        let content = self.read_content().await?;

        let config = parse_config_str(self.format, &content, &self.path.display().to_string())?;

        if let Err(errors) = validate(&config) {
            return Err(EraseProxyError::ConfigValidation { errors });
        }

        let hash = sha256_hex(content.as_bytes());
        Ok((config, ConfigVersion::Hash(hash)))
    }
}

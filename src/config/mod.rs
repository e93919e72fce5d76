//! Configuration loading and validation.
//!
//! [`resolve`] picks the config source (an explicit file, an
//! auto-detected file in the working directory, or the built-in
//! defaults) and returns a [`LoadedConfig`] tagged with a
//! [`ConfigVersion`]. Submodules provide the data model, validation
//! logic, and the file source.

pub mod model;
pub mod sources;
pub mod validation;

use std::path::{Path, PathBuf};

use crate::error::EraseProxyError;
use model::Config;
use sources::file_source::FileSource;

/// File names probed in the working directory when no `--config` is given.
pub const CANDIDATE_FILES: &[&str] = &[
    "erase-proxy.yaml",
    "erase-proxy.yml",
    "erase-proxy.json",
    "erase-proxy.toml",
];

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigVersion {
    Hash(String),
    Defaults,
}

impl ConfigVersion {
    /// Short form for display: the first 8 hex digits of a hash, or `defaults`.
    #[must_use]
    pub fn short(&self) -> &str {
        match self {
            Self::Hash(h) => h.get(..8).unwrap_or(h),
            Self::Defaults => "defaults",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub version: ConfigVersion,
    pub source_name: String,
}

impl LoadedConfig {
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            config: Config::default(),
            version: ConfigVersion::Defaults,
            source_name: "defaults".into(),
        }
    }
}

pub async fn resolve(explicit: Option<&Path>) -> Result<LoadedConfig, EraseProxyError> {
    let source = if let Some(path) = explicit {
        Some(FileSource::new(path)?)
    } else {
        auto_detect().await?
    };

    let Some(source) = source else {
        tracing::info!("no config file found, using built-in defaults");
        return Ok(LoadedConfig::defaults());
    };

    let (config, version) = source.load().await?;
    Ok(LoadedConfig {
        config,
        version,
        source_name: source.path().display().to_string(),
    })
}

async fn auto_detect() -> Result<Option<FileSource>, EraseProxyError> {
    for name in CANDIDATE_FILES {
        let path = PathBuf::from(name);
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tracing::info!(path = %path.display(), "auto-detected config file");
            return FileSource::new(&path).map(Some);
        }
    }
    Ok(None)
}

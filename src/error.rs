//! Unified error types for erase-proxy.
//!
//! Defines [`EraseProxyError`] (the service-shell error enum),
//! [`ValidationError`] for config validation failures, and
//! [`ForwardError`] for a failed downstream exchange. All use
//! `thiserror` for `Display` and `Error` derives.
//!
//! [`ForwardError`] never reaches an HTTP caller: the erase handler
//! absorbs it into the forward-failure sentinel.

use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "  {}: {}", self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " ({suggestion})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

fn format_errors(errors: &[ValidationError]) -> String {
    use std::fmt::Write;
    let mut buf = String::new();
    for (i, e) in errors.iter().enumerate() {
        if i > 0 {
            buf.push('\n');
        }
        // write! to String is infallible (only fails on OOM which is unrecoverable)
        let _ = write!(buf, "{e}");
    }
    buf
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EraseProxyError {
    #[error("Config file not found: {}", path.display())]
    ConfigFileNotFound { path: PathBuf },

    #[error("Config parse error in {path}:\n  {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Config validation failed:\n{}", format_errors(.errors))]
    ConfigValidation { errors: Vec<ValidationError> },

    #[error("Unsupported config format: '{0}'")]
    UnsupportedFormat(String),

    #[error("Invalid address: {0}")]
    AddressParse(#[from] std::net::AddrParseError),

    #[error("Invalid URI: {source}")]
    UriParse {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("HTTP request failed: {source}")]
    HttpRequest {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("File already exists: {}", path.display())]
    FileExists { path: PathBuf },

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Health check failed with status {0}")]
    HealthCheckFailed(hyper::StatusCode),
}

/// A downstream exchange that produced no usable reply.
#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    #[error("failed to encode upload payload: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to build downstream request: {0}")]
    Request(#[from] http::Error),

    #[error("downstream unreachable: {source}")]
    Transport {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("failed to read downstream body: {source}")]
    Body {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("downstream timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("downstream body is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ForwardError {
    /// Short label for structured log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Encode(_) => "encode",
            Self::Request(_) => "request",
            Self::Transport { .. } => "transport",
            Self::Body { .. } => "body",
            Self::Timeout(_) => "timeout",
            Self::Decode(_) => "decode",
        }
    }
}

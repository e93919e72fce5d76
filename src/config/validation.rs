//! Configuration validation with detailed error reporting.
//!
//! The [`validate`] function checks a parsed [`Config`] for errors such
//! as a malformed erase path, a path that collides with `/health`, an
//! unusable downstream URL, or a zero body limit. Every problem is
//! collected into the returned list of [`ValidationError`] values.

use url::Url;

use super::model::Config;
use crate::error::ValidationError;

/// Paths served by the proxy itself.
pub const RESERVED_PATHS: &[&str] = &["/health"];

/// Validate the inbound erase path. Returns `Ok(())` or a human-readable error.
pub fn validate_path(path: &str) -> Result<(), String> {
    if path.is_empty() {
        return Err("path cannot be empty".into());
    }
    if !path.starts_with('/') {
        return Err("path must start with '/'".into());
    }
    if RESERVED_PATHS.contains(&path) {
        return Err(format!("'{path}' is reserved by the proxy"));
    }
    if let Some(segment) = path.split('/').find(|s| is_capture_segment(s)) {
        return Err(format!(
            "segment '{segment}' would be a route parameter, the erase path must be literal"
        ));
    }
    Ok(())
}

/// Segments the router would read as a capture or wildcard.
fn is_capture_segment(segment: &str) -> bool {
    segment.starts_with(':')
        || segment.starts_with('*')
        || segment.contains('{')
        || segment.contains('}')
}

/// Strip capture syntax from every segment, keeping the names.
fn literal_path(path: &str) -> String {
    path.split('/')
        .map(|s| s.trim_start_matches([':', '*']).replace(['{', '}'], ""))
        .collect::<Vec<_>>()
        .join("/")
}

/// Validate the downstream URL. Returns `Ok(())` or a human-readable error.
pub fn validate_downstream_url(url: &str) -> Result<(), String> {
    match Url::parse(url) {
        Ok(parsed) => {
            let scheme = parsed.scheme();
            if scheme != "http" && scheme != "https" {
                Err(format!(
                    "unsupported scheme '{scheme}' (expected http or https)"
                ))
            } else if parsed.host_str().map_or(true, str::is_empty) {
                Err(format!("'{url}' has no host"))
            } else {
                Ok(())
            }
        }
        Err(_) => Err(format!("'{url}' is not a valid URL")),
    }
}

pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let path = &config.server.path;
    if let Err(msg) = validate_path(path) {
        errors.push(ValidationError {
            field: "server.path".into(),
            message: msg,
            suggestion: if !path.is_empty() && !path.starts_with('/') {
                Some(format!("did you mean '/{path}'?"))
            } else if path.split('/').any(is_capture_segment) {
                Some(format!("did you mean '{}'?", literal_path(path)))
            } else {
                None
            },
        });
    }

    if config.server.max_body == 0 {
        errors.push(ValidationError {
            field: "server.max_body".into(),
            message: "body limit must be greater than zero".into(),
            suggestion: Some("images are usually sent base64-encoded, allow a few MiB".into()),
        });
    }

    let url = &config.downstream.url;
    if let Err(msg) = validate_downstream_url(url) {
        errors.push(ValidationError {
            field: "downstream.url".into(),
            message: msg,
            suggestion: if url.contains("://") {
                None
            } else {
                Some(format!("did you mean 'http://{url}'?"))
            },
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[must_use]
pub fn format_validation_report(path: &str, config: &Config) -> String {
    let timeout = config.downstream.timeout().map_or_else(
        || "none".to_string(),
        |t| format!("{}ms", t.as_millis()),
    );

    let lines = [
        format!("  POST {}  -> {}", config.server.path, config.downstream.url),
        format!("    timeout:  {timeout}"),
        format!("    max body: {} bytes", config.server.max_body),
    ];

    format!("{} is valid\n{}", path, lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::{Config, DownstreamConfig, ServerConfig};

    fn config_with(path: &str, url: &str) -> Config {
        Config {
            server: ServerConfig {
                path: path.into(),
                ..ServerConfig::default()
            },
            downstream: DownstreamConfig {
                url: url.into(),
                ..DownstreamConfig::default()
            },
        }
    }

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn path_without_slash_fails() {
        let errors = validate(&config_with("erase", "http://localhost:5555/upload")).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.suggestion.as_deref() == Some("did you mean '/erase'?")));
    }

    #[test]
    fn empty_path_fails() {
        let errors = validate(&config_with("", "http://localhost:5555/upload")).unwrap_err();
        assert!(errors.iter().any(|e| e.message.contains("cannot be empty")));
    }

    #[test]
    fn health_path_is_reserved() {
        let errors = validate(&config_with("/health", "http://localhost:5555/upload")).unwrap_err();
        assert!(errors.iter().any(|e| e.message.contains("reserved")));
    }

    #[test]
    fn colon_capture_segment_fails() {
        let errors = validate(&config_with("/api/:image", "http://localhost:5555/upload")).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "server.path");
        assert!(errors[0].message.contains("':image'"));
        assert_eq!(errors[0].suggestion.as_deref(), Some("did you mean '/api/image'?"));
    }

    #[test]
    fn brace_and_wildcard_segments_fail() {
        for path in ["/api/{image}", "/api/*rest", "/api/{", "/erase}"] {
            assert!(validate_path(path).is_err(), "{path} should be rejected");
        }
    }

    #[test]
    fn literal_nested_path_is_accepted() {
        assert!(validate_path("/v2/images/erase").is_ok());
        assert!(validate_path("/api/erase-bg.json").is_ok());
    }

    #[test]
    fn invalid_url_fails() {
        let errors = validate(&config_with("/api/erase", "not a url")).unwrap_err();
        assert!(errors.iter().any(|e| e.message.contains("not a valid URL")));
    }

    #[test]
    fn url_without_scheme_gets_suggestion() {
        let errors = validate(&config_with("/api/erase", "localhost:5555/upload")).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.suggestion.as_deref() == Some("did you mean 'http://localhost:5555/upload'?")));
    }

    #[test]
    fn non_http_scheme_fails() {
        let errors = validate(&config_with("/api/erase", "ftp://host/upload")).unwrap_err();
        assert!(errors.iter().any(|e| e.message.contains("unsupported scheme")));
    }

    #[test]
    fn zero_body_limit_fails() {
        let mut config = Config::default();
        config.server.max_body = 0;
        let errors = validate(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "server.max_body");
    }

    #[test]
    fn errors_are_collected() {
        let mut config = config_with("nope", "nope");
        config.server.max_body = 0;
        let errors = validate(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn report_mentions_route_and_downstream() {
        let report = format_validation_report("erase-proxy.yaml", &Config::default());
        assert!(report.starts_with("erase-proxy.yaml is valid"));
        assert!(report.contains("POST /api/erase  -> http://localhost:5555/upload"));
        assert!(report.contains("timeout:  30000ms"));
    }
}

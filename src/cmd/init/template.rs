//! Commented config templates written by `erase-proxy init --full`.

use crate::cli::ConfigFormat;

#[must_use]
pub const fn full(format: &ConfigFormat) -> &'static str {
    match format {
        ConfigFormat::Yaml => YAML_FULL,
        ConfigFormat::Json => JSON_FULL,
        ConfigFormat::Toml => TOML_FULL,
    }
}

const YAML_FULL: &str = r#"# erase-proxy config
#
# All values shown are defaults. CLI flags and environment variables
# (DOWNSTREAM_URL, ERASE_PATH, REQUEST_TIMEOUT_MS, MAX_BODY_SIZE) override them.

server:
  # Route accepting POST requests with a JSON image body
  path: "/api/erase"
  # Maximum inbound body size in bytes (base64 images are large)
  max_body: 16777216

downstream:
  # Image service endpoint receiving {"image": <body>}
  url: "http://localhost:5555/upload"
  # Timeout for the whole downstream exchange in ms, 0 waits forever
  timeout: 30000
"#;

const JSON_FULL: &str = r#"{
  "server": {
    "path": "/api/erase",
    "max_body": 16777216
  },
  "downstream": {
    "url": "http://localhost:5555/upload",
    "timeout": 30000
  }
}
"#;

const TOML_FULL: &str = r#"# erase-proxy config
#
# All values shown are defaults. CLI flags and environment variables
# (DOWNSTREAM_URL, ERASE_PATH, REQUEST_TIMEOUT_MS, MAX_BODY_SIZE) override them.

[server]
# Route accepting POST requests with a JSON image body
path = "/api/erase"
# Maximum inbound body size in bytes (base64 images are large)
max_body = 16777216

[downstream]
# Image service endpoint receiving {"image": <body>}
url = "http://localhost:5555/upload"
# Timeout for the whole downstream exchange in ms, 0 waits forever
timeout = 30000
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::Config;

    #[test]
    fn json_template_matches_defaults() {
        let parsed: Config = serde_json::from_str(full(&ConfigFormat::Json)).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn yaml_template_matches_defaults() {
        let parsed: Config = serde_yml::from_str(full(&ConfigFormat::Yaml)).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[cfg(feature = "toml")]
    #[test]
    fn toml_template_matches_defaults() {
        let parsed: Config = toml::from_str(full(&ConfigFormat::Toml)).unwrap();
        assert_eq!(parsed, Config::default());
    }
}

//! # Configuration
//!
//! [`StoreConfig`] is read from an optional TOML file and then overridden by environment
//! variables. Every field has a default, so an empty file (or no file) is a valid config.
//!
//! ```toml
//! base_url = "http://localhost:8080/api"
//! poll_interval_ms = 2000
//! notice_ttl_ms = 5000
//! request_timeout_ms = 10000
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_API_URL: &str = "MEDIZAP_API_URL";
pub const ENV_POLL_INTERVAL_MS: &str = "MEDIZAP_POLL_INTERVAL_MS";
pub const ENV_NOTICE_TTL_MS: &str = "MEDIZAP_NOTICE_TTL_MS";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "MEDIZAP_REQUEST_TIMEOUT_MS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value {value:?} for {key}")]
    InvalidEnv { key: &'static str, value: String },
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Root of the service API, without a trailing slash.
    pub base_url: String,
    pub poll_interval_ms: u64,
    pub notice_ttl_ms: u64,
    pub request_timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            poll_interval_ms: 2000,
            notice_ttl_ms: 5000,
            request_timeout_ms: 10_000,
        }
    }
}

impl StoreConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn notice_ttl(&self) -> Duration {
        Duration::from_millis(self.notice_ttl_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: StoreConfig = toml::from_str(contents)?;
        config.validate()
    }

    /// Reads `path` if given, then applies process environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                tracing::debug!("Attempting to load configuration from: {:?}", path);
                let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                toml::from_str(&contents)?
            }
            None => StoreConfig::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?.validate()
    }

    /// Overrides fields from variables found by `lookup`.
    pub fn apply_env(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = lookup(ENV_API_URL) {
            self.base_url = url;
        }
        if let Some(ms) = parse_millis(&lookup, ENV_POLL_INTERVAL_MS)? {
            self.poll_interval_ms = ms;
        }
        if let Some(ms) = parse_millis(&lookup, ENV_NOTICE_TTL_MS)? {
            self.notice_ttl_ms = ms;
        }
        if let Some(ms) = parse_millis(&lookup, ENV_REQUEST_TIMEOUT_MS)? {
            self.request_timeout_ms = ms;
        }
        Ok(self)
    }

    fn validate(mut self) -> Result<Self, ConfigError> {
        self.base_url = self.base_url.trim().trim_end_matches('/').to_string();
        if self.base_url.is_empty() {
            return Err(ConfigError::Invalid("base_url must not be empty".to_string()));
        }
        for (name, value) in [
            ("poll_interval_ms", self.poll_interval_ms),
            ("notice_ttl_ms", self.notice_ttl_ms),
            ("request_timeout_ms", self.request_timeout_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be positive")));
            }
        }
        Ok(self)
    }
}

fn parse_millis(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<u64>, ConfigError> {
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidEnv { key, value })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = StoreConfig::from_toml_str("").unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.poll_interval(), Duration::from_secs(2));
        assert_eq!(config.notice_ttl(), Duration::from_secs(5));
    }

    #[test]
    fn test_partial_file_overrides_some_fields() {
        let config = StoreConfig::from_toml_str(
            r#"
            base_url = "http://pharmacy.local/api/"
            poll_interval_ms = 500
            "#,
        )
        .unwrap();

        assert_eq!(config.base_url, "http://pharmacy.local/api");
        assert_eq!(config.poll_interval_ms, 500);
        assert_eq!(config.notice_ttl_ms, 5000);
    }

    #[test]
    fn test_env_overrides_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_API_URL, "http://10.0.0.2:8080/api"),
            (ENV_NOTICE_TTL_MS, "1500"),
        ]);
        let config = StoreConfig::default()
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.base_url, "http://10.0.0.2:8080/api");
        assert_eq!(config.notice_ttl(), Duration::from_millis(1500));
        assert_eq!(config.poll_interval_ms, 2000);
    }

    #[test]
    fn test_bad_env_value_is_reported() {
        let result = StoreConfig::default().apply_env(|key| {
            (key == ENV_POLL_INTERVAL_MS).then(|| "soon".to_string())
        });

        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnv { key: ENV_POLL_INTERVAL_MS, .. })
        ));
    }

    #[test]
    fn test_zero_interval_is_invalid() {
        let result = StoreConfig::from_toml_str("poll_interval_ms = 0");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result = StoreConfig::from_toml_str("base_url = ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}

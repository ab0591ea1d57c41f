//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::prediction::PredictionConfig;
use crate::session::SessionConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoint: EndpointConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Prediction endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointConfig {
    #[serde(default = "default_endpoint_url")]
    pub url: String,

    #[serde(default = "default_loading_delay")]
    pub loading_delay_ms: u64,

    /// Unset means the HTTP client's own default applies
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_endpoint_url() -> String {
    "https://fastapi-ml-app-62il.onrender.com/predict".to_string()
}

fn default_loading_delay() -> u64 {
    1000
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: default_endpoint_url(),
            loading_delay_ms: default_loading_delay(),
            request_timeout_secs: None,
        }
    }
}

impl EndpointConfig {
    pub fn prediction_config(&self) -> PredictionConfig {
        PredictionConfig {
            endpoint_url: self.url.clone(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            loading_delay: Duration::from_millis(self.loading_delay_ms),
        }
    }
}

/// Dashboard API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// An explicit empty list (or `"*"`) allows any origin
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:8091".to_string(),
        "http://127.0.0.1:8091".to_string(),
    ]
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    ///
    /// Nothing is logged here; the caller reports the outcome once its
    /// subscriber is installed.
    pub fn load_default() -> DefaultLoad {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("predictdash").join("config.toml")),
            Some(PathBuf::from("/etc/predictdash/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths, |key| std::env::var(key).ok())
    }

    fn load_first(paths: &[PathBuf], lookup: impl Fn(&str) -> Option<String>) -> DefaultLoad {
        let mut rejected = Vec::new();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load(path) {
                Ok(mut config) => {
                    config.apply_overrides(&lookup);
                    return DefaultLoad {
                        config,
                        source: Some(path.clone()),
                        rejected,
                    };
                }
                Err(e) => rejected.push(e),
            }
        }

        let mut config = Config::default();
        config.apply_overrides(&lookup);
        DefaultLoad {
            config,
            source: None,
            rejected,
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Endpoint overrides
        if let Some(url) = lookup("PREDICTDASH_ENDPOINT_URL") {
            self.endpoint.url = url;
        }
        if let Some(delay) = lookup("PREDICTDASH_LOADING_DELAY_MS").and_then(|s| s.parse().ok()) {
            self.endpoint.loading_delay_ms = delay;
        }
        if let Some(secs) = lookup("PREDICTDASH_REQUEST_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            self.endpoint.request_timeout_secs = Some(secs);
        }

        // API overrides
        if let Some(host) = lookup("PREDICTDASH_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = lookup("PREDICTDASH_API_PORT").and_then(|s| s.parse().ok()) {
            self.api.port = port;
        }

        // Logging overrides
        if let Some(level) = lookup("PREDICTDASH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("PREDICTDASH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Result of searching the default config locations
#[derive(Debug)]
pub struct DefaultLoad {
    pub config: Config,
    /// File the settings came from; `None` means built-in defaults
    pub source: Option<PathBuf>,
    /// Files that exist but could not be read or parsed
    pub rejected: Vec<ConfigError>,
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Predictdash Configuration
#
# Environment variables override these settings:
# - PREDICTDASH_ENDPOINT_URL
# - PREDICTDASH_LOADING_DELAY_MS
# - PREDICTDASH_REQUEST_TIMEOUT_SECS
# - PREDICTDASH_API_HOST
# - PREDICTDASH_API_PORT
# - PREDICTDASH_LOG_LEVEL
# - PREDICTDASH_LOG_FORMAT

[endpoint]
# Prediction endpoint; receives POST {"features": [...]}
url = "https://fastapi-ml-app-62il.onrender.com/predict"

# Pause before each call so the loading indicator is visible (0 disables)
loading_delay_ms = 1000

# Request timeout in seconds (unset uses the HTTP client default)
# request_timeout_secs = 30

[api]
# Dashboard API host
host = "0.0.0.0"

# Dashboard API port
port = 8090

# Allowed CORS origins (empty allows any)
cors_origins = ["http://localhost:8091", "http://127.0.0.1:8091"]

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.endpoint.url, "https://fastapi-ml-app-62il.onrender.com/predict");
        assert_eq!(config.endpoint.loading_delay_ms, 1000);
        assert_eq!(config.endpoint.request_timeout_secs, None);
        assert_eq!(config.api.addr(), "0.0.0.0:8090");
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.endpoint.url, default_endpoint_url());
        assert_eq!(config.api.port, 8090);
        assert_eq!(config.api.cors_origins.len(), 2);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = Config::parse(
            r#"
            [endpoint]
            url = "http://localhost:9000/predict"
            request_timeout_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.endpoint.url, "http://localhost:9000/predict");
        assert_eq!(config.endpoint.loading_delay_ms, 1000);
        assert_eq!(
            config.endpoint.prediction_config().request_timeout,
            Some(Duration::from_secs(5))
        );
        assert_eq!(config.api.port, 8090);
        assert_eq!(config.api.cors_origins, ApiConfig::default().cors_origins);
    }

    #[test]
    fn test_cors_origins_default_matches_missing_file() {
        let config = Config::parse("[api]\nport = 9000\n").unwrap();
        assert_eq!(config.api.cors_origins, Config::default().api.cors_origins);
        assert_eq!(config.api.cors_origins.len(), 2);

        let open = Config::parse("[api]\ncors_origins = []\n").unwrap();
        assert!(open.api.cors_origins.is_empty());
    }

    #[test]
    fn test_load_first_reports_source_and_rejects() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.toml");
        let good = dir.path().join("good.toml");
        std::fs::write(&bad, "[api\n").unwrap();
        std::fs::write(&good, "[api]\nport = 7000\n").unwrap();
        let paths = vec![dir.path().join("absent.toml"), bad, good.clone()];

        let loaded = Config::load_first(&paths, |key| {
            (key == "PREDICTDASH_API_HOST").then(|| "127.0.0.1".to_string())
        });

        assert_eq!(loaded.source, Some(good));
        assert_eq!(loaded.rejected.len(), 1);
        assert!(matches!(loaded.rejected[0], ConfigError::Parse { .. }));
        assert_eq!(loaded.config.api.addr(), "127.0.0.1:7000");
    }

    #[test]
    fn test_load_first_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_first(&[dir.path().join("absent.toml")], |_| None);

        assert!(loaded.source.is_none());
        assert!(loaded.rejected.is_empty());
        assert_eq!(loaded.config.api.port, 8090);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nport = 9999\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.api.port, 9999);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = Config::load(&dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[api\nport = ").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("PREDICTDASH_ENDPOINT_URL", "http://model:8000/predict"),
            ("PREDICTDASH_LOADING_DELAY_MS", "0"),
            ("PREDICTDASH_API_PORT", "not-a-port"),
            ("PREDICTDASH_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.endpoint.url, "http://model:8000/predict");
        assert!(config.endpoint.session_config().loading_delay.is_zero());
        assert_eq!(config.api.port, 8090);
        assert!(config.logging.is_json());
    }
}

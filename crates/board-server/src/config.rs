//! Configuration loading

use anyhow::{Context, Result};
use board_auth::{AuthConfig, PasswordHasher, TokenCodec};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Signing secret, token lifetime and password derivation; no defaults
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Metrics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_enabled")]
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_metrics_enabled(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_db_path() -> String {
    "./data/board.db".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_metrics_enabled() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// The file must exist: the auth section has no defaults.
    pub fn load(path: &str) -> Result<Self> {
        let config_path = Path::new(path);

        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;

        config
            .validate()
            .with_context(|| format!("Invalid configuration in {}", path))?;

        Ok(config)
    }

    /// Reject auth settings the hasher or token codec would refuse
    fn validate(&self) -> Result<()> {
        PasswordHasher::new(&self.auth.password)?;
        TokenCodec::new(&self.auth.jwt_secret, self.auth.token_ttl_secs)?;

        match self.logging.format.as_str() {
            "pretty" | "json" => Ok(()),
            other => anyhow::bail!("Unknown log format: {}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FULL_CONFIG: &str = r#"
[server]
port = 8080

[auth]
jwt_secret = "change-me"
token_ttl_secs = 3600

[auth.password]
algorithm = "argon2id"
iterations = 2
memory_kib = 19456
output_len = 64
"#;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_with_defaults() {
        let file = write_config(FULL_CONFIG);
        let config = Config::load(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(config.database.path, "./data/board.db");
        assert_eq!(config.logging.format, "pretty");
        assert!(config.metrics.enabled);
        assert_eq!(config.auth.token_ttl_secs, 3600);
        assert_eq!(config.auth.password.output_len, 64);
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(Config::load("/nonexistent/board.toml").is_err());
    }

    #[test]
    fn test_missing_auth_field_is_error() {
        let without_ttl = FULL_CONFIG.replace("token_ttl_secs = 3600\n", "");
        let file = write_config(&without_ttl);
        assert!(Config::load(file.path().to_str().unwrap()).is_err());

        let without_iterations = FULL_CONFIG.replace("iterations = 2\n", "");
        let file = write_config(&without_iterations);
        assert!(Config::load(file.path().to_str().unwrap()).is_err());

        let file = write_config("[server]\nport = 8080\n");
        assert!(Config::load(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_invalid_auth_values_rejected() {
        let bad_algorithm = FULL_CONFIG.replace("argon2id", "sha1");
        let file = write_config(&bad_algorithm);
        assert!(Config::load(file.path().to_str().unwrap()).is_err());

        let empty_secret = FULL_CONFIG.replace("\"change-me\"", "\"\"");
        let file = write_config(&empty_secret);
        assert!(Config::load(file.path().to_str().unwrap()).is_err());

        let huge_ttl = FULL_CONFIG.replace("3600", "9223372036854775807");
        let file = write_config(&huge_ttl);
        assert!(Config::load(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let content = format!("{}\n[logging]\nformat = \"xml\"\n", FULL_CONFIG);
        let file = write_config(&content);
        assert!(Config::load(file.path().to_str().unwrap()).is_err());
    }
}

//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("environment variable {name} has invalid value {value:?}")]
    InvalidEnvVar { name: &'static str, value: String },
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: AppConfig = toml::from_str(&content)?;

    apply_env_overrides(&mut config)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Build a configuration from defaults plus environment overrides, with no
/// config file on disk.
pub fn load_defaults() -> Result<AppConfig, ConfigError> {
    let mut config = AppConfig::default();
    apply_env_overrides(&mut config)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Apply the environment variables the process manager historically honored:
/// `PORT`, `PACE_WORKERS` and `LOG_LEVEL`.
fn apply_env_overrides(config: &mut AppConfig) -> Result<(), ConfigError> {
    if let Ok(port) = std::env::var("PORT") {
        let port: u16 = port.parse().map_err(|_| ConfigError::InvalidEnvVar {
            name: "PORT",
            value: port.clone(),
        })?;
        let host = config
            .listener
            .bind_address
            .rsplit_once(':')
            .map(|(host, _)| host.to_string())
            .unwrap_or_else(|| "0.0.0.0".to_string());
        config.listener.bind_address = format!("{host}:{port}");
    }

    if let Ok(workers) = std::env::var("PACE_WORKERS") {
        config.workers.count = workers.parse().map_err(|_| ConfigError::InvalidEnvVar {
            name: "PACE_WORKERS",
            value: workers.clone(),
        })?;
    }

    if let Ok(level) = std::env::var("LOG_LEVEL") {
        config.observability.log_level = level;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_config() {
        let toml = r#"
            [listener]
            bind_address = "127.0.0.1:8000"

            [workers]
            count = 2
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:8000");
        assert_eq!(config.workers.count, 2);
        // Untouched sections keep their defaults.
        assert_eq!(config.workers.threads, 2);
        assert_eq!(config.timeouts.request_secs, 60);
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.workers.count, 4);
        assert_eq!(config.workers.max_requests, 1000);
        assert_eq!(config.workers.max_requests_jitter, 100);
        assert_eq!(config.health_check.interval_secs, 30);
    }
}

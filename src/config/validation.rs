//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (worker counts > 0, timeouts > 0)
//! - Reject contradictory flag combinations (debug in production)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::AppConfig;

/// A single semantic validation failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("observability.metrics_address {0:?} is not a valid socket address")]
    InvalidMetricsAddress(String),

    #[error("listener.max_connections must be greater than zero")]
    ZeroMaxConnections,

    #[error("workers.count must be greater than zero")]
    ZeroWorkers,

    #[error("workers.threads must be greater than zero")]
    ZeroThreads,

    #[error("workers.max_requests must be greater than zero")]
    ZeroMaxRequests,

    #[error("workers.max_requests_jitter must be smaller than workers.max_requests")]
    JitterExceedsCeiling,

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("timeouts.keepalive_secs must not exceed timeouts.request_secs")]
    KeepaliveExceedsRequestTimeout,

    #[error("health_check.interval_secs must be greater than zero")]
    ZeroProbeInterval,

    #[error("health_check.timeout_secs must be greater than zero and not exceed the probe interval")]
    InvalidProbeTimeout,

    #[error("health_check.failure_threshold must be greater than zero")]
    ZeroFailureThreshold,

    #[error("health_check.path must start with '/'")]
    InvalidProbePath,

    #[error("mode.debug must be off when mode.production is on")]
    DebugInProduction,
}

/// Validate a parsed configuration, collecting every violation.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.listener.max_connections == 0 {
        errors.push(ValidationError::ZeroMaxConnections);
    }

    if config.workers.count == 0 {
        errors.push(ValidationError::ZeroWorkers);
    }
    if config.workers.threads == 0 {
        errors.push(ValidationError::ZeroThreads);
    }
    if config.workers.max_requests == 0 {
        errors.push(ValidationError::ZeroMaxRequests);
    } else if config.workers.max_requests_jitter >= config.workers.max_requests {
        errors.push(ValidationError::JitterExceedsCeiling);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    } else if config.timeouts.keepalive_secs > config.timeouts.request_secs {
        errors.push(ValidationError::KeepaliveExceedsRequestTimeout);
    }

    if config.health_check.enabled {
        if config.health_check.interval_secs == 0 {
            errors.push(ValidationError::ZeroProbeInterval);
        }
        if config.health_check.timeout_secs == 0
            || config.health_check.timeout_secs > config.health_check.interval_secs
        {
            errors.push(ValidationError::InvalidProbeTimeout);
        }
        if config.health_check.failure_threshold == 0 {
            errors.push(ValidationError::ZeroFailureThreshold);
        }
        if !config.health_check.path.starts_with('/') {
            errors.push(ValidationError::InvalidProbePath);
        }
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.mode.production && config.mode.debug {
        errors.push(ValidationError::DebugInProduction);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn rejects_zero_workers_and_threads() {
        let mut config = AppConfig::default();
        config.workers.count = 0;
        config.workers.threads = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::ZeroWorkers));
        assert!(errors.contains(&ValidationError::ZeroThreads));
    }

    #[test]
    fn rejects_jitter_at_or_above_ceiling() {
        let mut config = AppConfig::default();
        config.workers.max_requests = 100;
        config.workers.max_requests_jitter = 100;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::JitterExceedsCeiling]);
    }

    #[test]
    fn rejects_debug_in_production() {
        let mut config = AppConfig::default();
        config.mode.production = true;
        config.mode.debug = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::DebugInProduction]);
    }

    #[test]
    fn rejects_probe_timeout_longer_than_interval() {
        let mut config = AppConfig::default();
        config.health_check.interval_secs = 5;
        config.health_check.timeout_secs = 10;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::InvalidProbeTimeout]);
    }

    #[test]
    fn collects_multiple_errors() {
        let mut config = AppConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.timeouts.request_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}

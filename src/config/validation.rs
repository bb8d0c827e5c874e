//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Keep the worker address and the exposure target consistent
//! - Validate value ranges (ports, poll intervals)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LauncherConfig → Result<(), Vec<ValidationError>>
//! - Runs before the launcher is constructed

use std::net::IpAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::{LauncherConfig, ReadinessMode, URL_PLACEHOLDER};

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{section}.command must not be empty")]
    EmptyCommand { section: &'static str },

    #[error("worker.port must be non-zero")]
    ZeroPort,

    #[error("worker.host {0:?} is not a valid IP address or hostname")]
    InvalidHost(String),

    #[error("exposure.args must contain the {{url}} placeholder")]
    MissingUrlPlaceholder,

    #[error("readiness.poll_interval_ms must be greater than zero")]
    ZeroPollInterval,

    #[error(
        "readiness.poll_timeout_ms ({timeout_ms}) is shorter than poll_interval_ms ({interval_ms})"
    )]
    PollTimeoutTooShort { timeout_ms: u64, interval_ms: u64 },

    #[error("observability.log_level {0:?} is not one of trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Check a configuration and collect every problem.
pub fn validate_config(config: &LauncherConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.worker.command.trim().is_empty() {
        errors.push(ValidationError::EmptyCommand { section: "worker" });
    }
    if config.exposure.command.trim().is_empty() {
        errors.push(ValidationError::EmptyCommand { section: "exposure" });
    }

    if config.worker.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }
    if !is_valid_host(&config.worker.host) {
        errors.push(ValidationError::InvalidHost(config.worker.host.clone()));
    }

    if !config.exposure.args.iter().any(|arg| arg.contains(URL_PLACEHOLDER)) {
        errors.push(ValidationError::MissingUrlPlaceholder);
    }

    if config.readiness.mode == ReadinessMode::Poll {
        let readiness = &config.readiness;
        if readiness.poll_interval_ms == 0 {
            errors.push(ValidationError::ZeroPollInterval);
        } else if readiness.poll_timeout_ms < readiness.poll_interval_ms {
            errors.push(ValidationError::PollTimeoutTooShort {
                timeout_ms: readiness.poll_timeout_ms,
                interval_ms: readiness.poll_interval_ms,
            });
        }
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !matches!(level.as_str(), "trace" | "debug" | "info" | "warn" | "error") {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_valid_host(host: &str) -> bool {
    if host.is_empty() {
        return false;
    }
    if host.parse::<IpAddr>().is_ok() {
        return true;
    }
    Url::parse(&format!("http://{}/", host))
        .map(|url| url.host_str().is_some_and(|parsed| parsed.eq_ignore_ascii_case(host)))
        .unwrap_or(false)
}

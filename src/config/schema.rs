//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the launcher.
//! All types derive Serde traits for deserialization from config files, and
//! every section falls back to the built-in defaults so the launcher runs
//! with no file at all.

use serde::{Deserialize, Serialize};

/// Placeholder replaced by the worker's local URL (e.g. `http://127.0.0.1:5000`).
pub const URL_PLACEHOLDER: &str = "{url}";
/// Placeholder replaced by the worker's host.
pub const HOST_PLACEHOLDER: &str = "{host}";
/// Placeholder replaced by the worker's port.
pub const PORT_PLACEHOLDER: &str = "{port}";

/// Root configuration for the launcher.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct LauncherConfig {
    /// Background worker (the local web application).
    pub worker: WorkerConfig,

    /// Foreground exposure process (the tunnel).
    pub exposure: ExposureConfig,

    /// How the launcher decides the worker is ready.
    pub readiness: ReadinessConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Worker process configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct WorkerConfig {
    /// Executable to start.
    pub command: String,

    /// Arguments, may contain `{host}`/`{port}`/`{url}` placeholders.
    pub args: Vec<String>,

    /// Host the worker listens on, as seen by the exposure process.
    pub host: String,

    /// Port the worker listens on.
    pub port: u16,

    /// Start the worker in its own process group (Unix only).
    pub detach: bool,

    /// Kill the worker once the exposure process has exited.
    pub terminate_on_exit: bool,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            command: "python".to_string(),
            args: vec!["run_server.py".to_string()],
            host: "127.0.0.1".to_string(),
            port: 5000,
            detach: true,
            terminate_on_exit: false,
        }
    }
}

/// Exposure (tunnel) process configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ExposureConfig {
    /// Tunnel executable.
    pub command: String,

    /// Argument template; `{url}` is replaced by the worker URL.
    pub args: Vec<String>,
}

impl Default for ExposureConfig {
    fn default() -> Self {
        Self {
            command: "cloudflared".to_string(),
            args: vec![
                "tunnel".to_string(),
                "--url".to_string(),
                URL_PLACEHOLDER.to_string(),
            ],
        }
    }
}

/// Strategy used between the two spawns.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReadinessMode {
    /// Sleep for `delay_ms` and assume the worker is up.
    #[default]
    Delay,
    /// Sleep for `delay_ms`, then probe the worker port until it accepts.
    Poll,
}

/// Readiness configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ReadinessConfig {
    /// Delay or poll.
    pub mode: ReadinessMode,

    /// Fixed startup delay in milliseconds.
    pub delay_ms: u64,

    /// Base interval between port probes in milliseconds.
    pub poll_interval_ms: u64,

    /// Upper bound for the backoff between probes in milliseconds.
    pub poll_max_interval_ms: u64,

    /// Give up probing after this many milliseconds.
    pub poll_timeout_ms: u64,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            mode: ReadinessMode::Delay,
            delay_ms: 5_000,
            poll_interval_ms: 250,
            poll_max_interval_ms: 2_000,
            poll_timeout_ms: 30_000,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human or JSON log lines.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl WorkerConfig {
    /// Local URL the exposure process should tunnel to.
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// `host:port` string used for readiness probes.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

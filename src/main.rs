//! Tunnel launcher.
//!
//! ```text
//!   ┌──────────┐  spawn (detached)   ┌──────────────┐
//!   │ launcher │────────────────────▶│    worker    │ listens on 127.0.0.1:5000
//!   │          │                     └──────────────┘
//!   │          │  readiness gate (delay / poll)
//!   │          │  spawn + wait       ┌──────────────┐
//!   │          │────────────────────▶│   exposure   │ tunnel --url http://127.0.0.1:5000
//!   └──────────┘◀── exit code ───────└──────────────┘
//! ```
//!
//! Runs with no arguments; every flag overrides an embedded default.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use tunnel_launcher::config::loader::{load_config, ConfigError};
use tunnel_launcher::config::validation::validate_config;
use tunnel_launcher::config::{LauncherConfig, ReadinessMode};
use tunnel_launcher::observability::init_logging;
use tunnel_launcher::{LaunchError, LaunchReport, Launcher};

/// Exit code when the configuration cannot be loaded or fails validation.
const CONFIG_ERROR_EXIT: u8 = 2;
/// Exit code when the tunnel cannot be run or reports a code outside 0..=255.
const LAUNCH_ERROR_EXIT: u8 = 1;

#[derive(Parser, Debug)]
#[command(name = "tunnel-launcher")]
#[command(about = "Start a local web worker and expose it through a tunnel", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port the worker listens on
    #[arg(short, long)]
    port: Option<u16>,

    /// Startup delay before the tunnel starts, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Probe the worker port after the delay instead of assuming readiness
    #[arg(long)]
    wait_for_port: bool,

    /// Kill the worker once the tunnel exits
    #[arg(long)]
    terminate_worker: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    fn apply(&self, config: &mut LauncherConfig) {
        if let Some(port) = self.port {
            config.worker.port = port;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.readiness.delay_ms = delay_ms;
        }
        if self.wait_for_port {
            config.readiness.mode = ReadinessMode::Poll;
        }
        if self.terminate_worker {
            config.worker.terminate_on_exit = true;
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
    }

    fn effective_config(&self) -> Result<LauncherConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => LauncherConfig::default(),
        };
        self.apply(&mut config);
        validate_config(&config)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.effective_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("tunnel-launcher: {}", e);
            return ExitCode::from(CONFIG_ERROR_EXIT);
        }
    };

    if cli.print_config {
        return match toml::to_string_pretty(&config) {
            Ok(text) => {
                print!("{}", text);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("tunnel-launcher: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    init_logging(&config.observability);

    tracing::info!(
        worker = %config.worker.command,
        url = %config.worker.url(),
        exposure = %config.exposure.command,
        delay_ms = config.readiness.delay_ms,
        mode = ?config.readiness.mode,
        "Configuration loaded"
    );

    let result = Launcher::new(config).run().await;
    if let Err(e) = &result {
        eprintln!("tunnel-launcher: {}", e);
    }
    ExitCode::from(exit_status_for(&result))
}

/// The launcher's own exit code: the tunnel's code passed through.
fn exit_status_for(result: &Result<LaunchReport, LaunchError>) -> u8 {
    match result {
        Ok(report) => u8::try_from(report.exit_code).unwrap_or(LAUNCH_ERROR_EXIT),
        Err(_) => LAUNCH_ERROR_EXIT,
    }
}

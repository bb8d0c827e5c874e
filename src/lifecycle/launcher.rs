//! Launch orchestration.
//!
//! # Responsibilities
//! - Start the worker without waiting on it
//! - Hold the exposure process back behind the readiness gate
//! - Run the exposure process in the foreground and surface its exit code
//!
//! # Design Decisions
//! - A worker that fails to spawn is reported, and the launch continues
//! - Spawns are never retried
//! - Status lines go to stdout, diagnostics go through tracing

use std::time::Duration;

use crate::config::LauncherConfig;
use crate::error::LaunchError;
use crate::lifecycle::shutdown::release_worker;
use crate::lifecycle::state::{LaunchState, Lifecycle};
use crate::process::{CommandSpec, ProcessSpawner, SystemSpawner, WorkerHandle};
use crate::readiness::{ReadinessGate, ReadinessOutcome};

/// How the worker spawn went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerOutcome {
    Started { pid: Option<u32> },
    SpawnFailed { reason: String },
}

/// Summary of a completed launch.
#[derive(Debug, Clone)]
pub struct LaunchReport {
    pub worker: WorkerOutcome,
    pub readiness: ReadinessOutcome,
    /// Exit code of the exposure process, and so of the launcher.
    pub exit_code: i32,
    pub transitions: Vec<LaunchState>,
}

pub struct Launcher<S = SystemSpawner> {
    config: LauncherConfig,
    spawner: S,
}

impl Launcher<SystemSpawner> {
    pub fn new(config: LauncherConfig) -> Self {
        Self::with_spawner(config, SystemSpawner)
    }
}

impl<S: ProcessSpawner> Launcher<S> {
    pub fn with_spawner(config: LauncherConfig, spawner: S) -> Self {
        Self { config, spawner }
    }

    /// Start the worker, wait, then block on the exposure process.
    pub async fn run(&self) -> Result<LaunchReport, LaunchError> {
        let worker_config = &self.config.worker;
        let exposure_config = &self.config.exposure;
        let url = worker_config.url();

        let worker_spec =
            CommandSpec::render(&worker_config.command, &worker_config.args, worker_config);
        let exposure_spec =
            CommandSpec::render(&exposure_config.command, &exposure_config.args, worker_config);

        let mut lifecycle = Lifecycle::new();

        status(format!("Starting worker: {}", worker_spec));
        let (worker, worker_outcome) = self.start_worker(&worker_spec);
        lifecycle.advance();

        let gate = ReadinessGate::new(self.config.readiness.clone(), worker_config.address());
        status(format!(
            "Waiting {:.1}s for worker on {}",
            gate.delay().as_secs_f64(),
            url
        ));
        let readiness = gate.wait().await;
        log_readiness(&readiness, &url);

        status(format!("Starting tunnel: {}", exposure_spec));
        lifecycle.advance();
        let result = self.spawner.run_exposure(&exposure_spec).await;

        release_worker(worker, worker_config.terminate_on_exit).await;

        let exit_code = match result {
            Ok(code) => code,
            Err(e) => {
                tracing::error!(error = %e, "Exposure process failed");
                return Err(e);
            }
        };
        lifecycle.advance();

        tracing::info!(exit_code, "Exposure process exited");

        Ok(LaunchReport {
            worker: worker_outcome,
            readiness,
            exit_code,
            transitions: lifecycle.into_history(),
        })
    }

    fn start_worker(&self, spec: &CommandSpec) -> (Option<WorkerHandle>, WorkerOutcome) {
        match self.spawner.spawn_worker(spec, self.config.worker.detach) {
            Ok(handle) => {
                let pid = handle.pid();
                tracing::info!(?pid, command = %spec, "Worker started");
                (Some(handle), WorkerOutcome::Started { pid })
            }
            Err(e) => {
                tracing::error!(error = %e, "Worker failed to start, continuing with exposure");
                status(format!("Worker failed to start: {}", e));
                (None, WorkerOutcome::SpawnFailed { reason: e.to_string() })
            }
        }
    }
}

fn status(line: String) {
    println!("{}", line);
}

fn log_readiness(outcome: &ReadinessOutcome, url: &str) {
    match outcome {
        ReadinessOutcome::Delayed(elapsed) => {
            tracing::info!(
                %url,
                waited_ms = duration_ms(*elapsed),
                "Startup delay elapsed, worker readiness assumed"
            );
        }
        ReadinessOutcome::Ready { attempts, elapsed } => {
            tracing::info!(
                %url,
                attempts,
                waited_ms = duration_ms(*elapsed),
                "Worker is accepting connections"
            );
        }
        ReadinessOutcome::Unverified { attempts, elapsed } => {
            tracing::warn!(
                %url,
                attempts,
                waited_ms = duration_ms(*elapsed),
                "Worker readiness unverified, starting exposure anyway"
            );
        }
    }
}

fn duration_ms(duration: Duration) -> u64 {
    duration.as_millis().try_into().unwrap_or(u64::MAX)
}

//! Process creation seam.
//!
//! The launcher talks to the OS only through [`ProcessSpawner`], so ordering
//! and failure behaviour can be exercised with a recording implementation.

use std::process::Stdio;

use async_trait::async_trait;

use crate::error::{LaunchError, ProcessRole};
use crate::process::command::CommandSpec;
use crate::process::worker::{exit_code, WorkerHandle};

#[async_trait]
pub trait ProcessSpawner: Send + Sync {
    /// Start the worker without waiting on it.
    fn spawn_worker(&self, spec: &CommandSpec, detach: bool) -> Result<WorkerHandle, LaunchError>;

    /// Start the exposure process and wait for it to exit, returning its exit code.
    async fn run_exposure(&self, spec: &CommandSpec) -> Result<i32, LaunchError>;
}

/// Spawns real OS processes through `tokio::process`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemSpawner;

#[async_trait]
impl ProcessSpawner for SystemSpawner {
    fn spawn_worker(&self, spec: &CommandSpec, detach: bool) -> Result<WorkerHandle, LaunchError> {
        let mut command = spec.to_command();
        command.kill_on_drop(false).stdin(Stdio::null());

        #[cfg(unix)]
        if detach {
            command.process_group(0);
        }
        let group_leader = cfg!(unix) && detach;

        let child = command.spawn().map_err(|source| LaunchError::Spawn {
            role: ProcessRole::Worker,
            command: spec.to_string(),
            source,
        })?;

        Ok(WorkerHandle::from_child(child, group_leader))
    }

    async fn run_exposure(&self, spec: &CommandSpec) -> Result<i32, LaunchError> {
        let mut child = spec.to_command().spawn().map_err(|source| LaunchError::Spawn {
            role: ProcessRole::Exposure,
            command: spec.to_string(),
            source,
        })?;

        tracing::debug!(pid = ?child.id(), "Exposure process started");

        let status = child.wait().await.map_err(|source| LaunchError::Wait {
            role: ProcessRole::Exposure,
            command: spec.to_string(),
            source,
        })?;

        Ok(exit_code(status))
    }
}

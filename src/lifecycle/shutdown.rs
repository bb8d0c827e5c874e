//! Worker teardown once the exposure process is gone.

use crate::process::WorkerHandle;

/// Apply the worker teardown policy.
///
/// With `terminate` unset the worker is left running (fire-and-forget);
/// otherwise it is killed and reaped. Failures are logged, never returned,
/// so the exposure exit code stays the launcher's result.
pub async fn release_worker(worker: Option<WorkerHandle>, terminate: bool) {
    let Some(worker) = worker else {
        return;
    };

    if !terminate {
        worker.release();
        return;
    }

    let pid = worker.pid();
    let uptime = worker.started_at().elapsed();
    match worker.terminate().await {
        Ok(Some(status)) => {
            tracing::info!(?pid, %status, "Worker had already exited");
        }
        Ok(None) => {
            tracing::info!(?pid, uptime_secs = uptime.as_secs(), "Worker terminated");
        }
        Err(e) => {
            tracing::warn!(?pid, error = %e, "Failed to terminate worker");
        }
    }
}

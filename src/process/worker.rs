//! Handle to the background worker.

use std::process::ExitStatus;
use std::time::Instant;

use tokio::process::{Child, Command};

/// Owned handle to a started worker process.
///
/// Dropping the handle leaves the process running; only [`WorkerHandle::terminate`]
/// stops it.
#[derive(Debug)]
pub struct WorkerHandle {
    pid: Option<u32>,
    /// Set when the worker leads its own process group (pgid == pid).
    process_group: Option<u32>,
    started_at: Instant,
    child: Option<Child>,
}

impl WorkerHandle {
    /// Wrap a spawned child. `group_leader` is true when it was started with
    /// `process_group(0)`.
    pub fn from_child(child: Child, group_leader: bool) -> Self {
        let pid = child.id();
        Self {
            pid,
            process_group: if group_leader { pid } else { None },
            started_at: Instant::now(),
            child: Some(child),
        }
    }

    /// A handle that records a start but owns no OS child.
    pub fn untracked(pid: Option<u32>) -> Self {
        Self {
            pid,
            process_group: None,
            started_at: Instant::now(),
            child: None,
        }
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    pub fn process_group(&self) -> Option<u32> {
        self.process_group
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Kill the worker, and its whole process group when it leads one, then reap it.
    ///
    /// Returns the exit status if the worker had already exited on its own.
    /// The group is signalled either way, since children it forked may outlive it.
    pub async fn terminate(mut self) -> std::io::Result<Option<ExitStatus>> {
        let Some(child) = self.child.as_mut() else {
            return Ok(None);
        };

        let exited = child.try_wait()?;

        if let Some(pgid) = self.process_group {
            kill_process_group(pgid).await;
        }

        if let Some(status) = exited {
            return Ok(Some(status));
        }

        child.kill().await?;
        Ok(None)
    }

    /// Give up ownership without touching the process.
    pub fn release(self) {
        if let Some(pid) = self.pid {
            tracing::debug!(pid, "Worker released, left running");
        }
    }
}

/// Send SIGKILL to every process in group `pgid`.
///
/// Failures are logged only; an empty group is not an error worth surfacing.
async fn kill_process_group(pgid: u32) {
    let target = format!("-{}", pgid);
    match Command::new("kill").args(["-9", "--", &target]).status().await {
        Ok(status) if status.success() => {
            tracing::debug!(pgid, "Worker process group killed");
        }
        Ok(status) => {
            tracing::debug!(pgid, %status, "Worker process group already gone");
        }
        Err(e) => {
            tracing::warn!(pgid, error = %e, "Failed to signal worker process group");
        }
    }
}

/// Map an exit status to a shell-style exit code.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn terminate_kills_running_worker() {
        let child = Command::new("sleep").arg("30").spawn().unwrap();
        let handle = WorkerHandle::from_child(child, false);
        assert!(handle.pid().is_some());

        let status = handle.terminate().await.unwrap();
        assert!(status.is_none());
    }

    #[tokio::test]
    async fn terminate_reports_already_exited_worker() {
        let mut child = Command::new("sh").args(["-c", "exit 4"]).spawn().unwrap();
        child.wait().await.unwrap();
        let handle = WorkerHandle::from_child(child, false);

        let status = handle.terminate().await.unwrap().unwrap();
        assert_eq!(exit_code(status), 4);
    }

    /// Running and not a zombie awaiting its (re)parent.
    async fn is_running(pid: u32) -> bool {
        if let Ok(stat) = tokio::fs::read_to_string(format!("/proc/{}/stat", pid)).await {
            let state = stat.rsplit(')').next().unwrap_or("").trim_start();
            return !state.starts_with('Z');
        }
        if std::path::Path::new("/proc/self/stat").exists() {
            return false;
        }
        Command::new("kill")
            .args(["-0", &pid.to_string()])
            .status()
            .await
            .unwrap()
            .success()
    }

    async fn wait_for_pid_file(path: &std::path::Path) -> u32 {
        for _ in 0..100 {
            if let Ok(text) = tokio::fs::read_to_string(path).await {
                if let Ok(pid) = text.trim().parse() {
                    return pid;
                }
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("worker never wrote {}", path.display());
    }

    #[tokio::test]
    async fn terminate_reaches_grandchildren_in_the_group() {
        let dir = tempfile::tempdir().unwrap();
        let pid_file = dir.path().join("grandchild.pid");
        let script = format!("sleep 30 & echo $! > {}; wait", pid_file.display());

        let mut command = Command::new("sh");
        command.args(["-c", &script]).process_group(0);
        let handle = WorkerHandle::from_child(command.spawn().unwrap(), true);
        assert_eq!(handle.process_group(), handle.pid());

        let grandchild = wait_for_pid_file(&pid_file).await;
        assert!(is_running(grandchild).await);

        handle.terminate().await.unwrap();

        let mut alive = true;
        for _ in 0..50 {
            alive = is_running(grandchild).await;
            if !alive {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert!(!alive, "grandchild {} survived worker teardown", grandchild);
    }

    #[tokio::test]
    async fn ungrouped_worker_has_no_group_to_signal() {
        let child = Command::new("sleep").arg("30").spawn().unwrap();
        let handle = WorkerHandle::from_child(child, false);
        assert!(handle.process_group().is_none());
        assert!(handle.terminate().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn untracked_handle_terminates_trivially() {
        let handle = WorkerHandle::untracked(Some(42));
        assert_eq!(handle.pid(), Some(42));
        assert!(handle.terminate().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn signal_exit_maps_to_128_plus_signal() {
        let status = Command::new("sh")
            .args(["-c", "kill -9 $$"])
            .status()
            .await
            .unwrap();
        assert_eq!(exit_code(status), 137);
    }
}

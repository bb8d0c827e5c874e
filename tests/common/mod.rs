//! Shared helpers for launcher integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use tunnel_launcher::config::LauncherConfig;

/// A launcher config whose worker and exposure are `sh -c` scripts.
///
/// The exposure script gets the worker URL as `$1`.
pub fn sh_config(worker_script: &str, exposure_script: &str, delay_ms: u64) -> LauncherConfig {
    let mut config = LauncherConfig::default();
    config.worker.command = "sh".into();
    config.worker.args = vec!["-c".into(), worker_script.into()];
    config.worker.terminate_on_exit = true;
    config.exposure.command = "sh".into();
    config.exposure.args = vec![
        "-c".into(),
        exposure_script.into(),
        "exposure".into(),
        "{url}".into(),
    ];
    config.readiness.delay_ms = delay_ms;
    config
}

/// True while `pid` exists and is not a zombie waiting to be reaped.
#[allow(dead_code)]
pub async fn is_running(pid: u32) -> bool {
    if let Ok(stat) = tokio::fs::read_to_string(format!("/proc/{}/stat", pid)).await {
        let state = stat.rsplit(')').next().unwrap_or("").trim_start();
        return !state.starts_with('Z');
    }
    if std::path::Path::new("/proc/self/stat").exists() {
        return false;
    }
    tokio::process::Command::new("kill")
        .args(["-0", &pid.to_string()])
        .status()
        .await
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Reserve a local port that nothing is listening on.
#[allow(dead_code)]
pub async fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

/// Start a stand-in worker that answers every connection with a fixed response.
#[allow(dead_code)]
pub async fn start_mock_worker(response: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let response_str = format!(
                            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            response.len(),
                            response
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

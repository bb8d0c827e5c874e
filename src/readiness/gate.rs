//! Readiness gate between the worker and exposure spawns.
//!
//! # Responsibilities
//! - Hold the launch for the fixed startup delay
//! - Optionally probe the worker port until it accepts a connection
//! - Report whether readiness was verified, never block the launch on it

use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::{self, Instant};

use crate::config::{ReadinessConfig, ReadinessMode};
use crate::readiness::backoff::probe_delay;

/// Per-probe connect deadline.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(1);

/// What the gate knows about the worker when it opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadinessOutcome {
    /// Fixed delay elapsed; readiness assumed, not verified.
    Delayed(Duration),
    /// The worker port accepted a connection.
    Ready { attempts: u32, elapsed: Duration },
    /// Probing gave up; the launch proceeds anyway.
    Unverified { attempts: u32, elapsed: Duration },
}

impl ReadinessOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, ReadinessOutcome::Ready { .. })
    }
}

pub struct ReadinessGate {
    config: ReadinessConfig,
    address: String,
}

impl ReadinessGate {
    pub fn new(config: ReadinessConfig, address: impl Into<String>) -> Self {
        Self {
            config,
            address: address.into(),
        }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.config.delay_ms)
    }

    /// Wait according to the configured mode.
    pub async fn wait(&self) -> ReadinessOutcome {
        let started = Instant::now();
        let delay = self.delay();
        if !delay.is_zero() {
            time::sleep(delay).await;
        }

        match self.config.mode {
            ReadinessMode::Delay => ReadinessOutcome::Delayed(started.elapsed()),
            ReadinessMode::Poll => self.poll(started, Instant::now()).await,
        }
    }

    /// Probe until the port accepts or `poll_timeout_ms` after `polling_from` passes.
    async fn poll(&self, started: Instant, polling_from: Instant) -> ReadinessOutcome {
        let deadline = polling_from + Duration::from_millis(self.config.poll_timeout_ms);
        let mut attempts = 0u32;

        tracing::debug!(
            address = %self.address,
            interval_ms = self.config.poll_interval_ms,
            timeout_ms = self.config.poll_timeout_ms,
            "Probing worker port"
        );

        loop {
            attempts += 1;

            let connect = TcpStream::connect(self.address.as_str());
            match time::timeout(CONNECT_TIMEOUT, connect).await {
                Ok(Ok(_stream)) => {
                    return ReadinessOutcome::Ready {
                        attempts,
                        elapsed: started.elapsed(),
                    };
                }
                Ok(Err(e)) => {
                    tracing::trace!(
                        address = %self.address,
                        attempt = attempts,
                        error = %e,
                        "Worker not accepting yet"
                    );
                }
                Err(_) => {
                    tracing::trace!(
                        address = %self.address,
                        attempt = attempts,
                        "Worker probe timed out"
                    );
                }
            }

            let now = Instant::now();
            if now >= deadline {
                return ReadinessOutcome::Unverified {
                    attempts,
                    elapsed: started.elapsed(),
                };
            }

            time::sleep(probe_delay(attempts, &self.config, deadline - now)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    fn poll_config(delay_ms: u64, timeout_ms: u64) -> ReadinessConfig {
        ReadinessConfig {
            mode: ReadinessMode::Poll,
            delay_ms,
            poll_interval_ms: 20,
            poll_max_interval_ms: 50,
            poll_timeout_ms: timeout_ms,
        }
    }

    #[tokio::test]
    async fn fixed_delay_waits_at_least_configured_time() {
        let config = ReadinessConfig {
            delay_ms: 150,
            ..ReadinessConfig::default()
        };
        let gate = ReadinessGate::new(config, "127.0.0.1:5000");

        match gate.wait().await {
            ReadinessOutcome::Delayed(elapsed) => assert!(elapsed >= Duration::from_millis(150)),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn zero_delay_returns_immediately() {
        let config = ReadinessConfig {
            delay_ms: 0,
            ..ReadinessConfig::default()
        };
        let outcome = ReadinessGate::new(config, "127.0.0.1:5000").wait().await;
        match outcome {
            ReadinessOutcome::Delayed(elapsed) => assert!(elapsed < Duration::from_millis(100)),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(!outcome.is_verified());
    }

    #[tokio::test]
    async fn poll_sees_listening_port() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();

        let outcome = ReadinessGate::new(poll_config(0, 1_000), address).wait().await;
        assert!(matches!(outcome, ReadinessOutcome::Ready { attempts: 1, .. }));
    }

    #[tokio::test]
    async fn poll_waits_for_late_listener() {
        let probe = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = probe.local_addr().unwrap();
        drop(probe);

        tokio::spawn(async move {
            time::sleep(Duration::from_millis(100)).await;
            let listener = TcpListener::bind(address).await.unwrap();
            time::sleep(Duration::from_secs(2)).await;
            drop(listener);
        });

        let outcome = ReadinessGate::new(poll_config(0, 2_000), address.to_string())
            .wait()
            .await;
        match outcome {
            ReadinessOutcome::Ready { attempts, .. } => assert!(attempts > 1),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn poll_timeout_starts_after_the_delay() {
        let probe = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = probe.local_addr().unwrap().to_string();
        drop(probe);

        let outcome = ReadinessGate::new(poll_config(200, 100), address).wait().await;
        match outcome {
            ReadinessOutcome::Unverified { attempts, elapsed } => {
                assert!(attempts > 1);
                assert!(elapsed >= Duration::from_millis(300));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn poll_gives_up_as_unverified() {
        let probe = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = probe.local_addr().unwrap().to_string();
        drop(probe);

        let outcome = ReadinessGate::new(poll_config(0, 200), address).wait().await;
        match outcome {
            ReadinessOutcome::Unverified { attempts, elapsed } => {
                assert!(attempts >= 1);
                assert!(elapsed >= Duration::from_millis(200));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}

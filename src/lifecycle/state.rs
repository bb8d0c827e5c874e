//! Launch state machine.
//!
//! # States
//! ```text
//! Init → WorkerStarted → ExposureRunning → Done
//! ```
//!
//! Linear: no transition back, no cancellation edge, no retry edge.
//! `WorkerStarted` means the worker spawn was attempted, not that it succeeded.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchState {
    Init,
    WorkerStarted,
    ExposureRunning,
    Done,
}

impl LaunchState {
    pub fn successor(self) -> Option<LaunchState> {
        match self {
            LaunchState::Init => Some(LaunchState::WorkerStarted),
            LaunchState::WorkerStarted => Some(LaunchState::ExposureRunning),
            LaunchState::ExposureRunning => Some(LaunchState::Done),
            LaunchState::Done => None,
        }
    }
}

impl fmt::Display for LaunchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LaunchState::Init => "INIT",
            LaunchState::WorkerStarted => "WORKER_STARTED",
            LaunchState::ExposureRunning => "EXPOSURE_RUNNING",
            LaunchState::Done => "DONE",
        };
        f.write_str(name)
    }
}

/// Current state plus every state visited so far.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    history: Vec<LaunchState>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            history: vec![LaunchState::Init],
        }
    }

    pub fn current(&self) -> LaunchState {
        *self.history.last().unwrap_or(&LaunchState::Init)
    }

    /// Move to the next state. A no-op once `Done`.
    pub fn advance(&mut self) -> LaunchState {
        let from = self.current();
        if let Some(to) = from.successor() {
            tracing::debug!(%from, %to, "Launch state transition");
            self.history.push(to);
        }
        self.current()
    }

    pub fn history(&self) -> &[LaunchState] {
        &self.history
    }

    pub fn into_history(self) -> Vec<LaunchState> {
        self.history
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_states_in_order_and_stops() {
        let mut lifecycle = Lifecycle::new();
        assert_eq!(lifecycle.current(), LaunchState::Init);
        assert_eq!(lifecycle.advance(), LaunchState::WorkerStarted);
        assert_eq!(lifecycle.advance(), LaunchState::ExposureRunning);
        assert_eq!(lifecycle.advance(), LaunchState::Done);
        assert_eq!(lifecycle.advance(), LaunchState::Done);
        assert_eq!(
            lifecycle.history(),
            &[
                LaunchState::Init,
                LaunchState::WorkerStarted,
                LaunchState::ExposureRunning,
                LaunchState::Done
            ]
        );
    }

    #[test]
    fn display_uses_upper_snake_case() {
        assert_eq!(LaunchState::ExposureRunning.to_string(), "EXPOSURE_RUNNING");
    }
}

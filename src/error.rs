//! Launcher error types.

use std::fmt;

use thiserror::Error;

/// Which of the two child processes an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessRole {
    Worker,
    Exposure,
}

impl fmt::Display for ProcessRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessRole::Worker => write!(f, "worker"),
            ProcessRole::Exposure => write!(f, "exposure"),
        }
    }
}

/// Errors surfaced by a launch.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The executable could not be found or started.
    #[error("failed to spawn {role} process `{command}`: {source}")]
    Spawn {
        role: ProcessRole,
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The process started but waiting on it failed.
    #[error("failed to wait on {role} process `{command}`: {source}")]
    Wait {
        role: ProcessRole,
        command: String,
        #[source]
        source: std::io::Error,
    },
}

impl LaunchError {
    /// True when an executable could not be started at all.
    pub fn is_spawn_failure(&self) -> bool {
        matches!(self, LaunchError::Spawn { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_error_message_names_role_and_command() {
        let err = LaunchError::Spawn {
            role: ProcessRole::Exposure,
            command: "cloudflared tunnel".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.is_spawn_failure());
        assert_eq!(
            err.to_string(),
            "failed to spawn exposure process `cloudflared tunnel`: not found"
        );
    }
}

//! Command rendering.
//!
//! Turns a configured command and its argument template into a concrete
//! invocation with the worker's host, port and URL substituted.

use std::fmt;

use tokio::process::Command;

use crate::config::schema::{HOST_PLACEHOLDER, PORT_PLACEHOLDER, URL_PLACEHOLDER};
use crate::config::WorkerConfig;

/// A fully rendered program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Render `program` and `args`, substituting placeholders from `worker`.
    pub fn render(program: &str, args: &[String], worker: &WorkerConfig) -> Self {
        let url = worker.url();
        let port = worker.port.to_string();
        let args = args
            .iter()
            .map(|arg| {
                arg.replace(URL_PLACEHOLDER, &url)
                    .replace(HOST_PLACEHOLDER, &worker.host)
                    .replace(PORT_PLACEHOLDER, &port)
            })
            .collect();

        Self::new(program, args)
    }

    /// Build a Tokio command with inherited stdio.
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

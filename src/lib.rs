//! Tunnel launcher library.
//!
//! Starts a local web worker, waits for it, then runs a tunnel process that
//! exposes the worker's port.

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod observability;
pub mod process;
pub mod readiness;

pub use config::LauncherConfig;
pub use error::{LaunchError, ProcessRole};
pub use lifecycle::{LaunchReport, Launcher};

//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! launcher.rs:
//!     spawn worker → readiness gate → run exposure (foreground) → report
//!
//! state.rs:
//!     INIT → WORKER_STARTED → EXPOSURE_RUNNING → DONE
//!
//! shutdown.rs:
//!     exposure exited → leave worker running, or kill it when configured
//! ```
//!
//! # Design Decisions
//! - Ordered startup: worker first, exposure only after the gate opens
//! - The launcher's result is the exposure process's exit code
//! - No cancellation path; the launch runs to completion

pub mod launcher;
pub mod shutdown;
pub mod state;

pub use launcher::{LaunchReport, Launcher, WorkerOutcome};
pub use state::LaunchState;

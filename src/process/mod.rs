//! Child process subsystem.
//!
//! # Data Flow
//! ```text
//! WorkerConfig / ExposureConfig
//!     → command.rs (placeholder substitution → CommandSpec)
//!     → spawner.rs (ProcessSpawner: detached worker, foreground exposure)
//!     → worker.rs (WorkerHandle owned by the launcher)
//! ```

pub mod command;
pub mod spawner;
pub mod worker;

pub use command::CommandSpec;
pub use spawner::{ProcessSpawner, SystemSpawner};
pub use worker::WorkerHandle;

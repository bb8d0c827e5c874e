//! Worker readiness subsystem.
//!
//! # Data Flow
//! ```text
//! Worker spawned
//!     → gate.rs: sleep delay_ms
//!     → mode = delay: Delayed (assumed ready)
//!     → mode = poll:  TCP probe with backoff.rs until Ready or Unverified
//!     → exposure process is started either way
//! ```
//!
//! # Design Decisions
//! - The fixed delay is the default and is always honored first
//! - A failed probe never aborts the launch; it is reported as Unverified

pub mod backoff;
pub mod gate;

pub use gate::{ReadinessGate, ReadinessOutcome};

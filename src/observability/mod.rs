//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! launcher, readiness gate, process layer
//!     → tracing events with structured fields
//!     → logging.rs (EnvFilter + fmt layer, pretty or JSON, stderr)
//! ```

pub mod logging;

pub use logging::init_logging;

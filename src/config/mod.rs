//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! built-in defaults
//!     → loader.rs (optional TOML file, parse & deserialize)
//!     → command-line overrides (main.rs)
//!     → validation.rs (semantic checks)
//!     → LauncherConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once the launcher is built
//! - All fields have defaults so the launcher runs with no arguments
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::ConfigError;
pub use schema::ExposureConfig;
pub use schema::LauncherConfig;
pub use schema::LogFormat;
pub use schema::ReadinessConfig;
pub use schema::ReadinessMode;
pub use schema::WorkerConfig;

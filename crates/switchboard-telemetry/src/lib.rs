//! Structured logging for Switchboard services.
//!
//! This crate turns the resolved `logging` section of a Switchboard
//! configuration into a `tracing-subscriber` stack:
//!
//! - **Format**: JSON lines for production, pretty output for development
//! - **Filtering**: `EnvFilter` directives from `logging.level`, with
//!   `RUST_LOG` taking precedence when set
//! - **Output**: stdout, stderr or an append-only file
//!
//! # Example
//!
//! ```rust,ignore
//! use switchboard_telemetry::{init_logging, LogConfig};
//!
//! let config = LogConfig::from_settings(&resolved.logging, &resolved.system.name)?;
//! init_logging(&config)?;
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{bootstrap_subscriber, create_env_filter, init_logging, LogConfig, LogOutput};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

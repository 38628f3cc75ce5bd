//! Switchboard bootstrap.
//!
//! Resolves one configuration snapshot and reports it. The binary in
//! `main.rs` is a thin wrapper over [`report`].

#![warn(missing_docs)]

pub mod report;

pub use report::{list_scenarios, render, OutputFormat};

/// Switchboard version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

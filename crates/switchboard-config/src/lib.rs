//! Layered configuration resolution for Switchboard.
//!
//! This crate assembles the single configuration tree a Switchboard
//! deployment runs with. It is built from:
//! - A base document (required)
//! - An optional scenario overlay, selected by name from a multi-document bundle
//! - Auxiliary per-domain documents for providers, stealth profiles, UI and
//!   security, consulted only for sections the base left empty
//! - `${NAME}` secret placeholders, resolved against the environment
//!
//! # Overview
//!
//! The configuration system is built around the [`SwitchboardConfig`] struct:
//!
//! - [`SystemSettings`] - deployment identity and environment
//! - [`ServicesConfig`] - per-service network and worker settings
//! - [`DatabaseConfig`] and [`RedisConfig`] - datastore connections
//! - [`ProviderConfig`] - AI provider entries
//! - [`StealthProfile`] - browser automation profiles
//! - [`UiConfig`] and [`SecurityConfig`] - UI preferences and security policy
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use switchboard_config::ConfigLoader;
//!
//! # fn main() -> Result<(), switchboard_config::ConfigError> {
//! let config = ConfigLoader::from_dir("config")
//!     .with_scenario("Production Cluster")
//!     .load()?;
//! let config = Arc::new(config);
//!
//! for provider in config.providers_by_priority() {
//!     println!("{} (priority {})", provider.name, provider.priority);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Document Layout
//!
//! | Role | Default name |
//! |------|--------------|
//! | Base | `main.yaml` |
//! | Scenario bundle | `integration_examples.yaml` |
//! | Providers | `providers.yaml` |
//! | Stealth profiles | `stealth_profiles.yaml` |
//! | UI | `ui.yaml` |
//! | Security | `security.yaml` |
//!
//! Names ending in `.json` or `.toml` are parsed as JSON or TOML; everything
//! else is YAML. See [`DocumentLayout`] to rename documents.
//!
//! # Scenario Overrides
//!
//! A scenario may only override the fields listed in [`MERGE_RULES`]:
//!
//! - `system.environment`
//! - `services.core_orchestrator.workers`

#![warn(missing_docs)]

mod config;
mod document;
mod domains;
mod error;
mod loader;
mod merge;
mod profiles;
mod providers;
mod scenario;
mod schema;
mod secrets;
mod security;
mod source;
mod ui;

pub use config::*;
pub use document::{
    load_base, load_document, parse_document, DocumentFormat, DocumentLayout, DocumentRole,
};
pub use domains::{fill_domains, flatten_named, DomainOutcome, DomainReport};
pub use error::{ConfigError, LoadStage, ParseError};
pub use loader::{ConfigLoader, Resolved};
pub use merge::{merge, MergeReport, MergeRule, MERGE_RULES};
pub use profiles::*;
pub use providers::*;
pub use scenario::{resolve_scenario, scenario_names, DOCUMENT_BOUNDARY, SCENARIO_SUFFIX};
pub use schema::*;
pub use secrets::{
    expand, expand_secrets, has_placeholder, EnvFn, Environment, ExpansionReport, ProcessEnv,
    UnresolvedSecret,
};
pub use security::*;
pub use source::{DirectorySource, DocumentSource, MemorySource};
pub use ui::*;

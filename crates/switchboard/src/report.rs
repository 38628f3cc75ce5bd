//! Rendering of a resolved configuration.
//!
//! Every format renders the redacted tree, so secrets never reach the
//! terminal.

use std::fmt::Write as _;

use clap::ValueEnum;
use switchboard_config::{scenario_names, ConfigError, DocumentSource, SwitchboardConfig};

/// How the resolved configuration is printed.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Short human-readable overview.
    #[default]
    Summary,
    /// Full tree as pretty-printed JSON.
    Json,
    /// Full tree as YAML.
    Yaml,
}

/// Render `config` in `format`.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render(config: &SwitchboardConfig, format: OutputFormat) -> anyhow::Result<String> {
    let redacted = config.redacted();
    Ok(match format {
        OutputFormat::Summary => summary(&redacted),
        OutputFormat::Json => serde_json::to_string_pretty(&redacted)?,
        OutputFormat::Yaml => serde_yaml::to_string(&redacted)?,
    })
}

fn summary(config: &SwitchboardConfig) -> String {
    let mut out = String::new();
    let system = &config.system;
    let orchestrator = &config.services.core_orchestrator;
    let db = &config.database;

    // Writing to a String cannot fail
    let _ = writeln!(
        out,
        "System: {} v{} ({})",
        system.name, system.version, system.environment
    );
    let _ = writeln!(
        out,
        "Core Orchestrator: {} (workers: {})",
        orchestrator.bind_addr(),
        orchestrator.workers
    );
    let _ = writeln!(
        out,
        "Database: {}@{}:{}/{}",
        db.username, db.host, db.port, db.name
    );

    let _ = writeln!(out, "Providers: {} configured", config.providers.len());
    for provider in config.providers_by_priority() {
        let _ = writeln!(
            out,
            "  - {} ({}) - Priority: {}",
            provider.name, provider.kind, provider.priority
        );
    }
    for provider in config.providers.iter().filter(|p| !p.enabled) {
        let _ = writeln!(out, "  - {} ({}) - disabled", provider.name, provider.kind);
    }

    let _ = writeln!(
        out,
        "Stealth Profiles: {} configured",
        config.stealth_profiles.len()
    );
    for profile in &config.stealth_profiles {
        let _ = writeln!(out, "  - {}: {}", profile.name, profile.description);
    }

    out.truncate(out.trim_end().len());
    out
}

/// Names of the scenarios defined in the bundle document `bundle`.
///
/// # Errors
///
/// Returns an error if the bundle cannot be read from `source`.
pub fn list_scenarios<S: DocumentSource>(
    source: &S,
    bundle: &str,
) -> Result<Vec<String>, ConfigError> {
    let bytes = source.read(bundle)?;
    Ok(scenario_names(&String::from_utf8_lossy(&bytes)))
}

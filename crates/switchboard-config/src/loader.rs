//! Configuration loader facade.
//!
//! This module provides the [`ConfigLoader`], which runs the whole resolution
//! pipeline once and hands back a finished [`SwitchboardConfig`].

use std::borrow::Cow;
use std::fmt;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::domains::{fill_domains, DomainReport};
use crate::document::load_base;
use crate::merge::{merge, MergeReport};
use crate::scenario::resolve_scenario;
use crate::secrets::{expand_secrets, Environment, ExpansionReport, ProcessEnv};
use crate::{
    ConfigError, DirectorySource, DocumentLayout, DocumentRole, DocumentSource, LoadStage,
    SwitchboardConfig,
};

/// Configuration loader.
///
/// The loader applies its inputs in a fixed order:
/// 1. Base document (required, must carry `system`)
/// 2. Scenario overlay from the bundle, if a scenario was requested
/// 3. Auxiliary domain documents, for sections the base left empty
/// 4. `${NAME}` expansion in secret-bearing fields
/// 5. Validation
///
/// Failures in steps 1, 2 and 5 are fatal and wrapped in
/// [`ConfigError::Stage`]. Auxiliary documents are best-effort.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use switchboard_config::{ConfigLoader, MemorySource};
///
/// let source = MemorySource::new()
///     .with_document("main.yaml", "system:\n  name: switchboard\n  environment: development\n")
///     .with_document(
///         "integration_examples.yaml",
///         "prod_scenario:\n  name: Production\n  system:\n    environment: production\n",
///     );
///
/// let config = ConfigLoader::new(source)
///     .with_scenario("Production")
///     .with_environment(HashMap::new())
///     .load()
///     .unwrap();
///
/// assert_eq!(config.system.environment, "production");
/// ```
pub struct ConfigLoader<S> {
    source: S,
    layout: DocumentLayout,
    scenario: Option<String>,
    env: Box<dyn Environment>,
}

impl<S: fmt::Debug> fmt::Debug for ConfigLoader<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("source", &self.source)
            .field("layout", &self.layout)
            .field("scenario", &self.scenario)
            .finish_non_exhaustive()
    }
}

impl ConfigLoader<DirectorySource> {
    /// Create a loader reading documents from a directory.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use switchboard_config::ConfigLoader;
    ///
    /// # fn main() -> Result<(), switchboard_config::ConfigError> {
    /// let config = ConfigLoader::from_dir("config")
    ///     .with_scenario("Local Development Setup")
    ///     .load()?;
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn from_dir(path: impl AsRef<Path>) -> Self {
        Self::new(DirectorySource::new(path.as_ref()))
    }
}

impl<S: DocumentSource> ConfigLoader<S> {
    /// Create a loader over `source` with the default layout, no scenario, and
    /// the process environment.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            layout: DocumentLayout::default(),
            scenario: None,
            env: Box::new(ProcessEnv),
        }
    }

    /// Use a custom mapping from document roles to names.
    #[must_use]
    pub fn with_layout(mut self, layout: DocumentLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Select a scenario by name. An empty name selects none.
    #[must_use]
    pub fn with_scenario(mut self, scenario: impl Into<String>) -> Self {
        let scenario = scenario.into();
        self.scenario = (!scenario.is_empty()).then_some(scenario);
        self
    }

    /// Resolve secret placeholders against `env` instead of the process
    /// environment.
    #[must_use]
    pub fn with_environment<E: Environment + 'static>(mut self, env: E) -> Self {
        self.env = Box::new(env);
        self
    }

    /// Run the pipeline and return the finished configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Stage`] wrapping the underlying failure when the
    /// base document cannot be loaded, the requested scenario cannot be
    /// resolved, or the assembled tree fails validation.
    pub fn load(&self) -> Result<SwitchboardConfig, ConfigError> {
        self.load_with_report().map(|resolved| resolved.config)
    }

    /// Run the pipeline and return the configuration with what each step did.
    ///
    /// # Errors
    ///
    /// Same as [`ConfigLoader::load`].
    pub fn load_with_report(&self) -> Result<Resolved, ConfigError> {
        let base_name = self.layout.name(DocumentRole::Base);
        let mut config =
            load_base(&self.source, base_name).map_err(|e| e.at_stage(LoadStage::Base))?;
        info!(document = base_name, system = %config.system.name, "loaded base configuration");

        let merge_report = match &self.scenario {
            Some(scenario) => self.apply_scenario(&mut config, scenario)?,
            None => MergeReport::default(),
        };

        let domains = fill_domains(&mut config, &self.source, &self.layout);

        let expansion = expand_secrets(&mut config, &self.env);
        for unresolved in &expansion.unresolved {
            warn!(
                field = %unresolved.field,
                variable = %unresolved.variable,
                "secret placeholder references an unset variable"
            );
        }

        config
            .validate()
            .map_err(|e| e.at_stage(LoadStage::Validation))?;

        info!(
            environment = %config.system.environment,
            scenario = self.scenario.as_deref().unwrap_or("none"),
            providers = config.providers.len(),
            stealth_profiles = config.stealth_profiles.len(),
            "configuration resolved"
        );

        Ok(Resolved {
            config,
            merge: merge_report,
            domains,
            expansion,
        })
    }

    fn apply_scenario(
        &self,
        config: &mut SwitchboardConfig,
        scenario: &str,
    ) -> Result<MergeReport, ConfigError> {
        let bundle_name = self.layout.name(DocumentRole::ScenarioBundle);
        let bytes = self
            .source
            .read(bundle_name)
            .map_err(|e| e.at_stage(LoadStage::Scenario))?;
        // Invalid bytes only spoil the fragment that holds them
        let bundle = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = bundle {
            warn!(document = bundle_name, "scenario bundle contains invalid UTF-8");
        }

        let overlay =
            resolve_scenario(&bundle, scenario).map_err(|e| e.at_stage(LoadStage::Scenario))?;
        let report = merge(config, &overlay).map_err(|e| e.at_stage(LoadStage::Merge))?;

        debug!(scenario, applied = ?report.applied, "applied scenario overlay");
        Ok(report)
    }
}

/// A resolved configuration plus the per-step reports.
#[derive(Debug, Clone)]
pub struct Resolved {
    /// The finished configuration.
    pub config: SwitchboardConfig,
    /// Fields overwritten by the scenario overlay.
    pub merge: MergeReport,
    /// Outcome of each auxiliary domain.
    pub domains: DomainReport,
    /// Secret expansion summary.
    pub expansion: ExpansionReport,
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::domains::DomainOutcome;
    use crate::MemorySource;

    const BASE: &str = r#"
system:
  name: switchboard
  version: "1.0.0"
  environment: development
services:
  core_orchestrator:
    enabled: true
    host: 0.0.0.0
    port: 8001
    workers: 2
database:
  type: postgresql
  host: localhost
  port: 5432
  username: "${DB_USER}"
  password: "${DB_PASSWORD}"
redis:
  host: localhost
  port: 6379
"#;

    const BUNDLE: &str = r#"
local_scenario:
  name: Local Development Setup
  system:
    environment: local
---
broken_scenario: [oops
---
prod_scenario:
  name: Production
  system:
    environment: production
    name: ignored
  services:
    core_orchestrator:
      workers: 0
      port: 9999
"#;

    const PROVIDERS: &str = r#"
providers:
  claude:
    type: web
    enabled: true
    priority: 1
    auth:
      token: "${CLAUDE_SESSION}"
  openai:
    type: api
    enabled: true
    priority: 2
"#;

    fn env() -> HashMap<String, String> {
        HashMap::from([
            ("DB_USER".to_string(), "switchboard".to_string()),
            ("DB_PASSWORD".to_string(), "pg-pass".to_string()),
        ])
    }

    fn source() -> MemorySource {
        MemorySource::new()
            .with_document("main.yaml", BASE)
            .with_document("integration_examples.yaml", BUNDLE)
            .with_document("providers.yaml", PROVIDERS)
    }

    #[test]
    fn test_load_without_scenario() {
        let config = ConfigLoader::new(source())
            .with_environment(env())
            .load()
            .unwrap();

        assert_eq!(config.system.name, "switchboard");
        assert_eq!(config.system.environment, "development");
        assert_eq!(config.services.core_orchestrator.port, 8001);
        assert_eq!(config.services.core_orchestrator.workers, 2);
        assert_eq!(config.database.kind, "postgresql");
        assert_eq!(config.database.username, "switchboard");
        assert_eq!(config.database.password, "pg-pass");
        assert_eq!(config.providers.len(), 2);
    }

    #[test]
    fn test_scenario_overrides_only_allow_listed_fields() {
        let config = ConfigLoader::new(source())
            .with_scenario("Production")
            .with_environment(env())
            .load()
            .unwrap();

        assert_eq!(config.system.environment, "production");
        assert_eq!(config.system.name, "switchboard");
        // Zero workers in the overlay means "not overridden"
        assert_eq!(config.services.core_orchestrator.workers, 2);
        assert_eq!(config.services.core_orchestrator.port, 8001);
    }

    #[test]
    fn test_missing_scenario_is_fatal() {
        let err = ConfigLoader::new(source())
            .with_scenario("Disaster Recovery")
            .with_environment(env())
            .load()
            .unwrap_err();

        assert_eq!(err.stage(), Some(LoadStage::Scenario));
        assert!(matches!(
            err.root_cause(),
            ConfigError::ScenarioNotFound { scenario } if scenario == "Disaster Recovery"
        ));
    }

    #[test]
    fn test_missing_bundle_is_fatal_only_with_scenario() {
        let source = MemorySource::new().with_document("main.yaml", BASE);

        assert!(ConfigLoader::new(source.clone())
            .with_environment(env())
            .load()
            .is_ok());

        let err = ConfigLoader::new(source)
            .with_scenario("Production")
            .with_environment(env())
            .load()
            .unwrap_err();
        assert_eq!(err.stage(), Some(LoadStage::Scenario));
        assert!(err.root_cause().is_not_found());
    }

    #[test]
    fn test_empty_scenario_name_selects_none() {
        let source = MemorySource::new().with_document("main.yaml", BASE);
        let config = ConfigLoader::new(source)
            .with_scenario("")
            .with_environment(env())
            .load()
            .unwrap();
        assert_eq!(config.system.environment, "development");
    }

    #[test]
    fn test_missing_base_is_fatal() {
        let err = ConfigLoader::new(MemorySource::new())
            .with_environment(env())
            .load()
            .unwrap_err();

        assert_eq!(err.stage(), Some(LoadStage::Base));
        assert!(err.root_cause().is_not_found());
    }

    #[test]
    fn test_base_without_system_is_fatal() {
        let source = MemorySource::new().with_document("main.yaml", "redis:\n  port: 6379\n");
        let err = ConfigLoader::new(source)
            .with_environment(env())
            .load()
            .unwrap_err();

        assert_eq!(err.stage(), Some(LoadStage::Base));
        assert!(matches!(
            err.root_cause(),
            ConfigError::MissingField { field } if field == "system"
        ));
    }

    #[test]
    fn test_base_providers_win_over_domain_document() {
        let base = format!("{BASE}providers:\n  - name: local\n    priority: 5\n");
        let source = source().with_document("main.yaml", base);

        let resolved = ConfigLoader::new(source)
            .with_environment(env())
            .load_with_report()
            .unwrap();

        assert_eq!(resolved.config.providers.len(), 1);
        assert_eq!(resolved.config.providers[0].name, "local");
        assert_eq!(
            resolved.domains.outcome(DocumentRole::Providers),
            Some(&DomainOutcome::Skipped)
        );
    }

    #[test]
    fn test_duplicate_providers_rejected() {
        let base = format!("{BASE}providers:\n  - name: openai\n  - name: openai\n");
        let source = MemorySource::new().with_document("main.yaml", base);

        let err = ConfigLoader::new(source)
            .with_environment(env())
            .load()
            .unwrap_err();

        assert_eq!(err.stage(), Some(LoadStage::Validation));
        assert!(matches!(
            err.root_cause(),
            ConfigError::DuplicateProvider { name } if name == "openai"
        ));
    }

    #[test]
    fn test_report_lists_unresolved_secrets() {
        let resolved = ConfigLoader::new(source())
            .with_scenario("Production")
            .with_environment(env())
            .load_with_report()
            .unwrap();

        assert_eq!(resolved.merge.applied, vec!["system.environment"]);
        assert_eq!(resolved.expansion.expanded_fields, 3);
        assert_eq!(resolved.expansion.unresolved.len(), 1);
        assert_eq!(
            resolved.expansion.unresolved[0].field,
            "providers.claude.auth.token"
        );
        assert_eq!(resolved.config.providers[0].auth.token, "");
    }

    #[test]
    fn test_invalid_utf8_fragment_does_not_block_sibling() {
        let mut bundle = b"bad_scenario:\n  name: Bad\n  description: caf\xe9\n".to_vec();
        bundle.extend_from_slice(
            b"---\nprod_scenario:\n  name: Production\n  system:\n    environment: production\n",
        );
        let source = MemorySource::new()
            .with_document("main.yaml", BASE)
            .with_document("integration_examples.yaml", bundle);

        let config = ConfigLoader::new(source)
            .with_scenario("Production")
            .with_environment(env())
            .load()
            .unwrap();

        assert_eq!(config.system.environment, "production");
    }

    #[test]
    fn test_out_of_range_domain_provider_is_not_fatal() {
        let source = MemorySource::new()
            .with_document("main.yaml", "system:\n  name: switchboard\n")
            .with_document(
                "providers.yaml",
                "providers:\n  claude:\n    model:\n      temperature: 2.5\n",
            );

        let resolved = ConfigLoader::new(source)
            .with_environment(env())
            .load_with_report()
            .unwrap();

        assert!(resolved.config.providers.is_empty());
        assert!(matches!(
            resolved.domains.outcome(DocumentRole::Providers),
            Some(DomainOutcome::Failed(_))
        ));
    }

    #[test]
    fn test_custom_layout() {
        let source = MemorySource::new()
            .with_document("base.json", r#"{"system": {"name": "sb", "environment": "ci"}}"#)
            .with_document(
                "scenarios.yaml",
                "ci_scenario:\n  name: CI\n  services:\n    core_orchestrator:\n      workers: 3\n",
            );
        let layout = DocumentLayout::default()
            .with(DocumentRole::Base, "base.json")
            .with(DocumentRole::ScenarioBundle, "scenarios.yaml");

        let config = ConfigLoader::new(source)
            .with_layout(layout)
            .with_scenario("CI")
            .with_environment(HashMap::new())
            .load()
            .unwrap();

        assert_eq!(config.system.environment, "ci");
        assert_eq!(config.services.core_orchestrator.workers, 3);
    }
}

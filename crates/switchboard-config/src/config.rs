//! Main configuration types.
//!
//! This module provides the top-level [`SwitchboardConfig`] tree and its builder.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    ConfigError, DatabaseConfig, LoggingConfig, ProviderConfig, RedisConfig, SecurityConfig,
    ServicesConfig, StealthProfile, SystemSettings, UiConfig,
};

/// Placeholder written over secrets by [`SwitchboardConfig::redacted`].
pub const REDACTED: &str = "[REDACTED]";

/// Complete Switchboard deployment configuration.
///
/// This is the root configuration type that contains all configuration
/// sections. Use [`ConfigLoader`](crate::ConfigLoader) to resolve it from
/// documents and the environment. Once resolved it is treated as read-only
/// and shared behind an `Arc`.
///
/// # Example
///
/// ```
/// use switchboard_config::SwitchboardConfig;
///
/// let config: SwitchboardConfig = serde_yaml::from_str(r#"
///     system:
///       name: switchboard
///       environment: development
///     providers:
///       - name: openai
///         priority: 2
///         enabled: true
///       - name: claude
///         priority: 1
///         enabled: true
/// "#).unwrap();
///
/// let order: Vec<&str> = config.providers_by_priority().map(|p| p.name.as_str()).collect();
/// assert_eq!(order, vec!["claude", "openai"]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct SwitchboardConfig {
    /// System identity.
    pub system: SystemSettings,

    /// Per-service network and worker settings.
    pub services: ServicesConfig,

    /// Datastore connection settings.
    pub database: DatabaseConfig,

    /// Cache connection settings.
    pub redis: RedisConfig,

    /// Logging policy.
    pub logging: LoggingConfig,

    /// AI provider entries.
    pub providers: Vec<ProviderConfig>,

    /// Browser automation profiles.
    pub stealth_profiles: Vec<StealthProfile>,

    /// UI preferences.
    pub ui: UiConfig,

    /// Security policy.
    pub security: SecurityConfig,
}

impl SwitchboardConfig {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```
    /// use switchboard_config::{SwitchboardConfig, SystemSettings};
    ///
    /// let config = SwitchboardConfig::builder()
    ///     .system(SystemSettings {
    ///         name: "switchboard".to_string(),
    ///         ..Default::default()
    ///     })
    ///     .build();
    ///
    /// assert_eq!(config.system.name, "switchboard");
    /// ```
    #[must_use]
    pub fn builder() -> SwitchboardConfigBuilder {
        SwitchboardConfigBuilder::new()
    }

    /// Look up a provider by name.
    pub fn provider(&self, name: &str) -> Option<&ProviderConfig> {
        self.providers.iter().find(|p| p.name == name)
    }

    /// Look up an automation profile by name.
    pub fn stealth_profile(&self, name: &str) -> Option<&StealthProfile> {
        self.stealth_profiles.iter().find(|p| p.name == name)
    }

    /// Automation profile a provider refers to, if it exists.
    pub fn profile_for(&self, provider: &ProviderConfig) -> Option<&StealthProfile> {
        if provider.stealth.profile.is_empty() {
            return None;
        }
        self.stealth_profile(&provider.stealth.profile)
    }

    /// Enabled providers, most preferred first.
    ///
    /// Lower priority values are preferred. Providers with equal priority keep
    /// their configured order.
    pub fn providers_by_priority(&self) -> impl Iterator<Item = &ProviderConfig> {
        let mut enabled: Vec<&ProviderConfig> =
            self.providers.iter().filter(|p| p.enabled).collect();
        enabled.sort_by_key(|p| p.priority);
        enabled.into_iter()
    }

    /// Validate the configuration.
    ///
    /// Secrets are not checked here: an empty secret is legal and consumers
    /// that need one reject it at the point of use.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A provider has no name ([`ConfigError::MissingField`])
    /// - Two providers share a name ([`ConfigError::DuplicateProvider`])
    /// - A model temperature is outside 0.0..=2.0 or top_p outside 0.0..=1.0
    /// - A cost parameter is negative
    /// - A profile's minimum delay exceeds its maximum delay
    ///
    /// Domain documents get the same value checks in [`fill_domains`], where a
    /// failure empties the section instead.
    ///
    /// [`fill_domains`]: crate::fill_domains
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for (index, provider) in self.providers.iter().enumerate() {
            if provider.name.is_empty() {
                return Err(ConfigError::missing_field(format!(
                    "providers[{index}].name"
                )));
            }
            if !seen.insert(provider.name.as_str()) {
                return Err(ConfigError::DuplicateProvider {
                    name: provider.name.clone(),
                });
            }

            provider.check_values()?;
        }

        for profile in &self.stealth_profiles {
            profile.check_values()?;
        }

        Ok(())
    }

    /// Copy of the configuration with every populated secret replaced by
    /// [`REDACTED`].
    ///
    /// Covers the same fields the secret expander walks. Use this whenever the
    /// tree is printed or logged.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        crate::secrets::for_each_secret(&mut copy, |_, value| {
            if !value.is_empty() {
                *value = REDACTED.to_string();
            }
        });
        copy
    }
}

/// Builder for [`SwitchboardConfig`].
#[derive(Debug, Default)]
pub struct SwitchboardConfigBuilder {
    config: SwitchboardConfig,
}

impl SwitchboardConfigBuilder {
    /// Create a new builder with empty sections.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the system identity.
    #[must_use]
    pub fn system(mut self, system: SystemSettings) -> Self {
        self.config.system = system;
        self
    }

    /// Set the service settings.
    #[must_use]
    pub fn services(mut self, services: ServicesConfig) -> Self {
        self.config.services = services;
        self
    }

    /// Set the datastore settings.
    #[must_use]
    pub fn database(mut self, database: DatabaseConfig) -> Self {
        self.config.database = database;
        self
    }

    /// Set the cache settings.
    #[must_use]
    pub fn redis(mut self, redis: RedisConfig) -> Self {
        self.config.redis = redis;
        self
    }

    /// Set the logging policy.
    #[must_use]
    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Append a provider entry.
    #[must_use]
    pub fn provider(mut self, provider: ProviderConfig) -> Self {
        self.config.providers.push(provider);
        self
    }

    /// Append an automation profile.
    #[must_use]
    pub fn stealth_profile(mut self, profile: StealthProfile) -> Self {
        self.config.stealth_profiles.push(profile);
        self
    }

    /// Set the UI preferences.
    #[must_use]
    pub fn ui(mut self, ui: UiConfig) -> Self {
        self.config.ui = ui;
        self
    }

    /// Set the security policy.
    #[must_use]
    pub fn security(mut self, security: SecurityConfig) -> Self {
        self.config.security = security;
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> SwitchboardConfig {
        self.config
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if validation fails.
    pub fn build_validated(self) -> Result<SwitchboardConfig, ConfigError> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }
}

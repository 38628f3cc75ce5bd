//! Document loading.
//!
//! A document is one serialized configuration source, named by a
//! [`DocumentRole`] through a [`DocumentLayout`]. Its format follows the name's
//! extension; YAML is assumed when the extension is missing or unknown.

use std::fmt;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{ConfigError, DocumentSource, ParseError, SwitchboardConfig};

/// Serialization format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    /// YAML (`.yaml`, `.yml`).
    #[default]
    Yaml,
    /// JSON (`.json`).
    Json,
    /// TOML (`.toml`).
    Toml,
}

impl DocumentFormat {
    /// Format implied by a document name.
    ///
    /// ```
    /// use switchboard_config::DocumentFormat;
    ///
    /// assert_eq!(DocumentFormat::from_name("providers.json"), DocumentFormat::Json);
    /// assert_eq!(DocumentFormat::from_name("main.YML"), DocumentFormat::Yaml);
    /// assert_eq!(DocumentFormat::from_name("main"), DocumentFormat::Yaml);
    /// ```
    pub fn from_name(name: &str) -> Self {
        let extension = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("json") => Self::Json,
            Some("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }

    /// Deserialize `bytes` in this format.
    ///
    /// Unknown fields are ignored by every type in the configuration tree.
    pub fn parse<T: DeserializeOwned>(self, bytes: &[u8]) -> Result<T, ParseError> {
        match self {
            Self::Yaml => Ok(serde_yaml::from_slice(bytes)?),
            Self::Json => Ok(serde_json::from_slice(bytes)?),
            Self::Toml => Ok(toml::from_str(std::str::from_utf8(bytes)?)?),
        }
    }
}

/// Logical role of a document in the resolution pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentRole {
    /// The base document (required).
    Base,
    /// Bundle of scenario overlays (required when a scenario is requested).
    ScenarioBundle,
    /// Provider entries keyed by name.
    Providers,
    /// Automation profiles keyed by name.
    StealthProfiles,
    /// UI preferences.
    Ui,
    /// Security policy.
    Security,
}

impl DocumentRole {
    /// Every role, in pipeline order.
    pub const ALL: [Self; 6] = [
        Self::Base,
        Self::ScenarioBundle,
        Self::Providers,
        Self::StealthProfiles,
        Self::Ui,
        Self::Security,
    ];

    /// Role name as used in log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::ScenarioBundle => "scenario_bundle",
            Self::Providers => "providers",
            Self::StealthProfiles => "stealth_profiles",
            Self::Ui => "ui",
            Self::Security => "security",
        }
    }
}

impl fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document names for each role.
///
/// Names are a deployment convention; the defaults match the stock
/// `config/` directory.
///
/// # Example
///
/// ```
/// use switchboard_config::{DocumentLayout, DocumentRole};
///
/// let layout = DocumentLayout::default().with(DocumentRole::Base, "base.json");
/// assert_eq!(layout.name(DocumentRole::Base), "base.json");
/// assert_eq!(layout.name(DocumentRole::Providers), "providers.yaml");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLayout {
    base: String,
    scenario_bundle: String,
    providers: String,
    stealth_profiles: String,
    ui: String,
    security: String,
}

impl Default for DocumentLayout {
    fn default() -> Self {
        Self {
            base: "main.yaml".to_string(),
            scenario_bundle: "integration_examples.yaml".to_string(),
            providers: "providers.yaml".to_string(),
            stealth_profiles: "stealth_profiles.yaml".to_string(),
            ui: "ui.yaml".to_string(),
            security: "security.yaml".to_string(),
        }
    }
}

impl DocumentLayout {
    /// Document name for `role`.
    pub fn name(&self, role: DocumentRole) -> &str {
        match role {
            DocumentRole::Base => &self.base,
            DocumentRole::ScenarioBundle => &self.scenario_bundle,
            DocumentRole::Providers => &self.providers,
            DocumentRole::StealthProfiles => &self.stealth_profiles,
            DocumentRole::Ui => &self.ui,
            DocumentRole::Security => &self.security,
        }
    }

    /// Override the document name for `role`.
    #[must_use]
    pub fn with(mut self, role: DocumentRole, name: impl Into<String>) -> Self {
        let name = name.into();
        match role {
            DocumentRole::Base => self.base = name,
            DocumentRole::ScenarioBundle => self.scenario_bundle = name,
            DocumentRole::Providers => self.providers = name,
            DocumentRole::StealthProfiles => self.stealth_profiles = name,
            DocumentRole::Ui => self.ui = name,
            DocumentRole::Security => self.security = name,
        }
        self
    }
}

/// Read the named document and deserialize it as `T`.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] or [`ConfigError::ReadError`] from the
/// source, or [`ConfigError::Parse`] when the bytes do not deserialize.
pub fn load_document<T, S>(source: &S, name: &str) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
    S: DocumentSource + ?Sized,
{
    let bytes = source.read(name)?;
    debug!(document = name, bytes = bytes.len(), "read configuration document");
    parse_document(name, &bytes)
}

/// Deserialize document bytes as `T`, choosing the format from `name`.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] when the bytes do not deserialize.
pub fn parse_document<T: DeserializeOwned>(name: &str, bytes: &[u8]) -> Result<T, ConfigError> {
    DocumentFormat::from_name(name)
        .parse(bytes)
        .map_err(|e| ConfigError::parse(name, e))
}

/// Load the base document as a full configuration tree.
///
/// The `system` section is the only section a base document must carry.
///
/// # Errors
///
/// Returns [`ConfigError::MissingField`] when `system` is absent, plus any
/// error from [`load_document`].
pub fn load_base<S>(source: &S, name: &str) -> Result<SwitchboardConfig, ConfigError>
where
    S: DocumentSource + ?Sized,
{
    let config: SwitchboardConfig = load_document(source, name)?;
    if config.system.is_empty() {
        return Err(ConfigError::missing_field("system"));
    }
    Ok(config)
}

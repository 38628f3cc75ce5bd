//! Configuration error types.

use std::fmt;

use thiserror::Error;

/// Pipeline stage that produced a fatal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStage {
    /// Loading the base document.
    Base,
    /// Resolving the requested scenario from the bundle.
    Scenario,
    /// Applying the scenario overlay.
    Merge,
    /// Validating the assembled tree.
    Validation,
}

impl LoadStage {
    /// Stage name as used in log fields and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Scenario => "scenario",
            Self::Merge => "merge",
            Self::Validation => "validation",
        }
    }
}

impl fmt::Display for LoadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format-specific parse failure.
#[derive(Error, Debug)]
pub enum ParseError {
    /// YAML parsing error.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error.
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// Document bytes are not UTF-8.
    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required document does not exist in the source.
    #[error("configuration document not found: {document}")]
    NotFound {
        /// Name of the missing document.
        document: String,
    },

    /// The document exists but could not be read.
    #[error("failed to read configuration document: {document}")]
    ReadError {
        /// Name of the document.
        document: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The document could not be deserialized.
    #[error("failed to parse configuration document {document}: {source}")]
    Parse {
        /// Name of the document.
        document: String,
        /// Underlying parse error.
        #[source]
        source: ParseError,
    },

    /// No fragment of the scenario bundle defines the requested scenario.
    #[error("scenario '{scenario}' not found")]
    ScenarioNotFound {
        /// Requested scenario name.
        scenario: String,
    },

    /// Structural conflict while applying an overlay.
    ///
    /// Not produced by the current merge rules.
    #[error("cannot merge field {field}: {reason}")]
    Merge {
        /// Field locator.
        field: String,
        /// Explanation of the conflict.
        reason: String,
    },

    /// Missing required field.
    #[error("missing required configuration field: {field}")]
    MissingField {
        /// The missing field name.
        field: String,
    },

    /// Two providers share a name.
    #[error("duplicate provider name: {name}")]
    DuplicateProvider {
        /// The duplicated name.
        name: String,
    },

    /// Invalid configuration value.
    #[error("invalid configuration value for {field}: {reason}")]
    InvalidValue {
        /// The field with the invalid value.
        field: String,
        /// Explanation of why the value is invalid.
        reason: String,
    },

    /// A fatal failure wrapped with the pipeline stage it came from.
    #[error("{stage} stage failed: {source}")]
    Stage {
        /// Stage that failed.
        stage: LoadStage,
        /// Underlying error.
        #[source]
        source: Box<ConfigError>,
    },
}

impl ConfigError {
    /// Create a new not found error.
    pub fn not_found(document: impl Into<String>) -> Self {
        Self::NotFound {
            document: document.into(),
        }
    }

    /// Create a new read error.
    pub fn read_error(document: impl Into<String>, source: std::io::Error) -> Self {
        Self::ReadError {
            document: document.into(),
            source,
        }
    }

    /// Create a new parse error.
    pub fn parse(document: impl Into<String>, source: impl Into<ParseError>) -> Self {
        Self::Parse {
            document: document.into(),
            source: source.into(),
        }
    }

    /// Create a new scenario not found error.
    pub fn scenario_not_found(scenario: impl Into<String>) -> Self {
        Self::ScenarioNotFound {
            scenario: scenario.into(),
        }
    }

    /// Create a new missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create a new invalid value error.
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Wrap this error with the stage that produced it.
    pub fn at_stage(self, stage: LoadStage) -> Self {
        Self::Stage {
            stage,
            source: Box::new(self),
        }
    }

    /// The stage this error was raised in, if it was wrapped by the loader.
    pub fn stage(&self) -> Option<LoadStage> {
        match self {
            Self::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// The innermost error with stage wrapping removed.
    pub fn root_cause(&self) -> &ConfigError {
        let mut current = self;
        while let Self::Stage { source, .. } = current {
            current = source.as_ref();
        }
        current
    }

    /// Whether the root cause is a missing document.
    pub fn is_not_found(&self) -> bool {
        matches!(self.root_cause(), Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = ConfigError::not_found("main.yaml");
        assert!(err.to_string().contains("main.yaml"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_scenario_not_found_names_scenario() {
        let err = ConfigError::scenario_not_found("Local Development Setup");
        assert!(err.to_string().contains("Local Development Setup"));
    }

    #[test]
    fn test_parse_error_from_yaml() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("key: [unclosed").unwrap_err();
        let err = ConfigError::parse("main.yaml", yaml_err);
        assert!(err.to_string().contains("main.yaml"));
        assert!(matches!(
            err,
            ConfigError::Parse {
                source: ParseError::Yaml(_),
                ..
            }
        ));
    }

    #[test]
    fn test_stage_wrapping() {
        let err = ConfigError::not_found("main.yaml").at_stage(LoadStage::Base);
        assert_eq!(err.stage(), Some(LoadStage::Base));
        assert!(err.to_string().starts_with("base stage failed"));
        assert!(err.is_not_found());
        assert!(matches!(err.root_cause(), ConfigError::NotFound { .. }));
    }

    #[test]
    fn test_invalid_value_error() {
        let err = ConfigError::invalid_value("providers.gpt4.model.temperature", "out of range");
        assert!(err.to_string().contains("temperature"));
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_duplicate_provider_error() {
        let err = ConfigError::DuplicateProvider {
            name: "openai".to_string(),
        };
        assert!(err.to_string().contains("openai"));
        assert_eq!(err.stage(), None);
    }
}

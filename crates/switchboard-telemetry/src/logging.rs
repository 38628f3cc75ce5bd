//! Structured logging for Switchboard.
//!
//! Logging is configured from the resolved `logging` section of the
//! configuration tree. Because that section is only known after resolution,
//! start-up happens in two steps:
//!
//! 1. [`bootstrap_subscriber`] gives a scoped stderr subscriber that captures
//!    events emitted while the configuration is being resolved.
//! 2. [`init_logging`] installs the global subscriber described by the
//!    resolved [`LoggingConfig`].
//!
//! # Example
//!
//! ```rust,ignore
//! use switchboard_telemetry::logging::{bootstrap_subscriber, init_logging, LogConfig};
//!
//! let config = tracing::subscriber::with_default(bootstrap_subscriber("info")?, || {
//!     loader.load()
//! })?;
//! init_logging(&LogConfig::from_settings(&config.logging, &config.system.name)?)?;
//!
//! tracing::info!(environment = %config.system.environment, "Switchboard starting");
//! ```

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use switchboard_config::{LogFormat, LoggingConfig};
use tracing::Subscriber;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::error::TelemetryError;
use crate::TelemetryResult;

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogOutput {
    /// Standard output.
    #[default]
    Stdout,
    /// Standard error.
    Stderr,
    /// Append to a file, creating it if needed.
    File(PathBuf),
}

impl LogOutput {
    /// Interpret the `output` and `file` settings.
    ///
    /// An empty `output` means stdout.
    ///
    /// # Errors
    ///
    /// Returns `TelemetryError::InvalidConfig` for an unknown output or for
    /// `file` output without a path.
    pub fn from_settings(output: &str, file: &str) -> TelemetryResult<Self> {
        match output.to_ascii_lowercase().as_str() {
            "" | "stdout" => Ok(Self::Stdout),
            "stderr" => Ok(Self::Stderr),
            "file" if file.is_empty() => Err(TelemetryError::InvalidConfig(
                "logging.output is 'file' but logging.file is empty".to_string(),
            )),
            "file" => Ok(Self::File(PathBuf::from(file))),
            other => Err(TelemetryError::InvalidConfig(format!(
                "unknown logging.output '{other}'"
            ))),
        }
    }

    fn make_writer(&self) -> TelemetryResult<BoxMakeWriter> {
        Ok(match self {
            Self::Stdout => BoxMakeWriter::new(std::io::stdout),
            Self::Stderr => BoxMakeWriter::new(std::io::stderr),
            Self::File(path) => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                BoxMakeWriter::new(Mutex::new(file))
            }
        })
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Whether logging is enabled.
    pub enabled: bool,

    /// Log level or filter directive (e.g., "info", "switchboard_config=debug").
    pub level: String,

    /// Whether to output JSON format.
    pub json_format: bool,

    /// Log destination.
    pub output: LogOutput,

    /// Whether `RUST_LOG`, when set, takes precedence over `level`.
    pub respect_rust_log: bool,

    /// Whether to include file/line info.
    pub file_line_info: bool,

    /// Whether to include target (module path).
    pub include_target: bool,

    /// Service name recorded on the start-up event.
    pub service_name: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            json_format: true,
            output: LogOutput::Stdout,
            respect_rust_log: true,
            file_line_info: false,
            include_target: true,
            service_name: "switchboard".to_string(),
        }
    }
}

impl LogConfig {
    /// Build from the resolved `logging` section.
    ///
    /// # Errors
    ///
    /// Returns `TelemetryError::InvalidConfig` if the output settings are
    /// invalid.
    pub fn from_settings(settings: &LoggingConfig, service_name: &str) -> TelemetryResult<Self> {
        let mut config = Self {
            level: settings.effective_level().to_string(),
            json_format: settings.format == LogFormat::Json,
            output: LogOutput::from_settings(&settings.output, &settings.file)?,
            ..Self::default()
        };
        if !service_name.is_empty() {
            config.service_name = service_name.to_string();
        }
        config.file_line_info = !config.json_format;
        Ok(config)
    }

    /// Override the level, e.g. from a command-line flag.
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    fn filter(&self) -> TelemetryResult<EnvFilter> {
        if self.respect_rust_log && std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
            return EnvFilter::try_from_default_env()
                .map_err(|e| TelemetryError::LoggingInit(format!("Invalid RUST_LOG: {e}")));
        }
        create_env_filter(&self.level)
    }
}

/// Initializes the global logging subscriber.
///
/// # Errors
///
/// Returns `TelemetryError::LoggingInit` if the filter is invalid or a global
/// subscriber is already installed, and `TelemetryError::Io` if the log file
/// cannot be opened.
pub fn init_logging(config: &LogConfig) -> TelemetryResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let filter = config.filter()?;
    let writer = config.output.make_writer()?;
    let ansi = matches!(config.output, LogOutput::Stdout | LogOutput::Stderr);

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = if config.json_format {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .with_file(config.file_line_info)
            .with_line_number(config.file_line_info)
            .with_target(config.include_target)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .pretty()
            .with_ansi(ansi)
            .with_writer(writer)
            .with_file(config.file_line_info)
            .with_line_number(config.file_line_info)
            .with_target(config.include_target)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .try_init()
        .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;

    tracing::info!(
        service.name = %config.service_name,
        level = %config.level,
        "logging initialized"
    );
    Ok(())
}

/// A compact stderr subscriber for the window before configuration is
/// resolved.
///
/// Install it with `tracing::subscriber::with_default` so it does not claim
/// the global slot.
///
/// # Errors
///
/// Returns `TelemetryError::LoggingInit` if `level` is not a valid filter.
pub fn bootstrap_subscriber(level: &str) -> TelemetryResult<impl Subscriber + Send + Sync> {
    let filter = create_env_filter(level)?;
    let layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);
    Ok(tracing_subscriber::registry().with(layer))
}

/// Creates an env filter from a string.
///
/// # Arguments
///
/// * `filter` - Filter string (e.g., "info", "switchboard_config=debug,warn")
///
/// # Errors
///
/// Returns error if the filter string is invalid.
pub fn create_env_filter(filter: &str) -> TelemetryResult<EnvFilter> {
    EnvFilter::try_new(filter).map_err(|e| TelemetryError::LoggingInit(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert!(config.enabled);
        assert!(config.json_format);
        assert_eq!(config.level, "info");
        assert_eq!(config.output, LogOutput::Stdout);
    }

    #[test]
    fn test_from_settings() {
        let settings = LoggingConfig {
            level: "debug".to_string(),
            format: LogFormat::Pretty,
            output: "stderr".to_string(),
            file: String::new(),
        };
        let config = LogConfig::from_settings(&settings, "switchboard-core").unwrap();

        assert_eq!(config.level, "debug");
        assert!(!config.json_format);
        assert!(config.file_line_info);
        assert_eq!(config.output, LogOutput::Stderr);
        assert_eq!(config.service_name, "switchboard-core");
    }

    #[test]
    fn test_from_empty_settings() {
        let config = LogConfig::from_settings(&LoggingConfig::default(), "").unwrap();
        assert_eq!(config.level, "info");
        assert!(config.json_format);
        assert_eq!(config.output, LogOutput::Stdout);
        assert_eq!(config.service_name, "switchboard");
    }

    #[test]
    fn test_with_level_override() {
        let config = LogConfig::default().with_level("trace");
        assert_eq!(config.level, "trace");
    }

    #[test]
    fn test_output_from_settings() {
        assert_eq!(LogOutput::from_settings("", "").unwrap(), LogOutput::Stdout);
        assert_eq!(LogOutput::from_settings("STDERR", "").unwrap(), LogOutput::Stderr);
        assert_eq!(
            LogOutput::from_settings("file", "/var/log/switchboard.log").unwrap(),
            LogOutput::File(PathBuf::from("/var/log/switchboard.log"))
        );
        assert!(matches!(
            LogOutput::from_settings("file", ""),
            Err(TelemetryError::InvalidConfig(_))
        ));
        assert!(matches!(
            LogOutput::from_settings("syslog", ""),
            Err(TelemetryError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_file_writer_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("switchboard.log");
        let output = LogOutput::File(path.clone());

        assert!(output.make_writer().is_ok());
        assert!(path.exists());
    }

    #[test]
    fn test_file_writer_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let output = LogOutput::File(dir.path().join("missing").join("switchboard.log"));
        assert!(matches!(output.make_writer(), Err(TelemetryError::Io(_))));
    }

    #[test]
    fn test_create_env_filter_valid() {
        assert!(create_env_filter("info").is_ok());
        assert!(create_env_filter("switchboard_config=debug,warn").is_ok());
    }

    #[test]
    fn test_bootstrap_subscriber_scoped() {
        let subscriber = bootstrap_subscriber("debug").unwrap();
        let value = tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("inside bootstrap scope");
            42
        });
        assert_eq!(value, 42);
    }

    #[test]
    fn test_disabled_logging() {
        let config = LogConfig {
            enabled: false,
            ..Default::default()
        };

        // Should return Ok even when disabled
        let result = init_logging(&config);
        assert!(result.is_ok());
    }
}

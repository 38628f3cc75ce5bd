//! Configuration schema types for the scalar sections.
//!
//! Every section deserializes leniently: missing fields take their zero value
//! and unknown fields are ignored, so documents written for newer releases
//! still load. A section that equals its zero value counts as absent.

use serde::{Deserialize, Serialize};

/// System identity section.
///
/// # Example
///
/// ```
/// use switchboard_config::SystemSettings;
///
/// let system: SystemSettings = serde_yaml::from_str(r#"
///     name: switchboard
///     version: "2.1.0"
///     environment: production
/// "#).unwrap();
/// assert_eq!(system.environment, "production");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct SystemSettings {
    /// Deployment name.
    pub name: String,

    /// Deployment version.
    pub version: String,

    /// Environment name (e.g., "development", "staging", "production").
    pub environment: String,
}

impl SystemSettings {
    /// Whether the section was absent from its document.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Network and worker settings for one service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Whether the service is started.
    pub enabled: bool,

    /// Bind host.
    pub host: String,

    /// Bind port.
    pub port: u16,

    /// Worker count. Zero means "service default".
    pub workers: u32,

    /// Requests per minute accepted by the service. Zero means unlimited.
    pub rate_limit: u32,
}

impl ServiceConfig {
    /// `host:port` bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Per-service settings for the deployment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ServicesConfig {
    /// Core orchestrator routing chats to providers.
    pub core_orchestrator: ServiceConfig,

    /// Public API gateway.
    pub api_gateway: ServiceConfig,

    /// Browser automation proxy.
    pub stealth_proxy: ServiceConfig,

    /// Web frontend.
    pub frontend: ServiceConfig,
}

/// Datastore connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database engine (e.g., "postgresql").
    #[serde(rename = "type")]
    pub kind: String,

    /// Server host.
    pub host: String,

    /// Server port.
    pub port: u16,

    /// Database name.
    pub name: String,

    /// Login user. May carry a `${NAME}` secret placeholder.
    pub username: String,

    /// Login password. May carry a `${NAME}` secret placeholder.
    pub password: String,

    /// TLS mode passed to the driver.
    pub ssl_mode: String,

    /// Connection pool ceiling.
    pub max_connections: u32,
}

/// Cache connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct RedisConfig {
    /// Server host.
    pub host: String,

    /// Server port.
    pub port: u16,

    /// Password. May carry a `${NAME}` secret placeholder.
    pub password: String,

    /// Logical database index.
    pub db: u32,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON formatted logs (production).
    #[default]
    Json,
    /// Human-readable format (development).
    #[serde(alias = "text", alias = "console")]
    Pretty,
}

/// Logging policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level or filter directive (trace, debug, info, warn, error).
    pub level: String,

    /// Log output format.
    pub format: LogFormat,

    /// Output target ("stdout", "stderr" or "file").
    pub output: String,

    /// Log file path when `output` is "file".
    pub file: String,
}

impl LoggingConfig {
    /// Configured level, or "info" when unset.
    pub fn effective_level(&self) -> &str {
        if self.level.is_empty() {
            "info"
        } else {
            &self.level
        }
    }
}

//! Security policy section.
//!
//! The policy is data only. Enforcement lives in the API gateway; this crate
//! resolves the values and expands the secrets it carries (see
//! [`crate::secrets`]).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Security policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct SecurityConfig {
    /// Authentication settings.
    pub authentication: AuthenticationConfig,
    /// Authorization settings.
    pub authorization: AuthorizationConfig,
    /// Encryption settings.
    pub encryption: EncryptionConfig,
    /// Request ceilings.
    pub rate_limiting: RateLimitingConfig,
    /// Input validation.
    pub input_validation: InputValidationConfig,
    /// Audit trail.
    pub audit: SecurityAuditConfig,
    /// HTTP response headers.
    pub headers: HeadersConfig,
    /// Automation-profile safety settings.
    pub stealth_security: StealthSecurityConfig,
}

impl SecurityConfig {
    /// Whether the section was absent from its document.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Authentication settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct AuthenticationConfig {
    /// Token-based auth.
    pub jwt: JwtConfig,

    /// External identity providers by name (e.g., "google", "azure_ad").
    pub oauth2: IndexMap<String, OAuth2Config>,

    /// API-key issuance policy.
    pub api_keys: ApiKeysConfig,
}

/// Token-based auth.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct JwtConfig {
    /// Signing secret. May carry a `${NAME}` secret placeholder.
    pub secret: String,
    /// Access token lifetime (e.g., "24h").
    pub expiration: String,
    /// Refresh token lifetime.
    pub refresh_expiration: String,
    /// Signing algorithm (e.g., "HS256").
    pub algorithm: String,
}

/// External identity provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct OAuth2Config {
    /// Whether sign-in through this provider is offered.
    pub enabled: bool,
    /// Client id. May carry a `${NAME}` secret placeholder.
    pub client_id: String,
    /// Client secret. May carry a `${NAME}` secret placeholder.
    pub client_secret: String,
    /// Requested scopes.
    pub scopes: Vec<String>,
    /// Directory tenant, for providers that need one.
    pub tenant_id: String,
}

/// API-key issuance policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ApiKeysConfig {
    /// Key-encryption key. May carry a `${NAME}` secret placeholder.
    pub encryption_key: String,
    /// Rotation interval (e.g., "90d").
    pub rotation_interval: String,
    /// Ceiling on live keys per user.
    pub max_keys_per_user: u32,
}

/// Authorization settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct AuthorizationConfig {
    /// Role name to permissions.
    pub roles: IndexMap<String, RoleConfig>,
    /// Resource name to permissions.
    pub resources: IndexMap<String, ResourceConfig>,
}

/// Permissions granted by a role.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct RoleConfig {
    /// Permission names.
    pub permissions: Vec<String>,
}

/// Permissions on a resource, per relationship.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ResourceConfig {
    pub owner_permissions: Vec<String>,
    pub shared_permissions: Vec<String>,
    pub admin_permissions: Vec<String>,
    pub user_permissions: Vec<String>,
}

/// Encryption settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct EncryptionConfig {
    /// Storage encryption.
    pub at_rest: AtRestConfig,
    /// Transport encryption.
    pub in_transit: InTransitConfig,
    /// Field-level database encryption.
    pub database: DatabaseEncryptionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct AtRestConfig {
    pub algorithm: String,
    pub key_rotation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct InTransitConfig {
    pub tls_version: String,
    pub cipher_suites: Vec<String>,
}

/// Field-level database encryption.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct DatabaseEncryptionConfig {
    /// Encrypt the listed fields.
    pub encrypt_sensitive_fields: bool,
    /// Column names (e.g., "messages.content").
    pub fields: Vec<String>,
}

/// Request ceilings, global and per scope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct RateLimitingConfig {
    /// Deployment-wide ceiling.
    pub global: GlobalRateLimitConfig,
    /// Ceilings per user tier.
    pub per_user: IndexMap<String, ScopedRateLimitConfig>,
    /// Ceilings per endpoint path.
    pub endpoints: IndexMap<String, ScopedRateLimitConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct GlobalRateLimitConfig {
    pub requests_per_minute: u32,
    pub requests_per_hour: u32,
    pub requests_per_day: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ScopedRateLimitConfig {
    pub requests_per_minute: u32,
    pub requests_per_hour: u32,
}

/// Input validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct InputValidationConfig {
    pub messages: MessageValidationConfig,
    pub file_uploads: FileUploadConfig,
    pub api_parameters: ApiParametersConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct MessageValidationConfig {
    pub max_length: u32,
    pub allowed_formats: Vec<String>,
    pub sanitize_html: bool,
    pub block_scripts: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct FileUploadConfig {
    pub enabled: bool,
    /// Human size (e.g., "10MB").
    pub max_size: String,
    pub allowed_types: Vec<String>,
    pub scan_for_malware: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ApiParametersConfig {
    pub strict_validation: bool,
    pub reject_unknown_fields: bool,
    pub max_nested_depth: u32,
}

/// Audit trail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct SecurityAuditConfig {
    /// Whether audit events are recorded.
    pub enabled: bool,
    /// Event names recorded.
    pub events: Vec<String>,
    /// Audit log storage.
    pub storage: AuditStorageConfig,
    /// Fields attached to every record.
    pub format: AuditFormatConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct AuditStorageConfig {
    #[serde(rename = "type")]
    pub kind: String,
    pub retention: String,
    pub encryption: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct AuditFormatConfig {
    pub timestamp: bool,
    pub user_id: bool,
    pub ip_address: bool,
    pub user_agent: bool,
    pub request_id: bool,
}

/// HTTP response headers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct HeadersConfig {
    /// Cross-origin policy.
    pub cors: CorsConfig,
    /// Hardening headers.
    pub security_headers: SecurityHeadersConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub credentials: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct SecurityHeadersConfig {
    pub x_frame_options: String,
    pub x_content_type_options: String,
    pub x_xss_protection: String,
    pub strict_transport_security: String,
    pub content_security_policy: String,
}

/// Automation-profile safety settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct StealthSecurityConfig {
    pub detection_events: DetectionEventsConfig,
    pub profile_security: ProfileSecurityConfig,
    pub session_security: SessionSecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct DetectionEventsConfig {
    pub log_level: String,
    pub alert_threshold: u32,
    pub auto_rotate_profiles: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ProfileSecurityConfig {
    pub encrypt_profiles: bool,
    pub profile_rotation: String,
    /// Fraction of requests flagged before a profile is retired.
    pub max_detection_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
#[allow(missing_docs)]
pub struct SessionSecurityConfig {
    pub encrypt_sessions: bool,
    pub session_timeout: String,
    pub max_concurrent_sessions: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert!(SecurityConfig::default().is_empty());
    }

    #[test]
    fn test_authentication_deserialize() {
        let yaml = r#"
            authentication:
              jwt:
                secret: "${JWT_SECRET}"
                expiration: 24h
                algorithm: HS256
              oauth2:
                google:
                  enabled: true
                  client_id: "${GOOGLE_CLIENT_ID}"
                  client_secret: "${GOOGLE_CLIENT_SECRET}"
                  scopes: [openid, email]
                azure_ad:
                  enabled: false
                  tenant_id: common
              api_keys:
                encryption_key: "${API_KEY_ENCRYPTION_KEY}"
                max_keys_per_user: 5
        "#;

        let security: SecurityConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(!security.is_empty());

        let auth = &security.authentication;
        assert_eq!(auth.jwt.secret, "${JWT_SECRET}");
        assert_eq!(auth.jwt.algorithm, "HS256");
        let names: Vec<&str> = auth.oauth2.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["google", "azure_ad"]);
        assert_eq!(auth.oauth2["google"].scopes, vec!["openid", "email"]);
        assert_eq!(auth.oauth2["azure_ad"].tenant_id, "common");
        assert_eq!(auth.api_keys.max_keys_per_user, 5);
    }

    #[test]
    fn test_authorization_and_rate_limits() {
        let yaml = r#"
            authorization:
              roles:
                admin:
                  permissions: ["*"]
                user:
                  permissions: [chat.create, chat.read]
              resources:
                conversations:
                  owner_permissions: [read, write, delete]
                  shared_permissions: [read]
            rate_limiting:
              global:
                requests_per_minute: 1000
                requests_per_day: 100000
              per_user:
                free:
                  requests_per_minute: 10
              endpoints:
                /api/chat:
                  requests_per_minute: 30
        "#;

        let security: SecurityConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(security.authorization.roles["user"].permissions.len(), 2);
        assert_eq!(
            security.authorization.resources["conversations"].shared_permissions,
            vec!["read"]
        );
        assert_eq!(security.rate_limiting.global.requests_per_day, 100_000);
        assert_eq!(security.rate_limiting.per_user["free"].requests_per_minute, 10);
        assert_eq!(
            security.rate_limiting.endpoints["/api/chat"].requests_per_minute,
            30
        );
    }
}

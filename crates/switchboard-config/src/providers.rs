//! AI provider entries.
//!
//! A provider is one upstream chat backend (an HTTP API or a web UI driven
//! through the stealth proxy). Providers are ordered by [`ProviderConfig::priority`],
//! where a **lower value is more preferred**.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Upstream endpoint descriptor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL (e.g., `https://api.openai.com/v1`).
    pub base_url: String,

    /// Path appended to the base URL.
    pub endpoint: String,

    /// HTTP method.
    pub method: String,
}

impl ApiConfig {
    /// Full request URL.
    pub fn url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if self.endpoint.is_empty() {
            return base.to_string();
        }
        let endpoint = self.endpoint.trim_start_matches('/');
        format!("{base}/{endpoint}")
    }
}

/// Provider authentication descriptor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct AuthConfig {
    /// Auth kind (e.g., "bearer", "header", "query", "cookie").
    #[serde(rename = "type")]
    pub kind: String,

    /// Credential. May carry a `${NAME}` secret placeholder.
    pub token: String,

    /// Header name when the credential travels in a header.
    pub header: String,

    /// Query parameter name when the credential travels in the URL.
    pub param: String,
}

/// Model parameters sent with every request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ModelConfig {
    /// Model identifier.
    pub name: String,

    /// Completion token limit.
    pub max_tokens: u32,

    /// Sampling temperature.
    pub temperature: f64,

    /// Nucleus-sampling parameter.
    pub top_p: f64,
}

/// Reference to the automation profile a provider is driven with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ProviderStealthConfig {
    /// Name of a [`StealthProfile`](crate::StealthProfile).
    pub profile: String,

    /// Whether requests go through the stealth proxy.
    pub enabled: bool,

    /// Detection score above which the session is rotated.
    pub detection_threshold: f64,
}

/// Provider request ceilings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Requests per minute. Zero means unlimited.
    pub requests_per_minute: u32,

    /// Requests per hour. Zero means unlimited.
    pub requests_per_hour: u32,
}

/// Provider cost parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct CostConfig {
    /// Cost per 1K input tokens.
    #[serde(rename = "input_cost_per_1k_tokens")]
    pub input_cost_per_1k: f64,

    /// Cost per 1K output tokens.
    #[serde(rename = "output_cost_per_1k_tokens")]
    pub output_cost_per_1k: f64,

    /// Daily spending ceiling. Zero means no ceiling.
    pub daily_budget: f64,
}

impl CostConfig {
    /// Cost of one request with the given token counts.
    #[allow(clippy::cast_precision_loss)]
    pub fn estimate(&self, input_tokens: u64, output_tokens: u64) -> f64 {
        (input_tokens as f64 / 1000.0).mul_add(
            self.input_cost_per_1k,
            output_tokens as f64 / 1000.0 * self.output_cost_per_1k,
        )
    }
}

/// One AI provider entry.
///
/// # Example
///
/// ```
/// use switchboard_config::ProviderConfig;
///
/// let provider: ProviderConfig = serde_yaml::from_str(r#"
///     name: openai
///     type: api
///     enabled: true
///     priority: 1
///     api:
///       base_url: https://api.openai.com/v1
///       endpoint: /chat/completions
///       method: POST
/// "#).unwrap();
/// assert_eq!(provider.api.url(), "https://api.openai.com/v1/chat/completions");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ProviderConfig {
    /// Unique provider name. Filled from the mapping key when the entry comes
    /// from the providers document.
    pub name: String,

    /// Provider type tag (e.g., "api", "web").
    #[serde(rename = "type")]
    pub kind: String,

    /// Whether the provider is eligible for routing.
    pub enabled: bool,

    /// Routing priority. Lower is more preferred.
    pub priority: i32,

    /// Endpoint descriptor.
    pub api: ApiConfig,

    /// Authentication descriptor.
    pub auth: AuthConfig,

    /// Model parameters.
    pub model: ModelConfig,

    /// Automation profile reference.
    pub stealth: ProviderStealthConfig,

    /// Rate-limit thresholds.
    pub rate_limit: RateLimitConfig,

    /// Cost parameters.
    pub cost: CostConfig,
}

impl ProviderConfig {
    /// Check numeric parameters: temperature within 0.0..=2.0, top_p within
    /// 0.0..=1.0, and no negative cost.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn check_values(&self) -> Result<(), ConfigError> {
        let field = |suffix: &str| format!("providers.{}.{suffix}", self.name);

        if !(0.0..=2.0).contains(&self.model.temperature) {
            return Err(ConfigError::invalid_value(
                field("model.temperature"),
                "must be between 0.0 and 2.0",
            ));
        }
        if !(0.0..=1.0).contains(&self.model.top_p) {
            return Err(ConfigError::invalid_value(
                field("model.top_p"),
                "must be between 0.0 and 1.0",
            ));
        }

        let cost = &self.cost;
        for (name, value) in [
            ("cost.input_cost_per_1k_tokens", cost.input_cost_per_1k),
            ("cost.output_cost_per_1k_tokens", cost.output_cost_per_1k),
            ("cost.daily_budget", cost.daily_budget),
        ] {
            if value < 0.0 {
                return Err(ConfigError::invalid_value(field(name), "must not be negative"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_join() {
        let api = ApiConfig {
            base_url: "https://claude.ai/".to_string(),
            endpoint: "/api/append_message".to_string(),
            method: "POST".to_string(),
        };
        assert_eq!(api.url(), "https://claude.ai/api/append_message");

        let api = ApiConfig {
            base_url: "https://z.ai".to_string(),
            ..Default::default()
        };
        assert_eq!(api.url(), "https://z.ai");
    }

    #[test]
    fn test_provider_deserialize_full() {
        let yaml = r#"
            type: api
            enabled: true
            priority: 2
            api:
              base_url: https://api.anthropic.com
              endpoint: /v1/messages
              method: POST
            auth:
              type: header
              token: "${ANTHROPIC_API_KEY}"
              header: x-api-key
            model:
              name: claude-3-opus
              max_tokens: 4096
              temperature: 0.7
              top_p: 0.9
            stealth:
              profile: chrome_desktop
              enabled: false
              detection_threshold: 0.8
            rate_limit:
              requests_per_minute: 50
              requests_per_hour: 1000
            cost:
              input_cost_per_1k_tokens: 0.015
              output_cost_per_1k_tokens: 0.075
              daily_budget: 100.0
        "#;

        let provider: ProviderConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(provider.name.is_empty());
        assert_eq!(provider.kind, "api");
        assert_eq!(provider.priority, 2);
        assert_eq!(provider.auth.kind, "header");
        assert_eq!(provider.auth.token, "${ANTHROPIC_API_KEY}");
        assert_eq!(provider.model.max_tokens, 4096);
        assert_eq!(provider.stealth.profile, "chrome_desktop");
        assert_eq!(provider.rate_limit.requests_per_hour, 1000);
        assert!((provider.cost.daily_budget - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cost_estimate() {
        let cost = CostConfig {
            input_cost_per_1k: 0.01,
            output_cost_per_1k: 0.03,
            daily_budget: 0.0,
        };
        let estimate = cost.estimate(2000, 1000);
        assert!((estimate - 0.05).abs() < 1e-9);
    }
}

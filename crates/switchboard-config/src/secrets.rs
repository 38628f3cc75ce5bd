//! Secret placeholder expansion.
//!
//! Secret-bearing fields may embed `${NAME}` placeholders that are resolved
//! against an [`Environment`] once the tree is fully assembled. Only the
//! fields listed in [`for_each_secret`] are expanded; every other string is
//! left exactly as written.
//!
//! An unset variable expands to an empty string. Substituted values are not
//! rescanned, so expansion is single-pass and a string with no placeholder is
//! returned unchanged.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::SwitchboardConfig;

/// Variable lookup used by the expander.
pub trait Environment {
    /// Value of `name`, or `None` when unset.
    fn var(&self, name: &str) -> Option<String>;
}

impl<E: Environment + ?Sized> Environment for &E {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }
}

impl<E: Environment + ?Sized> Environment for Box<E> {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Environment backed by a lookup function.
///
/// ```
/// use switchboard_config::{expand, EnvFn};
///
/// let env = EnvFn(|name: &str| (name == "USER").then(|| "svc".to_string()));
/// assert_eq!(expand("${USER}@db", &env), "svc@db");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EnvFn<F>(pub F);

impl<F> Environment for EnvFn<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn var(&self, name: &str) -> Option<String> {
        (self.0)(name)
    }
}

/// A placeholder that referenced an unset variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedSecret {
    /// Field locator (e.g., `providers.openai.auth.token`).
    pub field: String,
    /// Variable name.
    pub variable: String,
}

/// Outcome of an expansion pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionReport {
    /// Number of fields that contained at least one placeholder.
    pub expanded_fields: usize,
    /// Placeholders whose variable was unset. Values are never recorded.
    pub unresolved: Vec<UnresolvedSecret>,
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid regex"))
}

/// Expand every `${NAME}` placeholder in `value`.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use switchboard_config::expand;
///
/// let env = HashMap::from([("MY_VAR".to_string(), "secret123".to_string())]);
/// assert_eq!(expand("prefix-${MY_VAR}-suffix", &env), "prefix-secret123-suffix");
/// assert_eq!(expand("prefix-${UNSET}-suffix", &env), "prefix--suffix");
/// ```
pub fn expand<E: Environment + ?Sized>(value: &str, env: &E) -> String {
    expand_with(value, env, |_| {})
}

fn expand_with<E, F>(value: &str, env: &E, mut on_unset: F) -> String
where
    E: Environment + ?Sized,
    F: FnMut(&str),
{
    placeholder_pattern()
        .replace_all(value, |caps: &Captures<'_>| {
            let name = &caps[1];
            env.var(name).unwrap_or_else(|| {
                on_unset(name);
                String::new()
            })
        })
        .into_owned()
}

/// Whether `value` contains at least one placeholder.
pub fn has_placeholder(value: &str) -> bool {
    placeholder_pattern().is_match(value)
}

/// Visit every secret-bearing field with its locator.
///
/// The set is fixed: datastore credentials, the cache password, every
/// provider's auth token, the JWT secret, every OAuth2 client id and secret,
/// and the API-key encryption key.
pub(crate) fn for_each_secret<F>(config: &mut SwitchboardConfig, mut visit: F)
where
    F: FnMut(&str, &mut String),
{
    visit("database.username", &mut config.database.username);
    visit("database.password", &mut config.database.password);
    visit("redis.password", &mut config.redis.password);

    for provider in &mut config.providers {
        let field = format!("providers.{}.auth.token", provider.name);
        visit(&field, &mut provider.auth.token);
    }

    let auth = &mut config.security.authentication;
    visit("security.authentication.jwt.secret", &mut auth.jwt.secret);

    for (name, oauth) in &mut auth.oauth2 {
        let field = format!("security.authentication.oauth2.{name}.client_id");
        visit(&field, &mut oauth.client_id);
        let field = format!("security.authentication.oauth2.{name}.client_secret");
        visit(&field, &mut oauth.client_secret);
    }

    visit(
        "security.authentication.api_keys.encryption_key",
        &mut auth.api_keys.encryption_key,
    );
}

/// Expand placeholders in every secret-bearing field of `config`.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use switchboard_config::{expand_secrets, SwitchboardConfig};
///
/// let mut config = SwitchboardConfig::default();
/// config.redis.password = "${REDIS_PASSWORD}".to_string();
///
/// let env = HashMap::from([("REDIS_PASSWORD".to_string(), "s3cret".to_string())]);
/// let report = expand_secrets(&mut config, &env);
///
/// assert_eq!(config.redis.password, "s3cret");
/// assert_eq!(report.expanded_fields, 1);
/// assert!(report.unresolved.is_empty());
/// ```
pub fn expand_secrets<E: Environment + ?Sized>(
    config: &mut SwitchboardConfig,
    env: &E,
) -> ExpansionReport {
    let mut report = ExpansionReport::default();

    for_each_secret(config, |field, value| {
        if !has_placeholder(value) {
            return;
        }
        report.expanded_fields += 1;
        let expanded = expand_with(value, env, |variable| {
            report.unresolved.push(UnresolvedSecret {
                field: field.to_string(),
                variable: variable.to_string(),
            });
        });
        *value = expanded;
    });

    report
}
